use crate::bridge_config::BridgeConfig;
use std::net::TcpListener;
use std::sync::Once;
use std::time::Duration;

static INIT_LOGGING: Once = Once::new();

/// Routes log output to stdout once per test binary
pub fn init_test_logging() {
    INIT_LOGGING.call_once(crate::logging::init_logging);
}

/// Config pointing at a stub listener with a short timeout
pub fn stub_config(base_url: &str) -> BridgeConfig {
    init_test_logging();
    BridgeConfig::default()
        .with_unity_url(base_url)
        .with_timeout(Duration::from_secs(5))
}

/// A local URL with nothing listening behind it
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    let port = listener.local_addr().expect("Failed to read local address").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
