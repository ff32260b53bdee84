use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

const LOG_FILE_NAME: &str = "unity_mcp_bridge.log";

/// Initialize logging based on whether we're running tests or the main application
pub fn init_logging() {
    if cfg!(test) {
        init_test_logging();
    } else {
        // stdout carries the MCP stream, so the bridge logs to a file
        init_file_logging();
    }
}

/// Initialize logging for tests (output to stdout)
fn init_test_logging() {
    let _ = stdout_builder().parse_env("RUST_LOG").try_init();
}

/// Debug-level stdout logger; filters parsed afterwards override the level
fn stdout_builder() -> Builder {
    let mut builder = Builder::new();
    builder
        .target(Target::Stdout)
        .filter_level(LevelFilter::Debug)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        });
    builder
}

/// Initialize logging for the application (output to file)
fn init_file_logging() {
    let log_dir = get_log_directory();

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory: {}", e);
        return;
    }

    let log_file = log_dir.join(LOG_FILE_NAME);
    let target = match fs::OpenOptions::new().create(true).append(true).open(&log_file) {
        Ok(file) => Box::new(file),
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file.display(), e);
            return;
        }
    };

    let mut builder = Builder::new();
    builder
        .target(Target::Pipe(target))
        .filter_level(LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] [{}:{}] {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        });

    if builder.try_init().is_ok() {
        log::info!("Logging initialized to file: {}", log_file.display());
    }
}

/// Get the appropriate log directory based on the operating system
fn get_log_directory() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join("UnityMcpBridge")
    } else {
        PathBuf::from("./logs")
    }
}

#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}
