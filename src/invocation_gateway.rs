use crate::bridge_config::BridgeConfig;
use crate::tool_schema::SchemaViolation;
use crate::{debug_log, warn_log};
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use std::future::Future;

/// Body of one request to the Unity Editor listener
#[derive(Debug, Clone, Serialize)]
pub struct InvocationRequest {
    pub tool: String,
    pub args: Map<String, Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Request to Unity timed out. Is Unity Editor running?")]
    Timeout,
    #[error("Cannot connect to Unity. Make sure Unity Editor is running and MCP Server is started.")]
    Unreachable,
    /// Failure reported by the listener itself (`"success": false`)
    #[error("{0}")]
    Executor(String),
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Unexpected response from Unity: {0}")]
    UnexpectedResponse(String),
    #[error("{0}")]
    Transport(reqwest::Error),
    #[error("Invalid arguments for {tool}: {violation}")]
    InvalidArguments {
        tool: String,
        violation: SchemaViolation,
    },
    #[error("{0}")]
    Internal(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else if err.is_connect() {
            GatewayError::Unreachable
        } else {
            GatewayError::Transport(err)
        }
    }
}

/// Outcome of a single tool invocation
#[derive(Debug)]
pub enum InvocationResult {
    /// The full response object returned by Unity
    Success(Value),
    Failure(GatewayError),
}

impl InvocationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationResult::Success(_))
    }

    /// Text shown to the protocol client: pretty JSON on success, `Error: ...` otherwise
    pub fn render(&self) -> String {
        match self {
            InvocationResult::Success(payload) => {
                serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
            }
            InvocationResult::Failure(err) => format!("Error: {}", err),
        }
    }
}

/// Something that can execute a named tool with JSON arguments.
///
/// Implementations must not fail: every outcome is reported through
/// `InvocationResult`.
pub trait ToolExecutor: Send + Sync + 'static {
    fn invoke(
        &self,
        tool_name: &str,
        arguments: Map<String, Value>,
    ) -> impl Future<Output = InvocationResult> + Send;
}

/// Forwards tool calls to the Unity Editor listener over HTTP.
///
/// Holds no per-call state; one instance is shared by every invocation.
#[derive(Debug, Clone)]
pub struct UnityHttpGateway {
    client: Client,
    endpoint: String,
}

impl UnityHttpGateway {
    pub fn new(config: &BridgeConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .no_proxy()
            .build()
            .map_err(GatewayError::Transport)?;

        Ok(Self {
            client,
            endpoint: config.unity_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one tool call to Unity and normalizes the outcome.
    ///
    /// The tool name is not checked against the catalogue; Unity decides
    /// whether the name and arguments are acceptable.
    pub async fn invoke(&self, tool_name: &str, arguments: Map<String, Value>) -> InvocationResult {
        let request = InvocationRequest {
            tool: tool_name.to_string(),
            args: arguments,
        };

        match self.send(&request).await {
            Ok(response) => InvocationResult::Success(response),
            Err(err) => {
                warn_log!("Tool {} failed: {}", tool_name, err);
                InvocationResult::Failure(err)
            }
        }
    }

    async fn send(&self, request: &InvocationRequest) -> Result<Value, GatewayError> {
        debug_log!("Forwarding {} to {}", request.tool, self.endpoint);

        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug_log!("Unity answered {} with {} bytes", status, body.len());

        let value: Value = serde_json::from_str(&body)?;
        interpret_response(value)
    }
}

impl ToolExecutor for UnityHttpGateway {
    fn invoke(
        &self,
        tool_name: &str,
        arguments: Map<String, Value>,
    ) -> impl Future<Output = InvocationResult> + Send {
        UnityHttpGateway::invoke(self, tool_name, arguments)
    }
}

/// Maps a decoded listener response onto success or an executor failure
pub fn interpret_response(value: Value) -> Result<Value, GatewayError> {
    let Value::Object(fields) = &value else {
        return Err(GatewayError::UnexpectedResponse(format!(
            "expected a JSON object, got {}",
            value
        )));
    };

    if fields.get("success").and_then(Value::as_bool) == Some(true) {
        return Ok(value);
    }

    let message = match fields.get("error") {
        None | Some(Value::Null) => "Unknown error".to_string(),
        Some(Value::String(message)) => message.clone(),
        Some(other) => other.to_string(),
    };
    Err(GatewayError::Executor(message))
}

#[cfg(test)]
#[path = "invocation_gateway_tests.rs"]
mod tests;
