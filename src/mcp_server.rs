use crate::bridge_config::BridgeConfig;
use crate::invocation_gateway::{GatewayError, InvocationResult, ToolExecutor, UnityHttpGateway};
use crate::tool_catalogue::{ToolCatalogue, ToolDescriptor};
use log::{debug, warn};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::*,
    service::RequestContext,
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// MCP server exposing the Unity tool catalogue and forwarding calls to the Unity Editor
pub struct UnityMcpBridgeServer<E = UnityHttpGateway> {
    catalogue: Arc<ToolCatalogue>,
    executor: Arc<E>,
    validate_arguments: bool,
}

impl<E> Clone for UnityMcpBridgeServer<E> {
    fn clone(&self) -> Self {
        Self {
            catalogue: Arc::clone(&self.catalogue),
            executor: Arc::clone(&self.executor),
            validate_arguments: self.validate_arguments,
        }
    }
}

impl UnityMcpBridgeServer<UnityHttpGateway> {
    pub fn new(config: &BridgeConfig, catalogue: ToolCatalogue) -> Result<Self, GatewayError> {
        let gateway = UnityHttpGateway::new(config)?;
        Ok(Self::with_executor(gateway, catalogue, config.validate_arguments))
    }
}

impl<E: ToolExecutor> UnityMcpBridgeServer<E> {
    pub fn with_executor(executor: E, catalogue: ToolCatalogue, validate_arguments: bool) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
            executor: Arc::new(executor),
            validate_arguments,
        }
    }

    pub fn catalogue(&self) -> &ToolCatalogue {
        &self.catalogue
    }

    /// Every catalogue entry in its MCP form
    pub fn enumerate(&self) -> Vec<Tool> {
        self.catalogue.list_tools().iter().map(to_mcp_tool).collect()
    }

    /// Runs one tool call and renders it as a content block.
    ///
    /// Never fails: transport problems, Unity errors and panics inside the
    /// executor all come back as an `Error: ...` text block.
    pub async fn invoke_tool(&self, name: &str, arguments: Option<Map<String, Value>>) -> CallToolResult {
        let arguments = arguments.unwrap_or_default();

        let result = match self.check_arguments(name, &arguments) {
            Some(failure) => failure,
            None => self.dispatch(name, arguments).await,
        };

        render(&result)
    }

    /// Schema check for known tools, when enabled
    fn check_arguments(&self, name: &str, arguments: &Map<String, Value>) -> Option<InvocationResult> {
        let Some(descriptor) = self.catalogue.get(name) else {
            warn!("Tool {} is not in the catalogue, forwarding anyway", name);
            return None;
        };

        if !self.validate_arguments {
            return None;
        }

        descriptor.input_schema.validate(arguments).err().map(|violation| {
            InvocationResult::Failure(GatewayError::InvalidArguments {
                tool: name.to_string(),
                violation,
            })
        })
    }

    async fn dispatch(&self, name: &str, arguments: Map<String, Value>) -> InvocationResult {
        let executor = Arc::clone(&self.executor);
        let tool_name = name.to_string();

        // A spawned task turns a panic in the executor into a JoinError instead of
        // unwinding through the protocol loop
        let handle = tokio::spawn(async move { executor.invoke(&tool_name, arguments).await });

        match handle.await {
            Ok(result) => result,
            Err(e) => {
                warn!("Invocation of {} aborted: {}", name, e);
                InvocationResult::Failure(GatewayError::Internal(e.to_string()))
            }
        }
    }
}

fn to_mcp_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool::new(
        descriptor.name.clone(),
        descriptor.description.clone(),
        Arc::new(descriptor.input_schema.to_json_object()),
    )
}

fn render(result: &InvocationResult) -> CallToolResult {
    let text = Content::text(result.render());
    if result.is_success() {
        CallToolResult::success(vec![text])
    } else {
        CallToolResult::error(vec![text])
    }
}

impl<E: ToolExecutor> ServerHandler for UnityMcpBridgeServer<E> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Controls a running Unity Editor. Requires the Unity MCP listener to be started inside the editor.".into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.enumerate(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Calling tool {}", request.name);
        Ok(self.invoke_tool(&request.name, request.arguments).await)
    }
}

#[cfg(test)]
#[path = "mcp_server_tests.rs"]
mod tests;
