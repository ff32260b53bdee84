//! Unity MCP Bridge
//!
//! A Model Context Protocol (MCP) server that exposes Unity Editor control tools
//! and forwards every tool call over HTTP to a listener running inside the editor.

pub mod bridge_config;
pub mod invocation_gateway;
pub mod logging;
pub mod mcp_server;
pub mod tool_catalogue;
pub mod tool_schema;

#[cfg(test)]
mod test_utils;

pub use bridge_config::BridgeConfig;
pub use invocation_gateway::{GatewayError, InvocationResult, ToolExecutor, UnityHttpGateway};
pub use mcp_server::UnityMcpBridgeServer;
pub use tool_catalogue::{ToolCatalogue, ToolCategory, ToolDescriptor};
