// Tool invocation errors surfaced as JSON-RPC errors

use crate::protocol::JsonRpcError;

/// Failure of a tool invocation that is reported as a protocol error rather
/// than as tool output.
///
/// Upstream HTTP failures are not represented here: tools turn those into a
/// `CallToolResult` with the error flag set.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// No tool is registered under the requested name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments do not match the tool's input contract.
    #[error("{0}")]
    InvalidParams(String),

    /// Anything the tool did not anticipate.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ToolError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    /// JSON-RPC error the host returns to the caller.
    pub fn to_rpc_error(&self) -> JsonRpcError {
        match self {
            Self::UnknownTool(name) => JsonRpcError::unknown_tool(name),
            Self::InvalidParams(message) => JsonRpcError::invalid_params(message.clone()),
            Self::Unexpected(e) => JsonRpcError::internal_error(format!("{:#}", e)),
        }
    }
}
