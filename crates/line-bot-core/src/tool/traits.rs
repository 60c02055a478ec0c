//! Tool trait definition

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::Result;

/// Tool execution result
///
/// `output` is the text content handed back to the MCP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    /// Output text (a serialized JSON document for every LINE tool)
    pub output: String,
    /// Whether the output describes a failure
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    pub fn error(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: true,
        }
    }

    /// Create a successful result from a JSON document
    pub fn json(value: &JsonValue) -> Self {
        Self::success(value.to_string())
    }

    /// Create an error result from a JSON document
    pub fn json_error(value: &JsonValue) -> Self {
        Self::error(value.to_string())
    }
}

/// A named, schema-described operation exposed to MCP clients
///
/// Implementations are immutable after construction; any shared state
/// they read must be read-only.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name (as listed in `tools/list`)
    fn name(&self) -> &str;

    /// Human-readable description shown to the calling model
    fn description(&self) -> &str;

    /// JSON schema for the tool's input arguments
    fn input_schema(&self) -> JsonValue;

    /// Execute the tool
    ///
    /// # Errors
    /// `Error::InvalidArguments` when `input` does not match the schema.
    /// Any other error is returned only when the tool is configured to
    /// propagate remote failures instead of reporting them in the result.
    async fn execute(&self, input: JsonValue) -> Result<ToolResult>;
}
