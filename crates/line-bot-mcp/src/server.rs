//! MCP server handler
//!
//! rmcp の `ServerHandler` として `tools/list` と `tools/call` を公開します。

use std::borrow::Cow;

use line_bot_core::{Error, ToolDefinition, ToolResult};
use rmcp::{
    ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, Content, ErrorData, Implementation,
        ListToolsResult, PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
    },
    service::{RequestContext, RoleServer},
};
use serde_json::Value as JsonValue;

use crate::gateway::LineGateway;

/// Server name reported during MCP initialization
pub const SERVER_NAME: &str = "line-bot";

impl LineGateway {
    /// Tool catalog in rmcp form
    pub fn mcp_tools(&self) -> Vec<Tool> {
        self.definitions().into_iter().map(to_mcp_tool).collect()
    }

    /// Handle a `tools/call` request
    pub async fn dispatch(&self, request: CallToolRequestParams) -> Result<CallToolResult, ErrorData> {
        match self.invoke(&request.name, request.arguments).await {
            Ok(result) => Ok(to_call_tool_result(result)),
            Err(e) => {
                tracing::warn!(tool = %request.name, error = %e, "Tool call failed");
                Err(to_error_data(e))
            }
        }
    }
}

fn to_mcp_tool(definition: ToolDefinition) -> Tool {
    let schema = match definition.input_schema {
        JsonValue::Object(schema) => schema,
        _ => Default::default(),
    };
    Tool::new(definition.name, definition.description, schema)
}

fn to_call_tool_result(result: ToolResult) -> CallToolResult {
    let content = vec![Content::text(result.output)];
    if result.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

/// Map gateway errors onto JSON-RPC errors
fn to_error_data(error: Error) -> ErrorData {
    let message: Cow<'static, str> = error.to_string().into();
    match error {
        Error::InvalidArguments(_) | Error::ToolExecution(_) => {
            ErrorData::invalid_params(message, None)
        }
        _ => ErrorData::internal_error(message, None),
    }
}

impl ServerHandler for LineGateway {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = SERVER_NAME.to_string();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();

        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info = server_info;
        info.instructions = Some(
            "Send LINE text and flex messages, look up user profiles, and list known group names."
                .to_string(),
        );
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.mcp_tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatch(request).await
    }
}
