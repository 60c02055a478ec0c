//! Tool gateway
//!
//! Owns the fixed tool catalog and dispatches invocations to it.

use std::sync::Arc;

use line_bot_api::MessagingApi;
use line_bot_core::{GatewayConfig, Result, ToolDefinition, ToolManager, ToolResult};
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, info};

use crate::tools::{register_line_tools, ToolContext};

/// LINE tool gateway
///
/// Every invocation is independent; the only shared state is the
/// read-only configuration and the API client handle.
pub struct LineGateway {
    tools: ToolManager,
    config: Arc<GatewayConfig>,
}

impl LineGateway {
    /// Create a gateway and register its tools
    pub fn new(api: Arc<dyn MessagingApi>, config: GatewayConfig) -> Self {
        let config = Arc::new(config);
        let mut tools = ToolManager::new();
        register_line_tools(&mut tools, ToolContext::new(api, Arc::clone(&config)));

        info!(
            tools = ?tools.tool_names(),
            groups = config.groups.len(),
            group_resolution = config.group_resolution,
            error_mode = ?config.error_mode,
            "LINE gateway initialized"
        );

        Self { tools, config }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Definitions of all registered tools, ordered by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.definitions()
    }

    /// Invoke a tool by name
    ///
    /// # Errors
    /// `ToolExecution` for an unknown tool, `InvalidArguments` when the
    /// arguments fail validation, and `Remote` for remote failures in
    /// propagate mode.
    pub async fn invoke(&self, name: &str, arguments: Option<Map<String, JsonValue>>) -> Result<ToolResult> {
        debug!(tool = name, "Invoking tool");

        let input = arguments.map(JsonValue::Object).unwrap_or(JsonValue::Null);
        self.tools.execute(name, input).await
    }
}
