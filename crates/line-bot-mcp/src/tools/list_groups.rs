//! List groups tool

use std::sync::Arc;

use async_trait::async_trait;
use line_bot_core::{GatewayConfig, Result, SchemaBuilder, Tool, ToolResult};
use serde_json::{json, Value};

/// List the static group name → ID table
///
/// Reads process memory only; never calls the LINE API.
pub struct ListGroupsTool {
    config: Arc<GatewayConfig>,
}

impl ListGroupsTool {
    pub fn new(config: Arc<GatewayConfig>) -> Self {
        Self { config }
    }

    fn summary(&self) -> String {
        if self.config.groups.is_empty() {
            return "No available groups in mapping table".to_string();
        }

        let lines: Vec<String> = self
            .config
            .groups
            .iter()
            .map(|(name, id)| format!("- {} (ID: {})", name, id))
            .collect();
        format!("Available groups:\n{}", lines.join("\n"))
    }
}

#[async_trait]
impl Tool for ListGroupsTool {
    fn name(&self) -> &str {
        "list_groups"
    }

    fn description(&self) -> &str {
        "List all available group names from the mapping table."
    }

    fn input_schema(&self) -> Value {
        SchemaBuilder::empty_object()
    }

    async fn execute(&self, _input: Value) -> Result<ToolResult> {
        Ok(ToolResult::json(&json!({
            "groups": self.config.groups,
            "message": self.summary(),
        })))
    }
}
