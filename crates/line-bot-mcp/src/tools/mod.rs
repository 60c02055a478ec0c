//! LINE tools
//!
//! - `push_text_message` - push a plain text message
//! - `push_flex_message` - push a bubble or carousel flex message
//! - `get_profile` - read a user profile
//! - `list_groups` - list the static group name table

pub mod get_profile;
pub mod list_groups;
pub mod push_flex;
pub mod push_text;

pub use get_profile::GetProfileTool;
pub use list_groups::ListGroupsTool;
pub use push_flex::PushFlexMessageTool;
pub use push_text::PushTextMessageTool;

use std::sync::Arc;

use line_bot_api::{LineError, Message, MessagingApi, PushMessageRequest};
use line_bot_core::{Error, ErrorMode, GatewayConfig, Result, SchemaBuilder, ToolManager, ToolResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use crate::recipient::resolve_recipient;

/// Error tag reported when a push call fails
pub const SEND_FAILED: &str = "Failed to send message";

/// Error tag reported when a profile lookup fails
pub const PROFILE_FAILED: &str = "Failed to get profile";

/// Shared, read-only state handed to every tool
#[derive(Clone)]
pub struct ToolContext {
    pub api: Arc<dyn MessagingApi>,
    pub config: Arc<GatewayConfig>,
}

impl ToolContext {
    pub fn new(api: Arc<dyn MessagingApi>, config: Arc<GatewayConfig>) -> Self {
        Self { api, config }
    }

    /// Report a failed remote call according to the configured error mode
    pub(crate) fn remote_failure(&self, tag: &str, err: LineError) -> Result<ToolResult> {
        tracing::error!(error = %err, "{}", tag);

        match self.config.error_mode {
            ErrorMode::Catch => Ok(ToolResult::json_error(&json!({
                "error": tag,
                "details": err.to_string(),
            }))),
            ErrorMode::Propagate => Err(Error::Remote(err.to_string())),
        }
    }

    /// Resolve the recipient and push a single message
    pub(crate) async fn push(&self, recipient: &RecipientArgs, message: Message) -> Result<ToolResult> {
        let target = resolve_recipient(
            &self.config,
            recipient.user_id.as_deref(),
            recipient.group_name.as_deref(),
        );
        tracing::debug!(to = %target.id, source = ?target.source, "Resolved recipient");

        let request = PushMessageRequest::single(target.id, message);
        match self.api.push_message(&request).await {
            Ok(response) => Ok(ToolResult::json(&json!({
                "result": "Message sent successfully",
                "sentMessages": response.sent_messages,
            }))),
            Err(e) => self.remote_failure(SEND_FAILED, e),
        }
    }

    /// Schema properties shared by the push tools
    pub(crate) fn recipient_properties(&self) -> Vec<(&'static str, JsonValue)> {
        let mut properties = vec![(
            "userId",
            SchemaBuilder::string("The user ID to receive a message. Defaults to DESTINATION_USER_ID."),
        )];
        if self.config.group_resolution {
            properties.push((
                "groupName",
                SchemaBuilder::string(
                    "The group name from mapping table. Will override userId if provided.",
                ),
            ));
        }
        properties
    }
}

/// Recipient fields shared by the push tools
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecipientArgs {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
}

/// Deserialize tool arguments; a missing argument object counts as empty
pub(crate) fn parse_args<T: DeserializeOwned>(input: JsonValue) -> Result<T> {
    let input = match input {
        JsonValue::Null => JsonValue::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(input).map_err(|e| Error::InvalidArguments(e.to_string()))
}

/// Register the LINE tools with the tool manager
///
/// `list_groups` is only registered when group resolution is enabled.
pub fn register_line_tools(manager: &mut ToolManager, context: ToolContext) {
    manager.register(Arc::new(PushTextMessageTool::new(context.clone())));
    manager.register(Arc::new(PushFlexMessageTool::new(context.clone())));
    manager.register(Arc::new(GetProfileTool::new(context.clone())));
    if context.config.group_resolution {
        manager.register(Arc::new(ListGroupsTool::new(context.config)));
    }
}
