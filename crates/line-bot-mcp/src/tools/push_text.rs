//! Push text message tool

use async_trait::async_trait;
use line_bot_api::Message;
use line_bot_core::{Error, Result, SchemaBuilder, Tool, ToolResult};
use serde::Deserialize;
use serde_json::Value;

use super::{parse_args, RecipientArgs, ToolContext};

/// Maximum text length accepted by LINE, in UTF-16 code units
pub const MAX_TEXT_LENGTH: usize = 5000;

#[derive(Debug, Deserialize)]
struct PushTextArgs {
    #[serde(flatten)]
    recipient: RecipientArgs,
    message: TextMessageArgs,
}

#[derive(Debug, Deserialize)]
struct TextMessageArgs {
    #[serde(rename = "type", default)]
    _kind: TextKind,
    text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TextKind {
    #[default]
    Text,
}

/// Push a plain text message to a user or group
pub struct PushTextMessageTool {
    context: ToolContext,
}

impl PushTextMessageTool {
    pub fn new(context: ToolContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for PushTextMessageTool {
    fn name(&self) -> &str {
        "push_text_message"
    }

    fn description(&self) -> &str {
        "Push a simple text message to user via LINE. Use this for sending plain text messages without formatting."
    }

    fn input_schema(&self) -> Value {
        let message = SchemaBuilder::object(
            vec![
                ("type", SchemaBuilder::literal("text")),
                (
                    "text",
                    SchemaBuilder::bounded_string(
                        "The plain text content to send to the user.",
                        MAX_TEXT_LENGTH,
                    ),
                ),
            ],
            &["text"],
        );

        let mut properties = self.context.recipient_properties();
        properties.push(("message", message));
        SchemaBuilder::object(properties, &["message"])
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let args: PushTextArgs = parse_args(input)?;

        // LINE counts characters in UTF-16 code units
        let length = args.message.text.encode_utf16().count();
        if length > MAX_TEXT_LENGTH {
            return Err(Error::InvalidArguments(format!(
                "message.text must be at most {} characters (got {})",
                MAX_TEXT_LENGTH, length
            )));
        }

        self.context
            .push(&args.recipient, Message::text(args.message.text))
            .await
    }
}
