//! Push flex message tool

use async_trait::async_trait;
use line_bot_api::{FlexContainer, FlexContainerKind, Message};
use line_bot_core::{Result, SchemaBuilder, Tool, ToolResult};
use serde::Deserialize;
use serde_json::Value;

use super::{parse_args, RecipientArgs, ToolContext};

#[derive(Debug, Deserialize)]
struct PushFlexArgs {
    #[serde(flatten)]
    recipient: RecipientArgs,
    message: FlexMessageArgs,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlexMessageArgs {
    #[serde(rename = "type", default)]
    _kind: FlexKind,
    alt_text: String,
    contents: FlexContainer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum FlexKind {
    #[default]
    Flex,
}

/// Push a bubble or carousel flex message to a user or group
pub struct PushFlexMessageTool {
    context: ToolContext,
}

impl PushFlexMessageTool {
    pub fn new(context: ToolContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for PushFlexMessageTool {
    fn name(&self) -> &str {
        "push_flex_message"
    }

    fn description(&self) -> &str {
        "Push a highly customizable flex message to user via LINE. Supports both bubble (single container) and carousel (multiple swipeable bubbles) layouts."
    }

    fn input_schema(&self) -> Value {
        let contents = SchemaBuilder::open_object(
            vec![(
                "type",
                SchemaBuilder::string_enum(
                    &FlexContainerKind::ALL,
                    "Type of the container. 'bubble' for single container, 'carousel' for multiple swipeable bubbles.",
                ),
            )],
            &["type"],
            "Flexible container structure following LINE Flex Message format. For 'bubble' type, can include header, hero, body, footer, and styles sections. For 'carousel' type, includes an array of bubble containers in the 'contents' property.",
        );

        let message = SchemaBuilder::object(
            vec![
                ("type", SchemaBuilder::literal("flex")),
                (
                    "altText",
                    SchemaBuilder::string(
                        "Alternative text shown when flex message cannot be displayed.",
                    ),
                ),
                ("contents", contents),
            ],
            &["altText", "contents"],
        );

        let mut properties = self.context.recipient_properties();
        properties.push(("message", message));
        SchemaBuilder::object(properties, &["message"])
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let args: PushFlexArgs = parse_args(input)?;

        tracing::debug!(layout = ?args.message.contents.kind, "Pushing flex message");

        let message = Message::flex(args.message.alt_text, args.message.contents);
        self.context.push(&args.recipient, message).await
    }
}
