//! LINE Messaging API types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Outbound message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "lowercase")]
pub enum Message {
    Text {
        text: String,
    },
    Flex {
        #[serde(rename = "altText")]
        alt_text: String,
        contents: FlexContainer,
    },
}

impl Message {
    /// Create a plain text message
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a flex message
    pub fn flex(alt_text: impl Into<String>, contents: FlexContainer) -> Self {
        Self::Flex {
            alt_text: alt_text.into(),
            contents,
        }
    }
}

/// Flex container layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexContainerKind {
    /// Single container
    Bubble,
    /// Multiple swipeable bubbles
    Carousel,
}

impl FlexContainerKind {
    pub const ALL: [&'static str; 2] = ["bubble", "carousel"];
}

/// Flex container
///
/// Only the `type` discriminator is typed. Everything else (header, hero,
/// body, footer, styles, nested bubbles) is passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexContainer {
    #[serde(rename = "type")]
    pub kind: FlexContainerKind,
    #[serde(flatten)]
    pub body: Map<String, JsonValue>,
}

/// Push message request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessageRequest {
    pub to: String,
    pub messages: Vec<Message>,
}

impl PushMessageRequest {
    /// Create a request carrying a single message
    pub fn single(to: impl Into<String>, message: Message) -> Self {
        Self {
            to: to.into(),
            messages: vec![message],
        }
    }
}

/// Push message response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessageResponse {
    #[serde(default)]
    pub sent_messages: Vec<SentMessage>,
}

/// A message accepted by the LINE platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_token: Option<String>,
}

/// LINE user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Fields added by the platform later on
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}
