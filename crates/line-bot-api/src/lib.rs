//! line-bot-api: LINE Messaging API client
//!
//! LINE Messaging API の push / profile エンドポイントを呼び出すクライアントです。
//! 認証・リトライ・レート制限はこのクライアントの責務です。

pub mod api;
pub mod error;
pub mod types;

pub use api::{LineApiClient, MessagingApi, user_agent};
pub use error::{LineError, Result};
pub use types::{
    FlexContainer, FlexContainerKind, Message, PushMessageRequest, PushMessageResponse,
    SentMessage, UserProfile,
};
