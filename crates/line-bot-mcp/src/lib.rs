//! line-bot-mcp: LINE Messaging API tools over MCP
//!
//! LINE の push / profile API を MCP ツールとして公開するゲートウェイです。
//! 引数はスキーマに従って検証され、検証を通過した呼び出しだけが LINE API に転送されます。

pub mod gateway;
pub mod recipient;
pub mod server;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use gateway::LineGateway;
pub use recipient::{resolve_recipient, RecipientSource, ResolvedRecipient};
pub use tools::{register_line_tools, ToolContext};
