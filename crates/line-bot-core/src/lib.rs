//! line-bot-core: LINE Bot MCP Server Core Library
//!
//! 設定の読み込み、エラー型、ツールシステムのコア機能を提供します。

pub mod config;
pub mod error;
pub mod tool;

pub use config::{Config, ErrorMode, GatewayConfig, GroupMappings, LineConfig};
pub use error::{Error, Result};
pub use tool::{SchemaBuilder, Tool, ToolDefinition, ToolManager, ToolResult};
