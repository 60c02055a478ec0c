//! Tool system for MCP tool calls
//!
//! Tools are registered once at startup and looked up by name
//! for every `tools/call` request.

pub mod definition;
pub mod manager;
pub mod traits;

pub use definition::{SchemaBuilder, ToolDefinition};
pub use manager::ToolManager;
pub use traits::{Tool, ToolResult};
