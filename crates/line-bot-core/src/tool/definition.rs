//! Tool definition and schema helpers

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

/// Tool definition as advertised to MCP clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: JsonValue,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: JsonValue,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Helper functions for creating tool schemas
pub struct SchemaBuilder;

impl SchemaBuilder {
    /// Create an object schema from named property schemas
    ///
    /// # Example
    /// ```ignore
    /// let schema = SchemaBuilder::object(
    ///     vec![("userId", SchemaBuilder::string("The user ID"))],
    ///     &[],
    /// );
    /// ```
    pub fn object(properties: Vec<(&str, JsonValue)>, required: &[&str]) -> JsonValue {
        let props: Map<String, JsonValue> = properties
            .into_iter()
            .map(|(name, schema)| (name.to_string(), schema))
            .collect();

        json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }

    /// Create an object schema that also accepts properties it does not list
    pub fn open_object(
        properties: Vec<(&str, JsonValue)>,
        required: &[&str],
        description: &str,
    ) -> JsonValue {
        let mut schema = Self::object(properties, required);
        schema["additionalProperties"] = JsonValue::Bool(true);
        schema["description"] = JsonValue::String(description.to_string());
        schema
    }

    /// Schema for a tool without arguments
    pub fn empty_object() -> JsonValue {
        Self::object(Vec::new(), &[])
    }

    /// Create a string schema with a description
    pub fn string(description: &str) -> JsonValue {
        json!({
            "type": "string",
            "description": description
        })
    }

    /// Create a string schema with a maximum length
    pub fn bounded_string(description: &str, max_length: usize) -> JsonValue {
        json!({
            "type": "string",
            "maxLength": max_length,
            "description": description
        })
    }

    /// Create a string schema accepting exactly one value, which is also its default
    pub fn literal(value: &str) -> JsonValue {
        json!({
            "type": "string",
            "const": value,
            "default": value
        })
    }

    /// Create a string enum schema
    pub fn string_enum(enum_values: &[&str], description: &str) -> JsonValue {
        json!({
            "type": "string",
            "enum": enum_values,
            "description": description
        })
    }
}
