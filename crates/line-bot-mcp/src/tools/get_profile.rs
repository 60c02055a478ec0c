//! Get profile tool

use async_trait::async_trait;
use line_bot_core::{Result, SchemaBuilder, Tool, ToolResult};
use serde::Deserialize;
use serde_json::Value;

use super::{parse_args, ToolContext, PROFILE_FAILED};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetProfileArgs {
    #[serde(default)]
    user_id: Option<String>,
}

/// Read a LINE user profile
pub struct GetProfileTool {
    context: ToolContext,
}

impl GetProfileTool {
    pub fn new(context: ToolContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl Tool for GetProfileTool {
    fn name(&self) -> &str {
        "get_profile"
    }

    fn description(&self) -> &str {
        "Get detailed profile information of a LINE user including display name, profile picture URL, status message and language."
    }

    fn input_schema(&self) -> Value {
        SchemaBuilder::object(
            vec![(
                "userId",
                SchemaBuilder::string(
                    "The ID of the user whose profile you want to retrieve. Defaults to DESTINATION_USER_ID.",
                ),
            )],
            &[],
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let args: GetProfileArgs = parse_args(input)?;
        let user_id = args
            .user_id
            .unwrap_or_else(|| self.context.config.default_recipient.clone());

        match self.context.api.get_profile(&user_id).await {
            Ok(profile) => Ok(ToolResult::json(&serde_json::to_value(&profile)?)),
            Err(e) => self.context.remote_failure(PROFILE_FAILED, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeMessagingApi;
    use line_bot_core::{Error, ErrorMode, GatewayConfig};
    use serde_json::json;
    use std::sync::Arc;

    fn tool(api: Arc<FakeMessagingApi>, config: GatewayConfig) -> GetProfileTool {
        GetProfileTool::new(ToolContext::new(api, Arc::new(config)))
    }

    #[tokio::test]
    async fn test_profile_of_default_recipient() {
        let api = Arc::new(FakeMessagingApi::new());

        let result = tool(api.clone(), GatewayConfig::new("U123"))
            .execute(Value::Null)
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(api.profile_requests(), vec!["U123".to_string()]);

        let output: Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(
            output,
            json!({
                "userId": "U123",
                "displayName": "Brown",
                "statusMessage": "Hello, LINE!",
                "language": "en"
            })
        );
    }

    #[tokio::test]
    async fn test_profile_of_explicit_user() {
        let api = Arc::new(FakeMessagingApi::new());

        tool(api.clone(), GatewayConfig::new("U123"))
            .execute(json!({"userId": "U456"}))
            .await
            .unwrap();

        assert_eq!(api.profile_requests(), vec!["U456".to_string()]);
    }

    #[tokio::test]
    async fn test_remote_failure_is_structured() {
        let api = Arc::new(FakeMessagingApi::failing("400 Bad Request: {\"message\":\"Not found\"}"));

        let result = tool(api, GatewayConfig::new("U123"))
            .execute(json!({}))
            .await
            .unwrap();

        assert!(result.is_error);
        let output: Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(output["error"], "Failed to get profile");
        assert!(output["details"].as_str().unwrap().contains("Not found"));
    }

    #[tokio::test]
    async fn test_remote_failure_propagates() {
        let api = Arc::new(FakeMessagingApi::failing("401 Unauthorized: "));
        let config = GatewayConfig::new("U123").with_error_mode(ErrorMode::Propagate);

        let err = tool(api, config).execute(json!({})).await.unwrap_err();
        assert!(matches!(err, Error::Remote(_)));
        assert!(err.to_string().contains("401 Unauthorized"));
    }
}
