//! LINE Messaging API client
//!
//! Communicates with LINE Messaging API

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, error, info};

use crate::error::{LineError, Result};
use crate::types::*;

/// `User-Agent` sent with every request
pub fn user_agent() -> String {
    format!("line-bot-mcp-server/{}", env!("CARGO_PKG_VERSION"))
}

/// The two Messaging API operations the gateway consumes
#[async_trait]
pub trait MessagingApi: Send + Sync {
    /// Push messages to a user, group or room
    async fn push_message(&self, request: &PushMessageRequest) -> Result<PushMessageResponse>;

    /// Get a user profile
    async fn get_profile(&self, user_id: &str) -> Result<UserProfile>;
}

/// LINE Messaging API client
#[derive(Clone)]
pub struct LineApiClient {
    client: Client,
    channel_access_token: String,
    base_url: Url,
}

impl LineApiClient {
    /// Create a new LINE API client for `https://api.line.me`
    pub fn new(channel_access_token: &str) -> Result<Self> {
        Self::with_base_url(channel_access_token, "https://api.line.me")
    }

    /// Create a client for a custom endpoint (without the `/v2` suffix)
    pub fn with_base_url(channel_access_token: &str, base_url: &str) -> Result<Self> {
        if channel_access_token.is_empty() {
            return Err(LineError::AccessTokenNotConfigured);
        }

        let client = Client::builder()
            .user_agent(user_agent())
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(LineError::HttpError)?;

        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| LineError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(LineError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            client,
            channel_access_token: channel_access_token.to_string(),
            base_url,
        })
    }

    /// Build `{base}/v2/{segments...}`
    ///
    /// Each segment is percent-encoded, so `/`, `#` and `?` inside a
    /// segment cannot change the target endpoint.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LineError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("v2")
            .extend(segments);
        Ok(url)
    }

    /// Add authorization header
    fn add_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(&self.channel_access_token)
    }

    /// Turn a non-2xx response into `ApiError`
    async fn check_status(response: reqwest::Response, operation: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        error!("{} failed: {} - {}", operation, status, error_text);
        Err(LineError::ApiError(format!("{}: {}", status, error_text)))
    }
}

#[async_trait]
impl MessagingApi for LineApiClient {
    async fn push_message(&self, request: &PushMessageRequest) -> Result<PushMessageResponse> {
        let url = self.endpoint(&["bot", "message", "push"])?;

        debug!(to = %request.to, count = request.messages.len(), "Pushing messages");

        let response = self
            .add_auth(self.client.post(url).json(request))
            .send()
            .await
            .map_err(LineError::HttpError)?;

        let response = Self::check_status(response, "Push message").await?;

        let body: PushMessageResponse = response
            .json()
            .await
            .map_err(|e| LineError::ParseError(e.to_string()))?;

        info!(to = %request.to, sent = body.sent_messages.len(), "Pushed messages");
        Ok(body)
    }

    async fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        // dot segments would be dropped from the path instead of encoded
        if matches!(user_id, "" | "." | "..") {
            return Err(LineError::InvalidUserId(user_id.to_string()));
        }
        let url = self.endpoint(&["bot", "profile", user_id])?;

        debug!("Getting profile for user: {}", user_id);

        let response = self
            .add_auth(self.client.get(url))
            .send()
            .await
            .map_err(LineError::HttpError)?;

        let response = Self::check_status(response, "Get profile").await?;

        let profile: UserProfile = response
            .json()
            .await
            .map_err(|e| LineError::ParseError(e.to_string()))?;

        info!("Got profile for user: {}", profile.user_id);
        Ok(profile)
    }
}
