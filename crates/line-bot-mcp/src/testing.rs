//! Recording fake of the Messaging API for gateway tests

use std::sync::Mutex;

use async_trait::async_trait;
use line_bot_api::{
    LineError, MessagingApi, PushMessageRequest, PushMessageResponse, Result, SentMessage,
    UserProfile,
};

pub(crate) struct FakeMessagingApi {
    pushes: Mutex<Vec<PushMessageRequest>>,
    profile_requests: Mutex<Vec<String>>,
    failure: Option<String>,
}

impl FakeMessagingApi {
    pub fn new() -> Self {
        Self {
            pushes: Mutex::new(Vec::new()),
            profile_requests: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// Every call fails with `ApiError(message)`
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    pub fn pushes(&self) -> Vec<PushMessageRequest> {
        self.pushes.lock().unwrap().clone()
    }

    pub fn profile_requests(&self) -> Vec<String> {
        self.profile_requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.pushes.lock().unwrap().len() + self.profile_requests.lock().unwrap().len()
    }
}

#[async_trait]
impl MessagingApi for FakeMessagingApi {
    async fn push_message(&self, request: &PushMessageRequest) -> Result<PushMessageResponse> {
        let mut pushes = self.pushes.lock().unwrap();
        pushes.push(request.clone());

        if let Some(message) = &self.failure {
            return Err(LineError::ApiError(message.clone()));
        }

        Ok(PushMessageResponse {
            sent_messages: vec![SentMessage {
                id: format!("msg-{}", pushes.len()),
                quote_token: None,
            }],
        })
    }

    async fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.profile_requests.lock().unwrap().push(user_id.to_string());

        if let Some(message) = &self.failure {
            return Err(LineError::ApiError(message.clone()));
        }

        Ok(UserProfile {
            user_id: user_id.to_string(),
            display_name: "Brown".to_string(),
            picture_url: None,
            status_message: Some("Hello, LINE!".to_string()),
            language: Some("en".to_string()),
            extra: Default::default(),
        })
    }
}
