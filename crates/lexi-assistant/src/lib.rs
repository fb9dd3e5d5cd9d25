mod client;

pub use client::ChatClient;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Remote tutor interface
#[async_trait::async_trait]
pub trait Assistant: Send + Sync {
    /// Send the conversation and get the tutor's reply
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, AssistantError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("Assistant base URL is not configured")]
    MissingBaseUrl,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Empty reply from assistant")]
    EmptyReply,
}

/// Keep only the most recent `max_turns` exchanges (user + assistant pairs)
pub fn trim_history(messages: &mut Vec<ChatMessage>, max_turns: usize) {
    let keep = max_turns * 2;
    if messages.len() > keep {
        messages.drain(..messages.len() - keep);
    }
}
