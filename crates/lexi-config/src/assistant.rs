use std::env;

use serde::{Deserialize, Serialize};

const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional dictionary and language tutor. \
Provide clear, accurate, concise explanations for any word or phrase: part of speech, \
a precise definition, and one or more example sentences. Keep a clear format.";

#[derive(Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Enable the remote assistant
    pub enabled: bool,
    /// Base URL of the chat-completions endpoint, no trailing slash
    pub base: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// System prompt sent as the first message of every conversation
    pub system: String,
    /// Conversation history kept, in exchanges
    pub max_turns: usize,
    pub api_key: String,
    /// Keep the key in saved snapshots and exports
    pub persist_api_key: bool,
}

impl AssistantConfig {
    pub fn new() -> Self {
        let base = env::var("LEXI_ASSISTANT_BASE")
            .unwrap_or_else(|_| "https://api.deepseek.com/v1".to_string());

        let model =
            env::var("LEXI_ASSISTANT_MODEL").unwrap_or_else(|_| "deepseek-chat".to_string());

        let api_key = env::var("LEXI_ASSISTANT_KEY").unwrap_or_default();

        Self {
            enabled: true,
            base,
            model,
            temperature: 0.7,
            max_tokens: 2048,
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_turns: 6,
            api_key,
            persist_api_key: false,
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self::new()
    }
}
