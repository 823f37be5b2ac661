use serde::{Deserialize, Serialize};

use super::Message;

/// Response from an LLM provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub model: String,
    pub message: Message,
    #[serde(default)]
    pub done: bool,
}

impl LlmResponse {
    pub fn new(model: impl Into<String>, message: Message) -> Self {
        Self {
            model: model.into(),
            message,
            done: true,
        }
    }

    pub fn content(&self) -> &str {
        &self.message.content
    }
}
