use serde::{Deserialize, Serialize};

use crate::types::ChatMessage;

/// Body of a `POST chat/completions` request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionRequest {
    /// The model that will complete the prompt.
    pub model: String,

    /// Input messages.  aicli always sends exactly one user message.
    pub messages: Vec<ChatMessage>,

    /// The maximum number of tokens to generate.
    pub max_tokens: u32,

    /// Amount of randomness injected into the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatCompletionRequest {
    /// Create a new request carrying a single user prompt.
    pub fn single_turn(model: impl Into<String>, prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens,
            temperature: None,
        }
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}
