use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, Usage};

/// One generated alternative in a chat-completions response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    /// Position of this choice in the response.
    #[serde(default)]
    pub index: u32,

    /// The generated message.
    pub message: ChatMessage,

    /// Why generation stopped, e.g. `stop` or `length`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Body of a successful `chat/completions` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletion {
    /// Unique object identifier.
    #[serde(default)]
    pub id: String,

    /// The model that handled the request.
    #[serde(default)]
    pub model: String,

    /// Generated alternatives; aicli reads the first.
    pub choices: Vec<Choice>,

    /// Billing and rate-limit usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletion {
    /// Returns the text of the first choice, if the server produced any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_deserialization() {
        let json = json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "gpt-3.5-turbo-0125",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "\n\nHello there!"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
        });

        let completion: ChatCompletion = serde_json::from_value(json).unwrap();
        assert_eq!(completion.id, "chatcmpl-123");
        assert_eq!(completion.first_text(), Some("\n\nHello there!"));
        assert_eq!(completion.choices[0].finish_reason.as_deref(), Some("stop"));
        assert_eq!(completion.usage.unwrap().total_tokens, 21);
    }

    #[test]
    fn empty_choices_has_no_text() {
        let completion: ChatCompletion =
            serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(completion.first_text().is_none());
    }
}
