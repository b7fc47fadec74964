use serde::{Deserialize, Serialize};

/// Token accounting reported with a completion.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Usage {
    /// Tokens in the prompt.
    #[serde(default)]
    pub prompt_tokens: u32,

    /// Tokens in the generated completion.
    #[serde(default)]
    pub completion_tokens: u32,

    /// Sum of prompt and completion tokens.
    #[serde(default)]
    pub total_tokens: u32,
}

impl Usage {
    /// Create a new `Usage` with the given prompt and completion tokens.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn usage_totals() {
        let usage = Usage::new(50, 100);
        assert_eq!(
            to_value(usage).unwrap(),
            json!({
                "prompt_tokens": 50,
                "completion_tokens": 100,
                "total_tokens": 150
            })
        );
    }

    #[test]
    fn usage_missing_fields_default() {
        let usage: Usage = serde_json::from_value(json!({"prompt_tokens": 7})).unwrap();
        assert_eq!(usage.prompt_tokens, 7);
        assert_eq!(usage.completion_tokens, 0);
    }
}
