use serde::{Deserialize, Serialize};

/// Role of the author of a chat message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System instructions.
    System,

    /// User role.
    User,

    /// Assistant role.
    Assistant,
}

/// A single message in a chat-completions request or response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// The role of the message.
    pub role: ChatRole,

    /// The text of the message.  Responses may carry `null` content.
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatMessage {
    /// Create a new `ChatMessage` with the given role and text.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }
}
