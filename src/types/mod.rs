// Public modules
pub mod chat_completion;
pub mod chat_completion_request;
pub mod chat_message;
pub mod usage;

// Re-exports
pub use chat_completion::{ChatCompletion, Choice};
pub use chat_completion_request::ChatCompletionRequest;
pub use chat_message::{ChatMessage, ChatRole};
pub use usage::Usage;
