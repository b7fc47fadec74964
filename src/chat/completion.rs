//! The completion boundary.
//!
//! A [`Completer`] turns a prompt into display text.  It never fails: every
//! error below this point is logged and replaced with [`APOLOGY`].

use std::time::Duration;

use crate::chat::settings::Settings;
use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::observability::{COMPLETION_FAILURES, COMPLETIONS};

/// Text shown to the user in place of a response when a completion fails.
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// Produces a response for a single prompt.
#[async_trait::async_trait]
pub trait Completer: Send + Sync {
    /// Returns the model's reply to `prompt`, or [`APOLOGY`] on failure.
    ///
    /// Each call is independent; no earlier exchange is sent along.
    async fn complete(&self, prompt: &str, settings: &Settings) -> String;
}

/// Completer backed by the remote chat-completions endpoint.
#[derive(Debug, Clone, Default)]
pub struct RemoteCompleter {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl RemoteCompleter {
    /// Creates a completer for the default endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends requests to `base_url` instead of the default endpoint.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    /// Overrides the HTTP timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Performs one completion, surfacing the underlying error.
    pub async fn try_complete(&self, prompt: &str, settings: &Settings) -> Result<String> {
        let params = settings.generation()?;
        let client =
            ApiClient::with_options(params.api_key.clone(), self.base_url.clone(), self.timeout)?;
        let request = params.request(prompt);
        tracing::debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            temperature = ?request.temperature,
            base_url = client.base_url(),
            "sending completion request"
        );
        let completion = client.send(&request).await?;
        if let Some(usage) = completion.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion finished"
            );
        }
        completion
            .first_text()
            .map(|text| text.trim().to_string())
            .ok_or_else(|| Error::serialization("response contained no message content", None))
    }
}

#[async_trait::async_trait]
impl Completer for RemoteCompleter {
    async fn complete(&self, prompt: &str, settings: &Settings) -> String {
        COMPLETIONS.click();
        match self.try_complete(prompt, settings).await {
            Ok(text) => text,
            Err(err) => {
                COMPLETION_FAILURES.click();
                tracing::error!("Error in AI response: {err}");
                APOLOGY.to_string()
            }
        }
    }
}
