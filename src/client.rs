use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use std::env;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{ChatCompletion, ChatCompletionRequest};

/// Base URL of the default completion endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/";
/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for an OpenAI-compatible chat-completions API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    api_key: String,
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// The API key can be provided directly or read from the OPENAI_API_KEY
    /// environment variable.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_options(api_key, None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = match api_key {
            Some(key) => key,
            None => env::var(API_KEY_ENV).map_err(|_| {
                Error::authentication(
                    "API key not configured and OPENAI_API_KEY environment variable not set",
                )
            })?,
        };

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            api_key,
            client,
            base_url: normalize_base_url(base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string())),
            timeout,
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| Error::authentication("API key contains invalid header characters"))?;
        headers.insert(header::AUTHORIZATION, bearer);
        Ok(headers)
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(Deserialize)]
        struct ErrorDetail {
            #[serde(rename = "type")]
            error_type: Option<String>,
            message: Option<String>,
            param: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let detail = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|parsed| parsed.error);
        let error_type = detail.as_ref().and_then(|e| e.error_type.clone());
        let error_param = detail.as_ref().and_then(|e| e.param.clone());
        let error_message = detail
            .and_then(|e| e.message)
            .unwrap_or_else(|| error_body.clone());

        error_for_status(status_code, error_type, error_message, error_param, retry_after)
    }

    /// Send a single chat-completions request and wait for the full response.
    pub async fn send(&self, request: &ChatCompletionRequest) -> Result<ChatCompletion> {
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.send_inner(request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if result.is_err() {
            CLIENT_REQUEST_ERRORS.click();
        }
        result
    }

    async fn send_inner(&self, request: &ChatCompletionRequest) -> Result<ChatCompletion> {
        let url = format!("{}chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers()?)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        Some(self.timeout.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.json::<ChatCompletion>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

/// Map an HTTP status code onto the error taxonomy.
fn error_for_status(
    status_code: u16,
    error_type: Option<String>,
    message: String,
    param: Option<String>,
    retry_after: Option<u64>,
) -> Error {
    match status_code {
        400 => Error::bad_request(message, param),
        401 => Error::authentication(message),
        403 => Error::permission(message),
        404 => Error::not_found(message),
        408 => Error::timeout(message, None),
        429 => Error::rate_limit(message, retry_after),
        500 => Error::internal_server(message),
        502..=504 => Error::service_unavailable(message, retry_after),
        _ => Error::api(status_code, error_type, message),
    }
}

fn normalize_base_url(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
