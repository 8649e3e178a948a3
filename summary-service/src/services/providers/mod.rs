//! Chat-completion provider abstractions and implementations.
//!
//! The handler only sees [`ChatProvider`]; the OpenAI-compatible client and
//! the recording mock are interchangeable behind it.

pub mod mock;
pub mod openai;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Error type for provider operations.
///
/// The `Display` text is what API callers see in the `error` field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Speaker of a chat message. Requests only ever carry the user turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Decoding parameters for a completion request.
#[derive(Debug, Clone, Default)]
pub struct CompletionParams {
    /// Temperature (0.0 - 2.0).
    pub temperature: Option<f32>,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
    Other,
}

/// Text of the first completion choice plus accounting.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,

    /// Model that actually served the request.
    pub model: String,

    pub input_tokens: u32,
    pub output_tokens: u32,
    pub finish_reason: FinishReason,
}

/// Trait for chat-completion providers (e.g., OpenAI).
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Run one completion over `messages`. Implementations never retry.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
