//! Mock provider implementation for testing.

use super::{
    ChatMessage, ChatProvider, CompletionParams, FinishReason, ProviderError, ProviderResponse,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Canned outcome for every call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Reply(String),
    Fail(ProviderError),
}

/// A call as the provider received it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
}

/// Mock chat provider that records each call.
pub struct MockChatProvider {
    outcome: MockOutcome,
    delay: Option<Duration>,
    calls: Mutex<Vec<RecordedCall>>,
    completed: AtomicUsize,
}

impl MockChatProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockOutcome::Reply(text.into()))
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::new(MockOutcome::Fail(error))
    }

    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            delay: None,
            calls: Mutex::new(Vec::new()),
            completed: AtomicUsize::new(0),
        }
    }

    /// Hold every call for `delay` before answering, like a slow upstream.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Calls that ran to the end, as opposed to merely started.
    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                messages: messages.to_vec(),
                temperature: params.temperature,
            });
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        match &self.outcome {
            MockOutcome::Reply(text) => Ok(ProviderResponse {
                text: text.clone(),
                model: "mock".to_string(),
                input_tokens: estimate_tokens(messages.iter().map(|m| m.content.len()).sum()),
                output_tokens: estimate_tokens(text.len()),
                finish_reason: FinishReason::Complete,
            }),
            MockOutcome::Fail(error) => Err(error.clone()),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.outcome {
            MockOutcome::Reply(_) => Ok(()),
            MockOutcome::Fail(error) => Err(error.clone()),
        }
    }
}

/// Rough four-bytes-per-token estimate, saturating at `u32::MAX`.
fn estimate_tokens(bytes: usize) -> u32 {
    u32::try_from(bytes / 4).unwrap_or(u32::MAX)
}
