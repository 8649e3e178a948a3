use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use metrics::counter;
use service_core::error::AppError;
use std::sync::Arc;

use crate::models::{SummaryRequest, SummaryResponse};
use crate::services::build_chart_prompt;
use crate::services::providers::{
    ChatMessage, ChatProvider, CompletionParams, ProviderError, ProviderResponse,
};
use crate::startup::AppState;

pub const NO_CONVERSATION: &str = "No conversation provided";

/// `POST /summary`: one transcript in, one model completion out.
///
/// Empty input never reaches the provider. Provider failures are not retried;
/// their text is returned to the caller with a 500.
pub async fn generate_summary(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected summary request body");
        counter!("summary_requests_total", "outcome" => "rejected").increment(1);
        AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
    })?;

    let Some(transcript) = request.transcript() else {
        counter!("summary_requests_total", "outcome" => "rejected").increment(1);
        return Err(AppError::BadRequest(anyhow::anyhow!(NO_CONVERSATION)));
    };

    let messages = vec![ChatMessage::user(build_chart_prompt(transcript))];
    let params = CompletionParams {
        temperature: Some(state.config.openai.temperature),
    };

    tracing::info!(
        transcript_len = transcript.len(),
        model = %state.config.openai.model,
        "Requesting nursing summary"
    );

    // The upstream call runs on its own task: a client hanging up drops this
    // handler future but not the in-flight completion.
    let call = tokio::spawn(complete_detached(
        Arc::clone(&state.chat_provider),
        messages,
        params,
    ));

    match call.await {
        Ok(Ok(response)) => Ok(Json(SummaryResponse {
            summary: response.text,
        })),
        Ok(Err(e)) => Err(AppError::UpstreamError(e.to_string())),
        Err(e) => {
            tracing::error!(error = %e, "Chat completion task did not finish");
            Err(AppError::UpstreamError(e.to_string()))
        }
    }
}

/// Run one completion and record its outcome, whether or not anyone is still waiting.
async fn complete_detached(
    provider: Arc<dyn ChatProvider>,
    messages: Vec<ChatMessage>,
    params: CompletionParams,
) -> Result<ProviderResponse, ProviderError> {
    let result = provider.complete(&messages, &params).await;

    match &result {
        Ok(response) => {
            tracing::info!(
                model = %response.model,
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                finish_reason = ?response.finish_reason,
                "Nursing summary generated"
            );
            counter!("summary_requests_total", "outcome" => "succeeded").increment(1);
        }
        Err(e) => {
            tracing::error!(error = %e, "Chat completion failed");
            counter!("summary_requests_total", "outcome" => "failed").increment(1);
        }
    }

    result
}
