//! HTTP routes for the completion endpoint.

use crate::error::CompletionError;
use crate::types::CompletionResponse;
use axum::{
    Json, Router,
    extract::{FromRef, Path, State},
    routing::post,
};
use neurochat_ai::{CompletionGateway, LlmMessage};
use neurochat_conversation::{ChatTurn, CompletionRequest, MessageRole};
use std::sync::Arc;

/// Routes served by the completion gateway.
pub fn routes<S>() -> Router<S>
where
    Arc<CompletionGateway>: FromRef<S>,
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/completion/{region}", post(completion))
}

/// Forwards a region's history to the provider and returns the reply.
///
/// The region segment is informational and only used for logging.
pub async fn completion(
    State(gateway): State<Arc<CompletionGateway>>,
    Path(region): Path<String>,
    Json(request): Json<CompletionRequest>,
) -> Result<Json<CompletionResponse>, CompletionError> {
    tracing::debug!(
        region = %region,
        difficulty = %request.difficulty,
        history = request.messages.len(),
        "completion requested"
    );

    let messages = request.messages.iter().map(to_llm_message).collect();
    let completion = gateway
        .complete(messages, request.difficulty)
        .await
        .map_err(|e| CompletionError::Gateway {
            region,
            details: e.to_string(),
        })?;

    Ok(Json(CompletionResponse { completion }))
}

fn to_llm_message(turn: &ChatTurn) -> LlmMessage {
    match turn.role {
        MessageRole::User => LlmMessage::user(&turn.content),
        MessageRole::Assistant => LlmMessage::assistant(&turn.content),
    }
}
