//! Axum route handler for the chat path.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::chat::fallback::fallback_reply;
use crate::chat::prompts::CHAT_SYSTEM;
use crate::errors::AppError;
use crate::llm_client::{ChatTurn, GenerationParams};
use crate::state::AppState;

const CHAT_TEMPERATURE: f32 = 0.7;
const CHAT_MAX_OUTPUT_TOKENS: u32 = 2048;
const CHAT_TOP_P: f32 = 0.95;

fn chat_params() -> GenerationParams {
    GenerationParams {
        system_instruction: Some(CHAT_SYSTEM.to_string()),
        temperature: CHAT_TEMPERATURE,
        max_output_tokens: CHAT_MAX_OUTPUT_TOKENS,
        top_p: Some(CHAT_TOP_P),
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/v1/chat
///
/// Single user message in, single assistant reply out. No conversation
/// history is sent beyond the current message. Any generation failure is
/// replaced by a canned fallback reply — this surface never returns a raw
/// error for the generation leg.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let reply = match state
        .llm
        .generate(&[ChatTurn::user(request.message.clone())], &chat_params())
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!("Chat generation failed, serving fallback reply: {e}");
            fallback_reply(&request.message).to_string()
        }
    };

    Ok(Json(ChatResponse { reply }))
}
