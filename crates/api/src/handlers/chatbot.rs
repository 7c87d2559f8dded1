use axum::Json;
use lexcita_core::chatbot::{self, ChatbotReply, ChatbotRequest};

use crate::middleware::{error_handling::AppError, extract::AppJson};

#[axum::debug_handler]
pub async fn ask(
    AppJson(payload): AppJson<ChatbotRequest>,
) -> Result<Json<ChatbotReply>, AppError> {
    let reply = chatbot::reply(&payload.query)?;
    tracing::debug!("Chatbot answered with topic {:?}", reply.topic);
    Ok(Json(reply))
}
