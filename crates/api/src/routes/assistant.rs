use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/chatbot", post(handlers::chatbot::ask))
        .route("/api/identity/validate", post(handlers::identity::validate))
}
