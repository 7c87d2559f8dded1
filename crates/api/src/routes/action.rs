use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/appointments",
            get(handlers::action::appointments_get).post(handlers::action::appointments_post),
        )
        .route(
            "/auth",
            get(handlers::action::auth_get).post(handlers::action::auth_post),
        )
        .route("/reports", get(handlers::action::reports_get))
        .route("/calendar", get(handlers::action::calendar_get))
        .route("/chatbot", post(handlers::chatbot::ask))
}
