use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/consultations",
            get(handlers::consultation::list_consultations)
                .post(handlers::consultation::create_consultation),
        )
        .route(
            "/api/consultations/:id",
            get(handlers::consultation::get_consultation),
        )
        .route(
            "/api/consultations/:id/status",
            put(handlers::consultation::update_consultation_status),
        )
        .route(
            "/api/contact",
            get(handlers::contact::list_contact_messages)
                .post(handlers::contact::create_contact_message),
        )
        .route("/api/contact/:id", get(handlers::contact::get_contact_message))
        .route(
            "/api/contact/:id/read",
            put(handlers::contact::mark_contact_message),
        )
}
