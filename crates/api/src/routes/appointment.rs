use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments",
            get(handlers::appointment::list_appointments)
                .post(handlers::appointment::create_appointment),
        )
        .route(
            "/api/appointments/:id",
            get(handlers::appointment::get_appointment)
                .delete(handlers::appointment::cancel_appointment),
        )
        .route(
            "/api/appointments/:id/status",
            put(handlers::appointment::update_status),
        )
        .route(
            "/api/appointments/:id/reschedule",
            put(handlers::appointment::reschedule_appointment),
        )
        .route(
            "/api/lawyers/:id/availability",
            get(handlers::lawyer::get_availability),
        )
}
