use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/calendar/appointments/:id",
            get(handlers::calendar::appointment_calendar),
        )
        .route(
            "/api/calendar/clients/:id",
            get(handlers::calendar::client_calendar),
        )
        .route(
            "/api/calendar/lawyers/:id",
            get(handlers::calendar::lawyer_calendar),
        )
}
