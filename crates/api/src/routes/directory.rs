use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        // Companies
        .route(
            "/api/companies",
            get(handlers::company::list_companies).post(handlers::company::create_company),
        )
        .route(
            "/api/companies/:id",
            get(handlers::company::get_company)
                .put(handlers::company::update_company)
                .delete(handlers::company::delete_company),
        )
        // Clients
        .route(
            "/api/clients",
            get(handlers::client::list_clients).post(handlers::client::create_client),
        )
        .route(
            "/api/clients/:id",
            get(handlers::client::get_client)
                .put(handlers::client::update_client)
                .delete(handlers::client::delete_client),
        )
        // Lawyers
        .route(
            "/api/lawyers",
            get(handlers::lawyer::list_lawyers).post(handlers::lawyer::create_lawyer),
        )
        .route(
            "/api/lawyers/:id",
            get(handlers::lawyer::get_lawyer)
                .put(handlers::lawyer::update_lawyer)
                .delete(handlers::lawyer::delete_lawyer),
        )
        // Services
        .route(
            "/api/services",
            get(handlers::service::list_services).post(handlers::service::create_service),
        )
        .route(
            "/api/services/:id",
            get(handlers::service::get_service)
                .put(handlers::service::update_service)
                .delete(handlers::service::delete_service),
        )
}
