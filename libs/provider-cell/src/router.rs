use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use account_cell::current_context_middleware;
use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn provider_routes(state: Arc<AppConfig>) -> Router {
    let public_routes = Router::new()
        .route("/{provider_id}", get(handlers::get_provider))
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware));

    let protected_routes = Router::new()
        .route(
            "/{provider_id}/logical-availabilities/{logical_availability_id}",
            get(handlers::get_logical_availability),
        )
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

pub fn appointment_type_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/{appointment_type_id}", get(handlers::get_appointment_type))
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware))
        .with_state(state)
}
