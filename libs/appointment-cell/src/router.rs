use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use account_cell::current_context_middleware;
use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        .route("/{appointment_id}", get(handlers::get_appointment))
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(protected_routes).with_state(state)
}

pub fn followup_routes(state: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        .route("/{followup_id}", get(handlers::get_followup))
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(protected_routes).with_state(state)
}
