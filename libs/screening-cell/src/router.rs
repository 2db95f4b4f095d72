use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use account_cell::current_context_middleware;
use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn screening_session_routes(state: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        .route("/{screening_session_id}", get(handlers::get_screening_session))
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(protected_routes).with_state(state)
}

pub fn screening_flow_version_routes(state: Arc<AppConfig>) -> Router {
    let public_routes = Router::new()
        .route("/{screening_flow_version_id}", get(handlers::get_screening_flow_version))
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware));

    Router::new().merge(public_routes).with_state(state)
}

pub fn screening_version_routes(state: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        .route("/{screening_version_id}/questions", get(handlers::get_screening_questions))
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(protected_routes).with_state(state)
}
