use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use account_cell::current_context_middleware;
use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn group_session_routes(state: Arc<AppConfig>) -> Router {
    let public_routes = Router::new()
        .route("/{group_session_id}", get(handlers::get_group_session))
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware));

    let protected_routes = Router::new()
        .route(
            "/{group_session_id}/reservations",
            get(handlers::get_group_session_reservations),
        )
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(public_routes).merge(protected_routes).with_state(state)
}

pub fn group_session_request_routes(state: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        .route("/{group_session_request_id}", get(handlers::get_group_session_request))
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(protected_routes).with_state(state)
}
