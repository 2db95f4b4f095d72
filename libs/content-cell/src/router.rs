use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use account_cell::current_context_middleware;
use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn content_routes(state: Arc<AppConfig>) -> Router {
    let public_routes = Router::new()
        .route("/{content_id}", get(handlers::get_content))
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware));

    Router::new().merge(public_routes).with_state(state)
}

pub fn admin_content_routes(state: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        .route("/{content_id}", get(handlers::get_admin_content))
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(protected_routes).with_state(state)
}
