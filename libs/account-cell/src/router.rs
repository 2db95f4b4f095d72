use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::context::current_context_middleware;
use crate::handlers;

pub fn account_routes(state: Arc<AppConfig>) -> Router {
    // Layers run bottom-up: authenticate, then resolve the context
    let protected_routes = Router::new()
        .route("/me", get(handlers::get_current_account))
        .route("/{account_id}", get(handlers::get_account))
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(protected_routes).with_state(state)
}
