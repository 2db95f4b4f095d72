use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use account_cell::current_context_middleware;
use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn patient_order_routes(state: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        .route("/{patient_order_id}", get(handlers::get_patient_order))
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(protected_routes).with_state(state)
}
