use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use account_cell::current_context_middleware;
use shared_config::AppConfig;

use crate::handlers;

pub fn page_routes(state: Arc<AppConfig>) -> Router {
    let public_routes = Router::new()
        .route("/{page_id}", get(handlers::get_page))
        .route("/row/{page_row_id}/mailing-list", get(handlers::get_page_row_mailing_list))
        .layer(middleware::from_fn_with_state(state.clone(), current_context_middleware));

    Router::new().merge(public_routes).with_state(state)
}
