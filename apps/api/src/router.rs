use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use account_cell::router::account_routes;
use appointment_cell::router::{appointment_routes, followup_routes};
use content_cell::router::{admin_content_routes, content_routes};
use group_session_cell::router::{group_session_request_routes, group_session_routes};
use page_cell::router::page_routes;
use patient_order_cell::router::patient_order_routes;
use provider_cell::router::{appointment_type_routes, provider_routes};
use screening_cell::router::{screening_flow_version_routes, screening_session_routes, screening_version_routes};
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Cobalt API is running!" }))
        .nest("/accounts", account_routes(state.clone()))
        .nest("/providers", provider_routes(state.clone()))
        .nest("/appointment-types", appointment_type_routes(state.clone()))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/followups", followup_routes(state.clone()))
        .nest("/content", content_routes(state.clone()))
        .nest("/admin/content", admin_content_routes(state.clone()))
        .nest("/group-sessions", group_session_routes(state.clone()))
        .nest("/group-session-requests", group_session_request_routes(state.clone()))
        .nest("/pages", page_routes(state.clone()))
        .nest("/screening-sessions", screening_session_routes(state.clone()))
        .nest("/screening-flow-versions", screening_flow_version_routes(state.clone()))
        .nest("/screening-versions", screening_version_routes(state.clone()))
        .nest("/patient-orders", patient_order_routes(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{Request, StatusCode}};
    use shared_utils::test_utils::TestConfig;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_route() {
        let app = create_router(TestConfig::default().to_arc());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Cobalt API is running!");
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let app = create_router(TestConfig::default().to_arc());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/patient-orders/00000000-0000-0000-0000-000000000000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
