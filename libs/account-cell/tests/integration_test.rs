use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use account_cell::router::account_routes;
use shared_config::AppConfig;
use shared_utils::test_utils::{JwtTestUtils, MockSupabaseResponses, TestConfig, TestUser};

fn create_test_app(config: AppConfig) -> Router {
    account_routes(std::sync::Arc::new(config))
}

async fn mount_account(mock_server: &MockServer, account_id: Uuid, role_id: &str) {
    mount_account_in(mock_server, account_id, role_id, "COBALT").await;
}

async fn mount_account_in(mock_server: &MockServer, account_id: Uuid, role_id: &str, institution_id: &str) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/account"))
        .and(query_param("account_id", format!("eq.{}", account_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::account_response(&account_id.to_string(), role_id, institution_id)
        ])))
        .mount(mock_server)
        .await;
}

async fn mount_institution_and_address(mock_server: &MockServer, integrated_care_enabled: bool) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/institution"))
        .and(query_param("institution_id", "eq.COBALT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::institution_response("COBALT", integrated_care_enabled)
        ])))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/v_account_address"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(mock_server)
        .await;
}

async fn get(app: Router, uri: &str, token: Option<&str>, headers: &[(&str, &str)]) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

#[tokio::test]
async fn test_get_current_account_includes_private_details() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(&mock_server.uri());
    let user = TestUser::default();

    mount_account(&mock_server, user.account_id(), "PATIENT").await;
    mount_institution_and_address(&mock_server, true).await;

    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);
    let (status, body) = get(create_test_app(config.to_app_config()), "/me", Some(&token), &[]).await;

    assert_eq!(status, StatusCode::OK);
    let account = &body["account"];
    assert_eq!(account["accountId"], user.id);
    assert_eq!(account["emailAddress"], "test@example.com");
    assert_eq!(account["phoneNumberDescription"], "(215) 555-1212");
    assert_eq!(account["loginDestinationId"], "IC_PATIENT");
    assert_eq!(account["birthdateDescription"], "Apr 15, 1990");
    assert_eq!(account["createdDescription"], "January 1, 2024 at 7:00 AM");
    assert!(account["address"].is_null());
    assert!(account["capabilities"].is_null());
}

#[tokio::test]
async fn test_time_zone_header_overrides_account_zone() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(&mock_server.uri());
    let user = TestUser::default();

    mount_account(&mock_server, user.account_id(), "PATIENT").await;
    mount_institution_and_address(&mock_server, false).await;

    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);
    let (status, body) = get(
        create_test_app(config.to_app_config()),
        "/me?supplements=CAPABILITIES",
        Some(&token),
        &[("X-Time-Zone", "Pacific/Kiritimati")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account"]["createdDate"], "2024-01-02");
    assert_eq!(body["account"]["loginDestinationId"], "COBALT_PATIENT");
    assert!(body["account"]["capabilities"]["COBALT"].is_object());
}

#[tokio::test]
async fn test_patient_cannot_view_other_account() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(&mock_server.uri());
    let user = TestUser::default();

    mount_account(&mock_server, user.account_id(), "PATIENT").await;

    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);
    let uri = format!("/{}", Uuid::new_v4());
    let (status, _) = get(create_test_app(config.to_app_config()), &uri, Some(&token), &[]).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_staff_sees_public_fields_of_other_account() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(&mock_server.uri());
    let user = TestUser::default();
    let other_account_id = Uuid::new_v4();

    mount_account(&mock_server, user.account_id(), "MHIC").await;
    mount_account(&mock_server, other_account_id, "PATIENT").await;
    mount_institution_and_address(&mock_server, true).await;

    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);
    let uri = format!("/{}", other_account_id);
    let (status, body) = get(create_test_app(config.to_app_config()), &uri, Some(&token), &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account"]["accountId"], other_account_id.to_string());
    assert_eq!(body["account"]["firstName"], "Test");
    assert!(body["account"]["emailAddress"].is_null());
    assert!(body["account"]["loginDestinationId"].is_null());
    assert_eq!(body["institution"]["institutionId"], "COBALT");
    assert_eq!(body["institution"]["integratedCareEnabled"], true);
    assert_eq!(body["institution"]["userExperienceTypeId"], "STAFF");
}

#[tokio::test]
async fn test_other_account_ignores_private_detail_supplements() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(&mock_server.uri());
    let user = TestUser::default();
    let other_account_id = Uuid::new_v4();

    mount_account(&mock_server, user.account_id(), "COACH").await;
    mount_account(&mock_server, other_account_id, "PATIENT").await;
    mount_institution_and_address(&mock_server, false).await;

    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);
    let uri = format!("/{}?supplements=PRIVATE_DETAILS,EVERYTHING,CAPABILITIES", other_account_id);
    let (status, body) = get(create_test_app(config.to_app_config()), &uri, Some(&token), &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["account"]["emailAddress"].is_null());
    assert!(body["account"]["phoneNumber"].is_null());
    assert!(body["account"]["birthdate"].is_null());
    assert!(body["account"]["capabilities"]["COBALT"].is_object());
}

#[tokio::test]
async fn test_staff_from_another_institution_cannot_view_account() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(&mock_server.uri());
    let user = TestUser::default();
    let patient_id = Uuid::new_v4();

    mount_account_in(&mock_server, user.account_id(), "COACH", "OTHER_TENANT").await;
    mount_account_in(&mock_server, patient_id, "PATIENT", "COBALT").await;
    mount_institution_and_address(&mock_server, false).await;

    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);
    let uri = format!("/{}?supplements=PRIVATE_DETAILS", patient_id);
    let (status, body) = get(create_test_app(config.to_app_config()), &uri, Some(&token), &[]).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["account"].is_null());
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let config = TestConfig::default();
    let (status, body) = get(create_test_app(config.to_app_config()), "/me", None, &[]).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");
}

#[tokio::test]
async fn test_unknown_subject_is_unauthorized() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(&mock_server.uri());
    let user = TestUser::default();

    Mock::given(method("GET"))
        .and(path("/rest/v1/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);
    let (status, _) = get(create_test_app(config.to_app_config()), "/me", Some(&token), &[]).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_supplement_is_bad_request() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(&mock_server.uri());
    let user = TestUser::default();

    mount_account(&mock_server, user.account_id(), "PATIENT").await;

    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);
    let (status, _) = get(
        create_test_app(config.to_app_config()),
        "/me?supplements=EVERYTHING,SECRETS",
        Some(&token),
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
