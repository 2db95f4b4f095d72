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

use patient_order_cell::router::patient_order_routes;
use shared_utils::test_utils::{JwtTestUtils, MockSupabaseResponses, TestConfig, TestUser};

async fn mount_account(mock_server: &MockServer, user: &TestUser, role_id: &str) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::account_response(&user.id, role_id, "COBALT")
        ])))
        .mount(mock_server)
        .await;
}

async fn mount_patient_order(mock_server: &MockServer, patient_order_id: Uuid, patient_account_id: Uuid) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/v_patient_order"))
        .and(query_param("patient_order_id", format!("eq.{}", patient_order_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "patient_order_id": patient_order_id,
            "institution_id": "COBALT",
            "patient_account_id": patient_account_id,
            "patient_order_disposition_id": "OPEN",
            "patient_order_disposition_description": "Open",
            "patient_first_name": "Jane",
            "patient_last_name": "Doe",
            "patient_mrn": "MRN123",
            "patient_phone_number": "+1 215-555-1212",
            "billing_provider_first_name": "Sam",
            "billing_provider_last_name": "Lee",
            "order_date": "2024-03-11",
            "order_age_in_minutes": 4320,
            "episode_duration_in_days": 14,
            "reason_for_referral": "Anxiety",
            "in_person_care_radius": null,
            "outreach_count": 3,
            "test_patient_order": false
        }])))
        .mount(mock_server)
        .await;
}

async fn mount_empty(mock_server: &MockServer, table: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/rest/v1/{}", table)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(mock_server)
        .await;
}

async fn send(app: Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_patient_views_own_order_without_mhic_fields() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(&mock_server.uri());
    let user = TestUser::default();
    let patient_order_id = Uuid::new_v4();

    mount_account(&mock_server, &user, "PATIENT").await;
    mount_patient_order(&mock_server, patient_order_id, user.account_id()).await;

    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);
    let (status, body) = send(
        patient_order_routes(config.to_arc()),
        &format!("/{}", patient_order_id),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let patient_order = &body["patientOrder"];
    assert_eq!(patient_order["patientDisplayName"], "Jane Doe");
    assert_eq!(patient_order["patientPhoneNumberDescription"], "(215) 555-1212");
    assert_eq!(patient_order["billingProviderDisplayNameWithLastFirst"], "Lee, Sam");
    assert_eq!(patient_order["inPersonCareRadiusWithDistanceUnitDescription"], "Unspecified");
    assert!(patient_order["orderDate"].is_null());
    assert!(patient_order["reasonForReferral"].is_null());
    assert!(patient_order["patientOrderScheduledMessageGroups"].is_null());
}

#[tokio::test]
async fn test_patient_cannot_view_another_patients_order() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(&mock_server.uri());
    let user = TestUser::default();
    let patient_order_id = Uuid::new_v4();

    mount_account(&mock_server, &user, "PATIENT").await;
    mount_patient_order(&mock_server, patient_order_id, Uuid::new_v4()).await;

    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);
    let (status, _) = send(
        patient_order_routes(config.to_arc()),
        &format!("/{}", patient_order_id),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_mhic_views_order_with_scheduled_message_groups() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(&mock_server.uri());
    let user = TestUser::default();
    let patient_order_id = Uuid::new_v4();
    let group_id = Uuid::new_v4();

    mount_account(&mock_server, &user, "MHIC").await;
    mount_patient_order(&mock_server, patient_order_id, Uuid::new_v4()).await;

    let message = |message_type_id: &str| {
        json!({
            "patient_order_scheduled_message_id": Uuid::new_v4(),
            "patient_order_scheduled_message_group_id": group_id,
            "patient_order_id": patient_order_id,
            "institution_id": "COBALT",
            "scheduled_message_id": Uuid::new_v4(),
            "scheduled_message_status_id": "PENDING",
            "scheduled_message_source_id": "MANUAL",
            "scheduled_by_account_id": user.account_id(),
            "patient_order_scheduled_message_type_description": "Welcome",
            "message_type_id": message_type_id,
            "message_type_description": null,
            "message_id": null,
            "message_status_id": null,
            "message_status_description": null,
            "scheduled_at": "2024-03-15T14:30:00",
            "time_zone": "America/New_York",
            "processed_at": null,
            "canceled_at": null,
            "errored_at": null,
            "sent_at": null,
            "delivered_at": null,
            "delivery_failed_at": null,
            "delivery_failed_reason": null,
            "complaint_registered_at": null,
            "sms_to_number": null,
            "email_to_addresses": ["jane@example.com"],
            "created": "2024-03-12T15:00:00Z",
            "last_updated": "2024-03-12T15:00:00Z"
        })
    };

    Mock::given(method("GET"))
        .and(path("/rest/v1/v_patient_order_scheduled_message"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([message("SMS"), message("EMAIL")])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/v_patient_order_scheduled_message_group"))
        .and(query_param(
            "patient_order_scheduled_message_group_id",
            format!("in.({})", group_id),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "patient_order_scheduled_message_group_id": group_id,
            "patient_order_id": patient_order_id,
            "patient_order_scheduled_message_type_id": "WELCOME",
            "scheduled_at_date_time_has_passed": false,
            "at_least_one_message_delivered": false
        }])))
        .mount(&mock_server)
        .await;

    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);
    let (status, body) = send(
        patient_order_routes(config.to_arc()),
        &format!("/{}", patient_order_id),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let patient_order = &body["patientOrder"];
    assert_eq!(patient_order["orderDateDescription"], "Mar 11, 2024");
    assert_eq!(patient_order["orderAgeInMinutesDescription"], "4,320");
    assert_eq!(patient_order["episodeDurationInDaysDescription"], "14 days");
    assert_eq!(patient_order["outreachCountDescription"], "3");
    assert_eq!(patient_order["reasonForReferral"], "Anxiety");

    let groups = patient_order["patientOrderScheduledMessageGroups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["patientOrderScheduledMessageTypeId"], "WELCOME");
    assert_eq!(groups[0]["scheduledAtDateDescription"], "Mar 15, 2024");
    assert_eq!(groups[0]["scheduledAtTimeDescription"], "2:30 PM");
    assert_eq!(groups[0]["timeZone"], "America/New_York");

    let messages = groups[0]["patientOrderScheduledMessages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["messageTypeId"], "SMS");
    assert_eq!(messages[1]["emailToAddresses"], json!(["jane@example.com"]));
}

#[tokio::test]
async fn test_mhic_everything_includes_order_detail_lists() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(&mock_server.uri());
    let user = TestUser::default();
    let patient_order_id = Uuid::new_v4();
    let patient_account_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/account"))
        .and(query_param("account_id", format!("eq.{}", patient_account_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::account_response(&patient_account_id.to_string(), "PATIENT", "COBALT")
        ])))
        .mount(&mock_server)
        .await;

    mount_account(&mock_server, &user, "MHIC").await;
    mount_patient_order(&mock_server, patient_order_id, patient_account_id).await;
    mount_empty(&mock_server, "patient_order_triage_group").await;
    mount_empty(&mock_server, "patient_order_outreach").await;
    mount_empty(&mock_server, "v_patient_order_voicemail_task").await;
    mount_empty(&mock_server, "v_patient_order_scheduled_message").await;
    mount_empty(&mock_server, "patient_order_medication").await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/patient_order_diagnosis"))
        .and(query_param("order", "display_order.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "patient_order_diagnosis_id": Uuid::new_v4(),
            "patient_order_id": patient_order_id,
            "diagnosis_id": "F41.1",
            "diagnosis_id_type": "ICD10",
            "diagnosis_name": "Generalized anxiety disorder",
            "display_order": 1
        }])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/patient_order_note"))
        .and(query_param("deleted", "eq.false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "patient_order_note_id": Uuid::new_v4(),
            "patient_order_id": patient_order_id,
            "account_id": patient_account_id,
            "note": "Prefers afternoon calls",
            "created": "2024-03-12T15:00:00Z",
            "last_updated": "2024-03-12T15:00:00Z"
        }])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/v_patient_order_scheduled_outreach"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "patient_order_scheduled_outreach_id": Uuid::new_v4(),
            "patient_order_id": patient_order_id,
            "patient_order_outreach_type_id": "PHONE_CALL",
            "patient_order_scheduled_outreach_reason_id": "RESOURCE_FOLLOWUP",
            "patient_order_scheduled_outreach_status_id": "SCHEDULED",
            "created_by_account_id": user.account_id(),
            "completed_by_account_id": null,
            "message": null,
            "scheduled_at_date_time": "2024-03-20T10:00:00",
            "completed_at": null,
            "created_by_account_first_name": "Morgan",
            "created_by_account_last_name": "Reyes",
            "completed_by_account_first_name": null,
            "completed_by_account_last_name": null,
            "created": "2024-03-12T15:00:00Z",
            "last_updated": "2024-03-12T15:00:00Z"
        }])))
        .mount(&mock_server)
        .await;

    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);
    let (status, body) = send(
        patient_order_routes(config.to_arc()),
        &format!("/{}?supplements=EVERYTHING", patient_order_id),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let patient_order = &body["patientOrder"];
    assert_eq!(patient_order["patientOrderOutreaches"], json!([]));
    assert_eq!(patient_order["patientOrderVoicemailTasks"], json!([]));
    assert_eq!(patient_order["patientOrderScheduledMessageGroups"], json!([]));
    assert!(patient_order["patientOrderTriageGroups"].is_null());
    assert_eq!(patient_order["patientAccount"]["accountId"], json!(patient_account_id));
    assert!(patient_order["patientAccount"]["emailAddress"].is_null());

    assert_eq!(patient_order["patientOrderDiagnoses"][0]["diagnosisId"], "F41.1");
    assert_eq!(patient_order["patientOrderDiagnoses"][0]["diagnosisName"], "Generalized anxiety disorder");
    assert_eq!(patient_order["patientOrderMedications"], json!([]));

    let notes = patient_order["patientOrderNotes"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["note"], "Prefers afternoon calls");
    assert_eq!(notes[0]["account"]["accountId"], json!(patient_account_id));

    let scheduled_outreaches = patient_order["patientOrderScheduledOutreaches"].as_array().unwrap();
    assert_eq!(scheduled_outreaches.len(), 1);
    assert_eq!(scheduled_outreaches[0]["scheduledAtDateDescription"], "Mar 20, 2024");
    assert_eq!(scheduled_outreaches[0]["scheduledAtTimeDescription"], "10:00 AM");
    assert_eq!(scheduled_outreaches[0]["createdByAccountDisplayName"], "Morgan Reyes");
    assert!(scheduled_outreaches[0]["completedAtDescription"].is_null());

    assert!(patient_order["screeningSessionResult"].is_null());
    assert!(patient_order["intakeScreeningSessionResult"].is_null());
}

#[tokio::test]
async fn test_unknown_supplement_is_bad_request() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(&mock_server.uri());
    let user = TestUser::default();

    mount_account(&mock_server, &user, "MHIC").await;

    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);
    let (status, _) = send(
        patient_order_routes(config.to_arc()),
        &format!("/{}?supplements=EVERYTHING,BOGUS", Uuid::new_v4()),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_patient_order_is_not_found() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(&mock_server.uri());
    let user = TestUser::default();

    mount_account(&mock_server, &user, "MHIC").await;
    mount_empty(&mock_server, "v_patient_order").await;

    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);
    let (status, _) = send(
        patient_order_routes(config.to_arc()),
        &format!("/{}", Uuid::new_v4()),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patient_order_requires_token() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_supabase_url(&mock_server.uri());

    let (status, _) = send(
        patient_order_routes(config.to_arc()),
        &format!("/{}", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
