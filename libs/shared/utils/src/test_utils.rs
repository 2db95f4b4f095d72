use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;

pub struct TestConfig {
    pub jwt_secret: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_supabase_url(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            supabase_jwt_secret: self.jwt_secret.clone(),
            default_locale: "en-US".to_string(),
            default_time_zone: "America/New_York".to_string(),
            strings_directory: None,
            port: 3000,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// A JWT subject. The id doubles as the Cobalt account id.
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new("test@example.com", "authenticated")
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn with_id(id: Uuid) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    pub fn account_id(&self) -> Uuid {
        Uuid::parse_str(&self.id).unwrap_or_default()
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            metadata: None,
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "email": user.email,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

/// PostgREST rows shaped like the Cobalt tables.
pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn account_response(account_id: &str, role_id: &str, institution_id: &str) -> serde_json::Value {
        json!({
            "account_id": account_id,
            "role_id": role_id,
            "institution_id": institution_id,
            "account_source_id": "EMAIL_PASSWORD",
            "source_system_id": "COBALT",
            "beta_status_id": "UNKNOWN",
            "provider_id": null,
            "username": null,
            "first_name": "Test",
            "last_name": "User",
            "display_name": "Test User",
            "email_address": "test@example.com",
            "phone_number": "2155551212",
            "time_zone": "America/New_York",
            "locale": "en-US",
            "consent_form_accepted": true,
            "consent_form_accepted_date": "2024-01-02T15:00:00Z",
            "gender_identity_id": null,
            "ethnicity_id": null,
            "birth_sex_id": null,
            "race_id": null,
            "birthdate": "1990-04-15",
            "institution_location_id": null,
            "prompted_for_institution_location": false,
            "epic_patient_mrn": null,
            "epic_patient_fhir_id": null,
            "test_account": false,
            "password_reset_required": false,
            "created": "2024-01-01T12:00:00Z",
            "last_updated": "2024-01-03T12:00:00Z"
        })
    }

    pub fn institution_response(institution_id: &str, integrated_care_enabled: bool) -> serde_json::Value {
        json!({
            "institution_id": institution_id,
            "name": "Cobalt",
            "integrated_care_enabled": integrated_care_enabled,
            "time_zone": "America/New_York",
            "locale": "en-US"
        })
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "message": message,
            "code": code
        })
    }
}
