use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::auth::RoleId;
use shared_models::context::InstitutionId;
use shared_models::locale::Locale;

// ==============================================================================
// DOMAIN RECORDS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub account_id: Uuid,
    pub role_id: RoleId,
    pub institution_id: InstitutionId,
    pub account_source_id: String,
    pub source_system_id: String,
    pub beta_status_id: String,
    pub provider_id: Option<Uuid>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub time_zone: Tz,
    pub locale: Locale,
    #[serde(default)]
    pub consent_form_accepted: bool,
    pub consent_form_accepted_date: Option<DateTime<Utc>>,
    pub gender_identity_id: Option<String>,
    pub ethnicity_id: Option<String>,
    pub birth_sex_id: Option<String>,
    pub race_id: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub institution_location_id: Option<Uuid>,
    pub prompted_for_institution_location: Option<bool>,
    pub epic_patient_mrn: Option<String>,
    pub epic_patient_fhir_id: Option<String>,
    pub test_account: Option<bool>,
    pub password_reset_required: Option<bool>,
    #[serde(default)]
    pub password_reset_token: Option<Uuid>,
    pub created: DateTime<Utc>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub address_id: Uuid,
    pub postal_name: Option<String>,
    pub street_address1: Option<String>,
    pub street_address2: Option<String>,
    pub street_address3: Option<String>,
    pub street_address4: Option<String>,
    pub post_office_box_number: Option<String>,
    pub cross_street: Option<String>,
    pub suburb: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country_subdivision_code: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Institution {
    pub institution_id: InstitutionId,
    pub name: String,
    pub integrated_care_enabled: bool,
    pub support_enabled: Option<bool>,
    pub support_email_address: Option<String>,
    pub email_signup_enabled: bool,
    pub contact_us_enabled: bool,
    pub features_enabled: Option<bool>,
    pub recommended_content_enabled: bool,
    pub group_session_requests_enabled: bool,
    pub user_submitted_content_enabled: bool,
    pub user_submitted_group_session_enabled: bool,
    pub immediate_access_enabled: bool,
    pub require_consent_form: Option<bool>,
    pub calendar_description: Option<String>,
    pub faq_enabled: bool,
    pub epic_fhir_enabled: bool,
    pub my_chart_name: Option<String>,
    pub my_chart_default_url: Option<String>,
    pub integrated_care_phone_number: Option<String>,
    pub integrated_care_availability_description: Option<String>,
    pub integrated_care_program_name: Option<String>,
    pub integrated_care_primary_care_name: Option<String>,
    pub clinical_support_phone_number: Option<String>,
    pub tech_support_phone_number: Option<String>,
    pub privacy_policy_url: Option<String>,
    pub external_contact_us_url: Option<String>,
    pub ga4_patient_measurement_id: Option<String>,
    pub ga4_staff_measurement_id: Option<String>,
    pub featured_topic_center_id: Option<Uuid>,
    pub header_logo_url: Option<String>,
    pub footer_logo_url: Option<String>,
    pub hero_title: Option<String>,
    pub hero_description: Option<String>,
    pub hero_image_url: Option<String>,
    pub sign_in_title: Option<String>,
    pub sign_in_description: Option<String>,
}

/// Which web experience a response is rendered for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserExperienceTypeId {
    Patient,
    Staff,
}

impl UserExperienceTypeId {
    /// Panel roles use the staff experience; anonymous visitors and everyone
    /// else get the patient one.
    pub fn for_role(role_id: Option<RoleId>) -> Self {
        match role_id {
            Some(role_id) if role_id.is_panel_role() => UserExperienceTypeId::Staff,
            _ => UserExperienceTypeId::Patient,
        }
    }
}

// ==============================================================================
// IDENTIFIERS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoginDestinationId {
    CobaltPatient,
    IcPanel,
    IcPatient,
}

impl LoginDestinationId {
    /// Integrated-care staff land on the panel, their patients on the
    /// patient experience; everyone else gets the regular experience.
    pub fn for_role(institution: &Institution, role_id: RoleId) -> Self {
        if !institution.integrated_care_enabled {
            LoginDestinationId::CobaltPatient
        } else if role_id.is_panel_role() {
            LoginDestinationId::IcPanel
        } else {
            LoginDestinationId::IcPatient
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountSupplement {
    Everything,
    PrivateDetails,
    Capabilities,
}

impl fmt::Display for LoginDestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginDestinationId::CobaltPatient => write!(f, "COBALT_PATIENT"),
            LoginDestinationId::IcPanel => write!(f, "IC_PANEL"),
            LoginDestinationId::IcPatient => write!(f, "IC_PATIENT"),
        }
    }
}

// ==============================================================================
// AUTHORIZATION
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCapabilityFlags {
    pub can_view_provider_reports: bool,
    pub can_administer_content: bool,
    pub can_administer_group_sessions: bool,
    pub can_view_analytics: bool,
    pub can_view_patient_orders: bool,
    pub can_edit_patient_orders: bool,
}

/// Legacy per-institution navigation capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCapabilities {
    pub view_nav_admin_my_content: bool,
    pub view_nav_admin_available_content: bool,
    pub view_nav_admin_group_session: bool,
    pub view_nav_admin_group_session_request: bool,
}
