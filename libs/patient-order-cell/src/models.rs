use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::auth::RoleId;
use shared_models::context::InstitutionId;

/// Which projection of an order a viewer gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientOrderApiResponseFormat {
    Mhic,
    Patient,
}

impl PatientOrderApiResponseFormat {
    pub fn from_role_id(role_id: RoleId) -> Self {
        if role_id.is_panel_role() {
            PatientOrderApiResponseFormat::Mhic
        } else {
            PatientOrderApiResponseFormat::Patient
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatientOrderSupplement {
    Minimal,
    Panel,
    Everything,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistanceUnitId {
    Mile,
    Kilometer,
}

/// Row of `v_patient_order`, which flattens the order with its latest
/// screening, outreach and contact rollups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientOrder {
    pub patient_order_id: Uuid,
    pub institution_id: Option<InstitutionId>,
    pub patient_order_triage_status_id: Option<String>,
    pub patient_order_triage_status_description: Option<String>,
    pub patient_order_disposition_id: Option<String>,
    pub patient_order_disposition_description: Option<String>,
    pub patient_order_screening_status_id: Option<String>,
    pub patient_order_screening_status_description: Option<String>,
    pub patient_order_closure_reason_id: Option<String>,
    pub patient_order_closure_reason_description: Option<String>,
    pub patient_order_care_type_id: Option<String>,
    pub patient_order_care_type_description: Option<String>,
    pub patient_order_care_preference_id: Option<String>,
    pub patient_account_id: Option<Uuid>,
    pub patient_address_id: Option<Uuid>,
    pub panel_account_id: Option<Uuid>,
    pub panel_account_first_name: Option<String>,
    pub panel_account_last_name: Option<String>,
    pub encounter_department_id: Option<String>,
    pub encounter_department_name: Option<String>,
    pub referring_practice_id: Option<String>,
    pub referring_practice_name: Option<String>,
    pub ordering_provider_id: Option<String>,
    pub ordering_provider_first_name: Option<String>,
    pub ordering_provider_middle_name: Option<String>,
    pub ordering_provider_last_name: Option<String>,
    pub billing_provider_id: Option<String>,
    pub billing_provider_first_name: Option<String>,
    pub billing_provider_middle_name: Option<String>,
    pub billing_provider_last_name: Option<String>,
    pub patient_first_name: Option<String>,
    pub patient_last_name: Option<String>,
    pub patient_mrn: Option<String>,
    pub patient_unique_id: Option<String>,
    pub patient_birth_sex_id: Option<String>,
    pub patient_birthdate: Option<NaiveDate>,
    pub patient_phone_number: Option<String>,
    pub patient_email_address: Option<String>,
    pub patient_language_code: Option<String>,
    pub patient_age_on_order_date: Option<i32>,
    pub primary_payor_name: Option<String>,
    pub primary_plan_name: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub order_age_in_minutes: Option<i64>,
    pub order_id: Option<String>,
    pub routing: Option<String>,
    pub reason_for_referral: Option<String>,
    pub associated_diagnosis: Option<String>,
    pub preferred_contact_hours: Option<String>,
    pub comments: Option<String>,
    pub cc_recipients: Option<String>,
    pub medications: Option<String>,
    pub episode_closed_at: Option<DateTime<Utc>>,
    pub episode_closed_by_account_id: Option<Uuid>,
    pub episode_duration_in_days: Option<i64>,
    pub in_person_care_radius: Option<i32>,
    pub in_person_care_radius_distance_unit_id: Option<DistanceUnitId>,
    pub most_recent_screening_session_id: Option<Uuid>,
    pub most_recent_screening_session_created_at: Option<DateTime<Utc>>,
    pub most_recent_screening_session_completed: Option<bool>,
    pub most_recent_screening_session_completed_at: Option<DateTime<Utc>>,
    pub most_recent_intake_screening_session_id: Option<Uuid>,
    pub most_recent_intake_screening_session_created_at: Option<DateTime<Utc>>,
    pub most_recent_intake_screening_session_completed: Option<bool>,
    pub most_recent_intake_screening_session_completed_at: Option<DateTime<Utc>>,
    pub total_outreach_count: Option<i32>,
    pub most_recent_total_outreach_date_time: Option<NaiveDateTime>,
    pub outreach_count: Option<i32>,
    pub most_recent_outreach_date_time: Option<NaiveDateTime>,
    pub scheduled_message_group_count: Option<i32>,
    pub most_recent_scheduled_message_group_date_time: Option<NaiveDateTime>,
    pub last_contact_type_id: Option<String>,
    pub last_contacted_at: Option<DateTime<Utc>>,
    pub next_contact_type_id: Option<String>,
    pub next_contact_scheduled_at: Option<NaiveDateTime>,
    pub patient_order_scheduled_screening_id: Option<Uuid>,
    pub patient_order_scheduled_screening_scheduled_date_time: Option<NaiveDateTime>,
    pub patient_order_scheduled_screening_calendar_url: Option<String>,
    #[serde(default)]
    pub test_patient_order: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientOrderDiagnosis {
    pub patient_order_diagnosis_id: Uuid,
    pub patient_order_id: Uuid,
    pub diagnosis_id: Option<String>,
    pub diagnosis_id_type: Option<String>,
    pub diagnosis_name: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientOrderMedication {
    pub patient_order_medication_id: Uuid,
    pub patient_order_id: Uuid,
    pub medication_id: Option<String>,
    pub medication_id_type: Option<String>,
    pub medication_name: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientOrderNote {
    pub patient_order_note_id: Uuid,
    pub patient_order_id: Uuid,
    pub account_id: Uuid,
    pub note: String,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Row of `v_patient_order_scheduled_outreach`, which joins in the names of
/// the accounts that scheduled and completed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientOrderScheduledOutreach {
    pub patient_order_scheduled_outreach_id: Uuid,
    pub patient_order_id: Uuid,
    pub patient_order_outreach_type_id: String,
    pub patient_order_scheduled_outreach_reason_id: String,
    pub patient_order_scheduled_outreach_status_id: String,
    pub created_by_account_id: Uuid,
    pub completed_by_account_id: Option<Uuid>,
    pub message: Option<String>,
    pub scheduled_at_date_time: NaiveDateTime,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_by_account_first_name: Option<String>,
    pub created_by_account_last_name: Option<String>,
    pub completed_by_account_first_name: Option<String>,
    pub completed_by_account_last_name: Option<String>,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientOrderScheduledMessageGroup {
    pub patient_order_scheduled_message_group_id: Uuid,
    pub patient_order_id: Uuid,
    pub patient_order_scheduled_message_type_id: String,
    #[serde(default)]
    pub scheduled_at_date_time_has_passed: bool,
    #[serde(default)]
    pub at_least_one_message_delivered: bool,
}

/// One message in a group. Every message in a group shares its schedule
/// and time zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientOrderScheduledMessage {
    pub patient_order_scheduled_message_id: Uuid,
    pub patient_order_scheduled_message_group_id: Uuid,
    pub patient_order_id: Uuid,
    pub institution_id: String,
    pub scheduled_message_id: Uuid,
    pub scheduled_message_status_id: String,
    pub scheduled_message_source_id: Option<String>,
    pub scheduled_by_account_id: Option<Uuid>,
    pub patient_order_scheduled_message_type_description: Option<String>,
    pub message_type_id: String,
    pub message_type_description: Option<String>,
    pub message_id: Option<Uuid>,
    pub message_status_id: Option<String>,
    pub message_status_description: Option<String>,
    pub scheduled_at: NaiveDateTime,
    pub time_zone: Tz,
    pub processed_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub errored_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub delivery_failed_at: Option<DateTime<Utc>>,
    pub delivery_failed_reason: Option<String>,
    pub complaint_registered_at: Option<DateTime<Utc>>,
    pub sms_to_number: Option<String>,
    pub email_to_addresses: Option<Vec<String>>,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientOrderOutreach {
    pub patient_order_outreach_id: Uuid,
    pub patient_order_outreach_result_id: Uuid,
    pub patient_order_id: Uuid,
    pub account_id: Uuid,
    pub note: Option<String>,
    pub outreach_date_time: NaiveDateTime,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientOrderVoicemailTask {
    pub patient_order_voicemail_task_id: Uuid,
    pub patient_order_id: Uuid,
    pub created_by_account_id: Uuid,
    pub completed_by_account_id: Option<Uuid>,
    pub deleted_by_account_id: Option<Uuid>,
    pub message: String,
    #[serde(default)]
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by_account_first_name: Option<String>,
    pub created_by_account_last_name: Option<String>,
    pub completed_by_account_first_name: Option<String>,
    pub completed_by_account_last_name: Option<String>,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientOrderTriageGroup {
    pub patient_order_triage_group_id: Uuid,
    pub patient_order_id: Uuid,
    pub patient_order_triage_source_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientOrderTriage {
    pub patient_order_triage_id: Uuid,
    pub patient_order_triage_group_id: Uuid,
    pub patient_order_id: Uuid,
    pub patient_order_care_type_id: String,
    pub patient_order_focus_type_id: String,
    pub patient_order_triage_source_id: String,
    pub patient_order_triage_override_reason_id: Option<String>,
    pub screening_session_id: Option<Uuid>,
    pub account_id: Option<Uuid>,
    pub reason: Option<String>,
    #[serde(default)]
    pub active: bool,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientOrderCareType {
    pub patient_order_care_type_id: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientOrderFocusType {
    pub patient_order_focus_type_id: String,
    pub description: String,
}
