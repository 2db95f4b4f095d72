use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::context::InstitutionId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupSessionSchedulingSystemId {
    Cobalt,
    External,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSession {
    pub group_session_id: Uuid,
    pub institution_id: InstitutionId,
    pub group_session_status_id: String,
    pub group_session_scheduling_system_id: GroupSessionSchedulingSystemId,
    pub group_session_location_type_id: Option<String>,
    pub group_session_learn_more_method_id: Option<String>,
    pub group_session_collection_id: Option<Uuid>,
    pub group_session_collection_url_name: Option<String>,
    pub assessment_id: Option<Uuid>,
    pub screening_flow_id: Option<Uuid>,
    pub submitter_account_id: Option<Uuid>,
    pub target_email_address: Option<String>,
    #[serde(default)]
    pub different_email_address_for_notifications: bool,
    pub title: String,
    pub description: Option<String>,
    pub url_name: Option<String>,
    pub in_person_location: Option<String>,
    pub facilitator_account_id: Option<Uuid>,
    pub facilitator_name: Option<String>,
    pub facilitator_email_address: Option<String>,
    /// Wall-clock, in `time_zone`.
    pub start_date_time: Option<NaiveDateTime>,
    pub end_date_time: Option<NaiveDateTime>,
    pub seats: Option<i32>,
    pub seats_available: Option<i32>,
    pub seats_reserved: Option<i32>,
    pub time_zone: Tz,
    pub image_url: Option<String>,
    pub videoconference_url: Option<String>,
    pub schedule_url: Option<String>,
    pub confirmation_email_content: Option<String>,
    #[serde(default)]
    pub send_followup_email: bool,
    pub followup_email_content: Option<String>,
    pub followup_email_survey_url: Option<String>,
    #[serde(default)]
    pub send_reminder_email: bool,
    pub reminder_email_content: Option<String>,
    pub followup_time_of_day: Option<NaiveTime>,
    pub followup_day_offset: Option<i32>,
    #[serde(default)]
    pub visible_flag: bool,
    #[serde(default = "default_single_session")]
    pub single_session_flag: bool,
    /// Free-form schedule text entered for recurring sessions.
    pub date_time_description: Option<String>,
    pub learn_more_description: Option<String>,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

fn default_single_session() -> bool {
    true
}

impl GroupSession {
    /// Start and end, when both are known.
    pub fn start_and_end(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.start_date_time.zip(self.end_date_time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSessionStatus {
    pub group_session_status_id: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSessionReservation {
    pub group_session_reservation_id: Uuid,
    pub group_session_id: Uuid,
    pub account_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    #[serde(default)]
    pub canceled: bool,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// A session someone has asked to run, awaiting review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSessionRequest {
    pub group_session_request_id: Uuid,
    pub institution_id: InstitutionId,
    pub group_session_request_status_id: String,
    pub submitter_account_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url_name: Option<String>,
    pub facilitator_account_id: Option<Uuid>,
    pub facilitator_name: Option<String>,
    pub facilitator_email_address: Option<String>,
    pub image_url: Option<String>,
    pub custom_question1: Option<String>,
    pub custom_question2: Option<String>,
    #[serde(default)]
    pub data_collection_enabled: bool,
    pub created: DateTime<Utc>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSessionRequestStatus {
    pub group_session_request_status_id: String,
    pub description: String,
}
