use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: Uuid,
    pub account_id: Uuid,
    pub provider_id: Option<Uuid>,
    pub appointment_reason_id: Option<Uuid>,
    pub attendance_status_id: Option<String>,
    pub created_by_account_id: Option<Uuid>,
    pub appointment_type_id: Uuid,
    pub intake_assessment_id: Option<Uuid>,
    pub patient_order_id: Option<Uuid>,
    pub acuity_appointment_id: Option<i64>,
    pub acuity_class_id: Option<i64>,
    pub bluejeans_meeting_id: Option<i64>,
    pub title: Option<String>,
    /// Wall-clock time in `time_zone`.
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_in_minutes: i64,
    pub time_zone: Tz,
    pub videoconference_url: Option<String>,
    pub videoconference_platform_id: Option<String>,
    pub scheduling_system_id: String,
    pub rescheduled_appointment_id: Option<Uuid>,
    #[serde(default)]
    pub canceled: bool,
    pub canceled_at: Option<DateTime<Utc>>,
    pub canceled_for_reschedule: Option<bool>,
    pub phone_number: Option<String>,
    pub created: DateTime<Utc>,
}

impl Appointment {
    /// Group ("class") bookings come from Acuity classes.
    pub fn is_group_booking(&self) -> bool {
        self.acuity_class_id.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentReason {
    pub appointment_reason_id: Uuid,
    pub appointment_reason_type_id: String,
    pub description: String,
    pub color: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Followup {
    pub followup_id: Uuid,
    pub account_id: Uuid,
    pub created_by_account_id: Option<Uuid>,
    pub provider_id: Uuid,
    pub appointment_reason_id: Option<Uuid>,
    pub followup_date: NaiveDate,
    pub comment: Option<String>,
    #[serde(default)]
    pub canceled: bool,
    pub canceled_at: Option<DateTime<Utc>>,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentSupplement {
    Provider,
    Account,
    AppointmentReason,
    AppointmentType,
    All,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FollowupSupplement {
    Account,
    AppointmentReason,
    Provider,
    All,
}
