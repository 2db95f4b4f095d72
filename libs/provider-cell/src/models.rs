use chrono::{Datelike, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::context::InstitutionId;
use shared_models::locale::Locale;

// ==============================================================================
// PROVIDERS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub provider_id: Uuid,
    pub institution_id: InstitutionId,
    pub name: String,
    pub title: Option<String>,
    pub clinic: Option<String>,
    pub specialty: Option<String>,
    pub license: Option<String>,
    pub entity: Option<String>,
    pub email_address: Option<String>,
    pub image_url: Option<String>,
    pub time_zone: Tz,
    pub locale: Locale,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    pub bio: Option<String>,
    pub bio_url: Option<String>,
    pub phone_number: Option<String>,
    #[serde(default)]
    pub display_phone_number_only_for_booking: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupportRoleId {
    CareManager,
    Clinician,
    Coach,
    Other,
    Psychiatrist,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportRole {
    pub support_role_id: SupportRoleId,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentFunding {
    pub payment_funding_id: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderSupplement {
    Everything,
    SupportRoles,
    PaymentFunding,
}

// ==============================================================================
// APPOINTMENT TYPES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentType {
    pub appointment_type_id: Uuid,
    pub scheduling_system_id: String,
    pub visit_type_id: String,
    pub acuity_appointment_type_id: Option<i64>,
    pub epic_visit_type_id: Option<String>,
    pub epic_visit_type_id_type: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub duration_in_minutes: i64,
    pub hex_color: i32,
    pub assessment_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionTypeId {
    Quad,
    Text,
    Dropdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentQuestion {
    pub question_id: Uuid,
    pub question_type_id: QuestionTypeId,
    pub question_text: String,
    pub font_size_id: Option<String>,
    pub question_content_hint_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentTypeSupplement {
    Everything,
    Assessment,
}

// ==============================================================================
// LOGICAL AVAILABILITY
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicalAvailabilityTypeId {
    Open,
    Block,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecurrenceTypeId {
    None,
    Daily,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogicalAvailability {
    pub logical_availability_id: Uuid,
    pub provider_id: Uuid,
    pub logical_availability_type_id: LogicalAvailabilityTypeId,
    pub recurrence_type_id: RecurrenceTypeId,
    pub start_date_time: NaiveDateTime,
    pub end_date_time: NaiveDateTime,
    #[serde(default)]
    pub recur_sunday: bool,
    #[serde(default)]
    pub recur_monday: bool,
    #[serde(default)]
    pub recur_tuesday: bool,
    #[serde(default)]
    pub recur_wednesday: bool,
    #[serde(default)]
    pub recur_thursday: bool,
    #[serde(default)]
    pub recur_friday: bool,
    #[serde(default)]
    pub recur_saturday: bool,
}

/// Daily availabilities stored without an end carry this far-future date.
pub const OPEN_ENDED_YEAR: i32 = 9999;

impl LogicalAvailability {
    /// The last date this availability applies to, or `None` when it recurs
    /// forever.
    pub fn normalized_end_date(&self) -> Option<NaiveDate> {
        let end_date = self.end_date_time.date();

        match self.recurrence_type_id {
            RecurrenceTypeId::Daily if end_date.year() >= OPEN_ENDED_YEAR => None,
            _ => Some(end_date),
        }
    }
}
