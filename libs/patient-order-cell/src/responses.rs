use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use futures::future::try_join_all;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use account_cell::{
    AccountApiResponse, AccountApiResponseFactory, AccountService, AddressApiResponse, SupabaseAccountService,
};
use screening_cell::{
    ScreeningService, ScreeningSessionApiResponse, ScreeningSessionApiResponseFactory, ScreeningSessionResult,
    SupabaseScreeningService,
};
use shared_config::AppConfig;
use shared_models::context::CurrentContext;
use shared_models::error::AppError;
use shared_utils::normalizer::{normalize_name, normalize_name_with_last_first, normalize_name_with_middle};
use shared_utils::{FormatStyle, Formatter, Strings};

use crate::models::{
    DistanceUnitId, PatientOrder, PatientOrderApiResponseFormat, PatientOrderCareType, PatientOrderDiagnosis,
    PatientOrderFocusType, PatientOrderMedication, PatientOrderNote, PatientOrderOutreach, PatientOrderScheduledMessage,
    PatientOrderScheduledMessageGroup, PatientOrderScheduledOutreach, PatientOrderSupplement, PatientOrderTriage,
    PatientOrderTriageGroup, PatientOrderVoicemailTask,
};
use crate::services::{PatientOrderService, SupabasePatientOrderService};

fn describe_timestamp(formatter: &Formatter, timestamp: Option<DateTime<Utc>>) -> Option<String> {
    timestamp.map(|t| formatter.format_timestamp_with(t, FormatStyle::Medium, FormatStyle::Short))
}

fn describe_date_time(formatter: &Formatter, date_time: Option<NaiveDateTime>) -> Option<String> {
    date_time.map(|dt| formatter.format_date_time(dt, FormatStyle::Medium, FormatStyle::Short))
}

// ==============================================================================
// SCHEDULED MESSAGES
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientOrderScheduledMessageApiResponse {
    pub patient_order_scheduled_message_id: Uuid,
    pub institution_id: String,
    pub scheduled_message_id: Uuid,
    pub scheduled_message_status_id: String,
    pub message_type_id: String,
    pub message_type_description: Option<String>,
    pub message_id: Option<Uuid>,
    pub message_status_id: Option<String>,
    pub message_status_description: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_at_description: Option<String>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub canceled_at_description: Option<String>,
    pub errored_at: Option<DateTime<Utc>>,
    pub errored_at_description: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub sent_at_description: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub delivered_at_description: Option<String>,
    pub delivery_failed_at: Option<DateTime<Utc>>,
    pub delivery_failed_at_description: Option<String>,
    pub delivery_failed_reason: Option<String>,
    pub complaint_registered_at: Option<DateTime<Utc>>,
    pub complaint_registered_at_description: Option<String>,
    pub sms_to_number: Option<String>,
    pub sms_to_number_description: Option<String>,
    pub email_to_addresses: Vec<String>,
}

impl PatientOrderScheduledMessageApiResponse {
    pub fn new(formatter: &Formatter, message: &PatientOrderScheduledMessage) -> Self {
        Self {
            patient_order_scheduled_message_id: message.patient_order_scheduled_message_id,
            institution_id: message.institution_id.clone(),
            scheduled_message_id: message.scheduled_message_id,
            scheduled_message_status_id: message.scheduled_message_status_id.clone(),
            message_type_id: message.message_type_id.clone(),
            message_type_description: message.message_type_description.clone(),
            message_id: message.message_id,
            message_status_id: message.message_status_id.clone(),
            message_status_description: message.message_status_description.clone(),
            processed_at: message.processed_at,
            processed_at_description: describe_timestamp(formatter, message.processed_at),
            canceled_at: message.canceled_at,
            canceled_at_description: describe_timestamp(formatter, message.canceled_at),
            errored_at: message.errored_at,
            errored_at_description: describe_timestamp(formatter, message.errored_at),
            sent_at: message.sent_at,
            sent_at_description: describe_timestamp(formatter, message.sent_at),
            delivered_at: message.delivered_at,
            delivered_at_description: describe_timestamp(formatter, message.delivered_at),
            delivery_failed_at: message.delivery_failed_at,
            delivery_failed_at_description: describe_timestamp(formatter, message.delivery_failed_at),
            delivery_failed_reason: message.delivery_failed_reason.clone(),
            complaint_registered_at: message.complaint_registered_at,
            complaint_registered_at_description: describe_timestamp(formatter, message.complaint_registered_at),
            sms_to_number: message.sms_to_number.clone(),
            sms_to_number_description: formatter.format_phone_number(message.sms_to_number.as_deref()),
            email_to_addresses: message.email_to_addresses.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientOrderScheduledMessageGroupApiResponse {
    pub patient_order_scheduled_message_group_id: Uuid,
    pub patient_order_scheduled_message_type_id: String,
    pub patient_order_scheduled_message_type_description: Option<String>,
    pub scheduled_message_source_id: Option<String>,
    pub patient_order_id: Uuid,
    pub scheduled_by_account_id: Option<Uuid>,
    pub scheduled_at_date: NaiveDate,
    pub scheduled_at_date_description: String,
    pub scheduled_at_time: NaiveTime,
    pub scheduled_at_time_description: String,
    pub scheduled_at_date_time: NaiveDateTime,
    pub scheduled_at_date_time_description: String,
    pub scheduled_at_date_time_has_passed: bool,
    pub at_least_one_message_delivered: bool,
    pub time_zone: Tz,
    pub created: DateTime<Utc>,
    pub created_description: String,
    pub last_updated: DateTime<Utc>,
    pub last_updated_description: String,
    pub patient_order_scheduled_messages: Vec<PatientOrderScheduledMessageApiResponse>,
}

impl PatientOrderScheduledMessageGroupApiResponse {
    /// Group-level schedule fields come from the first message, since all
    /// messages in a group share them.
    pub fn new(
        formatter: &Formatter,
        group: &PatientOrderScheduledMessageGroup,
        messages: &[PatientOrderScheduledMessage],
    ) -> Result<Self, AppError> {
        let first = messages.first().ok_or_else(|| {
            AppError::Internal(format!(
                "Unexpected empty group of messages for patient_order_scheduled_message_group_id {}",
                group.patient_order_scheduled_message_group_id
            ))
        })?;

        Ok(Self {
            patient_order_scheduled_message_group_id: group.patient_order_scheduled_message_group_id,
            patient_order_scheduled_message_type_id: group.patient_order_scheduled_message_type_id.clone(),
            patient_order_scheduled_message_type_description: first
                .patient_order_scheduled_message_type_description
                .clone(),
            scheduled_message_source_id: first.scheduled_message_source_id.clone(),
            patient_order_id: group.patient_order_id,
            scheduled_by_account_id: first.scheduled_by_account_id,
            scheduled_at_date: first.scheduled_at.date(),
            scheduled_at_date_description: formatter.format_date(first.scheduled_at.date(), FormatStyle::Medium),
            scheduled_at_time: first.scheduled_at.time(),
            scheduled_at_time_description: formatter.format_time(first.scheduled_at.time(), FormatStyle::Short),
            scheduled_at_date_time: first.scheduled_at,
            scheduled_at_date_time_description: formatter.format_date_time(
                first.scheduled_at,
                FormatStyle::Medium,
                FormatStyle::Short,
            ),
            scheduled_at_date_time_has_passed: group.scheduled_at_date_time_has_passed,
            at_least_one_message_delivered: group.at_least_one_message_delivered,
            time_zone: first.time_zone,
            created: first.created,
            created_description: formatter.format_timestamp(first.created),
            last_updated: first.last_updated,
            last_updated_description: formatter.format_timestamp(first.last_updated),
            patient_order_scheduled_messages: messages
                .iter()
                .map(|message| PatientOrderScheduledMessageApiResponse::new(formatter, message))
                .collect(),
        })
    }
}

/// Buckets messages by group, keeping groups in the order they first appear.
pub fn group_scheduled_messages(
    messages: Vec<PatientOrderScheduledMessage>,
) -> Vec<(Uuid, Vec<PatientOrderScheduledMessage>)> {
    let mut grouped: Vec<(Uuid, Vec<PatientOrderScheduledMessage>)> = Vec::new();

    for message in messages {
        let group_id = message.patient_order_scheduled_message_group_id;
        match grouped.iter_mut().find(|(id, _)| *id == group_id) {
            Some((_, bucket)) => bucket.push(message),
            None => grouped.push((group_id, vec![message])),
        }
    }

    grouped
}

// ==============================================================================
// OUTREACH AND VOICEMAIL
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientOrderOutreachApiResponse {
    pub patient_order_outreach_id: Uuid,
    pub patient_order_outreach_result_id: Uuid,
    pub patient_order_id: Uuid,
    pub account_id: Uuid,
    pub note: Option<String>,
    pub outreach_date: NaiveDate,
    pub outreach_date_description: String,
    pub outreach_time: NaiveTime,
    pub outreach_time_description: String,
    pub outreach_date_time: NaiveDateTime,
    pub outreach_date_time_description: String,
    pub created: DateTime<Utc>,
    pub created_description: String,
    pub last_updated: DateTime<Utc>,
    pub last_updated_description: String,
    pub account: AccountApiResponse,
}

#[derive(Clone)]
pub struct PatientOrderOutreachApiResponseFactory {
    account_service: Arc<dyn AccountService>,
    account_factory: AccountApiResponseFactory,
    strings: Arc<Strings>,
}

impl PatientOrderOutreachApiResponseFactory {
    pub fn new(
        account_service: Arc<dyn AccountService>,
        account_factory: AccountApiResponseFactory,
        strings: Arc<Strings>,
    ) -> Self {
        Self {
            account_service,
            account_factory,
            strings,
        }
    }

    pub async fn create(
        &self,
        context: &CurrentContext,
        outreach: &PatientOrderOutreach,
    ) -> Result<PatientOrderOutreachApiResponse, AppError> {
        let formatter = Formatter::new(context, self.strings.clone());

        let account = self
            .account_service
            .find_account_by_id(outreach.account_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account {} not found", outreach.account_id)))?;
        let account = self.account_factory.create(context, &account, &HashSet::new()).await?;

        let outreach_date = outreach.outreach_date_time.date();
        let outreach_time = outreach.outreach_date_time.time();

        Ok(PatientOrderOutreachApiResponse {
            patient_order_outreach_id: outreach.patient_order_outreach_id,
            patient_order_outreach_result_id: outreach.patient_order_outreach_result_id,
            patient_order_id: outreach.patient_order_id,
            account_id: outreach.account_id,
            note: outreach.note.clone(),
            outreach_date,
            outreach_date_description: formatter.format_date(outreach_date, FormatStyle::Medium),
            outreach_time,
            outreach_time_description: formatter.format_time(outreach_time, FormatStyle::Short),
            outreach_date_time: outreach.outreach_date_time,
            outreach_date_time_description: formatter.format_date_time(
                outreach.outreach_date_time,
                FormatStyle::Medium,
                FormatStyle::Short,
            ),
            created: outreach.created,
            created_description: formatter.format_timestamp(outreach.created),
            last_updated: outreach.last_updated,
            last_updated_description: formatter.format_timestamp(outreach.last_updated),
            account,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientOrderVoicemailTaskApiResponse {
    pub patient_order_voicemail_task_id: Uuid,
    pub patient_order_id: Uuid,
    pub created_by_account_id: Uuid,
    pub completed_by_account_id: Option<Uuid>,
    pub deleted_by_account_id: Option<Uuid>,
    pub message: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_at_description: Option<String>,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_at_description: Option<String>,
    pub created: DateTime<Utc>,
    pub created_description: String,
    pub last_updated: DateTime<Utc>,
    pub last_updated_description: String,
    pub created_by_account_first_name: Option<String>,
    pub created_by_account_last_name: Option<String>,
    pub created_by_account_display_name: Option<String>,
    pub created_by_account_display_name_with_last_first: Option<String>,
    pub completed_by_account_first_name: Option<String>,
    pub completed_by_account_last_name: Option<String>,
    pub completed_by_account_display_name: Option<String>,
    pub completed_by_account_display_name_with_last_first: Option<String>,
}

impl PatientOrderVoicemailTaskApiResponse {
    pub fn new(formatter: &Formatter, task: &PatientOrderVoicemailTask) -> Self {
        let created_by_first = task.created_by_account_first_name.as_deref();
        let created_by_last = task.created_by_account_last_name.as_deref();
        let completed_by_first = task.completed_by_account_first_name.as_deref();
        let completed_by_last = task.completed_by_account_last_name.as_deref();

        Self {
            patient_order_voicemail_task_id: task.patient_order_voicemail_task_id,
            patient_order_id: task.patient_order_id,
            created_by_account_id: task.created_by_account_id,
            completed_by_account_id: task.completed_by_account_id,
            deleted_by_account_id: task.deleted_by_account_id,
            message: task.message.clone(),
            completed: task.completed,
            completed_at: task.completed_at,
            completed_at_description: describe_timestamp(formatter, task.completed_at),
            deleted: task.deleted,
            deleted_at: task.deleted_at,
            deleted_at_description: describe_timestamp(formatter, task.deleted_at),
            created: task.created,
            created_description: formatter.format_timestamp_with(task.created, FormatStyle::Medium, FormatStyle::Short),
            last_updated: task.last_updated,
            last_updated_description: formatter.format_timestamp_with(
                task.last_updated,
                FormatStyle::Medium,
                FormatStyle::Short,
            ),
            created_by_account_first_name: task.created_by_account_first_name.clone(),
            created_by_account_last_name: task.created_by_account_last_name.clone(),
            created_by_account_display_name: normalize_name(created_by_first, created_by_last),
            created_by_account_display_name_with_last_first: normalize_name_with_last_first(
                created_by_first,
                created_by_last,
            ),
            completed_by_account_first_name: task.completed_by_account_first_name.clone(),
            completed_by_account_last_name: task.completed_by_account_last_name.clone(),
            completed_by_account_display_name: normalize_name(completed_by_first, completed_by_last),
            completed_by_account_display_name_with_last_first: normalize_name_with_last_first(
                completed_by_first,
                completed_by_last,
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientOrderScheduledOutreachApiResponse {
    pub patient_order_scheduled_outreach_id: Uuid,
    pub patient_order_id: Uuid,
    pub patient_order_outreach_type_id: String,
    pub patient_order_scheduled_outreach_reason_id: String,
    pub patient_order_scheduled_outreach_status_id: String,
    pub created_by_account_id: Uuid,
    pub completed_by_account_id: Option<Uuid>,
    pub message: Option<String>,
    pub scheduled_at_date: NaiveDate,
    pub scheduled_at_date_description: String,
    pub scheduled_at_time: NaiveTime,
    pub scheduled_at_time_description: String,
    pub scheduled_at_date_time: NaiveDateTime,
    pub scheduled_at_date_time_description: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_at_description: Option<String>,
    pub created: DateTime<Utc>,
    pub created_description: String,
    pub last_updated: DateTime<Utc>,
    pub last_updated_description: String,
    pub created_by_account_first_name: Option<String>,
    pub created_by_account_last_name: Option<String>,
    pub created_by_account_display_name: Option<String>,
    pub created_by_account_display_name_with_last_first: Option<String>,
    pub completed_by_account_first_name: Option<String>,
    pub completed_by_account_last_name: Option<String>,
    pub completed_by_account_display_name: Option<String>,
    pub completed_by_account_display_name_with_last_first: Option<String>,
}

impl PatientOrderScheduledOutreachApiResponse {
    pub fn new(formatter: &Formatter, outreach: &PatientOrderScheduledOutreach) -> Self {
        let created_by_first = outreach.created_by_account_first_name.as_deref();
        let created_by_last = outreach.created_by_account_last_name.as_deref();
        let completed_by_first = outreach.completed_by_account_first_name.as_deref();
        let completed_by_last = outreach.completed_by_account_last_name.as_deref();
        let scheduled_at_date = outreach.scheduled_at_date_time.date();
        let scheduled_at_time = outreach.scheduled_at_date_time.time();

        Self {
            patient_order_scheduled_outreach_id: outreach.patient_order_scheduled_outreach_id,
            patient_order_id: outreach.patient_order_id,
            patient_order_outreach_type_id: outreach.patient_order_outreach_type_id.clone(),
            patient_order_scheduled_outreach_reason_id: outreach.patient_order_scheduled_outreach_reason_id.clone(),
            patient_order_scheduled_outreach_status_id: outreach.patient_order_scheduled_outreach_status_id.clone(),
            created_by_account_id: outreach.created_by_account_id,
            completed_by_account_id: outreach.completed_by_account_id,
            message: outreach.message.clone(),
            scheduled_at_date,
            scheduled_at_date_description: formatter.format_date(scheduled_at_date, FormatStyle::Medium),
            scheduled_at_time,
            scheduled_at_time_description: formatter.format_time(scheduled_at_time, FormatStyle::Short),
            scheduled_at_date_time: outreach.scheduled_at_date_time,
            scheduled_at_date_time_description: formatter.format_date_time(
                outreach.scheduled_at_date_time,
                FormatStyle::Medium,
                FormatStyle::Short,
            ),
            completed_at: outreach.completed_at,
            completed_at_description: describe_timestamp(formatter, outreach.completed_at),
            created: outreach.created,
            created_description: formatter.format_timestamp_with(outreach.created, FormatStyle::Medium, FormatStyle::Short),
            last_updated: outreach.last_updated,
            last_updated_description: formatter.format_timestamp_with(
                outreach.last_updated,
                FormatStyle::Medium,
                FormatStyle::Short,
            ),
            created_by_account_first_name: outreach.created_by_account_first_name.clone(),
            created_by_account_last_name: outreach.created_by_account_last_name.clone(),
            created_by_account_display_name: normalize_name(created_by_first, created_by_last),
            created_by_account_display_name_with_last_first: normalize_name_with_last_first(
                created_by_first,
                created_by_last,
            ),
            completed_by_account_first_name: outreach.completed_by_account_first_name.clone(),
            completed_by_account_last_name: outreach.completed_by_account_last_name.clone(),
            completed_by_account_display_name: normalize_name(completed_by_first, completed_by_last),
            completed_by_account_display_name_with_last_first: normalize_name_with_last_first(
                completed_by_first,
                completed_by_last,
            ),
        }
    }
}

// ==============================================================================
// DIAGNOSES, MEDICATIONS AND NOTES
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientOrderDiagnosisApiResponse {
    pub patient_order_diagnosis_id: Uuid,
    pub diagnosis_id: Option<String>,
    pub diagnosis_id_type: Option<String>,
    pub diagnosis_name: Option<String>,
}

impl From<&PatientOrderDiagnosis> for PatientOrderDiagnosisApiResponse {
    fn from(diagnosis: &PatientOrderDiagnosis) -> Self {
        Self {
            patient_order_diagnosis_id: diagnosis.patient_order_diagnosis_id,
            diagnosis_id: diagnosis.diagnosis_id.clone(),
            diagnosis_id_type: diagnosis.diagnosis_id_type.clone(),
            diagnosis_name: diagnosis.diagnosis_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientOrderMedicationApiResponse {
    pub patient_order_medication_id: Uuid,
    pub medication_id: Option<String>,
    pub medication_id_type: Option<String>,
    pub medication_name: Option<String>,
}

impl From<&PatientOrderMedication> for PatientOrderMedicationApiResponse {
    fn from(medication: &PatientOrderMedication) -> Self {
        Self {
            patient_order_medication_id: medication.patient_order_medication_id,
            medication_id: medication.medication_id.clone(),
            medication_id_type: medication.medication_id_type.clone(),
            medication_name: medication.medication_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientOrderNoteApiResponse {
    pub patient_order_note_id: Uuid,
    pub patient_order_id: Uuid,
    pub account_id: Uuid,
    pub note: String,
    pub created: DateTime<Utc>,
    pub created_description: String,
    pub last_updated: DateTime<Utc>,
    pub last_updated_description: String,
    pub account: AccountApiResponse,
}

/// Notes carry their author's account, looked up the same way outreach does.
#[derive(Clone)]
pub struct PatientOrderNoteApiResponseFactory {
    account_service: Arc<dyn AccountService>,
    account_factory: AccountApiResponseFactory,
    strings: Arc<Strings>,
}

impl PatientOrderNoteApiResponseFactory {
    pub fn new(
        account_service: Arc<dyn AccountService>,
        account_factory: AccountApiResponseFactory,
        strings: Arc<Strings>,
    ) -> Self {
        Self {
            account_service,
            account_factory,
            strings,
        }
    }

    pub async fn create(
        &self,
        context: &CurrentContext,
        note: &PatientOrderNote,
    ) -> Result<PatientOrderNoteApiResponse, AppError> {
        let formatter = Formatter::new(context, self.strings.clone());

        let account = self
            .account_service
            .find_account_by_id(note.account_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account {} not found", note.account_id)))?;
        let account = self.account_factory.create(context, &account, &HashSet::new()).await?;

        Ok(PatientOrderNoteApiResponse {
            patient_order_note_id: note.patient_order_note_id,
            patient_order_id: note.patient_order_id,
            account_id: note.account_id,
            note: note.note.clone(),
            created: note.created,
            created_description: formatter.format_timestamp(note.created),
            last_updated: note.last_updated,
            last_updated_description: formatter.format_timestamp(note.last_updated),
            account,
        })
    }
}

// ==============================================================================
// TRIAGE
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientOrderTriageApiResponse {
    pub patient_order_triage_id: Uuid,
    pub patient_order_id: Uuid,
    pub patient_order_focus_type_id: String,
    pub patient_order_care_type_id: String,
    pub patient_order_triage_source_id: String,
    pub patient_order_triage_override_reason_id: Option<String>,
    pub screening_session_id: Option<Uuid>,
    pub account_id: Option<Uuid>,
    pub reason: Option<String>,
    pub active: bool,
    pub created: DateTime<Utc>,
    pub created_description: String,
    pub last_updated: DateTime<Utc>,
    pub last_updated_description: String,
}

impl PatientOrderTriageApiResponse {
    pub fn new(formatter: &Formatter, triage: &PatientOrderTriage) -> Self {
        Self {
            patient_order_triage_id: triage.patient_order_triage_id,
            patient_order_id: triage.patient_order_id,
            patient_order_focus_type_id: triage.patient_order_focus_type_id.clone(),
            patient_order_care_type_id: triage.patient_order_care_type_id.clone(),
            patient_order_triage_source_id: triage.patient_order_triage_source_id.clone(),
            patient_order_triage_override_reason_id: triage.patient_order_triage_override_reason_id.clone(),
            screening_session_id: triage.screening_session_id,
            account_id: triage.account_id,
            reason: triage.reason.clone(),
            active: triage.active,
            created: triage.created,
            created_description: formatter.format_timestamp(triage.created),
            last_updated: triage.last_updated,
            last_updated_description: formatter.format_timestamp(triage.last_updated),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientOrderTriageGroupFocusApiResponse {
    pub patient_order_focus_type_id: String,
    pub patient_order_focus_type_description: Option<String>,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientOrderTriageGroupApiResponse {
    pub patient_order_triage_source_id: String,
    pub patient_order_care_type_id: String,
    pub patient_order_care_type_description: Option<String>,
    pub patient_order_focus_types: Vec<PatientOrderTriageGroupFocusApiResponse>,
}

fn bucket_by<'a, F>(triages: impl IntoIterator<Item = &'a PatientOrderTriage>, key: F) -> Vec<(String, Vec<&'a PatientOrderTriage>)>
where
    F: Fn(&PatientOrderTriage) -> &str,
{
    let mut buckets: Vec<(String, Vec<&'a PatientOrderTriage>)> = Vec::new();

    for triage in triages {
        let id = key(triage);
        match buckets.iter_mut().find(|(bucket_id, _)| bucket_id == id) {
            Some((_, bucket)) => bucket.push(triage),
            None => buckets.push((id.to_string(), vec![triage])),
        }
    }

    buckets
}

/// Groups triages by care type, then by focus type within each care type,
/// both in first-seen order. Reasons are de-duplicated in order.
pub fn group_triages(
    triage_group: &PatientOrderTriageGroup,
    triages: &[PatientOrderTriage],
    care_types: &[PatientOrderCareType],
    focus_types: &[PatientOrderFocusType],
) -> Vec<PatientOrderTriageGroupApiResponse> {
    let care_types_by_id: HashMap<&str, &PatientOrderCareType> = care_types
        .iter()
        .map(|care_type| (care_type.patient_order_care_type_id.as_str(), care_type))
        .collect();
    let focus_types_by_id: HashMap<&str, &PatientOrderFocusType> = focus_types
        .iter()
        .map(|focus_type| (focus_type.patient_order_focus_type_id.as_str(), focus_type))
        .collect();

    bucket_by(triages, |triage| triage.patient_order_care_type_id.as_str())
        .into_iter()
        .map(|(care_type_id, care_type_triages)| {
            let patient_order_focus_types = bucket_by(care_type_triages, |triage| {
                triage.patient_order_focus_type_id.as_str()
            })
            .into_iter()
            .map(|(focus_type_id, focus_triages)| {
                let mut reasons: Vec<String> = Vec::new();
                for reason in focus_triages.iter().filter_map(|triage| triage.reason.as_ref()) {
                    if !reasons.contains(reason) {
                        reasons.push(reason.clone());
                    }
                }

                PatientOrderTriageGroupFocusApiResponse {
                    patient_order_focus_type_description: focus_types_by_id
                        .get(focus_type_id.as_str())
                        .map(|focus_type| focus_type.description.clone()),
                    patient_order_focus_type_id: focus_type_id,
                    reasons,
                }
            })
            .collect();

            PatientOrderTriageGroupApiResponse {
                patient_order_triage_source_id: triage_group.patient_order_triage_source_id.clone(),
                patient_order_care_type_description: care_types_by_id
                    .get(care_type_id.as_str())
                    .map(|care_type| care_type.description.clone()),
                patient_order_care_type_id: care_type_id,
                patient_order_focus_types,
            }
        })
        .collect()
}

// ==============================================================================
// PATIENT ORDER
// ==============================================================================

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientOrderApiResponse {
    pub patient_order_id: Uuid,
    pub patient_order_triage_status_id: Option<String>,
    pub patient_order_triage_status_description: Option<String>,
    pub patient_order_disposition_id: Option<String>,
    pub patient_order_disposition_description: Option<String>,
    pub patient_order_screening_status_id: Option<String>,
    pub patient_order_screening_status_description: Option<String>,
    pub patient_order_closure_reason_id: Option<String>,
    pub patient_order_closure_reason_description: Option<String>,
    pub patient_account_id: Option<Uuid>,
    pub patient_address_id: Option<Uuid>,
    pub patient_first_name: Option<String>,
    pub patient_last_name: Option<String>,
    pub patient_display_name: Option<String>,
    pub patient_display_name_with_last_first: Option<String>,
    pub patient_mrn: Option<String>,
    pub patient_unique_id: Option<String>,
    pub patient_birth_sex_id: Option<String>,
    pub patient_birthdate: Option<NaiveDate>,
    pub patient_birthdate_description: Option<String>,
    pub patient_phone_number: Option<String>,
    pub patient_phone_number_description: Option<String>,
    pub patient_email_address: Option<String>,
    pub patient_language_code: Option<String>,
    pub patient_age_on_order_date: Option<i32>,
    pub patient_age_on_order_date_description: Option<String>,
    pub referring_practice_id: Option<String>,
    pub referring_practice_name: Option<String>,
    pub ordering_provider_id: Option<String>,
    pub ordering_provider_first_name: Option<String>,
    pub ordering_provider_middle_name: Option<String>,
    pub ordering_provider_last_name: Option<String>,
    pub ordering_provider_display_name: Option<String>,
    pub ordering_provider_display_name_with_last_first: Option<String>,
    pub billing_provider_id: Option<String>,
    pub billing_provider_first_name: Option<String>,
    pub billing_provider_middle_name: Option<String>,
    pub billing_provider_last_name: Option<String>,
    pub billing_provider_display_name: Option<String>,
    pub billing_provider_display_name_with_last_first: Option<String>,
    pub primary_payor_name: Option<String>,
    pub primary_plan_name: Option<String>,
    pub patient_order_care_preference_id: Option<String>,
    pub in_person_care_radius: Option<i32>,
    pub in_person_care_radius_description: Option<String>,
    pub in_person_care_radius_distance_unit_id: Option<DistanceUnitId>,
    pub in_person_care_radius_with_distance_unit_description: String,
    pub most_recent_screening_session_id: Option<Uuid>,
    pub most_recent_screening_session_created_at: Option<DateTime<Utc>>,
    pub most_recent_screening_session_created_at_description: Option<String>,
    pub most_recent_screening_session_completed: Option<bool>,
    pub most_recent_screening_session_completed_at: Option<DateTime<Utc>>,
    pub most_recent_screening_session_completed_at_description: Option<String>,
    pub most_recent_intake_screening_session_id: Option<Uuid>,
    pub most_recent_intake_screening_session_created_at: Option<DateTime<Utc>>,
    pub most_recent_intake_screening_session_created_at_description: Option<String>,
    pub most_recent_intake_screening_session_completed: Option<bool>,
    pub most_recent_intake_screening_session_completed_at: Option<DateTime<Utc>>,
    pub most_recent_intake_screening_session_completed_at_description: Option<String>,
    pub test_patient_order: bool,

    // EVERYTHING
    pub patient_address: Option<AddressApiResponse>,
    pub patient_account: Option<AccountApiResponse>,
    pub screening_session: Option<ScreeningSessionApiResponse>,
    pub intake_screening_session: Option<ScreeningSessionApiResponse>,
    pub screening_session_result: Option<ScreeningSessionResult>,
    pub intake_screening_session_result: Option<ScreeningSessionResult>,
    pub patient_order_triage_groups: Option<Vec<PatientOrderTriageGroupApiResponse>>,
    pub patient_order_triages: Option<Vec<PatientOrderTriageApiResponse>>,

    // MHIC only
    pub panel_account_id: Option<Uuid>,
    pub panel_account_first_name: Option<String>,
    pub panel_account_last_name: Option<String>,
    pub panel_account_display_name: Option<String>,
    pub panel_account_display_name_with_last_first: Option<String>,
    pub encounter_department_id: Option<String>,
    pub encounter_department_name: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub order_date_description: Option<String>,
    pub order_age_in_minutes: Option<i64>,
    pub order_age_in_minutes_description: Option<String>,
    pub order_id: Option<String>,
    pub routing: Option<String>,
    pub reason_for_referral: Option<String>,
    pub associated_diagnosis: Option<String>,
    pub preferred_contact_hours: Option<String>,
    pub comments: Option<String>,
    pub cc_recipients: Option<String>,
    pub medications: Option<String>,
    pub patient_order_diagnoses: Option<Vec<PatientOrderDiagnosisApiResponse>>,
    pub patient_order_medications: Option<Vec<PatientOrderMedicationApiResponse>>,
    pub patient_order_notes: Option<Vec<PatientOrderNoteApiResponse>>,
    pub patient_order_scheduled_outreaches: Option<Vec<PatientOrderScheduledOutreachApiResponse>>,
    pub patient_order_scheduled_screening_id: Option<Uuid>,
    pub patient_order_scheduled_screening_scheduled_date_time: Option<NaiveDateTime>,
    pub patient_order_scheduled_screening_scheduled_date_time_description: Option<String>,
    pub patient_order_scheduled_screening_calendar_url: Option<String>,
    pub episode_closed_at: Option<DateTime<Utc>>,
    pub episode_closed_at_description: Option<String>,
    pub episode_closed_by_account_id: Option<Uuid>,
    pub episode_duration_in_days: Option<i64>,
    pub episode_duration_in_days_description: Option<String>,
    pub patient_order_care_type_id: Option<String>,
    pub patient_order_care_type_description: Option<String>,
    pub total_outreach_count: Option<i32>,
    pub total_outreach_count_description: Option<String>,
    pub most_recent_total_outreach_date_time: Option<NaiveDateTime>,
    pub most_recent_total_outreach_date_time_description: Option<String>,
    pub outreach_count: Option<i32>,
    pub outreach_count_description: Option<String>,
    pub most_recent_outreach_date_time: Option<NaiveDateTime>,
    pub most_recent_outreach_date_time_description: Option<String>,
    pub scheduled_message_group_count: Option<i32>,
    pub scheduled_message_group_count_description: Option<String>,
    pub most_recent_scheduled_message_group_date_time: Option<NaiveDateTime>,
    pub most_recent_scheduled_message_group_date_time_description: Option<String>,
    pub patient_order_scheduled_message_groups: Option<Vec<PatientOrderScheduledMessageGroupApiResponse>>,
    pub patient_order_outreaches: Option<Vec<PatientOrderOutreachApiResponse>>,
    pub patient_order_voicemail_tasks: Option<Vec<PatientOrderVoicemailTaskApiResponse>>,
    pub last_contact_type_id: Option<String>,
    pub last_contacted_at: Option<DateTime<Utc>>,
    pub last_contacted_at_description: Option<String>,
    pub last_contacted_at_date: Option<NaiveDate>,
    pub last_contacted_at_date_description: Option<String>,
    pub last_contacted_at_time: Option<NaiveTime>,
    pub last_contacted_at_time_description: Option<String>,
    pub next_contact_type_id: Option<String>,
    pub next_contact_scheduled_at: Option<NaiveDateTime>,
    pub next_contact_scheduled_at_description: Option<String>,
    pub next_contact_scheduled_at_date: Option<NaiveDate>,
    pub next_contact_scheduled_at_date_description: Option<String>,
    pub next_contact_scheduled_at_time: Option<NaiveTime>,
    pub next_contact_scheduled_at_time_description: Option<String>,
}

/// "Unspecified" when no radius is set, otherwise e.g. "10 mi".
pub fn care_radius_description(formatter: &Formatter, radius: Option<i32>, unit: Option<DistanceUnitId>) -> String {
    let Some(radius) = radius else {
        return formatter.string("Unspecified", &[]);
    };

    // Miles only when stated.
    let distance_unit = match unit {
        Some(DistanceUnitId::Mile) => formatter.string("mi", &[]),
        _ => formatter.string("km", &[]),
    };

    formatter.string(
        "{{radius}} {{distanceUnit}}",
        &[("radius", radius.to_string()), ("distanceUnit", distance_unit)],
    )
}

#[derive(Clone)]
pub struct PatientOrderApiResponseFactory {
    patient_order_service: Arc<dyn PatientOrderService>,
    account_service: Arc<dyn AccountService>,
    screening_service: Arc<dyn ScreeningService>,
    account_factory: AccountApiResponseFactory,
    outreach_factory: PatientOrderOutreachApiResponseFactory,
    note_factory: PatientOrderNoteApiResponseFactory,
    screening_session_factory: ScreeningSessionApiResponseFactory,
    strings: Arc<Strings>,
}

impl PatientOrderApiResponseFactory {
    pub fn new(
        patient_order_service: Arc<dyn PatientOrderService>,
        account_service: Arc<dyn AccountService>,
        screening_service: Arc<dyn ScreeningService>,
        account_factory: AccountApiResponseFactory,
        strings: Arc<Strings>,
    ) -> Self {
        Self {
            outreach_factory: PatientOrderOutreachApiResponseFactory::new(
                account_service.clone(),
                account_factory.clone(),
                strings.clone(),
            ),
            note_factory: PatientOrderNoteApiResponseFactory::new(
                account_service.clone(),
                account_factory.clone(),
                strings.clone(),
            ),
            screening_session_factory: ScreeningSessionApiResponseFactory::new(
                screening_service.clone(),
                strings.clone(),
            ),
            patient_order_service,
            account_service,
            screening_service,
            account_factory,
            strings,
        }
    }

    pub fn from_config(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self::new(
            Arc::new(SupabasePatientOrderService::new(config, auth_token)),
            Arc::new(SupabaseAccountService::new(config, auth_token)),
            Arc::new(SupabaseScreeningService::new(config, auth_token)),
            AccountApiResponseFactory::from_config(config, auth_token),
            Strings::shared(config),
        )
    }

    pub async fn create(
        &self,
        context: &CurrentContext,
        patient_order: &PatientOrder,
        format: PatientOrderApiResponseFormat,
        supplements: &HashSet<PatientOrderSupplement>,
    ) -> Result<PatientOrderApiResponse, AppError> {
        let formatter = Formatter::new(context, self.strings.clone());
        let mut response = Self::base(&formatter, patient_order);

        if supplements.contains(&PatientOrderSupplement::Everything) {
            self.fill_everything(context, patient_order, format, &mut response).await?;
        }

        if format == PatientOrderApiResponseFormat::Mhic {
            Self::fill_mhic(&formatter, context, patient_order, &mut response);
            response.patient_order_scheduled_message_groups =
                Some(self.scheduled_message_groups(&formatter, patient_order.patient_order_id).await?);
        }

        Ok(response)
    }

    fn base(formatter: &Formatter, patient_order: &PatientOrder) -> PatientOrderApiResponse {
        let patient_first = patient_order.patient_first_name.as_deref();
        let patient_last = patient_order.patient_last_name.as_deref();
        let ordering_first = patient_order.ordering_provider_first_name.as_deref();
        let ordering_middle = patient_order.ordering_provider_middle_name.as_deref();
        let ordering_last = patient_order.ordering_provider_last_name.as_deref();
        let billing_first = patient_order.billing_provider_first_name.as_deref();
        let billing_middle = patient_order.billing_provider_middle_name.as_deref();
        let billing_last = patient_order.billing_provider_last_name.as_deref();

        PatientOrderApiResponse {
            patient_order_id: patient_order.patient_order_id,
            patient_order_triage_status_id: patient_order.patient_order_triage_status_id.clone(),
            patient_order_triage_status_description: patient_order.patient_order_triage_status_description.clone(),
            patient_order_disposition_id: patient_order.patient_order_disposition_id.clone(),
            patient_order_disposition_description: patient_order.patient_order_disposition_description.clone(),
            patient_order_screening_status_id: patient_order.patient_order_screening_status_id.clone(),
            patient_order_screening_status_description: patient_order
                .patient_order_screening_status_description
                .clone(),
            patient_order_closure_reason_id: patient_order.patient_order_closure_reason_id.clone(),
            patient_order_closure_reason_description: patient_order.patient_order_closure_reason_description.clone(),
            patient_account_id: patient_order.patient_account_id,
            patient_address_id: patient_order.patient_address_id,
            patient_first_name: patient_order.patient_first_name.clone(),
            patient_last_name: patient_order.patient_last_name.clone(),
            patient_display_name: normalize_name(patient_first, patient_last),
            patient_display_name_with_last_first: normalize_name_with_last_first(patient_first, patient_last),
            patient_mrn: patient_order.patient_mrn.clone(),
            patient_unique_id: patient_order.patient_unique_id.clone(),
            patient_birth_sex_id: patient_order.patient_birth_sex_id.clone(),
            patient_birthdate: patient_order.patient_birthdate,
            patient_birthdate_description: patient_order
                .patient_birthdate
                .map(|birthdate| formatter.format_date(birthdate, FormatStyle::Medium)),
            patient_phone_number: patient_order.patient_phone_number.clone(),
            patient_phone_number_description: formatter
                .format_phone_number(patient_order.patient_phone_number.as_deref()),
            patient_email_address: patient_order.patient_email_address.clone(),
            patient_language_code: patient_order.patient_language_code.clone(),
            patient_age_on_order_date: patient_order.patient_age_on_order_date,
            patient_age_on_order_date_description: patient_order
                .patient_age_on_order_date
                .map(|age| formatter.format_integer(age as f64)),
            referring_practice_id: patient_order.referring_practice_id.clone(),
            referring_practice_name: patient_order.referring_practice_name.clone(),
            ordering_provider_id: patient_order.ordering_provider_id.clone(),
            ordering_provider_first_name: patient_order.ordering_provider_first_name.clone(),
            ordering_provider_middle_name: patient_order.ordering_provider_middle_name.clone(),
            ordering_provider_last_name: patient_order.ordering_provider_last_name.clone(),
            ordering_provider_display_name: normalize_name_with_middle(ordering_first, ordering_middle, ordering_last),
            ordering_provider_display_name_with_last_first: normalize_name_with_last_first(
                ordering_first,
                ordering_last,
            ),
            billing_provider_id: patient_order.billing_provider_id.clone(),
            billing_provider_first_name: patient_order.billing_provider_first_name.clone(),
            billing_provider_middle_name: patient_order.billing_provider_middle_name.clone(),
            billing_provider_last_name: patient_order.billing_provider_last_name.clone(),
            billing_provider_display_name: normalize_name_with_middle(billing_first, billing_middle, billing_last),
            billing_provider_display_name_with_last_first: normalize_name_with_last_first(billing_first, billing_last),
            primary_payor_name: patient_order.primary_payor_name.clone(),
            primary_plan_name: patient_order.primary_plan_name.clone(),
            patient_order_care_preference_id: patient_order.patient_order_care_preference_id.clone(),
            in_person_care_radius: patient_order.in_person_care_radius,
            in_person_care_radius_description: patient_order
                .in_person_care_radius
                .map(|radius| formatter.format_integer(radius as f64)),
            in_person_care_radius_distance_unit_id: patient_order.in_person_care_radius_distance_unit_id,
            in_person_care_radius_with_distance_unit_description: care_radius_description(
                formatter,
                patient_order.in_person_care_radius,
                patient_order.in_person_care_radius_distance_unit_id,
            ),
            most_recent_screening_session_id: patient_order.most_recent_screening_session_id,
            most_recent_screening_session_created_at: patient_order.most_recent_screening_session_created_at,
            most_recent_screening_session_created_at_description: describe_timestamp(
                formatter,
                patient_order.most_recent_screening_session_created_at,
            ),
            most_recent_screening_session_completed: patient_order.most_recent_screening_session_completed,
            most_recent_screening_session_completed_at: patient_order.most_recent_screening_session_completed_at,
            most_recent_screening_session_completed_at_description: describe_timestamp(
                formatter,
                patient_order.most_recent_screening_session_completed_at,
            ),
            most_recent_intake_screening_session_id: patient_order.most_recent_intake_screening_session_id,
            most_recent_intake_screening_session_created_at: patient_order
                .most_recent_intake_screening_session_created_at,
            most_recent_intake_screening_session_created_at_description: describe_timestamp(
                formatter,
                patient_order.most_recent_intake_screening_session_created_at,
            ),
            most_recent_intake_screening_session_completed: patient_order
                .most_recent_intake_screening_session_completed,
            most_recent_intake_screening_session_completed_at: patient_order
                .most_recent_intake_screening_session_completed_at,
            most_recent_intake_screening_session_completed_at_description: describe_timestamp(
                formatter,
                patient_order.most_recent_intake_screening_session_completed_at,
            ),
            test_patient_order: patient_order.test_patient_order,
            ..PatientOrderApiResponse::default()
        }
    }

    async fn fill_everything(
        &self,
        context: &CurrentContext,
        patient_order: &PatientOrder,
        format: PatientOrderApiResponseFormat,
        response: &mut PatientOrderApiResponse,
    ) -> Result<(), AppError> {
        let formatter = Formatter::new(context, self.strings.clone());
        let patient_order_id = patient_order.patient_order_id;

        if let Some(address_id) = patient_order.patient_address_id {
            response.patient_address = self
                .patient_order_service
                .find_address_by_id(address_id)
                .await?
                .as_ref()
                .map(AddressApiResponse::from);
        }

        if let Some(account_id) = patient_order.patient_account_id {
            if let Some(account) = self.account_service.find_account_by_id(account_id).await? {
                response.patient_account = Some(self.account_factory.create(context, &account, &HashSet::new()).await?);
            }
        }

        (response.intake_screening_session, response.intake_screening_session_result) =
            self.screening_session(context, patient_order.most_recent_intake_screening_session_id).await?;
        (response.screening_session, response.screening_session_result) =
            self.screening_session(context, patient_order.most_recent_screening_session_id).await?;

        if let Some(triage_group) = self
            .patient_order_service
            .find_active_patient_order_triage_group_by_patient_order_id(patient_order_id)
            .await?
        {
            let triages = self
                .patient_order_service
                .find_patient_order_triages_by_patient_order_triage_group_id(triage_group.patient_order_triage_group_id)
                .await?;

            if !triages.is_empty() {
                let care_types = self.patient_order_service.find_patient_order_care_types().await?;
                let focus_types = self.patient_order_service.find_patient_order_focus_types().await?;

                response.patient_order_triage_groups =
                    Some(group_triages(&triage_group, &triages, &care_types, &focus_types));
                response.patient_order_triages = Some(
                    triages
                        .iter()
                        .map(|triage| PatientOrderTriageApiResponse::new(&formatter, triage))
                        .collect(),
                );
            }
        }

        if format == PatientOrderApiResponseFormat::Mhic {
            response.patient_order_diagnoses = Some(
                self.patient_order_service
                    .find_patient_order_diagnoses_by_patient_order_id(patient_order_id)
                    .await?
                    .iter()
                    .map(PatientOrderDiagnosisApiResponse::from)
                    .collect(),
            );

            response.patient_order_medications = Some(
                self.patient_order_service
                    .find_patient_order_medications_by_patient_order_id(patient_order_id)
                    .await?
                    .iter()
                    .map(PatientOrderMedicationApiResponse::from)
                    .collect(),
            );

            let notes = self
                .patient_order_service
                .find_patient_order_notes_by_patient_order_id(patient_order_id)
                .await?;
            response.patient_order_notes =
                Some(try_join_all(notes.iter().map(|note| self.note_factory.create(context, note))).await?);

            let outreaches = self
                .patient_order_service
                .find_patient_order_outreaches_by_patient_order_id(patient_order_id)
                .await?;
            response.patient_order_outreaches = Some(
                try_join_all(
                    outreaches
                        .iter()
                        .map(|outreach| self.outreach_factory.create(context, outreach)),
                )
                .await?,
            );

            response.patient_order_voicemail_tasks = Some(
                self.patient_order_service
                    .find_patient_order_voicemail_tasks_by_patient_order_id(patient_order_id)
                    .await?
                    .iter()
                    .map(|task| PatientOrderVoicemailTaskApiResponse::new(&formatter, task))
                    .collect(),
            );

            response.patient_order_scheduled_outreaches = Some(
                self.patient_order_service
                    .find_patient_order_scheduled_outreaches_by_patient_order_id(patient_order_id)
                    .await?
                    .iter()
                    .map(|outreach| PatientOrderScheduledOutreachApiResponse::new(&formatter, outreach))
                    .collect(),
            );
        }

        Ok(())
    }

    /// The session itself plus everything answered in it.
    async fn screening_session(
        &self,
        context: &CurrentContext,
        screening_session_id: Option<Uuid>,
    ) -> Result<(Option<ScreeningSessionApiResponse>, Option<ScreeningSessionResult>), AppError> {
        let Some(screening_session_id) = screening_session_id else {
            return Ok((None, None));
        };

        let Some(screening_session) = self.screening_service.find_screening_session_by_id(screening_session_id).await?
        else {
            return Ok((None, None));
        };

        let response = self
            .screening_session_factory
            .create(context, &screening_session, &HashSet::new())
            .await?;
        let result = self.screening_service.find_screening_session_result(&screening_session).await?;

        Ok((Some(response), result))
    }

    fn fill_mhic(
        formatter: &Formatter,
        context: &CurrentContext,
        patient_order: &PatientOrder,
        response: &mut PatientOrderApiResponse,
    ) {
        let panel_first = patient_order.panel_account_first_name.as_deref();
        let panel_last = patient_order.panel_account_last_name.as_deref();

        response.panel_account_id = patient_order.panel_account_id;
        response.panel_account_first_name = patient_order.panel_account_first_name.clone();
        response.panel_account_last_name = patient_order.panel_account_last_name.clone();
        response.panel_account_display_name = normalize_name(panel_first, panel_last);
        response.panel_account_display_name_with_last_first = normalize_name_with_last_first(panel_first, panel_last);
        response.encounter_department_id = patient_order.encounter_department_id.clone();
        response.encounter_department_name = patient_order.encounter_department_name.clone();
        response.order_date = patient_order.order_date;
        response.order_date_description = patient_order
            .order_date
            .map(|order_date| formatter.format_date(order_date, FormatStyle::Medium));
        response.order_age_in_minutes = patient_order.order_age_in_minutes;
        response.order_age_in_minutes_description = patient_order
            .order_age_in_minutes
            .map(|minutes| formatter.format_number(minutes as f64));
        response.order_id = patient_order.order_id.clone();
        response.routing = patient_order.routing.clone();
        response.reason_for_referral = patient_order.reason_for_referral.clone();
        response.associated_diagnosis = patient_order.associated_diagnosis.clone();
        response.preferred_contact_hours = patient_order.preferred_contact_hours.clone();
        response.comments = patient_order.comments.clone();
        response.cc_recipients = patient_order.cc_recipients.clone();
        response.medications = patient_order.medications.clone();
        response.patient_order_scheduled_screening_id = patient_order.patient_order_scheduled_screening_id;
        response.patient_order_scheduled_screening_scheduled_date_time =
            patient_order.patient_order_scheduled_screening_scheduled_date_time;
        response.patient_order_scheduled_screening_scheduled_date_time_description =
            describe_date_time(formatter, patient_order.patient_order_scheduled_screening_scheduled_date_time);
        response.patient_order_scheduled_screening_calendar_url =
            patient_order.patient_order_scheduled_screening_calendar_url.clone();
        response.episode_closed_at = patient_order.episode_closed_at;
        response.episode_closed_at_description = describe_timestamp(formatter, patient_order.episode_closed_at);
        response.episode_closed_by_account_id = patient_order.episode_closed_by_account_id;
        response.episode_duration_in_days = patient_order.episode_duration_in_days;
        response.episode_duration_in_days_description = patient_order
            .episode_duration_in_days
            .map(|days| formatter.string("{{n}} days", &[("n", formatter.format_integer(days as f64))]));
        response.patient_order_care_type_id = patient_order.patient_order_care_type_id.clone();
        response.patient_order_care_type_description = patient_order.patient_order_care_type_description.clone();

        response.total_outreach_count = patient_order.total_outreach_count;
        response.total_outreach_count_description =
            Some(formatter.format_number(patient_order.total_outreach_count.unwrap_or(0) as f64));
        response.most_recent_total_outreach_date_time = patient_order.most_recent_total_outreach_date_time;
        response.most_recent_total_outreach_date_time_description =
            describe_date_time(formatter, patient_order.most_recent_total_outreach_date_time);
        response.outreach_count = patient_order.outreach_count;
        response.outreach_count_description =
            Some(formatter.format_number(patient_order.outreach_count.unwrap_or(0) as f64));
        response.most_recent_outreach_date_time = patient_order.most_recent_outreach_date_time;
        response.most_recent_outreach_date_time_description =
            describe_date_time(formatter, patient_order.most_recent_outreach_date_time);
        response.scheduled_message_group_count = patient_order.scheduled_message_group_count;
        response.scheduled_message_group_count_description =
            Some(formatter.format_number(patient_order.scheduled_message_group_count.unwrap_or(0) as f64));
        response.most_recent_scheduled_message_group_date_time =
            patient_order.most_recent_scheduled_message_group_date_time;
        response.most_recent_scheduled_message_group_date_time_description =
            describe_date_time(formatter, patient_order.most_recent_scheduled_message_group_date_time);

        response.last_contact_type_id = patient_order.last_contact_type_id.clone();
        response.last_contacted_at = patient_order.last_contacted_at;
        if let Some(last_contacted_at) = patient_order.last_contacted_at {
            let local = last_contacted_at.with_timezone(&context.time_zone);
            response.last_contacted_at_description = describe_timestamp(formatter, Some(last_contacted_at));
            response.last_contacted_at_date = Some(local.date_naive());
            response.last_contacted_at_date_description =
                Some(formatter.format_date(local.date_naive(), FormatStyle::Medium));
            response.last_contacted_at_time = Some(local.time());
            response.last_contacted_at_time_description = Some(formatter.format_time(local.time(), FormatStyle::Short));
        }

        response.next_contact_type_id = patient_order.next_contact_type_id.clone();
        response.next_contact_scheduled_at = patient_order.next_contact_scheduled_at;
        if let Some(next_contact_scheduled_at) = patient_order.next_contact_scheduled_at {
            response.next_contact_scheduled_at_description =
                describe_date_time(formatter, Some(next_contact_scheduled_at));
            response.next_contact_scheduled_at_date = Some(next_contact_scheduled_at.date());
            response.next_contact_scheduled_at_date_description =
                Some(formatter.format_date(next_contact_scheduled_at.date(), FormatStyle::Medium));
            response.next_contact_scheduled_at_time = Some(next_contact_scheduled_at.time());
            response.next_contact_scheduled_at_time_description =
                Some(formatter.format_time(next_contact_scheduled_at.time(), FormatStyle::Short));
        }
    }

    async fn scheduled_message_groups(
        &self,
        formatter: &Formatter,
        patient_order_id: Uuid,
    ) -> Result<Vec<PatientOrderScheduledMessageGroupApiResponse>, AppError> {
        let messages = self
            .patient_order_service
            .find_patient_order_scheduled_messages_by_patient_order_id(patient_order_id)
            .await?;

        if messages.is_empty() {
            return Ok(Vec::new());
        }

        let grouped = group_scheduled_messages(messages);
        let groups = self
            .patient_order_service
            .find_patient_order_scheduled_message_groups_by_ids(grouped.iter().map(|(id, _)| *id).collect())
            .await?;

        debug!(
            "Patient order {} has {} scheduled message groups",
            patient_order_id,
            grouped.len()
        );

        grouped
            .iter()
            .map(|(group_id, group_messages)| {
                let group = groups
                    .iter()
                    .find(|group| group.patient_order_scheduled_message_group_id == *group_id)
                    .ok_or_else(|| {
                        AppError::Internal(format!("Missing patient order scheduled message group {}", group_id))
                    })?;

                PatientOrderScheduledMessageGroupApiResponse::new(formatter, group, group_messages)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::patient_order::MockPatientOrderService;
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use shared_models::auth::RoleId;
    use shared_models::context::{InstitutionId, Viewer};
    use shared_utils::test_utils::TestConfig;

    fn patient_order() -> PatientOrder {
        serde_json::from_value(serde_json::json!({
            "patient_order_id": Uuid::new_v4(),
            "patient_first_name": "Jane",
            "patient_last_name": "Doe",
            "patient_birthdate": "1990-04-15",
            "patient_phone_number": "2155551212",
            "patient_age_on_order_date": 33,
            "ordering_provider_first_name": "Ann",
            "ordering_provider_middle_name": "B",
            "ordering_provider_last_name": "Carter",
            "order_date": "2024-01-05",
            "order_age_in_minutes": 12345,
            "episode_duration_in_days": 1,
            "total_outreach_count": 2,
            "in_person_care_radius": 10,
            "in_person_care_radius_distance_unit_id": "MILE",
            "last_contacted_at": "2024-01-05T15:00:00Z",
            "next_contact_scheduled_at": "2024-01-09T09:30:00",
            "patient_order_scheduled_screening_id": Uuid::new_v4(),
            "patient_order_scheduled_screening_scheduled_date_time": "2024-01-12T14:00:00",
            "patient_order_scheduled_screening_calendar_url": "https://calendar.example.com/screening"
        }))
        .unwrap()
    }

    fn scheduled_message(group_id: Uuid, scheduled_at: &str) -> PatientOrderScheduledMessage {
        serde_json::from_value(serde_json::json!({
            "patient_order_scheduled_message_id": Uuid::new_v4(),
            "patient_order_scheduled_message_group_id": group_id,
            "patient_order_id": Uuid::new_v4(),
            "institution_id": "COBALT",
            "scheduled_message_id": Uuid::new_v4(),
            "scheduled_message_status_id": "PENDING",
            "scheduled_message_source_id": "MANUAL",
            "scheduled_by_account_id": null,
            "patient_order_scheduled_message_type_description": "Welcome",
            "message_type_id": "SMS",
            "message_type_description": "Text",
            "message_id": null,
            "message_status_id": null,
            "message_status_description": null,
            "scheduled_at": scheduled_at,
            "time_zone": "America/New_York",
            "processed_at": null,
            "canceled_at": null,
            "errored_at": null,
            "sent_at": null,
            "delivered_at": null,
            "delivery_failed_at": null,
            "delivery_failed_reason": null,
            "complaint_registered_at": null,
            "sms_to_number": "2155551212",
            "email_to_addresses": null,
            "created": "2024-01-02T15:00:00Z",
            "last_updated": "2024-01-02T15:00:00Z"
        }))
        .unwrap()
    }

    fn triage(care_type: &str, focus_type: &str, reason: Option<&str>) -> PatientOrderTriage {
        PatientOrderTriage {
            patient_order_triage_id: Uuid::new_v4(),
            patient_order_triage_group_id: Uuid::nil(),
            patient_order_id: Uuid::nil(),
            patient_order_care_type_id: care_type.to_string(),
            patient_order_focus_type_id: focus_type.to_string(),
            patient_order_triage_source_id: "COBALT".to_string(),
            patient_order_triage_override_reason_id: None,
            screening_session_id: None,
            account_id: None,
            reason: reason.map(str::to_string),
            active: true,
            created: Utc.with_ymd_and_hms(2024, 1, 2, 15, 0, 0).unwrap(),
            last_updated: Utc.with_ymd_and_hms(2024, 1, 2, 15, 0, 0).unwrap(),
        }
    }

    fn mhic_context() -> CurrentContext {
        CurrentContext {
            viewer: Some(Viewer {
                account_id: Uuid::new_v4(),
                role_id: RoleId::Mhic,
                institution_id: InstitutionId::default(),
            }),
            time_zone: chrono_tz::America::New_York,
            ..CurrentContext::default()
        }
    }

    fn factory(patient_order_service: MockPatientOrderService) -> PatientOrderApiResponseFactory {
        let config = TestConfig::default().to_app_config();
        PatientOrderApiResponseFactory::new(
            Arc::new(patient_order_service),
            Arc::new(SupabaseAccountService::new(&config, None)),
            Arc::new(SupabaseScreeningService::new(&config, None)),
            AccountApiResponseFactory::from_config(&config, None),
            Arc::new(Strings::builtin()),
        )
    }

    fn formatter() -> Formatter {
        Formatter::new(&CurrentContext::default(), Arc::new(Strings::builtin()))
    }

    #[test]
    fn test_care_radius_description() {
        let formatter = formatter();
        assert_eq!(care_radius_description(&formatter, None, None), "Unspecified");
        assert_eq!(
            care_radius_description(&formatter, Some(10), Some(DistanceUnitId::Mile)),
            "10 mi"
        );
        assert_eq!(
            care_radius_description(&formatter, Some(25), Some(DistanceUnitId::Kilometer)),
            "25 km"
        );
        assert_eq!(care_radius_description(&formatter, Some(5), None), "5 km");
    }

    #[test]
    fn test_group_scheduled_messages_keeps_first_seen_order() {
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());
        let grouped = group_scheduled_messages(vec![
            scheduled_message(second, "2024-01-03T09:00:00"),
            scheduled_message(first, "2024-01-04T09:00:00"),
            scheduled_message(second, "2024-01-03T09:00:00"),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, second);
        assert_eq!(grouped[0].1.len(), 2);
        assert_eq!(grouped[1].0, first);
    }

    #[test]
    fn test_empty_message_group_is_an_error() {
        let group = PatientOrderScheduledMessageGroup {
            patient_order_scheduled_message_group_id: Uuid::new_v4(),
            patient_order_id: Uuid::new_v4(),
            patient_order_scheduled_message_type_id: "WELCOME".to_string(),
            scheduled_at_date_time_has_passed: false,
            at_least_one_message_delivered: false,
        };

        assert_matches!(
            PatientOrderScheduledMessageGroupApiResponse::new(&formatter(), &group, &[]),
            Err(AppError::Internal(_))
        );
    }

    #[test]
    fn test_message_group_uses_first_message_schedule() {
        let group_id = Uuid::new_v4();
        let group = PatientOrderScheduledMessageGroup {
            patient_order_scheduled_message_group_id: group_id,
            patient_order_id: Uuid::new_v4(),
            patient_order_scheduled_message_type_id: "WELCOME".to_string(),
            scheduled_at_date_time_has_passed: true,
            at_least_one_message_delivered: false,
        };

        let response = PatientOrderScheduledMessageGroupApiResponse::new(
            &formatter(),
            &group,
            &[scheduled_message(group_id, "2024-01-05T10:00:00")],
        )
        .unwrap();

        assert_eq!(response.scheduled_at_date_description, "Jan 5, 2024");
        assert_eq!(response.scheduled_at_date_time_description, "Jan 5, 2024, 10:00 AM");
        assert_eq!(response.patient_order_scheduled_message_type_description.as_deref(), Some("Welcome"));
        assert_eq!(
            response.patient_order_scheduled_messages[0].sms_to_number_description.as_deref(),
            Some("(215) 555-1212")
        );
        assert!(response.patient_order_scheduled_messages[0].email_to_addresses.is_empty());
    }

    #[test]
    fn test_group_triages_by_care_then_focus() {
        let triage_group = PatientOrderTriageGroup {
            patient_order_triage_group_id: Uuid::nil(),
            patient_order_id: Uuid::nil(),
            patient_order_triage_source_id: "COBALT".to_string(),
        };
        let care_types = vec![PatientOrderCareType {
            patient_order_care_type_id: "SPECIALTY".to_string(),
            description: "Specialty".to_string(),
        }];
        let focus_types = vec![PatientOrderFocusType {
            patient_order_focus_type_id: "TRAUMA".to_string(),
            description: "Trauma".to_string(),
        }];

        let groups = group_triages(
            &triage_group,
            &[
                triage("SPECIALTY", "TRAUMA", Some("PTSD")),
                triage("COLLABORATIVE", "ADHD", None),
                triage("SPECIALTY", "TRAUMA", Some("PTSD")),
                triage("SPECIALTY", "EATING", Some("ED")),
                triage("SPECIALTY", "TRAUMA", Some("Flashbacks")),
            ],
            &care_types,
            &focus_types,
        );

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].patient_order_care_type_id, "SPECIALTY");
        assert_eq!(groups[0].patient_order_care_type_description.as_deref(), Some("Specialty"));
        assert_eq!(groups[0].patient_order_focus_types.len(), 2);
        assert_eq!(groups[0].patient_order_focus_types[0].patient_order_focus_type_id, "TRAUMA");
        assert_eq!(groups[0].patient_order_focus_types[0].reasons, vec!["PTSD", "Flashbacks"]);
        assert_eq!(groups[1].patient_order_care_type_id, "COLLABORATIVE");
        assert!(groups[1].patient_order_care_type_description.is_none());
        assert!(groups[1].patient_order_focus_types[0].reasons.is_empty());
    }

    #[tokio::test]
    async fn test_patient_format_hides_mhic_fields() {
        let response = factory(MockPatientOrderService::new())
            .create(
                &CurrentContext::default(),
                &patient_order(),
                PatientOrderApiResponseFormat::Patient,
                &HashSet::from([PatientOrderSupplement::Panel]),
            )
            .await
            .unwrap();

        assert_eq!(response.patient_display_name.as_deref(), Some("Jane Doe"));
        assert_eq!(response.patient_display_name_with_last_first.as_deref(), Some("Doe, Jane"));
        assert_eq!(response.ordering_provider_display_name.as_deref(), Some("Ann B Carter"));
        assert_eq!(response.patient_birthdate_description.as_deref(), Some("Apr 15, 1990"));
        assert_eq!(response.patient_phone_number_description.as_deref(), Some("(215) 555-1212"));
        assert_eq!(response.patient_age_on_order_date_description.as_deref(), Some("33"));
        assert_eq!(response.in_person_care_radius_with_distance_unit_description, "10 mi");
        assert!(response.order_date.is_none());
        assert!(response.total_outreach_count_description.is_none());
        assert!(response.patient_order_scheduled_message_groups.is_none());
    }

    #[tokio::test]
    async fn test_mhic_format_adds_order_details() {
        let mut patient_order_service = MockPatientOrderService::new();
        patient_order_service
            .expect_find_patient_order_scheduled_messages_by_patient_order_id()
            .times(1)
            .returning(|_| Ok(vec![]));

        let response = factory(patient_order_service)
            .create(
                &mhic_context(),
                &patient_order(),
                PatientOrderApiResponseFormat::Mhic,
                &HashSet::new(),
            )
            .await
            .unwrap();

        assert_eq!(response.order_date_description.as_deref(), Some("Jan 5, 2024"));
        assert_eq!(response.order_age_in_minutes_description.as_deref(), Some("12,345"));
        assert_eq!(response.episode_duration_in_days_description.as_deref(), Some("1 day"));
        assert_eq!(response.total_outreach_count_description.as_deref(), Some("2"));
        assert_eq!(response.outreach_count_description.as_deref(), Some("0"));
        assert_eq!(response.last_contacted_at_description.as_deref(), Some("Jan 5, 2024, 10:00 AM"));
        assert_eq!(response.last_contacted_at_time_description.as_deref(), Some("10:00 AM"));
        assert_eq!(
            response.next_contact_scheduled_at_description.as_deref(),
            Some("Jan 9, 2024, 9:30 AM")
        );
        assert_eq!(
            response
                .patient_order_scheduled_screening_scheduled_date_time_description
                .as_deref(),
            Some("Jan 12, 2024, 2:00 PM")
        );
        assert_eq!(
            response.patient_order_scheduled_screening_calendar_url.as_deref(),
            Some("https://calendar.example.com/screening")
        );
        assert_eq!(response.patient_order_scheduled_message_groups.map(|groups| groups.len()), Some(0));
        assert!(response.patient_order_outreaches.is_none());
        assert!(response.patient_order_diagnoses.is_none());
    }

    #[test]
    fn test_scheduled_outreach_splits_schedule() {
        let outreach: PatientOrderScheduledOutreach = serde_json::from_value(serde_json::json!({
            "patient_order_scheduled_outreach_id": Uuid::new_v4(),
            "patient_order_id": Uuid::new_v4(),
            "patient_order_outreach_type_id": "PHONE_CALL",
            "patient_order_scheduled_outreach_reason_id": "RESOURCE_CHECK_IN",
            "patient_order_scheduled_outreach_status_id": "COMPLETE",
            "created_by_account_id": Uuid::new_v4(),
            "completed_by_account_id": Uuid::new_v4(),
            "message": "Check in about resources",
            "scheduled_at_date_time": "2024-02-01T16:15:00",
            "completed_at": "2024-02-01T21:20:00Z",
            "created_by_account_first_name": "Morgan",
            "created_by_account_last_name": "Reyes",
            "completed_by_account_first_name": "Ada",
            "completed_by_account_last_name": "Park",
            "created": "2024-01-20T12:00:00Z",
            "last_updated": "2024-02-01T21:20:00Z"
        }))
        .unwrap();

        let response = PatientOrderScheduledOutreachApiResponse::new(&formatter(), &outreach);

        assert_eq!(response.scheduled_at_date_description, "Feb 1, 2024");
        assert_eq!(response.scheduled_at_time_description, "4:15 PM");
        assert_eq!(response.scheduled_at_date_time_description, "Feb 1, 2024, 4:15 PM");
        assert_eq!(response.completed_at_description.as_deref(), Some("Feb 1, 2024, 9:20 PM"));
        assert_eq!(response.created_by_account_display_name.as_deref(), Some("Morgan Reyes"));
        assert_eq!(
            response.completed_by_account_display_name_with_last_first.as_deref(),
            Some("Park, Ada")
        );
    }

    #[tokio::test]
    async fn test_mhic_everything_lists_diagnoses_and_medications_in_order() {
        let patient_order = patient_order();
        let patient_order_id = patient_order.patient_order_id;

        let mut patient_order_service = MockPatientOrderService::new();
        patient_order_service
            .expect_find_active_patient_order_triage_group_by_patient_order_id()
            .returning(|_| Ok(None));
        patient_order_service
            .expect_find_patient_order_diagnoses_by_patient_order_id()
            .times(1)
            .returning(move |_| {
                Ok(vec![
                    PatientOrderDiagnosis {
                        patient_order_diagnosis_id: Uuid::new_v4(),
                        patient_order_id,
                        diagnosis_id: Some("F41.1".to_string()),
                        diagnosis_id_type: Some("ICD10".to_string()),
                        diagnosis_name: Some("Generalized anxiety disorder".to_string()),
                        display_order: 1,
                    },
                    PatientOrderDiagnosis {
                        patient_order_diagnosis_id: Uuid::new_v4(),
                        patient_order_id,
                        diagnosis_id: Some("F32.A".to_string()),
                        diagnosis_id_type: Some("ICD10".to_string()),
                        diagnosis_name: Some("Depression, unspecified".to_string()),
                        display_order: 2,
                    },
                ])
            });
        patient_order_service
            .expect_find_patient_order_medications_by_patient_order_id()
            .times(1)
            .returning(move |_| {
                Ok(vec![PatientOrderMedication {
                    patient_order_medication_id: Uuid::new_v4(),
                    patient_order_id,
                    medication_id: Some("310384".to_string()),
                    medication_id_type: Some("RXNORM".to_string()),
                    medication_name: Some("Sertraline 50 MG".to_string()),
                    display_order: 1,
                }])
            });
        patient_order_service
            .expect_find_patient_order_notes_by_patient_order_id()
            .returning(|_| Ok(vec![]));
        patient_order_service
            .expect_find_patient_order_outreaches_by_patient_order_id()
            .returning(|_| Ok(vec![]));
        patient_order_service
            .expect_find_patient_order_voicemail_tasks_by_patient_order_id()
            .returning(|_| Ok(vec![]));
        patient_order_service
            .expect_find_patient_order_scheduled_outreaches_by_patient_order_id()
            .returning(|_| Ok(vec![]));
        patient_order_service
            .expect_find_patient_order_scheduled_messages_by_patient_order_id()
            .returning(|_| Ok(vec![]));

        let response = factory(patient_order_service)
            .create(
                &mhic_context(),
                &patient_order,
                PatientOrderApiResponseFormat::Mhic,
                &HashSet::from([PatientOrderSupplement::Everything]),
            )
            .await
            .unwrap();

        let diagnoses = response.patient_order_diagnoses.unwrap();
        assert_eq!(diagnoses.len(), 2);
        assert_eq!(diagnoses[0].diagnosis_id.as_deref(), Some("F41.1"));
        assert_eq!(diagnoses[1].diagnosis_name.as_deref(), Some("Depression, unspecified"));

        let medications = response.patient_order_medications.unwrap();
        assert_eq!(medications[0].medication_name.as_deref(), Some("Sertraline 50 MG"));

        assert_eq!(response.patient_order_notes.map(|notes| notes.len()), Some(0));
        assert_eq!(response.patient_order_scheduled_outreaches.map(|outreaches| outreaches.len()), Some(0));
        assert!(response.screening_session_result.is_none());
    }

    #[tokio::test]
    async fn test_everything_for_patient_skips_outreach() {
        let mut patient_order_service = MockPatientOrderService::new();
        patient_order_service
            .expect_find_active_patient_order_triage_group_by_patient_order_id()
            .times(1)
            .returning(|_| Ok(None));
        patient_order_service
            .expect_find_patient_order_outreaches_by_patient_order_id()
            .never();

        let response = factory(patient_order_service)
            .create(
                &CurrentContext::default(),
                &patient_order(),
                PatientOrderApiResponseFormat::Patient,
                &HashSet::from([PatientOrderSupplement::Everything]),
            )
            .await
            .unwrap();

        assert!(response.patient_address.is_none());
        assert!(response.patient_account.is_none());
        assert!(response.patient_order_triage_groups.is_none());
        assert!(response.patient_order_voicemail_tasks.is_none());
        assert!(response.patient_order_notes.is_none());
        assert!(response.patient_order_scheduled_outreaches.is_none());
    }
}
