use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use uuid::Uuid;

use account_cell::{
    AccountApiResponse, AccountApiResponseFactory, AccountService, AccountSupplement, SupabaseAccountService,
};
use provider_cell::{
    AppointmentTypeApiResponse, AppointmentTypeApiResponseFactory, AppointmentTypeService, ProviderApiResponse,
    ProviderApiResponseFactory, ProviderService, ProviderSupplement, SupabaseAppointmentTypeService,
    SupabaseProviderService,
};
use shared_config::AppConfig;
use shared_models::context::CurrentContext;
use shared_models::error::AppError;
use shared_utils::time_description::{time_range_description, to_instant};
use shared_utils::{FormatStyle, Formatter, Strings};

use crate::models::{Appointment, AppointmentReason, AppointmentSupplement, Followup, FollowupSupplement};
use crate::services::{AppointmentService, SupabaseAppointmentService};

// ==============================================================================
// APPOINTMENT REASON
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentReasonApiResponse {
    pub appointment_reason_id: Uuid,
    pub appointment_reason_type_id: String,
    pub description: String,
    pub color: Option<String>,
    pub display_order: Option<i32>,
}

impl From<&AppointmentReason> for AppointmentReasonApiResponse {
    fn from(reason: &AppointmentReason) -> Self {
        Self {
            appointment_reason_id: reason.appointment_reason_id,
            appointment_reason_type_id: reason.appointment_reason_type_id.clone(),
            description: reason.description.clone(),
            color: reason.color.clone(),
            display_order: reason.display_order,
        }
    }
}

// ==============================================================================
// SHARED COLLABORATORS
// ==============================================================================

/// Services and nested factories both appointment and followup responses
/// draw on.
#[derive(Clone)]
pub struct AppointmentCollaborators {
    pub appointment_service: Arc<dyn AppointmentService>,
    pub account_service: Arc<dyn AccountService>,
    pub provider_service: Arc<dyn ProviderService>,
    pub appointment_type_service: Arc<dyn AppointmentTypeService>,
    pub account_factory: AccountApiResponseFactory,
    pub provider_factory: ProviderApiResponseFactory,
    pub appointment_type_factory: AppointmentTypeApiResponseFactory,
    pub strings: Arc<Strings>,
}

impl AppointmentCollaborators {
    pub fn from_config(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self {
            appointment_service: Arc::new(SupabaseAppointmentService::new(config, auth_token)),
            account_service: Arc::new(SupabaseAccountService::new(config, auth_token)),
            provider_service: Arc::new(SupabaseProviderService::new(config, auth_token)),
            appointment_type_service: Arc::new(SupabaseAppointmentTypeService::new(config, auth_token)),
            account_factory: AccountApiResponseFactory::from_config(config, auth_token),
            provider_factory: ProviderApiResponseFactory::from_config(config, auth_token),
            appointment_type_factory: AppointmentTypeApiResponseFactory::from_config(config, auth_token),
            strings: Strings::shared(config),
        }
    }

    async fn reason(&self, appointment_reason_id: Option<Uuid>) -> Result<Option<AppointmentReasonApiResponse>, AppError> {
        let Some(appointment_reason_id) = appointment_reason_id else {
            return Ok(None);
        };

        Ok(self
            .appointment_service
            .find_appointment_reason_by_id(appointment_reason_id)
            .await?
            .as_ref()
            .map(AppointmentReasonApiResponse::from))
    }
}

// ==============================================================================
// APPOINTMENT
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentApiResponse {
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
    pub bluejeans_meeting_id: Option<i64>,
    pub group_event_id: Option<String>,
    pub group_event_type_id: Option<String>,
    pub title: Option<String>,
    pub subtitle: String,
    pub appointment_description: String,
    pub start_time: DateTime<Utc>,
    pub start_time_description: String,
    pub local_start_date: NaiveDate,
    pub local_start_time: NaiveTime,
    pub end_time: DateTime<Utc>,
    pub end_time_description: String,
    pub local_end_date: NaiveDate,
    pub local_end_time: NaiveTime,
    pub duration_in_minutes: i64,
    pub duration_in_minutes_description: String,
    pub time_description: String,
    pub time_zone: Tz,
    pub videoconference_url: Option<String>,
    pub videoconference_platform_id: Option<String>,
    pub scheduling_system_id: String,
    pub canceled_for_reschedule: bool,
    pub rescheduled_appointment_id: Option<Uuid>,
    pub canceled: bool,
    pub canceled_at: Option<DateTime<Utc>>,
    pub canceled_at_description: Option<String>,
    pub phone_number: Option<String>,
    pub phone_number_description: Option<String>,
    pub created: DateTime<Utc>,
    pub created_description: String,
    pub provider: Option<ProviderApiResponse>,
    pub account: Option<AccountApiResponse>,
    pub appointment_reason: Option<AppointmentReasonApiResponse>,
    pub appointment_type: Option<AppointmentTypeApiResponse>,
}

#[derive(Clone)]
pub struct AppointmentApiResponseFactory {
    collaborators: AppointmentCollaborators,
}

impl AppointmentApiResponseFactory {
    pub fn new(collaborators: AppointmentCollaborators) -> Self {
        Self { collaborators }
    }

    pub fn from_config(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self::new(AppointmentCollaborators::from_config(config, auth_token))
    }

    pub async fn create(
        &self,
        context: &CurrentContext,
        appointment: &Appointment,
        supplements: &HashSet<AppointmentSupplement>,
    ) -> Result<AppointmentApiResponse, AppError> {
        let c = &self.collaborators;
        let formatter = Formatter::new(context, c.strings.clone());
        let wants = |supplement: AppointmentSupplement| {
            supplements.contains(&AppointmentSupplement::All) || supplements.contains(&supplement)
        };

        let start_time = to_instant(appointment.start_time, appointment.time_zone);
        let end_time = to_instant(appointment.end_time, appointment.time_zone);

        let (subtitle, appointment_description) = if appointment.is_group_booking() {
            ("In the Studio", "Reservation")
        } else {
            ("1:1 Support", "Appointment")
        };

        let provider = match (wants(AppointmentSupplement::Provider), appointment.provider_id) {
            (true, Some(provider_id)) => {
                let provider = c
                    .provider_service
                    .find_provider_by_id(provider_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Provider {} not found", provider_id)))?;

                Some(
                    c.provider_factory
                        .create(context, &provider, &HashSet::from([ProviderSupplement::PaymentFunding]))
                        .await?,
                )
            }
            _ => None,
        };

        let account = if wants(AppointmentSupplement::Account) {
            let account = c
                .account_service
                .find_account_by_id(appointment.account_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Account {} not found", appointment.account_id)))?;

            Some(c.account_factory.create(context, &account, &HashSet::<AccountSupplement>::new()).await?)
        } else {
            None
        };

        let appointment_reason = if wants(AppointmentSupplement::AppointmentReason) {
            c.reason(appointment.appointment_reason_id).await?
        } else {
            None
        };

        let appointment_type = match wants(AppointmentSupplement::AppointmentType) {
            true => match c
                .appointment_type_service
                .find_appointment_type_by_id(appointment.appointment_type_id)
                .await?
            {
                Some(appointment_type) => Some(
                    c.appointment_type_factory
                        .create(context, &appointment_type, &HashSet::new())
                        .await?,
                ),
                None => None,
            },
            false => None,
        };

        Ok(AppointmentApiResponse {
            appointment_id: appointment.appointment_id,
            account_id: appointment.account_id,
            provider_id: appointment.provider_id,
            appointment_reason_id: appointment.appointment_reason_id,
            attendance_status_id: appointment.attendance_status_id.clone(),
            created_by_account_id: appointment.created_by_account_id,
            appointment_type_id: appointment.appointment_type_id,
            intake_assessment_id: appointment.intake_assessment_id,
            patient_order_id: appointment.patient_order_id,
            acuity_appointment_id: appointment.acuity_appointment_id,
            bluejeans_meeting_id: appointment.bluejeans_meeting_id,
            group_event_id: appointment.acuity_class_id.map(|id| id.to_string()),
            group_event_type_id: appointment
                .acuity_class_id
                .map(|_| appointment.appointment_type_id.to_string()),
            title: appointment.title.clone(),
            subtitle: formatter.string(subtitle, &[]),
            appointment_description: formatter.string(appointment_description, &[]),
            start_time,
            start_time_description: formatter.format_timestamp(start_time),
            local_start_date: appointment.start_time.date(),
            local_start_time: appointment.start_time.time(),
            end_time,
            end_time_description: formatter.format_timestamp(end_time),
            local_end_date: appointment.end_time.date(),
            local_end_time: appointment.end_time.time(),
            duration_in_minutes: appointment.duration_in_minutes,
            duration_in_minutes_description: formatter.string(
                "{{duration}} minutes",
                &[("duration", appointment.duration_in_minutes.to_string())],
            ),
            time_description: time_range_description(start_time, end_time, appointment.time_zone),
            time_zone: appointment.time_zone,
            videoconference_url: appointment.videoconference_url.clone(),
            videoconference_platform_id: appointment.videoconference_platform_id.clone(),
            scheduling_system_id: appointment.scheduling_system_id.clone(),
            canceled_for_reschedule: appointment.canceled_for_reschedule.unwrap_or(false),
            rescheduled_appointment_id: appointment.rescheduled_appointment_id,
            canceled: appointment.canceled,
            canceled_at: appointment.canceled_at,
            canceled_at_description: appointment.canceled_at.map(|t| formatter.format_timestamp(t)),
            phone_number: appointment.phone_number.clone(),
            phone_number_description: formatter.format_phone_number(appointment.phone_number.as_deref()),
            created: appointment.created,
            created_description: formatter.format_timestamp(appointment.created),
            provider,
            account,
            appointment_reason,
            appointment_type,
        })
    }
}

// ==============================================================================
// FOLLOWUP
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowupApiResponse {
    pub followup_id: Uuid,
    pub account_id: Uuid,
    pub created_by_account_id: Option<Uuid>,
    pub provider_id: Uuid,
    pub appointment_reason_id: Option<Uuid>,
    pub followup_date: NaiveDate,
    pub followup_date_description: String,
    pub comment: Option<String>,
    pub canceled: bool,
    pub canceled_at: Option<DateTime<Utc>>,
    pub canceled_at_description: Option<String>,
    pub created: DateTime<Utc>,
    pub created_description: String,
    pub last_updated: DateTime<Utc>,
    pub last_updated_description: String,
    pub account: Option<AccountApiResponse>,
    pub provider: Option<ProviderApiResponse>,
    pub appointment_reason: Option<AppointmentReasonApiResponse>,
}

#[derive(Clone)]
pub struct FollowupApiResponseFactory {
    collaborators: AppointmentCollaborators,
}

impl FollowupApiResponseFactory {
    pub fn new(collaborators: AppointmentCollaborators) -> Self {
        Self { collaborators }
    }

    pub fn from_config(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self::new(AppointmentCollaborators::from_config(config, auth_token))
    }

    /// Each nested object is filled only when its record exists.
    pub async fn create(
        &self,
        context: &CurrentContext,
        followup: &Followup,
        supplements: &HashSet<FollowupSupplement>,
    ) -> Result<FollowupApiResponse, AppError> {
        let c = &self.collaborators;
        let formatter = Formatter::new(context, c.strings.clone());
        let wants = |supplement: FollowupSupplement| {
            supplements.contains(&FollowupSupplement::All) || supplements.contains(&supplement)
        };

        let account = match wants(FollowupSupplement::Account) {
            true => match c.account_service.find_account_by_id(followup.account_id).await? {
                Some(account) => Some(c.account_factory.create(context, &account, &HashSet::new()).await?),
                None => None,
            },
            false => None,
        };

        let appointment_reason = if wants(FollowupSupplement::AppointmentReason) {
            c.reason(followup.appointment_reason_id).await?
        } else {
            None
        };

        let provider = match wants(FollowupSupplement::Provider) {
            true => match c.provider_service.find_provider_by_id(followup.provider_id).await? {
                Some(provider) => Some(
                    c.provider_factory
                        .create(context, &provider, &HashSet::from([ProviderSupplement::Everything]))
                        .await?,
                ),
                None => None,
            },
            false => None,
        };

        Ok(FollowupApiResponse {
            followup_id: followup.followup_id,
            account_id: followup.account_id,
            created_by_account_id: followup.created_by_account_id,
            provider_id: followup.provider_id,
            appointment_reason_id: followup.appointment_reason_id,
            followup_date: followup.followup_date,
            followup_date_description: formatter.format_date(followup.followup_date, FormatStyle::Medium),
            comment: followup.comment.clone(),
            canceled: followup.canceled,
            canceled_at: followup.canceled_at,
            canceled_at_description: followup.canceled_at.map(|t| formatter.format_timestamp(t)),
            created: followup.created,
            created_description: formatter.format_timestamp(followup.created),
            last_updated: followup.last_updated,
            last_updated_description: formatter.format_timestamp(followup.last_updated),
            account,
            provider,
            appointment_reason,
        })
    }
}
