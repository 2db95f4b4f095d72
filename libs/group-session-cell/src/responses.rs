use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use uuid::Uuid;

use account_cell::{InstitutionService, SupabaseInstitutionService};
use content_cell::TagApiResponse;
use shared_config::AppConfig;
use shared_models::auth::RoleId;
use shared_models::context::{CurrentContext, InstitutionId};
use shared_models::error::AppError;
use shared_utils::normalizer::normalize_name;
use shared_utils::time_description::{date_range_description, local_time_range_description};
use shared_utils::{FormatStyle, Formatter, Strings};

use crate::models::{GroupSession, GroupSessionRequest, GroupSessionReservation, GroupSessionSchedulingSystemId};
use crate::services::{GroupSessionService, SupabaseGroupSessionService};

// ==============================================================================
// GROUP SESSION
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSessionApiResponse {
    pub group_session_id: Uuid,
    pub institution_id: InstitutionId,
    pub institution_description: String,
    pub group_session_status_id: String,
    pub group_session_status_id_description: String,
    pub group_session_scheduling_system_id: GroupSessionSchedulingSystemId,
    pub group_session_location_type_id: Option<String>,
    pub group_session_learn_more_method_id: Option<String>,
    pub group_session_collection_id: Option<Uuid>,
    pub group_session_collection_url_name: Option<String>,
    pub assessment_id: Option<Uuid>,
    pub screening_flow_id: Option<Uuid>,
    pub submitter_account_id: Option<Uuid>,
    pub target_email_address: Option<String>,
    pub different_email_address_for_notifications: bool,
    pub title: String,
    pub description: Option<String>,
    pub url_name: Option<String>,
    pub in_person_location: Option<String>,
    pub facilitator_account_id: Option<Uuid>,
    pub facilitator_name: Option<String>,
    pub facilitator_email_address: Option<String>,
    pub appointment_time_description: Option<String>,
    pub start_date_time: Option<NaiveDateTime>,
    pub start_date_time_description: Option<String>,
    pub end_date_time: Option<NaiveDateTime>,
    pub end_date_time_description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub start_date_description: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub start_time_description: Option<String>,
    pub end_date: Option<NaiveDate>,
    pub end_date_description: Option<String>,
    pub end_time: Option<NaiveTime>,
    pub end_time_description: Option<String>,
    pub duration_in_minutes: i64,
    pub duration_in_minutes_description: Option<String>,
    pub seats: Option<i32>,
    pub seats_description: Option<String>,
    pub seats_available: Option<i32>,
    pub seats_available_description: Option<String>,
    pub seats_reserved: Option<i32>,
    pub seats_reserved_description: String,
    pub time_zone: Tz,
    pub image_url: Option<String>,
    pub videoconference_url: Option<String>,
    pub schedule_url: Option<String>,
    pub confirmation_email_content: Option<String>,
    pub send_followup_email: bool,
    pub followup_email_content: Option<String>,
    pub followup_email_survey_url: Option<String>,
    pub send_reminder_email: bool,
    pub reminder_email_content: Option<String>,
    pub followup_time_of_day: Option<NaiveTime>,
    pub followup_day_offset: Option<i32>,
    pub visible_flag: bool,
    pub single_session_flag: bool,
    pub date_time_description: Option<String>,
    pub learn_more_description: Option<String>,
    pub tags: Vec<TagApiResponse>,
    pub created: DateTime<Utc>,
    pub created_description: String,
    pub created_date_description: String,
    pub last_updated: DateTime<Utc>,
    pub last_updated_description: String,
}

/// Administrators, the submitter and the facilitator may see a session's
/// notification details.
pub fn can_manage_group_session(context: &CurrentContext, group_session: &GroupSession) -> bool {
    let Some(viewer_account_id) = context.viewer_account_id() else {
        return false;
    };

    context.viewer_role_id() == Some(RoleId::Administrator)
        || group_session.submitter_account_id == Some(viewer_account_id)
        || group_session.facilitator_account_id == Some(viewer_account_id)
}

/// Single sessions use the time-range form. Recurring sessions use the date
/// range, with any free-form schedule text appended.
pub fn appointment_time_description(group_session: &GroupSession) -> Option<String> {
    let start_and_end = group_session.start_and_end();

    if group_session.single_session_flag {
        return start_and_end.map(|(start, end)| local_time_range_description(start, end, group_session.time_zone));
    }

    match (start_and_end, group_session.date_time_description.as_deref()) {
        (Some((start, end)), Some(free_form)) => Some(format!(
            "{} ({})",
            date_range_description(start.date(), end.date()),
            free_form
        )),
        (Some((start, end)), None) => Some(date_range_description(start.date(), end.date())),
        (None, free_form) => free_form.map(str::to_string),
    }
}

#[derive(Clone)]
pub struct GroupSessionApiResponseFactory {
    group_session_service: Arc<dyn GroupSessionService>,
    institution_service: Arc<dyn InstitutionService>,
    strings: Arc<Strings>,
}

impl GroupSessionApiResponseFactory {
    pub fn new(
        group_session_service: Arc<dyn GroupSessionService>,
        institution_service: Arc<dyn InstitutionService>,
        strings: Arc<Strings>,
    ) -> Self {
        Self {
            group_session_service,
            institution_service,
            strings,
        }
    }

    pub fn from_config(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self::new(
            Arc::new(SupabaseGroupSessionService::new(config, auth_token)),
            Arc::new(SupabaseInstitutionService::new(config, auth_token)),
            Strings::shared(config),
        )
    }

    pub async fn create(
        &self,
        context: &CurrentContext,
        group_session: &GroupSession,
    ) -> Result<GroupSessionApiResponse, AppError> {
        let formatter = Formatter::new(context, self.strings.clone());

        let institution = self
            .institution_service
            .find_institution_by_id(&group_session.institution_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Institution {} not found", group_session.institution_id)))?;

        let status = self
            .group_session_service
            .find_group_session_status_by_id(&group_session.group_session_status_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Group session status {} not found",
                    group_session.group_session_status_id
                ))
            })?;

        let tags = self
            .group_session_service
            .find_tags_by_group_session_id(group_session.group_session_id)
            .await?;

        let target_email_address = (can_manage_group_session(context, group_session)
            && group_session.different_email_address_for_notifications)
            .then(|| group_session.target_email_address.clone())
            .flatten();

        let describe_date_time = |date_time: NaiveDateTime| {
            if group_session.single_session_flag {
                formatter.format_date_time(date_time, FormatStyle::Long, FormatStyle::Short)
            } else {
                formatter.format_date(date_time.date(), FormatStyle::Long)
            }
        };

        let start_and_end = group_session.start_and_end();
        let duration_in_minutes = start_and_end
            .map(|(start, end)| (end - start).num_minutes())
            .unwrap_or(0);

        let (seats_description, seats_available, seats_available_description) = match group_session.seats {
            Some(seats) => {
                let seats_available = group_session.seats_available.unwrap_or(0);
                (
                    Some(formatter.string(
                        "{{n}} seats total",
                        &[("n", formatter.format_number(seats as f64))],
                    )),
                    Some(seats_available),
                    Some(formatter.string(
                        "{{n}} seats left",
                        &[("n", formatter.format_number(seats_available as f64))],
                    )),
                )
            }
            None => (None, None, None),
        };

        let (seats_reserved, seats_reserved_description) = match group_session.group_session_scheduling_system_id {
            GroupSessionSchedulingSystemId::Cobalt => {
                let seats_reserved = group_session.seats_reserved.unwrap_or(0);
                (
                    Some(seats_reserved),
                    formatter.string(
                        "{{n}} reservations",
                        &[("n", formatter.format_number(seats_reserved as f64))],
                    ),
                )
            }
            GroupSessionSchedulingSystemId::External => (None, formatter.string("N/A", &[])),
        };

        let created_date = group_session.created.with_timezone(&context.time_zone).date_naive();

        Ok(GroupSessionApiResponse {
            group_session_id: group_session.group_session_id,
            institution_id: group_session.institution_id.clone(),
            institution_description: institution.name,
            group_session_status_id: group_session.group_session_status_id.clone(),
            group_session_status_id_description: status.description,
            group_session_scheduling_system_id: group_session.group_session_scheduling_system_id,
            group_session_location_type_id: group_session.group_session_location_type_id.clone(),
            group_session_learn_more_method_id: group_session.group_session_learn_more_method_id.clone(),
            group_session_collection_id: group_session.group_session_collection_id,
            group_session_collection_url_name: group_session.group_session_collection_url_name.clone(),
            assessment_id: group_session.assessment_id,
            screening_flow_id: group_session.screening_flow_id,
            submitter_account_id: group_session.submitter_account_id,
            target_email_address,
            different_email_address_for_notifications: group_session.different_email_address_for_notifications,
            title: group_session.title.clone(),
            description: group_session.description.clone(),
            url_name: group_session.url_name.clone(),
            in_person_location: group_session.in_person_location.clone(),
            facilitator_account_id: group_session.facilitator_account_id,
            facilitator_name: group_session.facilitator_name.clone(),
            facilitator_email_address: group_session.facilitator_email_address.clone(),
            appointment_time_description: appointment_time_description(group_session),
            start_date_time: group_session.start_date_time,
            start_date_time_description: start_and_end.map(|(start, _)| describe_date_time(start)),
            end_date_time: group_session.end_date_time,
            end_date_time_description: start_and_end.map(|(_, end)| describe_date_time(end)),
            start_date: group_session.start_date_time.map(|start| start.date()),
            start_date_description: group_session
                .start_date_time
                .map(|start| formatter.format_date(start.date(), FormatStyle::Long)),
            start_time: group_session.start_date_time.map(|start| start.time()),
            start_time_description: group_session
                .start_date_time
                .map(|start| formatter.format_time(start.time(), FormatStyle::Short)),
            end_date: group_session.end_date_time.map(|end| end.date()),
            end_date_description: group_session
                .end_date_time
                .map(|end| formatter.format_date(end.date(), FormatStyle::Long)),
            end_time: group_session.end_date_time.map(|end| end.time()),
            end_time_description: group_session
                .end_date_time
                .map(|end| formatter.format_time(end.time(), FormatStyle::Short)),
            duration_in_minutes,
            duration_in_minutes_description: start_and_end.map(|_| {
                formatter.string("{{duration}} minutes", &[("duration", duration_in_minutes.to_string())])
            }),
            seats: group_session.seats,
            seats_description,
            seats_available,
            seats_available_description,
            seats_reserved,
            seats_reserved_description,
            time_zone: group_session.time_zone,
            image_url: group_session.image_url.clone(),
            videoconference_url: group_session.videoconference_url.clone(),
            schedule_url: group_session.schedule_url.clone(),
            confirmation_email_content: group_session.confirmation_email_content.clone(),
            send_followup_email: group_session.send_followup_email,
            followup_email_content: group_session.followup_email_content.clone(),
            followup_email_survey_url: group_session.followup_email_survey_url.clone(),
            send_reminder_email: group_session.send_reminder_email,
            reminder_email_content: group_session.reminder_email_content.clone(),
            followup_time_of_day: group_session.followup_time_of_day,
            followup_day_offset: group_session.followup_day_offset,
            visible_flag: group_session.visible_flag,
            single_session_flag: group_session.single_session_flag,
            date_time_description: group_session.date_time_description.clone(),
            learn_more_description: group_session.learn_more_description.clone(),
            tags: tags.iter().map(TagApiResponse::from).collect(),
            created: group_session.created,
            created_description: formatter.format_timestamp(group_session.created),
            created_date_description: formatter.format_date(created_date, FormatStyle::Short),
            last_updated: group_session.last_updated,
            last_updated_description: formatter.format_timestamp(group_session.last_updated),
        })
    }
}

// ==============================================================================
// RESERVATION
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSessionReservationApiResponse {
    pub group_session_reservation_id: Uuid,
    pub group_session_id: Uuid,
    pub account_id: Uuid,
    pub name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub canceled: bool,
    pub created: DateTime<Utc>,
    pub created_description: String,
    pub last_updated: DateTime<Utc>,
    pub last_updated_description: String,
}

impl GroupSessionReservationApiResponse {
    pub fn new(formatter: &Formatter, reservation: &GroupSessionReservation) -> Self {
        Self {
            group_session_reservation_id: reservation.group_session_reservation_id,
            group_session_id: reservation.group_session_id,
            account_id: reservation.account_id,
            name: normalize_name(reservation.first_name.as_deref(), reservation.last_name.as_deref()),
            email_address: reservation.email_address.clone(),
            phone_number: formatter.format_phone_number(reservation.phone_number.as_deref()),
            canceled: reservation.canceled,
            created: reservation.created,
            created_description: formatter.format_timestamp(reservation.created),
            last_updated: reservation.last_updated,
            last_updated_description: formatter.format_timestamp(reservation.last_updated),
        }
    }
}

// ==============================================================================
// REQUEST
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSessionRequestApiResponse {
    pub group_session_request_id: Uuid,
    pub institution_id: InstitutionId,
    pub institution_description: String,
    pub group_session_request_status_id: String,
    pub group_session_request_status_id_description: String,
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
    pub data_collection_enabled: bool,
    pub created: DateTime<Utc>,
    pub created_description: String,
    pub created_date_description: String,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_updated_description: Option<String>,
}

/// The submitter, or an administrator of the request's institution.
pub fn can_view_group_session_request(context: &CurrentContext, request: &GroupSessionRequest) -> bool {
    match &context.viewer {
        Some(viewer) => {
            viewer.account_id == request.submitter_account_id
                || (viewer.role_id == RoleId::Administrator && viewer.institution_id == request.institution_id)
        }
        None => false,
    }
}

#[derive(Clone)]
pub struct GroupSessionRequestApiResponseFactory {
    group_session_service: Arc<dyn GroupSessionService>,
    institution_service: Arc<dyn InstitutionService>,
    strings: Arc<Strings>,
}

impl GroupSessionRequestApiResponseFactory {
    pub fn new(
        group_session_service: Arc<dyn GroupSessionService>,
        institution_service: Arc<dyn InstitutionService>,
        strings: Arc<Strings>,
    ) -> Self {
        Self {
            group_session_service,
            institution_service,
            strings,
        }
    }

    pub fn from_config(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self::new(
            Arc::new(SupabaseGroupSessionService::new(config, auth_token)),
            Arc::new(SupabaseInstitutionService::new(config, auth_token)),
            Strings::shared(config),
        )
    }

    pub async fn create(
        &self,
        context: &CurrentContext,
        request: &GroupSessionRequest,
    ) -> Result<GroupSessionRequestApiResponse, AppError> {
        let formatter = Formatter::new(context, self.strings.clone());

        let institution = self
            .institution_service
            .find_institution_by_id(&request.institution_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Institution {} not found", request.institution_id)))?;

        let status = self
            .group_session_service
            .find_group_session_request_status_by_id(&request.group_session_request_status_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Group session request status {} not found",
                    request.group_session_request_status_id
                ))
            })?;

        let created_date = request.created.with_timezone(&context.time_zone).date_naive();

        Ok(GroupSessionRequestApiResponse {
            group_session_request_id: request.group_session_request_id,
            institution_id: request.institution_id.clone(),
            institution_description: institution.name,
            group_session_request_status_id: request.group_session_request_status_id.clone(),
            group_session_request_status_id_description: status.description,
            submitter_account_id: request.submitter_account_id,
            title: request.title.clone(),
            description: request.description.clone(),
            url_name: request.url_name.clone(),
            facilitator_account_id: request.facilitator_account_id,
            facilitator_name: request.facilitator_name.clone(),
            facilitator_email_address: request.facilitator_email_address.clone(),
            image_url: request.image_url.clone(),
            custom_question1: request.custom_question1.clone(),
            custom_question2: request.custom_question2.clone(),
            data_collection_enabled: request.data_collection_enabled,
            created: request.created,
            created_description: formatter.format_timestamp(request.created),
            created_date_description: formatter.format_date(created_date, FormatStyle::Short),
            last_updated: request.last_updated,
            last_updated_description: request
                .last_updated
                .map(|last_updated| formatter.format_timestamp(last_updated)),
        })
    }
}
