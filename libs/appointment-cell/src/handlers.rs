use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::context::CurrentContext;
use shared_models::error::AppError;
use shared_utils::supplements::SupplementsQuery;

use account_cell::context::find_viewable_account;
use account_cell::SupabaseAccountService;

use crate::models::{AppointmentSupplement, FollowupSupplement};
use crate::responses::{AppointmentApiResponseFactory, FollowupApiResponseFactory};
use crate::services::{AppointmentService, SupabaseAppointmentService};

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(context): Extension<CurrentContext>,
    Query(query): Query<SupplementsQuery>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting appointment {}", appointment_id);

    let supplements = query.parse::<AppointmentSupplement>()?;

    let appointment = SupabaseAppointmentService::new(&state, Some(auth.token()))
        .find_appointment_by_id(appointment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Appointment {} not found", appointment_id)))?;

    find_viewable_account(&SupabaseAccountService::new(&state, Some(auth.token())), &context, appointment.account_id)
        .await?;

    let response = AppointmentApiResponseFactory::from_config(&state, Some(auth.token()))
        .create(&context, &appointment, &supplements)
        .await?;

    Ok(Json(json!({ "appointment": response })))
}

#[axum::debug_handler]
pub async fn get_followup(
    State(state): State<Arc<AppConfig>>,
    Path(followup_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(context): Extension<CurrentContext>,
    Query(query): Query<SupplementsQuery>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting followup {}", followup_id);

    let supplements = query.parse::<FollowupSupplement>()?;

    let followup = SupabaseAppointmentService::new(&state, Some(auth.token()))
        .find_followup_by_id(followup_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Followup {} not found", followup_id)))?;

    find_viewable_account(&SupabaseAccountService::new(&state, Some(auth.token())), &context, followup.account_id)
        .await?;

    let response = FollowupApiResponseFactory::from_config(&state, Some(auth.token()))
        .create(&context, &followup, &supplements)
        .await?;

    Ok(Json(json!({ "followup": response })))
}
