use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
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
use shared_utils::{Formatter, Strings};

use crate::responses::{
    can_manage_group_session, can_view_group_session_request, GroupSessionApiResponseFactory,
    GroupSessionRequestApiResponseFactory, GroupSessionReservationApiResponse,
};
use crate::services::{GroupSessionService, SupabaseGroupSessionService};

#[axum::debug_handler]
pub async fn get_group_session(
    State(state): State<Arc<AppConfig>>,
    Path(group_session_id): Path<Uuid>,
    Extension(context): Extension<CurrentContext>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting group session {}", group_session_id);

    let group_session = SupabaseGroupSessionService::new(&state, None)
        .find_group_session_by_id(group_session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group session {} not found", group_session_id)))?;

    let response = GroupSessionApiResponseFactory::from_config(&state, None)
        .create(&context, &group_session)
        .await?;

    Ok(Json(json!({ "groupSession": response })))
}

#[axum::debug_handler]
pub async fn get_group_session_reservations(
    State(state): State<Arc<AppConfig>>,
    Path(group_session_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(context): Extension<CurrentContext>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting reservations for group session {}", group_session_id);

    let group_session_service = SupabaseGroupSessionService::new(&state, Some(auth.token()));

    let group_session = group_session_service
        .find_group_session_by_id(group_session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group session {} not found", group_session_id)))?;

    if !can_manage_group_session(&context, &group_session) {
        return Err(AppError::Forbidden("Not permitted to view these reservations".to_string()));
    }

    let formatter = Formatter::new(&context, Strings::shared(&state));
    let reservations: Vec<GroupSessionReservationApiResponse> = group_session_service
        .find_reservations_by_group_session_id(group_session_id)
        .await?
        .iter()
        .map(|reservation| GroupSessionReservationApiResponse::new(&formatter, reservation))
        .collect();

    Ok(Json(json!({ "groupSessionReservations": reservations })))
}

#[axum::debug_handler]
pub async fn get_group_session_request(
    State(state): State<Arc<AppConfig>>,
    Path(group_session_request_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(context): Extension<CurrentContext>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting group session request {}", group_session_request_id);

    let group_session_request = SupabaseGroupSessionService::new(&state, Some(auth.token()))
        .find_group_session_request_by_id(group_session_request_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group session request {} not found", group_session_request_id)))?;

    if !can_view_group_session_request(&context, &group_session_request) {
        return Err(AppError::Forbidden("Not permitted to view this group session request".to_string()));
    }

    let response = GroupSessionRequestApiResponseFactory::from_config(&state, Some(auth.token()))
        .create(&context, &group_session_request)
        .await?;

    Ok(Json(json!({ "groupSessionRequest": response })))
}
