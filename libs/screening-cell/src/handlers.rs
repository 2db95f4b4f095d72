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
use shared_utils::{Formatter, Strings};

use account_cell::context::find_viewable_account;
use account_cell::SupabaseAccountService;

use crate::models::ScreeningSessionSupplement;
use crate::responses::{
    ScreeningAnswerOptionApiResponse, ScreeningFlowVersionApiResponseFactory, ScreeningQuestionApiResponse,
    ScreeningSessionApiResponseFactory,
};
use crate::services::{ScreeningService, SupabaseScreeningService};

#[axum::debug_handler]
pub async fn get_screening_session(
    State(state): State<Arc<AppConfig>>,
    Path(screening_session_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(context): Extension<CurrentContext>,
    Query(query): Query<SupplementsQuery>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting screening session {}", screening_session_id);

    let supplements = query.parse::<ScreeningSessionSupplement>()?;

    let screening_session = SupabaseScreeningService::new(&state, Some(auth.token()))
        .find_screening_session_by_id(screening_session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Screening session {} not found", screening_session_id)))?;

    find_viewable_account(
        &SupabaseAccountService::new(&state, Some(auth.token())),
        &context,
        screening_session.target_account_id,
    )
    .await?;

    let response = ScreeningSessionApiResponseFactory::from_config(&state, Some(auth.token()))
        .create(&context, &screening_session, &supplements)
        .await?;

    Ok(Json(json!({ "screeningSession": response })))
}

#[axum::debug_handler]
pub async fn get_screening_flow_version(
    State(state): State<Arc<AppConfig>>,
    Path(screening_flow_version_id): Path<Uuid>,
    Extension(context): Extension<CurrentContext>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting screening flow version {}", screening_flow_version_id);

    let flow_version = SupabaseScreeningService::new(&state, None)
        .find_screening_flow_version_by_id(screening_flow_version_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Screening flow version {} not found", screening_flow_version_id))
        })?;

    let response = ScreeningFlowVersionApiResponseFactory::from_config(&state, None)
        .create(&context, &flow_version)
        .await?;

    Ok(Json(json!({ "screeningFlowVersion": response })))
}

#[axum::debug_handler]
pub async fn get_screening_questions(
    State(state): State<Arc<AppConfig>>,
    Path(screening_version_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(context): Extension<CurrentContext>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting questions for screening version {}", screening_version_id);

    let screening_service = SupabaseScreeningService::new(&state, Some(auth.token()));
    let formatter = Formatter::new(&context, Strings::shared(&state));

    let questions: Vec<ScreeningQuestionApiResponse> = screening_service
        .find_screening_questions_by_screening_version_id(screening_version_id)
        .await?
        .iter()
        .map(|question| ScreeningQuestionApiResponse::new(&formatter, question))
        .collect();

    let answer_options: Vec<ScreeningAnswerOptionApiResponse> = screening_service
        .find_screening_answer_options_by_screening_version_id(screening_version_id)
        .await?
        .iter()
        .map(|option| ScreeningAnswerOptionApiResponse::new(&formatter, option))
        .collect();

    Ok(Json(json!({
        "screeningQuestions": questions,
        "screeningAnswerOptions": answer_options,
    })))
}
