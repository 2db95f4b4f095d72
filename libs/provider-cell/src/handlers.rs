use std::collections::HashSet;
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

use crate::models::{AppointmentTypeSupplement, ProviderSupplement};
use crate::responses::{
    AppointmentTypeApiResponseFactory, LogicalAvailabilityApiResponseFactory, ProviderApiResponseFactory,
};
use crate::services::{
    AppointmentTypeService, AvailabilityService, ProviderService, SupabaseAppointmentTypeService,
    SupabaseAvailabilityService, SupabaseProviderService,
};

// ==============================================================================
// PUBLIC HANDLERS (NO AUTHENTICATION REQUIRED)
// ==============================================================================

#[axum::debug_handler]
pub async fn get_provider(
    State(state): State<Arc<AppConfig>>,
    Path(provider_id): Path<Uuid>,
    Extension(context): Extension<CurrentContext>,
    Query(query): Query<SupplementsQuery>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting provider {}", provider_id);

    let supplements = query.parse::<ProviderSupplement>()?;

    let provider = SupabaseProviderService::new(&state, None)
        .find_provider_by_id(provider_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Provider {} not found", provider_id)))?;

    let response = ProviderApiResponseFactory::from_config(&state, None)
        .create(&context, &provider, &supplements)
        .await?;

    Ok(Json(json!({ "provider": response })))
}

#[axum::debug_handler]
pub async fn get_appointment_type(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_type_id): Path<Uuid>,
    Extension(context): Extension<CurrentContext>,
    Query(query): Query<SupplementsQuery>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting appointment type {}", appointment_type_id);

    let supplements: HashSet<AppointmentTypeSupplement> = query.parse()?;

    let appointment_type = SupabaseAppointmentTypeService::new(&state, None)
        .find_appointment_type_by_id(appointment_type_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Appointment type {} not found", appointment_type_id)))?;

    let response = AppointmentTypeApiResponseFactory::from_config(&state, None)
        .create(&context, &appointment_type, &supplements)
        .await?;

    Ok(Json(json!({ "appointmentType": response })))
}

// ==============================================================================
// PROTECTED HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_logical_availability(
    State(state): State<Arc<AppConfig>>,
    Path((provider_id, logical_availability_id)): Path<(Uuid, Uuid)>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(context): Extension<CurrentContext>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting logical availability {} for provider {}", logical_availability_id, provider_id);

    let logical_availability = SupabaseAvailabilityService::new(&state, Some(auth.token()))
        .find_logical_availability_by_id(logical_availability_id)
        .await?
        .filter(|logical_availability| logical_availability.provider_id == provider_id)
        .ok_or_else(|| AppError::NotFound(format!("Logical availability {} not found", logical_availability_id)))?;

    let response = LogicalAvailabilityApiResponseFactory::from_config(&state, Some(auth.token()))
        .create(&context, &logical_availability)
        .await?;

    Ok(Json(json!({ "logicalAvailability": response })))
}
