use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::RoleId;
use shared_models::context::CurrentContext;
use shared_models::error::AppError;
use shared_utils::supplements::SupplementsQuery;

use crate::models::{AdminContentDisplayType, ContentSupplement};
use crate::responses::{AdminContentApiResponseFactory, ContentApiResponseFactory};
use crate::services::{ContentService, SupabaseContentService};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminContentQuery {
    pub display_type: Option<AdminContentDisplayType>,
}

#[axum::debug_handler]
pub async fn get_content(
    State(state): State<Arc<AppConfig>>,
    Path(content_id): Path<Uuid>,
    Extension(context): Extension<CurrentContext>,
    Query(query): Query<SupplementsQuery>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting content {}", content_id);

    let supplements = query.parse::<ContentSupplement>()?;

    let content = SupabaseContentService::new(&state, None)
        .find_content_by_id(content_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Content {} not found", content_id)))?;

    let response = ContentApiResponseFactory::from_config(&state, None)
        .create(&context, &content, &supplements)
        .await?;

    Ok(Json(json!({ "content": response })))
}

#[axum::debug_handler]
pub async fn get_admin_content(
    State(state): State<Arc<AppConfig>>,
    Path(content_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(context): Extension<CurrentContext>,
    Query(query): Query<AdminContentQuery>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting admin content {}", content_id);

    if !matches!(
        context.viewer_role_id(),
        Some(RoleId::Administrator | RoleId::SuperAdministrator)
    ) {
        return Err(AppError::Forbidden("Content administration requires an administrator".to_string()));
    }

    let content = SupabaseContentService::new(&state, Some(auth.token()))
        .find_admin_content_by_id(content_id, &context.institution_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Content {} not found", content_id)))?;

    let response = AdminContentApiResponseFactory::from_config(&state, Some(auth.token()))
        .create(&context, &content, query.display_type.unwrap_or_default())
        .await?;

    Ok(Json(json!({ "content": response })))
}
