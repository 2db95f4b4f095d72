use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::context::CurrentContext;
use shared_models::error::AppError;

use crate::models::RowTypeId;
use crate::responses::{PageApiResponseFactory, PageRowMailingListApiResponse};
use crate::services::{PageService, SupabasePageService};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default)]
    pub include_details: bool,
}

#[axum::debug_handler]
pub async fn get_page(
    State(state): State<Arc<AppConfig>>,
    Path(page_id): Path<Uuid>,
    Extension(context): Extension<CurrentContext>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting page {} (details: {})", page_id, query.include_details);

    let page = SupabasePageService::new(&state, None)
        .find_page_by_id(page_id, &context.institution_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Page {} not found", page_id)))?;

    let response = PageApiResponseFactory::from_config(&state, None)
        .create(&context, &page, query.include_details)
        .await?;

    Ok(Json(json!({ "page": response })))
}

#[axum::debug_handler]
pub async fn get_page_row_mailing_list(
    State(state): State<Arc<AppConfig>>,
    Path(page_row_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let page_service = SupabasePageService::new(&state, None);

    let page_row = page_service
        .find_page_row_by_id(page_row_id)
        .await?
        .filter(|page_row| page_row.row_type_id == RowTypeId::MailingList)
        .ok_or_else(|| AppError::NotFound(format!("Mailing list row {} not found", page_row_id)))?;

    let mailing_list = page_service
        .find_page_row_mailing_list_by_page_row_id(page_row_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Mailing list for row {} not found", page_row_id)))?;

    Ok(Json(json!({
        "pageRow": PageRowMailingListApiResponse::new(&page_row, &mailing_list)
    })))
}
