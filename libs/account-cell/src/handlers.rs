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

use crate::context::find_viewable_account;
use crate::models::{Account, AccountSupplement};
use crate::responses::{AccountApiResponseFactory, InstitutionApiResponse};
use crate::services::{InstitutionService, SupabaseAccountService, SupabaseInstitutionService};

#[axum::debug_handler]
pub async fn get_current_account(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(context): Extension<CurrentContext>,
    Extension(account): Extension<Account>,
    Query(query): Query<SupplementsQuery>,
) -> Result<Json<Value>, AppError> {
    let supplements = query.parse::<AccountSupplement>()?;
    let factory = AccountApiResponseFactory::from_config(&state, Some(auth.token()));

    let response = factory.create(&context, &account, &supplements).await?;

    Ok(Json(json!({ "account": response })))
}

#[axum::debug_handler]
pub async fn get_account(
    State(state): State<Arc<AppConfig>>,
    Path(account_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(context): Extension<CurrentContext>,
    Query(query): Query<SupplementsQuery>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting account {}", account_id);

    // Only capabilities may be pulled for someone else's account.
    let mut supplements = query.parse::<AccountSupplement>()?;
    supplements.retain(|supplement| *supplement == AccountSupplement::Capabilities);

    let accounts = SupabaseAccountService::new(&state, Some(auth.token()));
    let account = find_viewable_account(&accounts, &context, account_id).await?;

    let institution = SupabaseInstitutionService::new(&state, Some(auth.token()))
        .find_institution_by_id(&account.institution_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Institution {} not found", account.institution_id)))?;

    let factory = AccountApiResponseFactory::from_config(&state, Some(auth.token()));
    let response = factory.create(&context, &account, &supplements).await?;
    let formatter = Formatter::new(&context, Strings::shared(&state));

    Ok(Json(json!({
        "account": response,
        "institution": InstitutionApiResponse::new(&formatter, &context, &institution),
    })))
}
