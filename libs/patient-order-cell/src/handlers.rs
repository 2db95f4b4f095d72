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

use crate::models::{PatientOrder, PatientOrderApiResponseFormat, PatientOrderSupplement};
use crate::responses::PatientOrderApiResponseFactory;
use crate::services::{PatientOrderService, SupabasePatientOrderService};

/// Panel staff see every order of their institution; patients only their own.
pub fn can_view_patient_order(context: &CurrentContext, patient_order: &PatientOrder) -> bool {
    if let Some(viewer) = &context.viewer {
        if viewer.role_id.is_panel_role() && patient_order.institution_id.as_ref() == Some(&viewer.institution_id) {
            return true;
        }
    }

    patient_order
        .patient_account_id
        .is_some_and(|patient_account_id| context.is_viewer(patient_account_id))
}

#[axum::debug_handler]
pub async fn get_patient_order(
    State(state): State<Arc<AppConfig>>,
    Path(patient_order_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(context): Extension<CurrentContext>,
    Query(query): Query<SupplementsQuery>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting patient order {}", patient_order_id);

    let supplements = query.parse::<PatientOrderSupplement>()?;

    let patient_order = SupabasePatientOrderService::new(&state, Some(auth.token()))
        .find_patient_order_by_id(patient_order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Patient order {} not found", patient_order_id)))?;

    if !can_view_patient_order(&context, &patient_order) {
        return Err(AppError::Forbidden("Not permitted to view this patient order".to_string()));
    }

    let format = context
        .viewer_role_id()
        .map(PatientOrderApiResponseFormat::from_role_id)
        .unwrap_or(PatientOrderApiResponseFormat::Patient);

    let response = PatientOrderApiResponseFactory::from_config(&state, Some(auth.token()))
        .create(&context, &patient_order, format, &supplements)
        .await?;

    Ok(Json(json!({ "patientOrder": response })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::auth::RoleId;
    use shared_models::context::{InstitutionId, Viewer};

    fn context_for(account_id: Uuid, role_id: RoleId) -> CurrentContext {
        CurrentContext {
            viewer: Some(Viewer {
                account_id,
                role_id,
                institution_id: InstitutionId::default(),
            }),
            ..CurrentContext::default()
        }
    }

    fn order_for(patient_account_id: Option<Uuid>) -> PatientOrder {
        serde_json::from_value(json!({
            "patient_order_id": Uuid::new_v4(),
            "institution_id": "COBALT",
            "patient_account_id": patient_account_id,
        }))
        .unwrap()
    }

    #[test]
    fn test_patient_can_view_only_own_order() {
        let patient_account_id = Uuid::new_v4();
        let context = context_for(patient_account_id, RoleId::Patient);

        assert!(can_view_patient_order(&context, &order_for(Some(patient_account_id))));
        assert!(!can_view_patient_order(&context, &order_for(Some(Uuid::new_v4()))));
        assert!(!can_view_patient_order(&context, &order_for(None)));
    }

    #[test]
    fn test_panel_roles_can_view_any_order_in_their_institution() {
        let context = context_for(Uuid::new_v4(), RoleId::Mhic);
        assert!(can_view_patient_order(&context, &order_for(None)));

        let anonymous = CurrentContext::default();
        assert!(!can_view_patient_order(&anonymous, &order_for(Some(Uuid::new_v4()))));
    }

    #[test]
    fn test_panel_roles_cannot_view_other_institution_orders() {
        let context = CurrentContext {
            viewer: Some(Viewer {
                account_id: Uuid::new_v4(),
                role_id: RoleId::Mhic,
                institution_id: InstitutionId::new("OTHER_TENANT"),
            }),
            ..CurrentContext::default()
        };

        assert!(!can_view_patient_order(&context, &order_for(Some(Uuid::new_v4()))));
    }
}
