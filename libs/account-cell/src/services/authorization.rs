use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use shared_models::auth::RoleId;
use shared_models::context::InstitutionId;

use crate::models::{Account, AccountCapabilities, AccountCapabilityFlags};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorizationService: Send + Sync {
    async fn determine_account_capability_flags(&self, account: &Account) -> Result<AccountCapabilityFlags>;

    async fn determine_account_capabilities_by_institution_id(
        &self,
        account: &Account,
    ) -> Result<HashMap<InstitutionId, AccountCapabilities>>;
}

/// Derives capabilities from the account's role alone.
#[derive(Debug, Default, Clone)]
pub struct RoleAuthorizationService;

impl RoleAuthorizationService {
    pub fn new() -> Self {
        Self
    }
}

fn is_admin(role_id: RoleId) -> bool {
    matches!(role_id, RoleId::Administrator | RoleId::SuperAdministrator)
}

#[async_trait]
impl AuthorizationService for RoleAuthorizationService {
    async fn determine_account_capability_flags(&self, account: &Account) -> Result<AccountCapabilityFlags> {
        let role_id = account.role_id;

        Ok(AccountCapabilityFlags {
            can_view_provider_reports: is_admin(role_id) || role_id == RoleId::Provider,
            can_administer_content: is_admin(role_id),
            can_administer_group_sessions: is_admin(role_id),
            can_view_analytics: is_admin(role_id),
            can_view_patient_orders: role_id.is_panel_role(),
            can_edit_patient_orders: matches!(role_id, RoleId::Mhic | RoleId::Administrator),
        })
    }

    async fn determine_account_capabilities_by_institution_id(
        &self,
        account: &Account,
    ) -> Result<HashMap<InstitutionId, AccountCapabilities>> {
        let admin = is_admin(account.role_id);

        let capabilities = AccountCapabilities {
            view_nav_admin_my_content: admin,
            view_nav_admin_available_content: admin,
            view_nav_admin_group_session: admin,
            view_nav_admin_group_session_request: admin,
        };

        Ok(HashMap::from([(account.institution_id.clone(), capabilities)]))
    }
}
