use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::SupabaseClient;

use crate::models::Account;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    async fn find_account_by_id(&self, account_id: Uuid) -> Result<Option<Account>>;
}

pub struct SupabaseAccountService {
    supabase: SupabaseClient,
    auth_token: Option<String>,
}

impl SupabaseAccountService {
    pub fn new(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.map(str::to_string),
        }
    }
}

#[async_trait]
impl AccountService for SupabaseAccountService {
    async fn find_account_by_id(&self, account_id: Uuid) -> Result<Option<Account>> {
        debug!("Fetching account {}", account_id);

        let path = format!("/rest/v1/account?account_id=eq.{}", account_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }
}
