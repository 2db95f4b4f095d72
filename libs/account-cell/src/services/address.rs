use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::SupabaseClient;

use crate::models::Address;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressService: Send + Sync {
    async fn find_active_address_by_account_id(&self, account_id: Uuid) -> Result<Option<Address>>;
}

pub struct SupabaseAddressService {
    supabase: SupabaseClient,
    auth_token: Option<String>,
}

impl SupabaseAddressService {
    pub fn new(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.map(str::to_string),
        }
    }
}

#[async_trait]
impl AddressService for SupabaseAddressService {
    async fn find_active_address_by_account_id(&self, account_id: Uuid) -> Result<Option<Address>> {
        debug!("Fetching active address for account {}", account_id);

        // account_address joins an account to its addresses; only one is active
        let path = format!(
            "/rest/v1/v_account_address?account_id=eq.{}&active=eq.true&limit=1",
            account_id
        );
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }
}
