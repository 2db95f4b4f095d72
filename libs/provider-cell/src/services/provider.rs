use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::SupabaseClient;

use crate::models::{PaymentFunding, Provider, SupportRole};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderService: Send + Sync {
    async fn find_provider_by_id(&self, provider_id: Uuid) -> Result<Option<Provider>>;

    async fn find_support_roles_by_provider_id(&self, provider_id: Uuid) -> Result<Vec<SupportRole>>;

    async fn find_payment_fundings(&self) -> Result<Vec<PaymentFunding>>;

    async fn find_payment_fundings_by_provider_id(&self, provider_id: Uuid) -> Result<Vec<PaymentFunding>>;
}

pub struct SupabaseProviderService {
    supabase: SupabaseClient,
    auth_token: Option<String>,
}

impl SupabaseProviderService {
    pub fn new(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.map(str::to_string),
        }
    }
}

#[async_trait]
impl ProviderService for SupabaseProviderService {
    async fn find_provider_by_id(&self, provider_id: Uuid) -> Result<Option<Provider>> {
        debug!("Fetching provider {}", provider_id);

        let path = format!("/rest/v1/provider?provider_id=eq.{}", provider_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_support_roles_by_provider_id(&self, provider_id: Uuid) -> Result<Vec<SupportRole>> {
        debug!("Fetching support roles for provider {}", provider_id);

        let path = format!(
            "/rest/v1/v_provider_support_role?provider_id=eq.{}&order=description.asc",
            provider_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_payment_fundings(&self) -> Result<Vec<PaymentFunding>> {
        self.supabase
            .select("/rest/v1/payment_funding?order=display_order.asc", self.auth_token.as_deref())
            .await
    }

    async fn find_payment_fundings_by_provider_id(&self, provider_id: Uuid) -> Result<Vec<PaymentFunding>> {
        debug!("Fetching payment fundings for provider {}", provider_id);

        let path = format!("/rest/v1/v_provider_payment_funding?provider_id=eq.{}", provider_id);
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }
}
