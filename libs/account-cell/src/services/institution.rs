use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::SupabaseClient;
use shared_models::context::InstitutionId;

use crate::models::Institution;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstitutionService: Send + Sync {
    async fn find_institution_by_id(&self, institution_id: &InstitutionId) -> Result<Option<Institution>>;
}

pub struct SupabaseInstitutionService {
    supabase: SupabaseClient,
    auth_token: Option<String>,
}

impl SupabaseInstitutionService {
    pub fn new(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.map(str::to_string),
        }
    }
}

#[async_trait]
impl InstitutionService for SupabaseInstitutionService {
    async fn find_institution_by_id(&self, institution_id: &InstitutionId) -> Result<Option<Institution>> {
        debug!("Fetching institution {}", institution_id);

        let path = format!("/rest/v1/institution?institution_id=eq.{}", institution_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }
}
