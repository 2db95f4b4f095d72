use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::SupabaseClient;
use shared_models::context::InstitutionId;

use crate::models::{AdminContent, Content, NetworkInstitution, Tag};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentService: Send + Sync {
    async fn find_content_by_id(&self, content_id: Uuid) -> Result<Option<Content>>;

    /// Admin view of content from the perspective of `institution_id`.
    async fn find_admin_content_by_id(
        &self,
        content_id: Uuid,
        institution_id: &InstitutionId,
    ) -> Result<Option<AdminContent>>;

    async fn find_tags_by_content_id(&self, content_id: Uuid) -> Result<Vec<Tag>>;

    async fn find_tag_by_id(&self, tag_id: &str) -> Result<Option<Tag>>;

    async fn find_selected_network_institutions(
        &self,
        owner_institution_id: &InstitutionId,
        content_id: Uuid,
    ) -> Result<Vec<NetworkInstitution>>;
}

pub struct SupabaseContentService {
    supabase: SupabaseClient,
    auth_token: Option<String>,
}

impl SupabaseContentService {
    pub fn new(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.map(str::to_string),
        }
    }
}

#[async_trait]
impl ContentService for SupabaseContentService {
    async fn find_content_by_id(&self, content_id: Uuid) -> Result<Option<Content>> {
        debug!("Fetching content {}", content_id);

        let path = format!("/rest/v1/v_content?content_id=eq.{}", content_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_admin_content_by_id(
        &self,
        content_id: Uuid,
        institution_id: &InstitutionId,
    ) -> Result<Option<AdminContent>> {
        debug!("Fetching admin content {} for institution {}", content_id, institution_id);

        let path = format!(
            "/rest/v1/v_admin_content?content_id=eq.{}&institution_id=eq.{}",
            content_id, institution_id
        );
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_tags_by_content_id(&self, content_id: Uuid) -> Result<Vec<Tag>> {
        let path = format!("/rest/v1/v_tag_content?content_id=eq.{}&order=name.asc", content_id);
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_tag_by_id(&self, tag_id: &str) -> Result<Option<Tag>> {
        let path = format!("/rest/v1/tag?tag_id=eq.{}", tag_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_selected_network_institutions(
        &self,
        owner_institution_id: &InstitutionId,
        content_id: Uuid,
    ) -> Result<Vec<NetworkInstitution>> {
        debug!("Fetching network institutions selected for content {}", content_id);

        let path = format!(
            "/rest/v1/v_content_network_institution?content_id=eq.{}&owner_institution_id=eq.{}&order=name.asc",
            content_id, owner_institution_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }
}
