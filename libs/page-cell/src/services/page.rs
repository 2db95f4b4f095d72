use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use content_cell::Content;
use group_session_cell::GroupSession;
use shared_config::AppConfig;
use shared_database::SupabaseClient;
use shared_models::context::InstitutionId;

use crate::models::{
    Page, PageRow, PageRowColumn, PageRowMailingList, PageRowTag, PageSection, PageSiteLocation, TagGroup,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageService: Send + Sync {
    async fn find_page_by_id(&self, page_id: Uuid, institution_id: &InstitutionId) -> Result<Option<Page>>;

    async fn find_page_by_page_row_id(&self, page_row_id: Uuid) -> Result<Option<Page>>;

    async fn find_page_sections_by_page_id(
        &self,
        page_id: Uuid,
        institution_id: &InstitutionId,
    ) -> Result<Vec<PageSection>>;

    async fn find_page_rows_by_page_section_id(&self, page_section_id: Uuid) -> Result<Vec<PageRow>>;

    async fn find_page_row_by_id(&self, page_row_id: Uuid) -> Result<Option<PageRow>>;

    async fn find_page_row_mailing_list_by_page_row_id(&self, page_row_id: Uuid) -> Result<Option<PageRowMailingList>>;

    async fn find_live_page_site_locations_by_page_id(
        &self,
        page_id: Uuid,
        institution_id: &InstitutionId,
    ) -> Result<Vec<PageSiteLocation>>;

    async fn find_content_by_page_row_id(&self, page_row_id: Uuid, live_only: bool) -> Result<Vec<Content>>;

    async fn find_group_sessions_by_page_row_id(&self, page_row_id: Uuid, live_only: bool) -> Result<Vec<GroupSession>>;

    async fn find_tag_group_by_page_row_id(&self, page_row_id: Uuid) -> Result<Option<TagGroup>>;

    async fn find_tag_group_by_tag_id(&self, tag_id: &str) -> Result<Option<TagGroup>>;

    async fn find_page_row_tag_by_page_row_id(&self, page_row_id: Uuid) -> Result<Option<PageRowTag>>;

    async fn find_page_row_column(&self, page_row_id: Uuid, column_display_order: i32) -> Result<Option<PageRowColumn>>;
}

pub struct SupabasePageService {
    supabase: SupabaseClient,
    auth_token: Option<String>,
}

impl SupabasePageService {
    pub fn new(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.map(str::to_string),
        }
    }
}

#[async_trait]
impl PageService for SupabasePageService {
    async fn find_page_by_id(&self, page_id: Uuid, institution_id: &InstitutionId) -> Result<Option<Page>> {
        debug!("Fetching page {} for institution {}", page_id, institution_id);

        let path = format!("/rest/v1/v_page?page_id=eq.{}&institution_id=eq.{}", page_id, institution_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_page_by_page_row_id(&self, page_row_id: Uuid) -> Result<Option<Page>> {
        let path = format!("/rest/v1/v_page_by_row?page_row_id=eq.{}", page_row_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_page_sections_by_page_id(
        &self,
        page_id: Uuid,
        institution_id: &InstitutionId,
    ) -> Result<Vec<PageSection>> {
        let path = format!(
            "/rest/v1/v_page_section?page_id=eq.{}&institution_id=eq.{}&order=display_order.asc",
            page_id, institution_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_page_rows_by_page_section_id(&self, page_section_id: Uuid) -> Result<Vec<PageRow>> {
        let path = format!(
            "/rest/v1/v_page_row?page_section_id=eq.{}&order=display_order.asc",
            page_section_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_page_row_by_id(&self, page_row_id: Uuid) -> Result<Option<PageRow>> {
        let path = format!("/rest/v1/v_page_row?page_row_id=eq.{}", page_row_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_page_row_mailing_list_by_page_row_id(&self, page_row_id: Uuid) -> Result<Option<PageRowMailingList>> {
        let path = format!("/rest/v1/v_page_row_mailing_list?page_row_id=eq.{}", page_row_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_live_page_site_locations_by_page_id(
        &self,
        page_id: Uuid,
        institution_id: &InstitutionId,
    ) -> Result<Vec<PageSiteLocation>> {
        let path = format!(
            "/rest/v1/v_page_site_location?page_id=eq.{}&institution_id=eq.{}&live=eq.true&order=display_order.asc",
            page_id, institution_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_content_by_page_row_id(&self, page_row_id: Uuid, live_only: bool) -> Result<Vec<Content>> {
        debug!("Fetching content for page row {} (live only: {})", page_row_id, live_only);

        let mut path = format!("/rest/v1/v_page_row_content?page_row_id=eq.{}", page_row_id);
        if live_only {
            path.push_str("&content_status_id=eq.LIVE");
        }
        path.push_str("&order=content_display_order.asc");

        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_group_sessions_by_page_row_id(&self, page_row_id: Uuid, live_only: bool) -> Result<Vec<GroupSession>> {
        debug!("Fetching group sessions for page row {} (live only: {})", page_row_id, live_only);

        let mut path = format!("/rest/v1/v_page_row_group_session?page_row_id=eq.{}", page_row_id);
        if live_only {
            path.push_str("&group_session_status_id=eq.ADDED");
        }
        path.push_str("&order=group_session_display_order.asc");

        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_tag_group_by_page_row_id(&self, page_row_id: Uuid) -> Result<Option<TagGroup>> {
        let path = format!("/rest/v1/v_page_row_tag_group?page_row_id=eq.{}", page_row_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_tag_group_by_tag_id(&self, tag_id: &str) -> Result<Option<TagGroup>> {
        let path = format!("/rest/v1/v_tag_group_by_tag?tag_id=eq.{}", tag_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_page_row_tag_by_page_row_id(&self, page_row_id: Uuid) -> Result<Option<PageRowTag>> {
        let path = format!("/rest/v1/page_row_tag?page_row_id=eq.{}", page_row_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_page_row_column(&self, page_row_id: Uuid, column_display_order: i32) -> Result<Option<PageRowColumn>> {
        let path = format!(
            "/rest/v1/v_page_row_column?page_row_id=eq.{}&column_display_order=eq.{}",
            page_row_id, column_display_order
        );
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }
}
