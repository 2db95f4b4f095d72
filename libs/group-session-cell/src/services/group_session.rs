use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use content_cell::Tag;
use shared_config::AppConfig;
use shared_database::SupabaseClient;

use crate::models::{
    GroupSession, GroupSessionRequest, GroupSessionRequestStatus, GroupSessionReservation, GroupSessionStatus,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupSessionService: Send + Sync {
    async fn find_group_session_by_id(&self, group_session_id: Uuid) -> Result<Option<GroupSession>>;

    async fn find_group_session_status_by_id(&self, group_session_status_id: &str) -> Result<Option<GroupSessionStatus>>;

    async fn find_tags_by_group_session_id(&self, group_session_id: Uuid) -> Result<Vec<Tag>>;

    /// Active (non-canceled) reservations, oldest first.
    async fn find_reservations_by_group_session_id(&self, group_session_id: Uuid) -> Result<Vec<GroupSessionReservation>>;

    async fn find_group_session_request_by_id(
        &self,
        group_session_request_id: Uuid,
    ) -> Result<Option<GroupSessionRequest>>;

    async fn find_group_session_request_status_by_id(
        &self,
        group_session_request_status_id: &str,
    ) -> Result<Option<GroupSessionRequestStatus>>;
}

pub struct SupabaseGroupSessionService {
    supabase: SupabaseClient,
    auth_token: Option<String>,
}

impl SupabaseGroupSessionService {
    pub fn new(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.map(str::to_string),
        }
    }
}

#[async_trait]
impl GroupSessionService for SupabaseGroupSessionService {
    async fn find_group_session_by_id(&self, group_session_id: Uuid) -> Result<Option<GroupSession>> {
        debug!("Fetching group session {}", group_session_id);

        let path = format!("/rest/v1/v_group_session?group_session_id=eq.{}", group_session_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_group_session_status_by_id(&self, group_session_status_id: &str) -> Result<Option<GroupSessionStatus>> {
        let path = format!(
            "/rest/v1/group_session_status?group_session_status_id=eq.{}",
            group_session_status_id
        );
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_tags_by_group_session_id(&self, group_session_id: Uuid) -> Result<Vec<Tag>> {
        let path = format!(
            "/rest/v1/v_tag_group_session?group_session_id=eq.{}&order=name.asc",
            group_session_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_reservations_by_group_session_id(&self, group_session_id: Uuid) -> Result<Vec<GroupSessionReservation>> {
        debug!("Fetching reservations for group session {}", group_session_id);

        let path = format!(
            "/rest/v1/v_group_session_reservation?group_session_id=eq.{}&canceled=eq.false&order=created.asc",
            group_session_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_group_session_request_by_id(
        &self,
        group_session_request_id: Uuid,
    ) -> Result<Option<GroupSessionRequest>> {
        debug!("Fetching group session request {}", group_session_request_id);

        let path = format!(
            "/rest/v1/group_session_request?group_session_request_id=eq.{}",
            group_session_request_id
        );
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_group_session_request_status_by_id(
        &self,
        group_session_request_status_id: &str,
    ) -> Result<Option<GroupSessionRequestStatus>> {
        let path = format!(
            "/rest/v1/group_session_request_status?group_session_request_status_id=eq.{}",
            group_session_request_status_id
        );
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }
}
