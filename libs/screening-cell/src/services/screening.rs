use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::SupabaseClient;
use shared_models::context::InstitutionId;

use crate::models::{
    AccountSource, AnsweredScreeningQuestion, ScreeningAnswer, ScreeningAnswerOption, ScreeningFlow,
    ScreeningFlowVersion, ScreeningQuestion, ScreeningQuestionContext, ScreeningSession, ScreeningSessionDestination,
    ScreeningSessionResult, ScreeningSessionScreening,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScreeningService: Send + Sync {
    async fn find_screening_session_by_id(&self, screening_session_id: Uuid) -> Result<Option<ScreeningSession>>;

    async fn find_screening_flow_version_by_id(
        &self,
        screening_flow_version_id: Uuid,
    ) -> Result<Option<ScreeningFlowVersion>>;

    async fn find_next_unanswered_screening_question_context_id(
        &self,
        screening_session_id: Uuid,
    ) -> Result<Option<String>>;

    async fn determine_destination_for_screening_session_id(
        &self,
        screening_session_id: Uuid,
    ) -> Result<Option<ScreeningSessionDestination>>;

    async fn find_required_account_sources_by_screening_flow_version_id(
        &self,
        screening_flow_version_id: Uuid,
        institution_id: &InstitutionId,
    ) -> Result<Vec<AccountSource>>;

    async fn find_screening_questions_by_screening_version_id(
        &self,
        screening_version_id: Uuid,
    ) -> Result<Vec<ScreeningQuestion>>;

    async fn find_screening_answer_options_by_screening_version_id(
        &self,
        screening_version_id: Uuid,
    ) -> Result<Vec<ScreeningAnswerOption>>;

    /// `None` when the session's flow version no longer exists.
    async fn find_screening_session_result(
        &self,
        screening_session: &ScreeningSession,
    ) -> Result<Option<ScreeningSessionResult>>;
}

pub struct SupabaseScreeningService {
    supabase: SupabaseClient,
    auth_token: Option<String>,
}

impl SupabaseScreeningService {
    pub fn new(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.map(str::to_string),
        }
    }
}

#[async_trait]
impl ScreeningService for SupabaseScreeningService {
    async fn find_screening_session_by_id(&self, screening_session_id: Uuid) -> Result<Option<ScreeningSession>> {
        debug!("Fetching screening session {}", screening_session_id);

        let path = format!(
            "/rest/v1/screening_session?screening_session_id=eq.{}",
            screening_session_id
        );
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_screening_flow_version_by_id(
        &self,
        screening_flow_version_id: Uuid,
    ) -> Result<Option<ScreeningFlowVersion>> {
        let path = format!(
            "/rest/v1/screening_flow_version?screening_flow_version_id=eq.{}",
            screening_flow_version_id
        );
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_next_unanswered_screening_question_context_id(
        &self,
        screening_session_id: Uuid,
    ) -> Result<Option<String>> {
        let path = format!(
            "/rest/v1/v_next_screening_question_context?screening_session_id=eq.{}",
            screening_session_id
        );
        let context: Option<ScreeningQuestionContext> =
            self.supabase.select_one(&path, self.auth_token.as_deref()).await?;

        Ok(context.map(|context| context.screening_question_context_id))
    }

    async fn determine_destination_for_screening_session_id(
        &self,
        screening_session_id: Uuid,
    ) -> Result<Option<ScreeningSessionDestination>> {
        let path = format!(
            "/rest/v1/v_screening_session_destination?screening_session_id=eq.{}",
            screening_session_id
        );
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_required_account_sources_by_screening_flow_version_id(
        &self,
        screening_flow_version_id: Uuid,
        institution_id: &InstitutionId,
    ) -> Result<Vec<AccountSource>> {
        debug!(
            "Fetching required account sources for screening flow version {}",
            screening_flow_version_id
        );

        let path = format!(
            "/rest/v1/v_screening_flow_version_account_source?screening_flow_version_id=eq.{}&institution_id=eq.{}&order=display_order.asc",
            screening_flow_version_id, institution_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_screening_questions_by_screening_version_id(
        &self,
        screening_version_id: Uuid,
    ) -> Result<Vec<ScreeningQuestion>> {
        let path = format!(
            "/rest/v1/screening_question?screening_version_id=eq.{}&order=display_order.asc",
            screening_version_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_screening_answer_options_by_screening_version_id(
        &self,
        screening_version_id: Uuid,
    ) -> Result<Vec<ScreeningAnswerOption>> {
        let path = format!(
            "/rest/v1/v_screening_answer_option?screening_version_id=eq.{}&order=display_order.asc",
            screening_version_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_screening_session_result(
        &self,
        screening_session: &ScreeningSession,
    ) -> Result<Option<ScreeningSessionResult>> {
        debug!("Assembling results for screening session {}", screening_session.screening_session_id);

        let Some(flow_version) = self
            .find_screening_flow_version_by_id(screening_session.screening_flow_version_id)
            .await?
        else {
            return Ok(None);
        };

        let path = format!(
            "/rest/v1/screening_flow?screening_flow_id=eq.{}",
            flow_version.screening_flow_id
        );
        let flow: Option<ScreeningFlow> = self.supabase.select_one(&path, self.auth_token.as_deref()).await?;

        let path = format!(
            "/rest/v1/v_screening_session_screening?screening_session_id=eq.{}&valid=eq.true&order=screening_order.asc",
            screening_session.screening_session_id
        );
        let screenings: Vec<ScreeningSessionScreening> =
            self.supabase.select(&path, self.auth_token.as_deref()).await?;

        if screenings.is_empty() {
            return Ok(Some(ScreeningSessionResult::assemble(
                &flow_version,
                flow.as_ref(),
                &[],
                &[],
                &[],
            )));
        }

        let screening_session_screening_ids = screenings
            .iter()
            .map(|screening| screening.screening_session_screening_id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let path = format!(
            "/rest/v1/v_screening_session_answered_screening_question?screening_session_screening_id=in.({})&valid=eq.true&order=created.asc",
            screening_session_screening_ids
        );
        let answered_questions: Vec<AnsweredScreeningQuestion> =
            self.supabase.select(&path, self.auth_token.as_deref()).await?;

        let path = format!(
            "/rest/v1/v_screening_answer?screening_session_screening_id=in.({})&valid=eq.true&order=created.asc",
            screening_session_screening_ids
        );
        let answers: Vec<ScreeningAnswer> = self.supabase.select(&path, self.auth_token.as_deref()).await?;

        Ok(Some(ScreeningSessionResult::assemble(
            &flow_version,
            flow.as_ref(),
            &screenings,
            &answered_questions,
            &answers,
        )))
    }
}
