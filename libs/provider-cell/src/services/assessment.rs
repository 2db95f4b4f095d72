use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::SupabaseClient;

use crate::models::AssessmentQuestion;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssessmentService: Send + Sync {
    async fn find_questions_for_assessment_id(&self, assessment_id: Uuid) -> Result<Vec<AssessmentQuestion>>;
}

pub struct SupabaseAssessmentService {
    supabase: SupabaseClient,
    auth_token: Option<String>,
}

impl SupabaseAssessmentService {
    pub fn new(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.map(str::to_string),
        }
    }
}

#[async_trait]
impl AssessmentService for SupabaseAssessmentService {
    async fn find_questions_for_assessment_id(&self, assessment_id: Uuid) -> Result<Vec<AssessmentQuestion>> {
        debug!("Fetching questions for assessment {}", assessment_id);

        let path = format!(
            "/rest/v1/question?assessment_id=eq.{}&order=display_order.asc",
            assessment_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }
}
