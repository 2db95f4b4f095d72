use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::context::CurrentContext;
use shared_models::error::AppError;
use shared_utils::{Formatter, Strings};

use crate::models::{
    AccountSource, ScreeningAnswerOption, ScreeningFlowVersion, ScreeningQuestion, ScreeningSession,
    ScreeningSessionDestination, ScreeningSessionSupplement,
};
use crate::services::{ScreeningService, SupabaseScreeningService};

// ==============================================================================
// SCREENING SESSION
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningSessionApiResponse {
    pub screening_session_id: Uuid,
    pub screening_flow_version_id: Uuid,
    pub created_by_account_id: Uuid,
    pub target_account_id: Uuid,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_at_description: Option<String>,
    pub skipped: bool,
    pub skipped_at: Option<DateTime<Utc>>,
    pub skipped_at_description: Option<String>,
    pub crisis_indicated: bool,
    pub crisis_indicated_at: Option<DateTime<Utc>>,
    pub crisis_indicated_at_description: Option<String>,
    pub created: DateTime<Utc>,
    pub created_description: String,
    pub next_screening_question_context_id: Option<String>,
    pub screening_session_destination: Option<ScreeningSessionDestinationApiResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningSessionDestinationApiResponse {
    pub screening_session_destination_id: String,
    pub context: Map<String, Value>,
}

impl From<ScreeningSessionDestination> for ScreeningSessionDestinationApiResponse {
    fn from(destination: ScreeningSessionDestination) -> Self {
        Self {
            screening_session_destination_id: destination.screening_session_destination_id,
            context: destination.context,
        }
    }
}

#[derive(Clone)]
pub struct ScreeningSessionApiResponseFactory {
    screening_service: Arc<dyn ScreeningService>,
    strings: Arc<Strings>,
}

impl ScreeningSessionApiResponseFactory {
    pub fn new(screening_service: Arc<dyn ScreeningService>, strings: Arc<Strings>) -> Self {
        Self {
            screening_service,
            strings,
        }
    }

    pub fn from_config(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self::new(
            Arc::new(SupabaseScreeningService::new(config, auth_token)),
            Strings::shared(config),
        )
    }

    /// `RESULTS` is accepted but contributes nothing yet.
    pub async fn create(
        &self,
        context: &CurrentContext,
        session: &ScreeningSession,
        supplements: &HashSet<ScreeningSessionSupplement>,
    ) -> Result<ScreeningSessionApiResponse, AppError> {
        let formatter = Formatter::new(context, self.strings.clone());

        let mut response = ScreeningSessionApiResponse {
            screening_session_id: session.screening_session_id,
            screening_flow_version_id: session.screening_flow_version_id,
            created_by_account_id: session.created_by_account_id,
            target_account_id: session.target_account_id,
            completed: session.completed,
            completed_at: session.completed_at,
            completed_at_description: session.completed_at.map(|t| formatter.format_timestamp(t)),
            skipped: session.skipped,
            skipped_at: session.skipped_at,
            skipped_at_description: session.skipped_at.map(|t| formatter.format_timestamp(t)),
            crisis_indicated: session.crisis_indicated,
            crisis_indicated_at: session.crisis_indicated_at,
            crisis_indicated_at_description: session.crisis_indicated_at.map(|t| formatter.format_timestamp(t)),
            created: session.created,
            created_description: formatter.format_timestamp(session.created),
            next_screening_question_context_id: None,
            screening_session_destination: None,
        };

        if supplements.contains(&ScreeningSessionSupplement::NextQuestion) {
            response.next_screening_question_context_id = self
                .screening_service
                .find_next_unanswered_screening_question_context_id(session.screening_session_id)
                .await?;
            response.screening_session_destination = self
                .screening_service
                .determine_destination_for_screening_session_id(session.screening_session_id)
                .await?
                .map(ScreeningSessionDestinationApiResponse::from);
        }

        Ok(response)
    }
}

// ==============================================================================
// SCREENING FLOW VERSION
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSourceApiResponse {
    pub account_source_id: String,
    pub description: String,
    pub authentication_url: Option<String>,
}

impl From<&AccountSource> for AccountSourceApiResponse {
    fn from(account_source: &AccountSource) -> Self {
        Self {
            account_source_id: account_source.account_source_id.clone(),
            description: account_source.description.clone(),
            authentication_url: account_source.authentication_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningFlowVersionApiResponse {
    pub screening_flow_version_id: Uuid,
    pub screening_flow_id: Uuid,
    pub initial_screening_id: Uuid,
    pub screening_flow_skip_type_id: String,
    pub phone_number_required: bool,
    pub skippable: bool,
    pub version_number: i32,
    pub version_number_description: String,
    pub required_account_sources: Vec<AccountSourceApiResponse>,
}

#[derive(Clone)]
pub struct ScreeningFlowVersionApiResponseFactory {
    screening_service: Arc<dyn ScreeningService>,
    strings: Arc<Strings>,
}

impl ScreeningFlowVersionApiResponseFactory {
    pub fn new(screening_service: Arc<dyn ScreeningService>, strings: Arc<Strings>) -> Self {
        Self {
            screening_service,
            strings,
        }
    }

    pub fn from_config(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self::new(
            Arc::new(SupabaseScreeningService::new(config, auth_token)),
            Strings::shared(config),
        )
    }

    pub async fn create(
        &self,
        context: &CurrentContext,
        flow_version: &ScreeningFlowVersion,
    ) -> Result<ScreeningFlowVersionApiResponse, AppError> {
        let formatter = Formatter::new(context, self.strings.clone());

        let required_account_sources = self
            .screening_service
            .find_required_account_sources_by_screening_flow_version_id(
                flow_version.screening_flow_version_id,
                &context.institution_id,
            )
            .await?;

        Ok(ScreeningFlowVersionApiResponse {
            screening_flow_version_id: flow_version.screening_flow_version_id,
            screening_flow_id: flow_version.screening_flow_id,
            initial_screening_id: flow_version.initial_screening_id,
            screening_flow_skip_type_id: flow_version.screening_flow_skip_type_id.clone(),
            phone_number_required: flow_version.phone_number_required,
            skippable: flow_version.skippable,
            version_number: flow_version.version_number,
            version_number_description: formatter.format_number(flow_version.version_number as f64),
            required_account_sources: required_account_sources
                .iter()
                .map(AccountSourceApiResponse::from)
                .collect(),
        })
    }
}

// ==============================================================================
// QUESTIONS AND ANSWER OPTIONS
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningQuestionApiResponse {
    pub screening_question_id: Uuid,
    pub screening_version_id: Uuid,
    pub screening_answer_format_id: String,
    pub screening_answer_content_hint_id: String,
    pub screening_question_submission_style_id: String,
    pub question_text: String,
    pub supplement_text: Option<String>,
    pub intro_text: Option<String>,
    pub footer_text: Option<String>,
    pub minimum_answer_count: i32,
    pub minimum_answer_count_description: String,
    pub maximum_answer_count: i32,
    pub maximum_answer_count_description: String,
    pub prefer_autosubmit: bool,
    pub display_order: i32,
    pub metadata: Map<String, Value>,
}

impl ScreeningQuestionApiResponse {
    pub fn new(formatter: &Formatter, question: &ScreeningQuestion) -> Self {
        Self {
            screening_question_id: question.screening_question_id,
            screening_version_id: question.screening_version_id,
            screening_answer_format_id: question.screening_answer_format_id.clone(),
            screening_answer_content_hint_id: question.screening_answer_content_hint_id.clone(),
            screening_question_submission_style_id: question.screening_question_submission_style_id.clone(),
            question_text: question.question_text.clone(),
            supplement_text: question.supplement_text.clone(),
            intro_text: question.intro_text.clone(),
            footer_text: question.footer_text.clone(),
            minimum_answer_count: question.minimum_answer_count,
            minimum_answer_count_description: formatter.format_integer(question.minimum_answer_count as f64),
            maximum_answer_count: question.maximum_answer_count,
            maximum_answer_count_description: formatter.format_integer(question.maximum_answer_count as f64),
            prefer_autosubmit: question.prefer_autosubmit,
            display_order: question.display_order,
            metadata: question.metadata.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningAnswerOptionApiResponse {
    pub screening_answer_option_id: Uuid,
    pub screening_question_id: Uuid,
    pub answer_option_text: Option<String>,
    pub freeform_supplement: bool,
    pub freeform_supplement_text: Option<String>,
    pub freeform_supplement_content_hint_id: Option<String>,
    pub freeform_supplement_text_auto_show: bool,
    pub score: Option<f64>,
    pub score_description: Option<String>,
    pub display_order: i32,
    pub metadata: Option<Map<String, Value>>,
}

impl ScreeningAnswerOptionApiResponse {
    pub fn new(formatter: &Formatter, option: &ScreeningAnswerOption) -> Self {
        Self {
            screening_answer_option_id: option.screening_answer_option_id,
            screening_question_id: option.screening_question_id,
            answer_option_text: option.answer_option_text.clone(),
            freeform_supplement: option.freeform_supplement,
            freeform_supplement_text: option.freeform_supplement_text.clone(),
            freeform_supplement_content_hint_id: option.freeform_supplement_content_hint_id.clone(),
            freeform_supplement_text_auto_show: option.freeform_supplement_text_auto_show,
            score: option.score,
            score_description: option.score.map(|score| formatter.format_number(score)),
            display_order: option.display_order,
            metadata: option.metadata.clone(),
        }
    }
}
