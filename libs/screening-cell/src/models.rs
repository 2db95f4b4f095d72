use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningSession {
    pub screening_session_id: Uuid,
    pub screening_flow_version_id: Uuid,
    pub created_by_account_id: Uuid,
    pub target_account_id: Uuid,
    #[serde(default)]
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub skipped: bool,
    pub skipped_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub crisis_indicated: bool,
    pub crisis_indicated_at: Option<DateTime<Utc>>,
    pub created: DateTime<Utc>,
}

/// Where the client should go once a session is finished.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreeningSessionDestination {
    pub screening_session_destination_id: String,
    #[serde(default)]
    pub context: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningQuestionContext {
    pub screening_question_context_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningFlowVersion {
    pub screening_flow_version_id: Uuid,
    pub screening_flow_id: Uuid,
    pub initial_screening_id: Uuid,
    pub screening_flow_skip_type_id: String,
    #[serde(default)]
    pub phone_number_required: bool,
    #[serde(default)]
    pub skippable: bool,
    pub version_number: i32,
}

/// A sign-in method a flow requires, as configured for the institution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSource {
    pub account_source_id: String,
    pub description: String,
    pub authentication_url: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningQuestion {
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
    pub maximum_answer_count: i32,
    #[serde(default)]
    pub prefer_autosubmit: bool,
    pub display_order: i32,
    pub metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningAnswerOption {
    pub screening_answer_option_id: Uuid,
    pub screening_question_id: Uuid,
    pub answer_option_text: Option<String>,
    #[serde(default)]
    pub freeform_supplement: bool,
    pub freeform_supplement_text: Option<String>,
    pub freeform_supplement_content_hint_id: Option<String>,
    #[serde(default)]
    pub freeform_supplement_text_auto_show: bool,
    pub score: Option<f64>,
    pub display_order: i32,
    pub metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreeningSessionSupplement {
    NextQuestion,
    Results,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningFlow {
    pub screening_flow_id: Uuid,
    pub name: String,
}

/// One screening taken in a session, joined with its version and screening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningSessionScreening {
    pub screening_session_screening_id: Uuid,
    pub screening_session_id: Uuid,
    pub screening_version_id: Uuid,
    pub screening_id: Uuid,
    pub screening_version_number: i32,
    pub screening_type_id: String,
    pub screening_name: String,
    pub score: Option<Value>,
    pub below_scoring_threshold: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsweredScreeningQuestion {
    pub screening_session_screening_id: Uuid,
    pub screening_question_id: Uuid,
    pub screening_answer_format_id: String,
    pub screening_answer_content_hint_id: String,
    pub intro_text: Option<String>,
    pub question_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningAnswer {
    pub screening_answer_id: Uuid,
    pub screening_session_screening_id: Uuid,
    pub screening_question_id: Uuid,
    pub screening_answer_option_id: Uuid,
    pub answer_option_text: Option<String>,
    pub text: Option<String>,
    pub score: Option<i32>,
}

// ==============================================================================
// RESULTS
// ==============================================================================

/// Everything answered in a session, screening by screening.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningSessionResult {
    pub screening_flow_id: Uuid,
    pub screening_flow_name: Option<String>,
    pub screening_flow_version_id: Uuid,
    pub screening_flow_version_number: i32,
    pub screening_session_screening_results: Vec<ScreeningSessionScreeningResult>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningSessionScreeningResult {
    pub screening_version_id: Uuid,
    pub screening_id: Uuid,
    pub screening_version_number: i32,
    pub screening_type_id: String,
    pub screening_name: String,
    pub screening_score: Option<Value>,
    pub below_scoring_threshold: Option<bool>,
    pub screening_question_results: Vec<ScreeningQuestionResult>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningQuestionResult {
    pub screening_question_id: Uuid,
    pub screening_answer_format_id: String,
    pub screening_answer_content_hint_id: String,
    pub screening_question_intro_text: Option<String>,
    pub screening_question_text: String,
    pub screening_answer_results: Vec<ScreeningAnswerResult>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningAnswerResult {
    pub screening_answer_id: Uuid,
    pub screening_answer_option_id: Uuid,
    pub answer_option_text: Option<String>,
    pub text: Option<String>,
    pub score: Option<i32>,
}

impl ScreeningSessionResult {
    /// Questions keep the order they were answered in; answers attach to the
    /// question and screening they were given for.
    pub fn assemble(
        flow_version: &ScreeningFlowVersion,
        flow: Option<&ScreeningFlow>,
        screenings: &[ScreeningSessionScreening],
        answered_questions: &[AnsweredScreeningQuestion],
        answers: &[ScreeningAnswer],
    ) -> Self {
        let screening_session_screening_results = screenings
            .iter()
            .map(|screening| {
                let screening_question_results = answered_questions
                    .iter()
                    .filter(|question| {
                        question.screening_session_screening_id == screening.screening_session_screening_id
                    })
                    .map(|question| ScreeningQuestionResult {
                        screening_question_id: question.screening_question_id,
                        screening_answer_format_id: question.screening_answer_format_id.clone(),
                        screening_answer_content_hint_id: question.screening_answer_content_hint_id.clone(),
                        screening_question_intro_text: question.intro_text.clone(),
                        screening_question_text: question.question_text.clone(),
                        screening_answer_results: answers
                            .iter()
                            .filter(|answer| {
                                answer.screening_session_screening_id == screening.screening_session_screening_id
                                    && answer.screening_question_id == question.screening_question_id
                            })
                            .map(|answer| ScreeningAnswerResult {
                                screening_answer_id: answer.screening_answer_id,
                                screening_answer_option_id: answer.screening_answer_option_id,
                                answer_option_text: answer.answer_option_text.clone(),
                                text: answer.text.clone(),
                                score: answer.score,
                            })
                            .collect(),
                    })
                    .collect();

                ScreeningSessionScreeningResult {
                    screening_version_id: screening.screening_version_id,
                    screening_id: screening.screening_id,
                    screening_version_number: screening.screening_version_number,
                    screening_type_id: screening.screening_type_id.clone(),
                    screening_name: screening.screening_name.clone(),
                    screening_score: screening.score.clone(),
                    below_scoring_threshold: screening.below_scoring_threshold,
                    screening_question_results,
                }
            })
            .collect();

        Self {
            screening_flow_id: flow_version.screening_flow_id,
            screening_flow_name: flow.map(|flow| flow.name.clone()),
            screening_flow_version_id: flow_version.screening_flow_version_id,
            screening_flow_version_number: flow_version.version_number,
            screening_session_screening_results,
        }
    }
}
