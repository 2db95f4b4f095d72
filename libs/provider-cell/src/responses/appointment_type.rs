use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::context::CurrentContext;
use shared_models::error::AppError;
use shared_utils::{Formatter, Strings};

use crate::models::{AppointmentType, AppointmentTypeSupplement, AssessmentQuestion, QuestionTypeId};
use crate::services::{AssessmentService, SupabaseAssessmentService};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientIntakeQuestionApiResponse {
    pub question: String,
    pub font_size_id: Option<String>,
    pub question_content_hint_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningIntakeQuestionApiResponse {
    pub question: String,
    pub font_size_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentTypeApiResponse {
    pub appointment_type_id: Uuid,
    pub scheduling_system_id: String,
    pub visit_type_id: String,
    pub acuity_appointment_type_id: Option<i64>,
    pub epic_visit_type_id: Option<String>,
    pub epic_visit_type_id_type: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub duration_in_minutes: i64,
    pub duration_in_minutes_description: String,
    pub hex_color: i32,
    pub hex_color_description: String,
    pub assessment_id: Option<Uuid>,
    pub patient_intake_questions: Option<Vec<PatientIntakeQuestionApiResponse>>,
    pub screening_questions: Option<Vec<ScreeningIntakeQuestionApiResponse>>,
}

#[derive(Clone)]
pub struct AppointmentTypeApiResponseFactory {
    assessment_service: Arc<dyn AssessmentService>,
    strings: Arc<Strings>,
}

impl AppointmentTypeApiResponseFactory {
    pub fn new(assessment_service: Arc<dyn AssessmentService>, strings: Arc<Strings>) -> Self {
        Self {
            assessment_service,
            strings,
        }
    }

    pub fn from_config(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self::new(
            Arc::new(SupabaseAssessmentService::new(config, auth_token)),
            Strings::shared(config),
        )
    }

    pub async fn create(
        &self,
        context: &CurrentContext,
        appointment_type: &AppointmentType,
        supplements: &HashSet<AppointmentTypeSupplement>,
    ) -> Result<AppointmentTypeApiResponse, AppError> {
        let formatter = Formatter::new(context, self.strings.clone());

        let mut response = AppointmentTypeApiResponse {
            appointment_type_id: appointment_type.appointment_type_id,
            scheduling_system_id: appointment_type.scheduling_system_id.clone(),
            visit_type_id: appointment_type.visit_type_id.clone(),
            acuity_appointment_type_id: appointment_type.acuity_appointment_type_id,
            epic_visit_type_id: appointment_type.epic_visit_type_id.clone(),
            epic_visit_type_id_type: appointment_type.epic_visit_type_id_type.clone(),
            name: appointment_type.name.clone(),
            description: appointment_type.description.clone(),
            duration_in_minutes: appointment_type.duration_in_minutes,
            duration_in_minutes_description: formatter.string(
                "{{duration}} minutes",
                &[("duration", appointment_type.duration_in_minutes.to_string())],
            ),
            hex_color: appointment_type.hex_color,
            hex_color_description: formatter.format_hex_color(appointment_type.hex_color),
            assessment_id: appointment_type.assessment_id,
            patient_intake_questions: None,
            screening_questions: None,
        };

        let wants_assessment = supplements.contains(&AppointmentTypeSupplement::Assessment)
            || supplements.contains(&AppointmentTypeSupplement::Everything);

        if let (Some(assessment_id), true) = (appointment_type.assessment_id, wants_assessment) {
            let questions = self
                .assessment_service
                .find_questions_for_assessment_id(assessment_id)
                .await?;

            let (patient_intake_questions, screening_questions) =
                split_intake_questions(appointment_type.appointment_type_id, &questions)?;

            response.patient_intake_questions = Some(patient_intake_questions);
            response.screening_questions = Some(screening_questions);
        }

        Ok(response)
    }
}

/// QUAD questions are screening intake, TEXT questions are patient intake.
fn split_intake_questions(
    appointment_type_id: Uuid,
    questions: &[AssessmentQuestion],
) -> Result<(Vec<PatientIntakeQuestionApiResponse>, Vec<ScreeningIntakeQuestionApiResponse>), AppError> {
    let mut patient_intake_questions = Vec::new();
    let mut screening_questions = Vec::new();

    for question in questions {
        match question.question_type_id {
            QuestionTypeId::Quad => screening_questions.push(ScreeningIntakeQuestionApiResponse {
                question: question.question_text.clone(),
                font_size_id: question.font_size_id.clone(),
            }),
            QuestionTypeId::Text => patient_intake_questions.push(PatientIntakeQuestionApiResponse {
                question: question.question_text.clone(),
                font_size_id: question.font_size_id.clone(),
                question_content_hint_id: question.question_content_hint_id.clone(),
            }),
            other => {
                return Err(AppError::ValidationError(format!(
                    "Appointment type ID {}: assessment questions of type {:?} are not supported",
                    appointment_type_id, other
                )))
            }
        }
    }

    Ok((patient_intake_questions, screening_questions))
}
