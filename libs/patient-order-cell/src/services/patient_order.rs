use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use account_cell::Address;
use shared_config::AppConfig;
use shared_database::SupabaseClient;

use crate::models::{
    PatientOrder, PatientOrderCareType, PatientOrderDiagnosis, PatientOrderFocusType, PatientOrderMedication,
    PatientOrderNote, PatientOrderOutreach, PatientOrderScheduledMessage, PatientOrderScheduledMessageGroup,
    PatientOrderScheduledOutreach, PatientOrderTriage, PatientOrderTriageGroup, PatientOrderVoicemailTask,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientOrderService: Send + Sync {
    async fn find_patient_order_by_id(&self, patient_order_id: Uuid) -> Result<Option<PatientOrder>>;

    async fn find_address_by_id(&self, address_id: Uuid) -> Result<Option<Address>>;

    async fn find_patient_order_diagnoses_by_patient_order_id(
        &self,
        patient_order_id: Uuid,
    ) -> Result<Vec<PatientOrderDiagnosis>>;

    async fn find_patient_order_medications_by_patient_order_id(
        &self,
        patient_order_id: Uuid,
    ) -> Result<Vec<PatientOrderMedication>>;

    /// Newest first.
    async fn find_patient_order_notes_by_patient_order_id(&self, patient_order_id: Uuid) -> Result<Vec<PatientOrderNote>>;

    async fn find_patient_order_outreaches_by_patient_order_id(
        &self,
        patient_order_id: Uuid,
    ) -> Result<Vec<PatientOrderOutreach>>;

    async fn find_patient_order_scheduled_outreaches_by_patient_order_id(
        &self,
        patient_order_id: Uuid,
    ) -> Result<Vec<PatientOrderScheduledOutreach>>;

    async fn find_patient_order_voicemail_tasks_by_patient_order_id(
        &self,
        patient_order_id: Uuid,
    ) -> Result<Vec<PatientOrderVoicemailTask>>;

    /// Ordered by schedule, so messages of one group are adjacent.
    async fn find_patient_order_scheduled_messages_by_patient_order_id(
        &self,
        patient_order_id: Uuid,
    ) -> Result<Vec<PatientOrderScheduledMessage>>;

    async fn find_patient_order_scheduled_message_groups_by_ids(
        &self,
        patient_order_scheduled_message_group_ids: Vec<Uuid>,
    ) -> Result<Vec<PatientOrderScheduledMessageGroup>>;

    async fn find_active_patient_order_triage_group_by_patient_order_id(
        &self,
        patient_order_id: Uuid,
    ) -> Result<Option<PatientOrderTriageGroup>>;

    async fn find_patient_order_triages_by_patient_order_triage_group_id(
        &self,
        patient_order_triage_group_id: Uuid,
    ) -> Result<Vec<PatientOrderTriage>>;

    async fn find_patient_order_care_types(&self) -> Result<Vec<PatientOrderCareType>>;

    async fn find_patient_order_focus_types(&self) -> Result<Vec<PatientOrderFocusType>>;
}

pub struct SupabasePatientOrderService {
    supabase: SupabaseClient,
    auth_token: Option<String>,
}

impl SupabasePatientOrderService {
    pub fn new(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.map(str::to_string),
        }
    }
}

#[async_trait]
impl PatientOrderService for SupabasePatientOrderService {
    async fn find_patient_order_by_id(&self, patient_order_id: Uuid) -> Result<Option<PatientOrder>> {
        debug!("Fetching patient order {}", patient_order_id);

        let path = format!("/rest/v1/v_patient_order?patient_order_id=eq.{}", patient_order_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_address_by_id(&self, address_id: Uuid) -> Result<Option<Address>> {
        let path = format!("/rest/v1/address?address_id=eq.{}", address_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_patient_order_diagnoses_by_patient_order_id(
        &self,
        patient_order_id: Uuid,
    ) -> Result<Vec<PatientOrderDiagnosis>> {
        let path = format!(
            "/rest/v1/patient_order_diagnosis?patient_order_id=eq.{}&order=display_order.asc",
            patient_order_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_patient_order_medications_by_patient_order_id(
        &self,
        patient_order_id: Uuid,
    ) -> Result<Vec<PatientOrderMedication>> {
        let path = format!(
            "/rest/v1/patient_order_medication?patient_order_id=eq.{}&order=display_order.asc",
            patient_order_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_patient_order_notes_by_patient_order_id(&self, patient_order_id: Uuid) -> Result<Vec<PatientOrderNote>> {
        let path = format!(
            "/rest/v1/patient_order_note?patient_order_id=eq.{}&deleted=eq.false&order=created.desc",
            patient_order_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_patient_order_scheduled_outreaches_by_patient_order_id(
        &self,
        patient_order_id: Uuid,
    ) -> Result<Vec<PatientOrderScheduledOutreach>> {
        let path = format!(
            "/rest/v1/v_patient_order_scheduled_outreach?patient_order_id=eq.{}&order=scheduled_at_date_time.asc",
            patient_order_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_patient_order_outreaches_by_patient_order_id(
        &self,
        patient_order_id: Uuid,
    ) -> Result<Vec<PatientOrderOutreach>> {
        let path = format!(
            "/rest/v1/patient_order_outreach?patient_order_id=eq.{}&deleted=eq.false&order=outreach_date_time.desc",
            patient_order_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_patient_order_voicemail_tasks_by_patient_order_id(
        &self,
        patient_order_id: Uuid,
    ) -> Result<Vec<PatientOrderVoicemailTask>> {
        let path = format!(
            "/rest/v1/v_patient_order_voicemail_task?patient_order_id=eq.{}&deleted=eq.false&order=created.desc",
            patient_order_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_patient_order_scheduled_messages_by_patient_order_id(
        &self,
        patient_order_id: Uuid,
    ) -> Result<Vec<PatientOrderScheduledMessage>> {
        debug!("Fetching scheduled messages for patient order {}", patient_order_id);

        let path = format!(
            "/rest/v1/v_patient_order_scheduled_message?patient_order_id=eq.{}&order=scheduled_at.asc",
            patient_order_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_patient_order_scheduled_message_groups_by_ids(
        &self,
        patient_order_scheduled_message_group_ids: Vec<Uuid>,
    ) -> Result<Vec<PatientOrderScheduledMessageGroup>> {
        if patient_order_scheduled_message_group_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = patient_order_scheduled_message_group_ids
            .iter()
            .map(Uuid::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let path = format!(
            "/rest/v1/v_patient_order_scheduled_message_group?patient_order_scheduled_message_group_id=in.({})",
            ids
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_active_patient_order_triage_group_by_patient_order_id(
        &self,
        patient_order_id: Uuid,
    ) -> Result<Option<PatientOrderTriageGroup>> {
        let path = format!(
            "/rest/v1/patient_order_triage_group?patient_order_id=eq.{}&active=eq.true",
            patient_order_id
        );
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_patient_order_triages_by_patient_order_triage_group_id(
        &self,
        patient_order_triage_group_id: Uuid,
    ) -> Result<Vec<PatientOrderTriage>> {
        let path = format!(
            "/rest/v1/v_patient_order_triage?patient_order_triage_group_id=eq.{}&order=display_order.asc",
            patient_order_triage_group_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn find_patient_order_care_types(&self) -> Result<Vec<PatientOrderCareType>> {
        self.supabase
            .select("/rest/v1/patient_order_care_type?order=display_order.asc", self.auth_token.as_deref())
            .await
    }

    async fn find_patient_order_focus_types(&self) -> Result<Vec<PatientOrderFocusType>> {
        self.supabase
            .select("/rest/v1/patient_order_focus_type?order=display_order.asc", self.auth_token.as_deref())
            .await
    }
}
