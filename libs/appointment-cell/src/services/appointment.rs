use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::SupabaseClient;

use crate::models::{Appointment, AppointmentReason, Followup};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentService: Send + Sync {
    async fn find_appointment_by_id(&self, appointment_id: Uuid) -> Result<Option<Appointment>>;

    async fn find_appointment_reason_by_id(&self, appointment_reason_id: Uuid) -> Result<Option<AppointmentReason>>;

    async fn find_followup_by_id(&self, followup_id: Uuid) -> Result<Option<Followup>>;
}

pub struct SupabaseAppointmentService {
    supabase: SupabaseClient,
    auth_token: Option<String>,
}

impl SupabaseAppointmentService {
    pub fn new(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.map(str::to_string),
        }
    }
}

#[async_trait]
impl AppointmentService for SupabaseAppointmentService {
    async fn find_appointment_by_id(&self, appointment_id: Uuid) -> Result<Option<Appointment>> {
        debug!("Fetching appointment {}", appointment_id);

        let path = format!("/rest/v1/appointment?appointment_id=eq.{}", appointment_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_appointment_reason_by_id(&self, appointment_reason_id: Uuid) -> Result<Option<AppointmentReason>> {
        let path = format!(
            "/rest/v1/appointment_reason?appointment_reason_id=eq.{}",
            appointment_reason_id
        );
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_followup_by_id(&self, followup_id: Uuid) -> Result<Option<Followup>> {
        debug!("Fetching followup {}", followup_id);

        let path = format!("/rest/v1/followup?followup_id=eq.{}", followup_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }
}
