use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::SupabaseClient;

use crate::models::AppointmentType;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentTypeService: Send + Sync {
    async fn find_appointment_type_by_id(&self, appointment_type_id: Uuid) -> Result<Option<AppointmentType>>;
}

pub struct SupabaseAppointmentTypeService {
    supabase: SupabaseClient,
    auth_token: Option<String>,
}

impl SupabaseAppointmentTypeService {
    pub fn new(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.map(str::to_string),
        }
    }
}

#[async_trait]
impl AppointmentTypeService for SupabaseAppointmentTypeService {
    async fn find_appointment_type_by_id(&self, appointment_type_id: Uuid) -> Result<Option<AppointmentType>> {
        debug!("Fetching appointment type {}", appointment_type_id);

        let path = format!("/rest/v1/appointment_type?appointment_type_id=eq.{}", appointment_type_id);
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }
}
