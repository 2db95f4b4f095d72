use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::SupabaseClient;

use crate::models::{AppointmentType, LogicalAvailability};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityService: Send + Sync {
    async fn find_logical_availability_by_id(
        &self,
        logical_availability_id: Uuid,
    ) -> Result<Option<LogicalAvailability>>;

    async fn find_appointment_types_by_logical_availability_id(
        &self,
        logical_availability_id: Uuid,
    ) -> Result<Vec<AppointmentType>>;

    async fn normalized_end_date(&self, logical_availability: &LogicalAvailability) -> Result<Option<NaiveDate>>;
}

pub struct SupabaseAvailabilityService {
    supabase: SupabaseClient,
    auth_token: Option<String>,
}

impl SupabaseAvailabilityService {
    pub fn new(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.map(str::to_string),
        }
    }
}

#[async_trait]
impl AvailabilityService for SupabaseAvailabilityService {
    async fn find_logical_availability_by_id(
        &self,
        logical_availability_id: Uuid,
    ) -> Result<Option<LogicalAvailability>> {
        debug!("Fetching logical availability {}", logical_availability_id);

        let path = format!(
            "/rest/v1/logical_availability?logical_availability_id=eq.{}",
            logical_availability_id
        );
        self.supabase.select_one(&path, self.auth_token.as_deref()).await
    }

    async fn find_appointment_types_by_logical_availability_id(
        &self,
        logical_availability_id: Uuid,
    ) -> Result<Vec<AppointmentType>> {
        let path = format!(
            "/rest/v1/v_logical_availability_appointment_type?logical_availability_id=eq.{}",
            logical_availability_id
        );
        self.supabase.select(&path, self.auth_token.as_deref()).await
    }

    async fn normalized_end_date(&self, logical_availability: &LogicalAvailability) -> Result<Option<NaiveDate>> {
        Ok(logical_availability.normalized_end_date())
    }
}
