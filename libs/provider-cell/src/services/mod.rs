pub mod appointment_type;
pub mod assessment;
pub mod availability;
pub mod provider;

pub use appointment_type::{AppointmentTypeService, SupabaseAppointmentTypeService};
pub use assessment::{AssessmentService, SupabaseAssessmentService};
pub use availability::{AvailabilityService, SupabaseAvailabilityService};
pub use provider::{ProviderService, SupabaseProviderService};
