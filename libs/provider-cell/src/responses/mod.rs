pub mod appointment_type;
pub mod logical_availability;
pub mod provider;

pub use appointment_type::{
    AppointmentTypeApiResponse, AppointmentTypeApiResponseFactory, PatientIntakeQuestionApiResponse,
    ScreeningIntakeQuestionApiResponse,
};
pub use logical_availability::{LogicalAvailabilityApiResponse, LogicalAvailabilityApiResponseFactory};
pub use provider::{ProviderApiResponse, ProviderApiResponseFactory, SupportRoleApiResponse};
