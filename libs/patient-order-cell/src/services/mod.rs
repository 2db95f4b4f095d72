pub mod patient_order;

pub use patient_order::{PatientOrderService, SupabasePatientOrderService};
