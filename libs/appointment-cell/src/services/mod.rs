pub mod appointment;

pub use appointment::{AppointmentService, SupabaseAppointmentService};
