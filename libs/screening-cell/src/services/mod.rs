pub mod screening;

pub use screening::{ScreeningService, SupabaseScreeningService};
