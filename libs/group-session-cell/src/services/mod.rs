pub mod group_session;

pub use group_session::{GroupSessionService, SupabaseGroupSessionService};
