pub mod page;

pub use page::{PageService, SupabasePageService};
