pub mod handlers;
pub mod models;
pub mod responses;
pub mod router;
pub mod services;

pub use models::*;
pub use responses::*;
pub use services::*;
