pub mod auth;
pub mod context;
pub mod error;
pub mod locale;
