pub mod account;
pub mod address;
pub mod authorization;
pub mod institution;

pub use account::{AccountService, SupabaseAccountService};
pub use address::{AddressService, SupabaseAddressService};
pub use authorization::{AuthorizationService, RoleAuthorizationService};
pub use institution::{InstitutionService, SupabaseInstitutionService};
