use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: Option<u64>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub app_metadata: Option<serde_json::Value>,
    pub user_metadata: Option<serde_json::Value>,
    pub aud: Option<String>,
    pub iat: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Platform role of an account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleId {
    Patient,
    Provider,
    CareManager,
    Coach,
    Clinician,
    Psychiatrist,
    Administrator,
    SuperAdministrator,
    Mhic,
    Other,
}

impl RoleId {
    /// Staff roles that work the integrated-care panel.
    pub fn is_panel_role(&self) -> bool {
        matches!(self, RoleId::Mhic | RoleId::Administrator | RoleId::Provider)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleId::Patient => write!(f, "PATIENT"),
            RoleId::Provider => write!(f, "PROVIDER"),
            RoleId::CareManager => write!(f, "CARE_MANAGER"),
            RoleId::Coach => write!(f, "COACH"),
            RoleId::Clinician => write!(f, "CLINICIAN"),
            RoleId::Psychiatrist => write!(f, "PSYCHIATRIST"),
            RoleId::Administrator => write!(f, "ADMINISTRATOR"),
            RoleId::SuperAdministrator => write!(f, "SUPER_ADMINISTRATOR"),
            RoleId::Mhic => write!(f, "MHIC"),
            RoleId::Other => write!(f, "OTHER"),
        }
    }
}
