use std::fmt;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::RoleId;
use crate::locale::Locale;

/// Tenant identifier, e.g. `COBALT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstitutionId(pub String);

impl InstitutionId {
    pub const DEFAULT: &'static str = "COBALT";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for InstitutionId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for InstitutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The signed-in account a response is being rendered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub account_id: Uuid,
    pub role_id: RoleId,
    pub institution_id: InstitutionId,
}

/// Per-request viewer, locale and time zone.
#[derive(Debug, Clone)]
pub struct CurrentContext {
    pub viewer: Option<Viewer>,
    pub institution_id: InstitutionId,
    pub locale: Locale,
    pub time_zone: Tz,
}

impl CurrentContext {
    pub fn anonymous(institution_id: InstitutionId, locale: Locale, time_zone: Tz) -> Self {
        Self {
            viewer: None,
            institution_id,
            locale,
            time_zone,
        }
    }

    pub fn for_viewer(viewer: Viewer, locale: Locale, time_zone: Tz) -> Self {
        Self {
            institution_id: viewer.institution_id.clone(),
            viewer: Some(viewer),
            locale,
            time_zone,
        }
    }

    pub fn viewer_account_id(&self) -> Option<Uuid> {
        self.viewer.as_ref().map(|viewer| viewer.account_id)
    }

    pub fn viewer_role_id(&self) -> Option<RoleId> {
        self.viewer.as_ref().map(|viewer| viewer.role_id)
    }

    pub fn is_viewer(&self, account_id: Uuid) -> bool {
        self.viewer_account_id() == Some(account_id)
    }

    /// Patients see only their own account; staff see accounts in their own institution.
    pub fn can_view_account(&self, account_id: Uuid, institution_id: &InstitutionId) -> bool {
        if self.is_viewer(account_id) {
            return true;
        }

        match &self.viewer {
            Some(viewer) => viewer.role_id != RoleId::Patient && viewer.institution_id == *institution_id,
            None => false,
        }
    }
}

impl Default for CurrentContext {
    fn default() -> Self {
        Self::anonymous(InstitutionId::default(), Locale::default(), Tz::UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_context_uses_viewer_institution() {
        let viewer = Viewer {
            account_id: Uuid::new_v4(),
            role_id: RoleId::Patient,
            institution_id: InstitutionId::new("PENN"),
        };
        let context = CurrentContext::for_viewer(viewer.clone(), Locale::en_us(), chrono_tz::America::New_York);

        assert_eq!(context.institution_id.as_str(), "PENN");
        assert!(context.is_viewer(viewer.account_id));
        assert!(!context.is_viewer(Uuid::new_v4()));
        assert_eq!(context.viewer_role_id(), Some(RoleId::Patient));
        assert!(context.can_view_account(viewer.account_id, &InstitutionId::new("PENN")));
        assert!(!context.can_view_account(Uuid::new_v4(), &InstitutionId::new("PENN")));
    }

    #[test]
    fn test_staff_view_limited_to_own_institution() {
        let viewer = Viewer {
            account_id: Uuid::new_v4(),
            role_id: RoleId::Coach,
            institution_id: InstitutionId::new("OTHER_TENANT"),
        };
        let context = CurrentContext::for_viewer(viewer, Locale::en_us(), Tz::UTC);

        assert!(context.can_view_account(Uuid::new_v4(), &InstitutionId::new("OTHER_TENANT")));
        assert!(!context.can_view_account(Uuid::new_v4(), &InstitutionId::default()));
    }

    #[test]
    fn test_anonymous_context() {
        let context = CurrentContext::default();
        assert!(context.viewer.is_none());
        assert_eq!(context.institution_id.as_str(), "COBALT");
        assert_eq!(context.viewer_account_id(), None);
        assert!(!context.can_view_account(Uuid::new_v4(), &InstitutionId::default()));
    }
}
