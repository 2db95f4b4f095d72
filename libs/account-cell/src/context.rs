use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use chrono_tz::Tz;
use tracing::{debug, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::{RoleId, User};
use shared_models::context::{CurrentContext, InstitutionId, Viewer};
use shared_models::error::AppError;
use shared_models::locale::Locale;
use shared_utils::extractor::bearer_token;

use crate::models::Account;
use crate::services::{AccountService, SupabaseAccountService};

pub const LOCALE_HEADER: &str = "X-Locale";
pub const TIME_ZONE_HEADER: &str = "X-Time-Zone";
pub const INSTITUTION_HEADER: &str = "X-Cobalt-Institution-Id";

/// Per-request overrides a client may send.
#[derive(Debug, Default, Clone)]
pub struct ContextOverrides {
    pub locale: Option<Locale>,
    pub time_zone: Option<Tz>,
    pub institution_id: Option<InstitutionId>,
}

impl ContextOverrides {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let locale = header(LOCALE_HEADER).and_then(|value| {
            let locale = Locale::parse(value);
            if locale.is_none() {
                warn!("Ignoring invalid {} header '{}'", LOCALE_HEADER, value);
            }
            locale
        });

        let time_zone = header(TIME_ZONE_HEADER).and_then(|value| match Tz::from_str(value) {
            Ok(time_zone) => Some(time_zone),
            Err(_) => {
                warn!("Ignoring invalid {} header '{}'", TIME_ZONE_HEADER, value);
                None
            }
        });

        Self {
            locale,
            time_zone,
            institution_id: header(INSTITUTION_HEADER).map(InstitutionId::new),
        }
    }
}

/// Context for a signed-in account. The account's own locale and zone apply
/// unless overridden.
pub fn viewer_context(account: &Account, overrides: &ContextOverrides) -> CurrentContext {
    CurrentContext::for_viewer(
        Viewer {
            account_id: account.account_id,
            role_id: account.role_id,
            institution_id: account.institution_id.clone(),
        },
        overrides.locale.clone().unwrap_or_else(|| account.locale.clone()),
        overrides.time_zone.unwrap_or(account.time_zone),
    )
}

pub fn anonymous_context(config: &AppConfig, overrides: &ContextOverrides) -> CurrentContext {
    let default_time_zone = Tz::from_str(&config.default_time_zone).unwrap_or_else(|_| {
        warn!("DEFAULT_TIME_ZONE '{}' is not a valid zone, using UTC", config.default_time_zone);
        Tz::UTC
    });

    CurrentContext::anonymous(
        overrides.institution_id.clone().unwrap_or_default(),
        overrides
            .locale
            .clone()
            .unwrap_or_else(|| Locale::parse_or_default(&config.default_locale)),
        overrides.time_zone.unwrap_or(default_time_zone),
    )
}

/// Builds the `CurrentContext` for the request. When `auth_middleware` ran
/// first, the JWT subject's account is loaded and also stored as an
/// extension; otherwise the request is anonymous.
pub async fn current_context_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let overrides = ContextOverrides::from_headers(request.headers());

    let context = match request.extensions().get::<User>().cloned() {
        Some(user) => {
            let account_id = Uuid::parse_str(&user.id)
                .map_err(|_| AppError::Auth("Token subject is not an account".to_string()))?;
            let token = bearer_token(request.headers())?.map(str::to_string);

            let account = SupabaseAccountService::new(&config, token.as_deref())
                .find_account_by_id(account_id)
                .await?
                .ok_or_else(|| AppError::Auth(format!("No account for subject {}", account_id)))?;

            debug!("Resolved context for account {}", account.account_id);

            let context = viewer_context(&account, &overrides);
            request.extensions_mut().insert(account);
            context
        }
        None => anonymous_context(&config, &overrides),
    };

    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

/// Loads an account the viewer is allowed to look at. Patients never get past
/// their own account; staff reach accounts of their own institution only.
pub async fn find_viewable_account(
    accounts: &dyn AccountService,
    context: &CurrentContext,
    account_id: Uuid,
) -> Result<Account, AppError> {
    let staff = matches!(context.viewer_role_id(), Some(role_id) if role_id != RoleId::Patient);

    if !context.is_viewer(account_id) && !staff {
        return Err(AppError::Forbidden("Not permitted to view this account".to_string()));
    }

    let account = accounts
        .find_account_by_id(account_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account {} not found", account_id)))?;

    if !context.can_view_account(account.account_id, &account.institution_id) {
        debug!(
            "Viewer from {} denied account {} of {}",
            context.institution_id, account.account_id, account.institution_id
        );
        return Err(AppError::Forbidden("Not permitted to view this account".to_string()));
    }

    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;
    use shared_utils::test_utils::MockSupabaseResponses;

    use crate::services::account::MockAccountService;
    use shared_utils::test_utils::TestConfig;

    #[test]
    fn test_overrides_ignore_invalid_values() {
        let mut headers = HeaderMap::new();
        headers.insert(LOCALE_HEADER, HeaderValue::from_static("es-MX"));
        headers.insert(TIME_ZONE_HEADER, HeaderValue::from_static("Mars/Olympus_Mons"));
        headers.insert(INSTITUTION_HEADER, HeaderValue::from_static("PENN"));

        let overrides = ContextOverrides::from_headers(&headers);

        assert_eq!(overrides.locale, Some(Locale::new("es", Some("MX"))));
        assert_eq!(overrides.time_zone, None);
        assert_eq!(overrides.institution_id, Some(InstitutionId::new("PENN")));
    }

    #[test]
    fn test_anonymous_context_uses_defaults() {
        let config = TestConfig::default().to_app_config();
        let context = anonymous_context(&config, &ContextOverrides::default());

        assert!(context.viewer.is_none());
        assert_eq!(context.institution_id, InstitutionId::default());
        assert_eq!(context.locale, Locale::en_us());
        assert_eq!(context.time_zone, chrono_tz::America::New_York);
    }

    #[test]
    fn test_anonymous_context_honors_overrides() {
        let config = TestConfig::default().to_app_config();
        let overrides = ContextOverrides {
            locale: None,
            time_zone: Some(chrono_tz::Europe::Paris),
            institution_id: Some(InstitutionId::new("PENN")),
        };

        let context = anonymous_context(&config, &overrides);

        assert_eq!(context.institution_id.as_str(), "PENN");
        assert_eq!(context.time_zone, chrono_tz::Europe::Paris);
    }

    fn staff_context(institution_id: &str) -> CurrentContext {
        CurrentContext::for_viewer(
            Viewer {
                account_id: Uuid::new_v4(),
                role_id: RoleId::Coach,
                institution_id: InstitutionId::new(institution_id),
            },
            Locale::en_us(),
            Tz::UTC,
        )
    }

    fn accounts_returning(account_id: Uuid, institution_id: &str) -> MockAccountService {
        let row = MockSupabaseResponses::account_response(&account_id.to_string(), "PATIENT", institution_id);
        let mut accounts = MockAccountService::new();
        accounts
            .expect_find_account_by_id()
            .returning(move |_| Ok(Some(serde_json::from_value(row.clone()).unwrap())));
        accounts
    }

    #[tokio::test]
    async fn test_staff_reaches_account_in_own_institution() {
        let account_id = Uuid::new_v4();
        let accounts = accounts_returning(account_id, "COBALT");

        let account = find_viewable_account(&accounts, &staff_context("COBALT"), account_id)
            .await
            .unwrap();

        assert_eq!(account.account_id, account_id);
    }

    #[tokio::test]
    async fn test_staff_from_other_institution_is_forbidden() {
        let account_id = Uuid::new_v4();
        let accounts = accounts_returning(account_id, "COBALT");

        let result = find_viewable_account(&accounts, &staff_context("OTHER_TENANT"), account_id).await;

        assert_matches!(result, Err(AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_patient_is_forbidden_without_lookup() {
        let context = CurrentContext::for_viewer(
            Viewer {
                account_id: Uuid::new_v4(),
                role_id: RoleId::Patient,
                institution_id: InstitutionId::default(),
            },
            Locale::en_us(),
            Tz::UTC,
        );
        let mut accounts = MockAccountService::new();
        accounts.expect_find_account_by_id().never();

        let result = find_viewable_account(&accounts, &context, Uuid::new_v4()).await;

        assert_matches!(result, Err(AppError::Forbidden(_)));
    }
}
