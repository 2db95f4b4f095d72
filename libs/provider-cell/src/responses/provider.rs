use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono_tz::Tz;
use serde::Serialize;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::context::{CurrentContext, InstitutionId};
use shared_models::error::AppError;
use shared_models::locale::Locale;
use shared_utils::{Formatter, Strings};

use crate::models::{Provider, ProviderSupplement, SupportRole, SupportRoleId};
use crate::services::{ProviderService, SupabaseProviderService};

const SYNTHETIC_BIO: &str =
    "<a target='_blank' href='{{bioUrl}}'>Click here to read more about {{providerName}}</a>";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportRoleApiResponse {
    pub support_role_id: SupportRoleId,
    pub description: String,
}

impl From<&SupportRole> for SupportRoleApiResponse {
    fn from(support_role: &SupportRole) -> Self {
        Self {
            support_role_id: support_role.support_role_id,
            description: support_role.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderApiResponse {
    pub provider_id: Uuid,
    pub institution_id: InstitutionId,
    pub name: String,
    pub title: Option<String>,
    pub clinic: Option<String>,
    pub specialty: Option<String>,
    pub license: Option<String>,
    pub entity: Option<String>,
    pub email_address: Option<String>,
    pub image_url: Option<String>,
    pub is_default_image_url: bool,
    pub time_zone: Tz,
    pub locale: Locale,
    pub tags: Vec<String>,
    pub bio: Option<String>,
    pub bio_url: Option<String>,
    pub phone_number: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub display_phone_number_only_for_booking: bool,
    pub support_roles: Option<Vec<SupportRoleApiResponse>>,
    pub support_roles_description: Option<String>,
    pub phone_number_required_for_appointment: bool,
    pub payment_funding_descriptions: Option<Vec<String>>,
}

/// Line breaks become `<br/>`. Without a bio, a link to the bio URL stands
/// in for it.
pub fn bio_html(strings: &Strings, locale: &Locale, provider: &Provider, bio_url: Option<&str>) -> Option<String> {
    let bio = provider.bio.as_deref().map(str::trim).filter(|bio| !bio.is_empty());

    match (bio, bio_url) {
        (Some(bio), _) => Some(bio.replace('\n', "<br/>")),
        (None, Some(bio_url)) => Some(strings.get_with(
            SYNTHETIC_BIO,
            &[("bioUrl", bio_url.to_string()), ("providerName", provider.name.clone())],
            locale,
        )),
        (None, None) => None,
    }
}

#[derive(Clone)]
pub struct ProviderApiResponseFactory {
    provider_service: Arc<dyn ProviderService>,
    strings: Arc<Strings>,
}

impl ProviderApiResponseFactory {
    pub fn new(provider_service: Arc<dyn ProviderService>, strings: Arc<Strings>) -> Self {
        Self {
            provider_service,
            strings,
        }
    }

    pub fn from_config(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self::new(
            Arc::new(SupabaseProviderService::new(config, auth_token)),
            Strings::shared(config),
        )
    }

    pub async fn create(
        &self,
        context: &CurrentContext,
        provider: &Provider,
        supplements: &HashSet<ProviderSupplement>,
    ) -> Result<ProviderApiResponse, AppError> {
        let formatter = Formatter::new(context, self.strings.clone()).for_locale(&provider.locale);
        let include_everything = supplements.contains(&ProviderSupplement::Everything);

        let bio_url = provider
            .bio_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        let mut response = ProviderApiResponse {
            provider_id: provider.provider_id,
            institution_id: provider.institution_id.clone(),
            name: provider.name.clone(),
            title: provider.title.clone(),
            clinic: provider.clinic.clone(),
            specialty: provider.specialty.clone(),
            license: provider.license.clone(),
            entity: provider.entity.clone(),
            email_address: provider.email_address.clone(),
            image_url: provider.image_url.clone(),
            is_default_image_url: provider.image_url.is_none(),
            time_zone: provider.time_zone,
            locale: provider.locale.clone(),
            tags: provider.tags.clone().unwrap_or_default(),
            bio: bio_html(&self.strings, &context.locale, provider, bio_url.as_deref()),
            bio_url,
            phone_number: provider.phone_number.clone(),
            formatted_phone_number: formatter.format_phone_number(provider.phone_number.as_deref()),
            display_phone_number_only_for_booking: provider.display_phone_number_only_for_booking,
            support_roles: None,
            support_roles_description: None,
            phone_number_required_for_appointment: false,
            payment_funding_descriptions: None,
        };

        if include_everything || supplements.contains(&ProviderSupplement::SupportRoles) {
            let support_roles: Vec<SupportRoleApiResponse> = self
                .provider_service
                .find_support_roles_by_provider_id(provider.provider_id)
                .await?
                .iter()
                .map(SupportRoleApiResponse::from)
                .collect();

            response.support_roles_description = if support_roles.is_empty() {
                None
            } else {
                Some(
                    support_roles
                        .iter()
                        .map(|support_role| support_role.description.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                )
            };
            response.phone_number_required_for_appointment = support_roles
                .iter()
                .any(|support_role| support_role.support_role_id == SupportRoleId::Psychiatrist);
            response.support_roles = Some(support_roles);
        }

        if include_everything || supplements.contains(&ProviderSupplement::PaymentFunding) {
            let descriptions_by_id: HashMap<String, String> = self
                .provider_service
                .find_payment_fundings()
                .await?
                .into_iter()
                .map(|funding| (funding.payment_funding_id, funding.description))
                .collect();

            let provider_fundings = self
                .provider_service
                .find_payment_fundings_by_provider_id(provider.provider_id)
                .await?;

            response.payment_funding_descriptions = Some(
                provider_fundings
                    .iter()
                    .filter_map(|funding| descriptions_by_id.get(&funding.payment_funding_id).cloned())
                    .collect(),
            );
        }

        Ok(response)
    }
}
