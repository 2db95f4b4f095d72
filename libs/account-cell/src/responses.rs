use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::RoleId;
use shared_models::context::{CurrentContext, InstitutionId};
use shared_models::error::AppError;
use shared_models::locale::Locale;
use shared_utils::{FormatStyle, Formatter, Strings};

use crate::models::{
    Account, AccountCapabilities, AccountCapabilityFlags, AccountSupplement, Address, Institution, LoginDestinationId,
    UserExperienceTypeId,
};
use crate::services::{
    AddressService, AuthorizationService, InstitutionService, RoleAuthorizationService, SupabaseAddressService,
    SupabaseInstitutionService,
};

// ==============================================================================
// ADDRESS
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressApiResponse {
    pub address_id: Uuid,
    pub postal_name: Option<String>,
    pub street_address1: Option<String>,
    pub street_address2: Option<String>,
    pub street_address3: Option<String>,
    pub street_address4: Option<String>,
    pub post_office_box_number: Option<String>,
    pub cross_street: Option<String>,
    pub suburb: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country_subdivision_code: Option<String>,
    pub country_code: Option<String>,
}

impl From<&Address> for AddressApiResponse {
    fn from(address: &Address) -> Self {
        Self {
            address_id: address.address_id,
            postal_name: address.postal_name.clone(),
            street_address1: address.street_address1.clone(),
            street_address2: address.street_address2.clone(),
            street_address3: address.street_address3.clone(),
            street_address4: address.street_address4.clone(),
            post_office_box_number: address.post_office_box_number.clone(),
            cross_street: address.cross_street.clone(),
            suburb: address.suburb.clone(),
            locality: address.locality.clone(),
            region: address.region.clone(),
            postal_code: address.postal_code.clone(),
            country_subdivision_code: address.country_subdivision_code.clone(),
            country_code: address.country_code.clone(),
        }
    }
}

// ==============================================================================
// INSTITUTION
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionApiResponse {
    pub institution_id: InstitutionId,
    pub name: String,
    pub support_enabled: Option<bool>,
    pub support_email_address: Option<String>,
    pub email_signup_enabled: bool,
    pub integrated_care_enabled: bool,
    pub immediate_access_enabled: bool,
    pub contact_us_enabled: bool,
    pub features_enabled: Option<bool>,
    pub recommended_content_enabled: bool,
    pub group_session_requests_enabled: bool,
    pub user_submitted_content_enabled: bool,
    pub user_submitted_group_session_enabled: bool,
    pub require_consent_form: Option<bool>,
    pub calendar_description: Option<String>,
    pub faq_enabled: bool,
    pub epic_fhir_enabled: bool,
    pub my_chart_name: Option<String>,
    pub my_chart_default_url: Option<String>,
    pub user_experience_type_id: UserExperienceTypeId,
    pub ga4_measurement_id: Option<String>,
    pub integrated_care_phone_number: Option<String>,
    pub integrated_care_phone_number_description: Option<String>,
    pub integrated_care_availability_description: Option<String>,
    pub integrated_care_program_name: Option<String>,
    pub integrated_care_primary_care_name: Option<String>,
    pub clinical_support_phone_number: Option<String>,
    pub clinical_support_phone_number_description: Option<String>,
    pub tech_support_phone_number: Option<String>,
    pub tech_support_phone_number_description: Option<String>,
    pub privacy_policy_url: Option<String>,
    pub external_contact_us_url: Option<String>,
    pub featured_topic_center_id: Option<Uuid>,
    pub header_logo_url: Option<String>,
    pub footer_logo_url: Option<String>,
    pub hero_title: Option<String>,
    pub hero_description: Option<String>,
    pub hero_image_url: Option<String>,
    pub sign_in_title: Option<String>,
    pub sign_in_description: Option<String>,
}

impl InstitutionApiResponse {
    /// The analytics id follows the experience being served, which is the
    /// staff one for panel roles.
    pub fn new(formatter: &Formatter, context: &CurrentContext, institution: &Institution) -> Self {
        let user_experience_type_id = UserExperienceTypeId::for_role(context.viewer_role_id());
        let ga4_measurement_id = match user_experience_type_id {
            UserExperienceTypeId::Staff => institution.ga4_staff_measurement_id.clone(),
            UserExperienceTypeId::Patient => institution.ga4_patient_measurement_id.clone(),
        };

        Self {
            institution_id: institution.institution_id.clone(),
            name: institution.name.clone(),
            support_enabled: institution.support_enabled,
            support_email_address: institution.support_email_address.clone(),
            email_signup_enabled: institution.email_signup_enabled,
            integrated_care_enabled: institution.integrated_care_enabled,
            immediate_access_enabled: institution.immediate_access_enabled,
            contact_us_enabled: institution.contact_us_enabled,
            features_enabled: institution.features_enabled,
            recommended_content_enabled: institution.recommended_content_enabled,
            group_session_requests_enabled: institution.group_session_requests_enabled,
            user_submitted_content_enabled: institution.user_submitted_content_enabled,
            user_submitted_group_session_enabled: institution.user_submitted_group_session_enabled,
            require_consent_form: institution.require_consent_form,
            calendar_description: institution.calendar_description.clone(),
            faq_enabled: institution.faq_enabled,
            epic_fhir_enabled: institution.epic_fhir_enabled,
            my_chart_name: institution.my_chart_name.clone(),
            my_chart_default_url: institution.my_chart_default_url.clone(),
            user_experience_type_id,
            ga4_measurement_id,
            integrated_care_phone_number: institution.integrated_care_phone_number.clone(),
            integrated_care_phone_number_description: formatter
                .format_phone_number(institution.integrated_care_phone_number.as_deref()),
            integrated_care_availability_description: institution.integrated_care_availability_description.clone(),
            integrated_care_program_name: institution.integrated_care_program_name.clone(),
            integrated_care_primary_care_name: institution.integrated_care_primary_care_name.clone(),
            clinical_support_phone_number: institution.clinical_support_phone_number.clone(),
            clinical_support_phone_number_description: formatter
                .format_phone_number(institution.clinical_support_phone_number.as_deref()),
            tech_support_phone_number: institution.tech_support_phone_number.clone(),
            tech_support_phone_number_description: formatter
                .format_phone_number(institution.tech_support_phone_number.as_deref()),
            privacy_policy_url: institution.privacy_policy_url.clone(),
            external_contact_us_url: institution.external_contact_us_url.clone(),
            featured_topic_center_id: institution.featured_topic_center_id,
            header_logo_url: institution.header_logo_url.clone(),
            footer_logo_url: institution.footer_logo_url.clone(),
            hero_title: institution.hero_title.clone(),
            hero_description: institution.hero_description.clone(),
            hero_image_url: institution.hero_image_url.clone(),
            sign_in_title: institution.sign_in_title.clone(),
            sign_in_description: institution.sign_in_description.clone(),
        }
    }
}

// ==============================================================================
// ACCOUNT
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountApiResponse {
    pub account_id: Uuid,
    pub role_id: RoleId,
    pub institution_id: InstitutionId,
    pub account_source_id: String,
    pub source_system_id: String,
    pub beta_status_id: String,
    pub provider_id: Option<Uuid>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub phone_number_description: Option<String>,
    pub time_zone: Tz,
    pub locale: Locale,
    pub language_code: String,
    pub country_code: String,
    pub consent_form_accepted: Option<bool>,
    pub consent_form_accepted_date: Option<DateTime<Utc>>,
    pub consent_form_accepted_date_description: Option<String>,
    pub gender_identity_id: Option<String>,
    pub ethnicity_id: Option<String>,
    pub birth_sex_id: Option<String>,
    pub race_id: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub birthdate_description: Option<String>,
    pub created: DateTime<Utc>,
    pub created_description: String,
    pub created_date: NaiveDate,
    pub created_date_description: String,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_updated_description: Option<String>,
    pub login_destination_id: Option<LoginDestinationId>,
    pub address: Option<AddressApiResponse>,
    pub capabilities: Option<HashMap<InstitutionId, AccountCapabilities>>,
    pub institution_location_id: Option<Uuid>,
    pub prompted_for_institution_location: Option<bool>,
    pub account_capability_flags: Option<AccountCapabilityFlags>,
    pub epic_patient_mrn: Option<String>,
    pub epic_patient_fhir_id: Option<String>,
    pub test_account: Option<bool>,
    pub password_reset_required: Option<bool>,
    pub password_reset_token: Option<Uuid>,
}

/// Private details are for the account holder, or for callers that ask for
/// them explicitly.
pub fn should_show_private_details(
    context: &CurrentContext,
    account: &Account,
    supplements: &HashSet<AccountSupplement>,
) -> bool {
    supplements.contains(&AccountSupplement::Everything)
        || supplements.contains(&AccountSupplement::PrivateDetails)
        || context.is_viewer(account.account_id)
}

#[derive(Clone)]
pub struct AccountApiResponseFactory {
    address_service: Arc<dyn AddressService>,
    institution_service: Arc<dyn InstitutionService>,
    authorization_service: Arc<dyn AuthorizationService>,
    strings: Arc<Strings>,
}

impl AccountApiResponseFactory {
    pub fn new(
        address_service: Arc<dyn AddressService>,
        institution_service: Arc<dyn InstitutionService>,
        authorization_service: Arc<dyn AuthorizationService>,
        strings: Arc<Strings>,
    ) -> Self {
        Self {
            address_service,
            institution_service,
            authorization_service,
            strings,
        }
    }

    pub fn from_config(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self::new(
            Arc::new(SupabaseAddressService::new(config, auth_token)),
            Arc::new(SupabaseInstitutionService::new(config, auth_token)),
            Arc::new(RoleAuthorizationService::new()),
            Strings::shared(config),
        )
    }

    pub async fn create(
        &self,
        context: &CurrentContext,
        account: &Account,
        supplements: &HashSet<AccountSupplement>,
    ) -> Result<AccountApiResponse, AppError> {
        let formatter = Formatter::new(context, self.strings.clone());
        let show_private_details = should_show_private_details(context, account, supplements);

        let created_date = account.created.with_timezone(&context.time_zone).date_naive();

        let mut response = AccountApiResponse {
            account_id: account.account_id,
            role_id: account.role_id,
            institution_id: account.institution_id.clone(),
            account_source_id: account.account_source_id.clone(),
            source_system_id: account.source_system_id.clone(),
            beta_status_id: account.beta_status_id.clone(),
            provider_id: account.provider_id,
            username: account.username.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            display_name: account.display_name.clone(),
            email_address: None,
            phone_number: None,
            phone_number_description: None,
            time_zone: account.time_zone,
            locale: account.locale.clone(),
            language_code: account.locale.language().to_string(),
            country_code: account.locale.country().to_string(),
            consent_form_accepted: None,
            consent_form_accepted_date: None,
            consent_form_accepted_date_description: None,
            gender_identity_id: None,
            ethnicity_id: None,
            birth_sex_id: None,
            race_id: None,
            birthdate: None,
            birthdate_description: None,
            created: account.created,
            created_description: formatter.format_timestamp(account.created),
            created_date,
            created_date_description: formatter.format_date(created_date, FormatStyle::Medium),
            last_updated: None,
            last_updated_description: None,
            login_destination_id: None,
            address: None,
            capabilities: None,
            institution_location_id: account.institution_location_id,
            prompted_for_institution_location: account.prompted_for_institution_location,
            account_capability_flags: None,
            epic_patient_mrn: None,
            epic_patient_fhir_id: None,
            test_account: account.test_account,
            password_reset_required: account.password_reset_required,
            password_reset_token: None,
        };

        if show_private_details {
            let institution = self
                .institution_service
                .find_institution_by_id(&account.institution_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Institution {} not found", account.institution_id)))?;

            let address = self
                .address_service
                .find_active_address_by_account_id(account.account_id)
                .await?;

            response.email_address = account.email_address.clone();
            response.phone_number = account.phone_number.clone();
            response.phone_number_description = formatter.format_phone_number(account.phone_number.as_deref());
            response.last_updated = account.last_updated;
            response.last_updated_description = account.last_updated.map(|t| formatter.format_timestamp(t));
            response.consent_form_accepted = Some(account.consent_form_accepted);
            response.consent_form_accepted_date = account.consent_form_accepted_date;
            response.consent_form_accepted_date_description =
                account.consent_form_accepted_date.map(|t| formatter.format_timestamp(t));
            response.epic_patient_mrn = account.epic_patient_mrn.clone();
            response.epic_patient_fhir_id = account.epic_patient_fhir_id.clone();
            response.gender_identity_id = account.gender_identity_id.clone();
            response.ethnicity_id = account.ethnicity_id.clone();
            response.birth_sex_id = account.birth_sex_id.clone();
            response.race_id = account.race_id.clone();
            response.birthdate = account.birthdate;
            response.birthdate_description = account
                .birthdate
                .map(|birthdate| formatter.format_date(birthdate, FormatStyle::Medium));
            response.address = address.as_ref().map(AddressApiResponse::from);
            response.login_destination_id = Some(LoginDestinationId::for_role(&institution, account.role_id));
            response.account_capability_flags = Some(
                self.authorization_service
                    .determine_account_capability_flags(account)
                    .await?,
            );
            response.password_reset_token = account.password_reset_token;
        }

        if supplements.contains(&AccountSupplement::Everything) || supplements.contains(&AccountSupplement::Capabilities)
        {
            response.capabilities = Some(
                self.authorization_service
                    .determine_account_capabilities_by_institution_id(account)
                    .await?,
            );
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Institution;
    use crate::services::address::MockAddressService;
    use crate::services::authorization::MockAuthorizationService;
    use crate::services::institution::MockInstitutionService;
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use shared_models::context::Viewer;

    fn account() -> Account {
        Account {
            account_id: Uuid::new_v4(),
            role_id: RoleId::Patient,
            institution_id: InstitutionId::default(),
            account_source_id: "EMAIL_PASSWORD".to_string(),
            source_system_id: "COBALT".to_string(),
            beta_status_id: "UNKNOWN".to_string(),
            provider_id: None,
            username: None,
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            display_name: Some("Jane Doe".to_string()),
            email_address: Some("jane@example.com".to_string()),
            phone_number: Some("2155551212".to_string()),
            time_zone: chrono_tz::America::New_York,
            locale: Locale::en_us(),
            consent_form_accepted: true,
            consent_form_accepted_date: None,
            gender_identity_id: None,
            ethnicity_id: None,
            birth_sex_id: None,
            race_id: None,
            birthdate: NaiveDate::from_ymd_opt(1990, 4, 15),
            institution_location_id: None,
            prompted_for_institution_location: Some(false),
            epic_patient_mrn: Some("MRN1".to_string()),
            epic_patient_fhir_id: None,
            test_account: Some(false),
            password_reset_required: Some(false),
            password_reset_token: None,
            created: Utc.with_ymd_and_hms(2024, 1, 5, 3, 0, 0).unwrap(),
            last_updated: None,
        }
    }

    fn context_for(viewer_account_id: Option<Uuid>) -> CurrentContext {
        match viewer_account_id {
            Some(account_id) => CurrentContext::for_viewer(
                Viewer {
                    account_id,
                    role_id: RoleId::Patient,
                    institution_id: InstitutionId::default(),
                },
                Locale::en_us(),
                chrono_tz::America::New_York,
            ),
            None => CurrentContext::anonymous(InstitutionId::default(), Locale::en_us(), chrono_tz::America::New_York),
        }
    }

    fn factory(
        addresses: MockAddressService,
        institutions: MockInstitutionService,
        authorization: MockAuthorizationService,
    ) -> AccountApiResponseFactory {
        AccountApiResponseFactory::new(
            Arc::new(addresses),
            Arc::new(institutions),
            Arc::new(authorization),
            Arc::new(Strings::builtin()),
        )
    }

    #[tokio::test]
    async fn test_other_viewer_sees_public_fields_only() {
        let account = account();
        let factory = factory(
            MockAddressService::new(),
            MockInstitutionService::new(),
            MockAuthorizationService::new(),
        );

        let response = factory
            .create(&context_for(Some(Uuid::new_v4())), &account, &HashSet::new())
            .await
            .unwrap();

        assert_eq!(response.email_address, None);
        assert_eq!(response.phone_number_description, None);
        assert_eq!(response.login_destination_id, None);
        assert_eq!(response.birthdate, None);
        assert_eq!(response.capabilities, None);
        assert_eq!(response.created_date, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
        assert_eq!(response.created_date_description, "Jan 4, 2024");
        assert_eq!(response.created_description, "January 4, 2024 at 10:00 PM");
        assert_eq!(response.language_code, "en");
        assert_eq!(response.country_code, "US");
    }

    #[tokio::test]
    async fn test_self_viewer_sees_private_details() {
        let account = account();

        let mut addresses = MockAddressService::new();
        addresses
            .expect_find_active_address_by_account_id()
            .returning(|_| Ok(None));

        let mut institutions = MockInstitutionService::new();
        institutions.expect_find_institution_by_id().returning(|id| {
            Ok(Some(Institution {
                institution_id: id.clone(),
                name: "Cobalt".to_string(),
                integrated_care_enabled: true,
                ..Default::default()
            }))
        });

        let mut authorization = MockAuthorizationService::new();
        authorization
            .expect_determine_account_capability_flags()
            .returning(|_| Ok(AccountCapabilityFlags::default()));

        let factory = factory(addresses, institutions, authorization);
        let response = factory
            .create(&context_for(Some(account.account_id)), &account, &HashSet::new())
            .await
            .unwrap();

        assert_eq!(response.email_address.as_deref(), Some("jane@example.com"));
        assert_eq!(response.phone_number_description.as_deref(), Some("(215) 555-1212"));
        assert_eq!(response.birthdate_description.as_deref(), Some("Apr 15, 1990"));
        assert_eq!(response.login_destination_id, Some(LoginDestinationId::IcPatient));
        assert_eq!(response.consent_form_accepted, Some(true));
        assert!(response.account_capability_flags.is_some());
        assert!(response.capabilities.is_none());
    }

    #[tokio::test]
    async fn test_capabilities_supplement_only() {
        let account = account();

        let mut authorization = MockAuthorizationService::new();
        authorization
            .expect_determine_account_capabilities_by_institution_id()
            .times(1)
            .returning(|account| Ok(HashMap::from([(account.institution_id.clone(), AccountCapabilities::default())])));

        let factory = factory(MockAddressService::new(), MockInstitutionService::new(), authorization);
        let supplements = HashSet::from([AccountSupplement::Capabilities]);
        let response = factory.create(&context_for(None), &account, &supplements).await.unwrap();

        assert_eq!(response.email_address, None);
        assert_eq!(response.capabilities.map(|c| c.len()), Some(1));
    }

    #[tokio::test]
    async fn test_missing_institution_is_not_found() {
        let account = account();

        let mut addresses = MockAddressService::new();
        addresses
            .expect_find_active_address_by_account_id()
            .returning(|_| Ok(None));

        let mut institutions = MockInstitutionService::new();
        institutions.expect_find_institution_by_id().returning(|_| Ok(None));

        let factory = factory(addresses, institutions, MockAuthorizationService::new());
        let supplements = HashSet::from([AccountSupplement::PrivateDetails]);
        let result = factory.create(&context_for(None), &account, &supplements).await;

        assert_matches!(result, Err(AppError::NotFound(_)));
    }

    fn branded_institution() -> Institution {
        Institution {
            institution_id: InstitutionId::new("PENN"),
            name: "Penn Medicine".to_string(),
            integrated_care_enabled: true,
            integrated_care_phone_number: Some("2155550100".to_string()),
            tech_support_phone_number: Some("+353 1 234 567".to_string()),
            ga4_patient_measurement_id: Some("G-PATIENT".to_string()),
            ga4_staff_measurement_id: Some("G-STAFF".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_institution_for_patient_experience() {
        let context = context_for(None);
        let formatter = Formatter::new(&context, Arc::new(Strings::builtin()));

        let response = InstitutionApiResponse::new(&formatter, &context, &branded_institution());

        assert_eq!(response.user_experience_type_id, UserExperienceTypeId::Patient);
        assert_eq!(response.ga4_measurement_id.as_deref(), Some("G-PATIENT"));
        assert_eq!(
            response.integrated_care_phone_number_description.as_deref(),
            Some("(215) 555-0100")
        );
        assert_eq!(response.tech_support_phone_number_description.as_deref(), Some("+353 1 234 567"));
        assert_eq!(response.clinical_support_phone_number_description, None);
    }

    #[test]
    fn test_institution_for_staff_experience() {
        let context = CurrentContext::for_viewer(
            Viewer {
                account_id: Uuid::new_v4(),
                role_id: RoleId::Mhic,
                institution_id: InstitutionId::new("PENN"),
            },
            Locale::en_us(),
            chrono_tz::America::New_York,
        );
        let formatter = Formatter::new(&context, Arc::new(Strings::builtin()));

        let response = InstitutionApiResponse::new(&formatter, &context, &branded_institution());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["userExperienceTypeId"], "STAFF");
        assert_eq!(json["ga4MeasurementId"], "G-STAFF");
        assert_eq!(json["institutionId"], "PENN");
        assert!(json["heroTitle"].is_null());
    }

    #[test]
    fn test_serializes_nulls_in_camel_case() {
        let response = AddressApiResponse::from(&Address {
            address_id: Uuid::nil(),
            postal_name: Some("Jane Doe".to_string()),
            street_address1: Some("1 Main St".to_string()),
            street_address2: None,
            street_address3: None,
            street_address4: None,
            post_office_box_number: None,
            cross_street: None,
            suburb: None,
            locality: Some("Philadelphia".to_string()),
            region: Some("PA".to_string()),
            postal_code: Some("19104".to_string()),
            country_subdivision_code: None,
            country_code: Some("US".to_string()),
        });

        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["streetAddress1"], "1 Main St");
        assert!(json["streetAddress2"].is_null());
        assert!(json.as_object().unwrap().contains_key("crossStreet"));
    }
}
