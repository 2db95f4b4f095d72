use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::Serialize;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::context::CurrentContext;
use shared_models::error::AppError;
use shared_utils::{FormatStyle, Formatter, Strings};

use crate::models::{LogicalAvailability, LogicalAvailabilityTypeId, RecurrenceTypeId};
use crate::responses::appointment_type::{AppointmentTypeApiResponse, AppointmentTypeApiResponseFactory};
use crate::services::{AvailabilityService, SupabaseAvailabilityService};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicalAvailabilityApiResponse {
    pub logical_availability_id: Uuid,
    pub provider_id: Uuid,
    pub logical_availability_type_id: LogicalAvailabilityTypeId,
    pub recurrence_type_id: RecurrenceTypeId,
    pub start_date_time: NaiveDateTime,
    pub start_date_time_description: String,
    pub end_date: Option<NaiveDate>,
    pub end_date_description: Option<String>,
    pub end_time: NaiveTime,
    pub end_time_description: String,
    pub recur_sunday: bool,
    pub recur_monday: bool,
    pub recur_tuesday: bool,
    pub recur_wednesday: bool,
    pub recur_thursday: bool,
    pub recur_friday: bool,
    pub recur_saturday: bool,
    pub description_components: Vec<String>,
    pub appointment_types: Vec<AppointmentTypeApiResponse>,
}

/// e.g. `["9:00 AM - 5:00 PM", "Mon, Wed", "Starting on March 1, 2022", "Ending on March 31, 2022"]`
pub fn description_components(
    formatter: &Formatter,
    logical_availability: &LogicalAvailability,
    end_date: Option<NaiveDate>,
) -> Vec<String> {
    let start = logical_availability.start_date_time;
    let time_range = format!(
        "{} - {}",
        formatter.format_time(start.time(), FormatStyle::Short),
        formatter.format_time(logical_availability.end_date_time.time(), FormatStyle::Short)
    );

    match logical_availability.recurrence_type_id {
        RecurrenceTypeId::None => vec![time_range, formatter.format_date(start.date(), FormatStyle::Long)],
        RecurrenceTypeId::Daily => {
            let recurring_days = [
                (logical_availability.recur_sunday, Weekday::Sun),
                (logical_availability.recur_monday, Weekday::Mon),
                (logical_availability.recur_tuesday, Weekday::Tue),
                (logical_availability.recur_wednesday, Weekday::Wed),
                (logical_availability.recur_thursday, Weekday::Thu),
                (logical_availability.recur_friday, Weekday::Fri),
                (logical_availability.recur_saturday, Weekday::Sat),
            ];

            let day_abbreviations: Vec<String> = recurring_days
                .into_iter()
                .filter(|(recurs, _)| *recurs)
                .map(|(_, weekday)| formatter.format_day_of_week(weekday, FormatStyle::Short))
                .collect();

            let mut components = vec![
                time_range,
                day_abbreviations.join(", "),
                formatter.string(
                    "Starting on {{startDate}}",
                    &[("startDate", formatter.format_date(start.date(), FormatStyle::Long))],
                ),
            ];

            if let Some(end_date) = end_date {
                components.push(formatter.string(
                    "Ending on {{endDate}}",
                    &[("endDate", formatter.format_date(end_date, FormatStyle::Long))],
                ));
            }

            components
        }
    }
}

#[derive(Clone)]
pub struct LogicalAvailabilityApiResponseFactory {
    availability_service: Arc<dyn AvailabilityService>,
    appointment_type_factory: AppointmentTypeApiResponseFactory,
    strings: Arc<Strings>,
}

impl LogicalAvailabilityApiResponseFactory {
    pub fn new(
        availability_service: Arc<dyn AvailabilityService>,
        appointment_type_factory: AppointmentTypeApiResponseFactory,
        strings: Arc<Strings>,
    ) -> Self {
        Self {
            availability_service,
            appointment_type_factory,
            strings,
        }
    }

    pub fn from_config(config: &AppConfig, auth_token: Option<&str>) -> Self {
        Self::new(
            Arc::new(SupabaseAvailabilityService::new(config, auth_token)),
            AppointmentTypeApiResponseFactory::from_config(config, auth_token),
            Strings::shared(config),
        )
    }

    pub async fn create(
        &self,
        context: &CurrentContext,
        logical_availability: &LogicalAvailability,
    ) -> Result<LogicalAvailabilityApiResponse, AppError> {
        let formatter = Formatter::new(context, self.strings.clone());

        let end_date = self.availability_service.normalized_end_date(logical_availability).await?;
        let end_time = logical_availability.end_date_time.time();

        let mut appointment_types = Vec::new();
        for appointment_type in self
            .availability_service
            .find_appointment_types_by_logical_availability_id(logical_availability.logical_availability_id)
            .await?
        {
            appointment_types.push(
                self.appointment_type_factory
                    .create(context, &appointment_type, &HashSet::new())
                    .await?,
            );
        }

        Ok(LogicalAvailabilityApiResponse {
            logical_availability_id: logical_availability.logical_availability_id,
            provider_id: logical_availability.provider_id,
            logical_availability_type_id: logical_availability.logical_availability_type_id,
            recurrence_type_id: logical_availability.recurrence_type_id,
            start_date_time: logical_availability.start_date_time,
            start_date_time_description: formatter.format_date_time(
                logical_availability.start_date_time,
                FormatStyle::Long,
                FormatStyle::Short,
            ),
            end_date,
            end_date_description: end_date.map(|date| formatter.format_date(date, FormatStyle::Long)),
            end_time,
            end_time_description: formatter.format_time(end_time, FormatStyle::Short),
            recur_sunday: logical_availability.recur_sunday,
            recur_monday: logical_availability.recur_monday,
            recur_tuesday: logical_availability.recur_tuesday,
            recur_wednesday: logical_availability.recur_wednesday,
            recur_thursday: logical_availability.recur_thursday,
            recur_friday: logical_availability.recur_friday,
            recur_saturday: logical_availability.recur_saturday,
            description_components: description_components(&formatter, logical_availability, end_date),
            appointment_types,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentType;
    use crate::services::assessment::MockAssessmentService;
    use crate::services::availability::MockAvailabilityService;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    fn logical_availability(recurrence_type_id: RecurrenceTypeId, end: NaiveDateTime) -> LogicalAvailability {
        LogicalAvailability {
            logical_availability_id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            logical_availability_type_id: LogicalAvailabilityTypeId::Open,
            recurrence_type_id,
            start_date_time: at(2022, 3, 1, 9, 0),
            end_date_time: end,
            recur_sunday: false,
            recur_monday: true,
            recur_tuesday: false,
            recur_wednesday: true,
            recur_thursday: false,
            recur_friday: true,
            recur_saturday: false,
        }
    }

    fn formatter() -> Formatter {
        Formatter::new(&CurrentContext::default(), Arc::new(Strings::builtin()))
    }

    #[test]
    fn test_single_occurrence_components() {
        let la = logical_availability(RecurrenceTypeId::None, at(2022, 3, 1, 17, 0));

        assert_eq!(
            description_components(&formatter(), &la, la.normalized_end_date()),
            vec!["9:00 AM - 5:00 PM".to_string(), "March 1, 2022".to_string()]
        );
    }

    #[test]
    fn test_daily_components() {
        let la = logical_availability(RecurrenceTypeId::Daily, at(2022, 3, 31, 17, 0));

        assert_eq!(
            description_components(&formatter(), &la, la.normalized_end_date()),
            vec![
                "9:00 AM - 5:00 PM".to_string(),
                "Mon, Wed, Fri".to_string(),
                "Starting on March 1, 2022".to_string(),
                "Ending on March 31, 2022".to_string(),
            ]
        );
    }

    #[test]
    fn test_open_ended_daily_has_no_ending() {
        let la = logical_availability(RecurrenceTypeId::Daily, at(9999, 12, 31, 17, 0));

        assert_eq!(la.normalized_end_date(), None);
        assert_eq!(description_components(&formatter(), &la, None).len(), 3);
    }

    #[tokio::test]
    async fn test_create_includes_appointment_types() {
        let la = logical_availability(RecurrenceTypeId::Daily, at(2022, 3, 31, 17, 30));

        let mut availability = MockAvailabilityService::new();
        availability
            .expect_normalized_end_date()
            .returning(|la| Ok(la.normalized_end_date()));
        availability
            .expect_find_appointment_types_by_logical_availability_id()
            .returning(|_| {
                Ok(vec![AppointmentType {
                    appointment_type_id: Uuid::new_v4(),
                    scheduling_system_id: "COBALT".to_string(),
                    visit_type_id: "INITIAL".to_string(),
                    acuity_appointment_type_id: None,
                    epic_visit_type_id: None,
                    epic_visit_type_id_type: None,
                    name: "1:1".to_string(),
                    description: None,
                    duration_in_minutes: 60,
                    hex_color: 255,
                    assessment_id: None,
                }])
            });

        let strings = Arc::new(Strings::builtin());
        let factory = LogicalAvailabilityApiResponseFactory::new(
            Arc::new(availability),
            AppointmentTypeApiResponseFactory::new(Arc::new(MockAssessmentService::new()), strings.clone()),
            strings,
        );

        let response = factory.create(&CurrentContext::default(), &la).await.unwrap();

        assert_eq!(response.start_date_time_description, "March 1, 2022 at 9:00 AM");
        assert_eq!(response.end_date_description.as_deref(), Some("March 31, 2022"));
        assert_eq!(response.end_time_description, "5:30 PM");
        assert_eq!(response.appointment_types.len(), 1);
        assert_eq!(response.appointment_types[0].hex_color_description, "#0000ff");
    }
}
