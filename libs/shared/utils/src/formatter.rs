use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use shared_models::context::CurrentContext;
use shared_models::locale::Locale;

use crate::strings::Strings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStyle {
    Short,
    Medium,
    Long,
    Full,
}

/// Human-readable rendering of dates, numbers and phone numbers for one
/// locale and time zone. Patterns are en-US regardless of locale.
#[derive(Clone)]
pub struct Formatter {
    locale: Locale,
    time_zone: Tz,
    strings: Arc<Strings>,
}

impl Formatter {
    pub fn new(context: &CurrentContext, strings: Arc<Strings>) -> Self {
        Self::with_locale(context.locale.clone(), context.time_zone, strings)
    }

    pub fn with_locale(locale: Locale, time_zone: Tz, strings: Arc<Strings>) -> Self {
        Self {
            locale,
            time_zone,
            strings,
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn strings(&self) -> &Strings {
        &self.strings
    }

    /// Shortcut for catalog lookups in this formatter's locale.
    pub fn string(&self, key: &str, placeholders: &[(&str, String)]) -> String {
        self.strings.get_with(key, placeholders, &self.locale)
    }

    /// Same formatter, different locale. Used for phone numbers rendered in
    /// the owner's locale.
    pub fn for_locale(&self, locale: &Locale) -> Self {
        Self {
            locale: locale.clone(),
            time_zone: self.time_zone,
            strings: self.strings.clone(),
        }
    }

    // ==============================================================================
    // DATES AND TIMES
    // ==============================================================================

    pub fn format_date(&self, date: NaiveDate, style: FormatStyle) -> String {
        date.format(date_pattern(style)).to_string()
    }

    pub fn format_time(&self, time: NaiveTime, style: FormatStyle) -> String {
        let formatted = time.format(time_pattern(style)).to_string();

        match style {
            FormatStyle::Short | FormatStyle::Medium => formatted,
            FormatStyle::Long | FormatStyle::Full => {
                let abbreviation = Utc::now().with_timezone(&self.time_zone).format("%Z").to_string();
                format!("{} {}", formatted, abbreviation)
            }
        }
    }

    pub fn format_date_time(&self, date_time: NaiveDateTime, date_style: FormatStyle, time_style: FormatStyle) -> String {
        let date = self.format_date(date_time.date(), date_style);
        let time = match time_style {
            FormatStyle::Short | FormatStyle::Medium => self.format_time(date_time.time(), time_style),
            FormatStyle::Long | FormatStyle::Full => match self.time_zone.from_local_datetime(&date_time).earliest() {
                Some(zoned) => format!("{} {}", zoned.format(time_pattern(time_style)), zoned.format("%Z")),
                None => self.format_time(date_time.time(), time_style),
            },
        };

        join_date_and_time(date, time, date_style)
    }

    pub fn format_timestamp(&self, timestamp: DateTime<Utc>) -> String {
        self.format_timestamp_with(timestamp, FormatStyle::Long, FormatStyle::Short)
    }

    pub fn format_timestamp_with(&self, timestamp: DateTime<Utc>, date_style: FormatStyle, time_style: FormatStyle) -> String {
        let zoned = timestamp.with_timezone(&self.time_zone);
        let date = self.format_date(zoned.date_naive(), date_style);
        let time = match time_style {
            FormatStyle::Short | FormatStyle::Medium => zoned.format(time_pattern(time_style)).to_string(),
            FormatStyle::Long | FormatStyle::Full => {
                format!("{} {}", zoned.format(time_pattern(time_style)), zoned.format("%Z"))
            }
        };

        join_date_and_time(date, time, date_style)
    }

    /// `Sun`, `Sunday`
    pub fn format_day_of_week(&self, weekday: Weekday, style: FormatStyle) -> String {
        let name = match weekday {
            Weekday::Sun => "Sunday",
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
        };

        match style {
            FormatStyle::Short | FormatStyle::Medium => name[..3].to_string(),
            FormatStyle::Long | FormatStyle::Full => name.to_string(),
        }
    }

    // ==============================================================================
    // NUMBERS
    // ==============================================================================

    /// Grouped, with up to three fraction digits.
    pub fn format_number(&self, number: f64) -> String {
        let rounded = (number * 1000.0).round() / 1000.0;
        let negative = rounded < 0.0;
        let rendered = format!("{:.3}", rounded.abs());

        let (integer, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
        let fraction = fraction.trim_end_matches('0');

        let mut result = String::new();
        if negative && (integer != "0" || !fraction.is_empty()) {
            result.push('-');
        }
        result.push_str(&group_digits(integer));
        if !fraction.is_empty() {
            result.push('.');
            result.push_str(fraction);
        }

        result
    }

    /// Rounds half-even, then groups.
    pub fn format_integer(&self, number: f64) -> String {
        let rounded = number.round_ties_even();
        let integer = format!("{:.0}", rounded.abs());

        if rounded < 0.0 {
            format!("-{}", group_digits(&integer))
        } else {
            group_digits(&integer)
        }
    }

    pub fn format_percent(&self, ratio: f64) -> String {
        format!("{}%", self.format_integer(ratio * 100.0))
    }

    /// `7201` becomes `2 hours, 1 second`. Zero is an empty string.
    pub fn format_duration_seconds(&self, duration_in_seconds: u64) -> String {
        let hours = duration_in_seconds / 3600;
        let minutes = (duration_in_seconds % 3600) / 60;
        let seconds = duration_in_seconds % 60;

        let mut components = Vec::new();

        for (amount, key) in [
            (hours, "{{durationDescription}} hours"),
            (minutes, "{{durationDescription}} minutes"),
            (seconds, "{{durationDescription}} seconds"),
        ] {
            if amount > 0 {
                components.push(self.string(key, &[("durationDescription", self.format_integer(amount as f64))]));
            }
        }

        components.join(", ")
    }

    // ==============================================================================
    // MISC
    // ==============================================================================

    /// NANP numbers render as `(215) 555-1212`; anything else passes through.
    /// A leading `+` only counts as NANP when the country code is `1`.
    pub fn format_phone_number(&self, phone_number: Option<&str>) -> Option<String> {
        let phone_number = phone_number.map(str::trim).filter(|p| !p.is_empty())?;

        if phone_number.starts_with('+') && !phone_number.starts_with("+1") {
            return Some(phone_number.to_string());
        }

        let digits: String = phone_number.chars().filter(|c| c.is_ascii_digit()).collect();
        let national = match digits.len() {
            10 => Some(digits.as_str()),
            11 if digits.starts_with('1') => Some(&digits[1..]),
            _ => None,
        };

        let allowed = phone_number
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '(' | ')' | '-' | '.' | ' '));

        match national {
            Some(national) if allowed => Some(format!(
                "({}) {}-{}",
                &national[0..3],
                &national[3..6],
                &national[6..10]
            )),
            _ => Some(phone_number.to_string()),
        }
    }

    pub fn format_hex_color(&self, color: i32) -> String {
        format!("#{:06x}", color & 0x00ff_ffff)
    }
}

fn date_pattern(style: FormatStyle) -> &'static str {
    match style {
        FormatStyle::Short => "%-m/%-d/%y",
        FormatStyle::Medium => "%b %-d, %Y",
        FormatStyle::Long => "%B %-d, %Y",
        FormatStyle::Full => "%A, %B %-d, %Y",
    }
}

fn time_pattern(style: FormatStyle) -> &'static str {
    match style {
        FormatStyle::Short => "%-I:%M %p",
        _ => "%-I:%M:%S %p",
    }
}

fn join_date_and_time(date: String, time: String, date_style: FormatStyle) -> String {
    match date_style {
        FormatStyle::Long | FormatStyle::Full => format!("{} at {}", date, time),
        FormatStyle::Short | FormatStyle::Medium => format!("{}, {}", date, time),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter() -> Formatter {
        Formatter::with_locale(Locale::en_us(), chrono_tz::America::New_York, Arc::new(Strings::builtin()))
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    #[test]
    fn test_date_styles() {
        let f = formatter();
        assert_eq!(f.format_date(date(), FormatStyle::Short), "1/5/24");
        assert_eq!(f.format_date(date(), FormatStyle::Medium), "Jan 5, 2024");
        assert_eq!(f.format_date(date(), FormatStyle::Long), "January 5, 2024");
        assert_eq!(f.format_date(date(), FormatStyle::Full), "Friday, January 5, 2024");
    }

    #[test]
    fn test_time_styles() {
        let f = formatter();
        let time = NaiveTime::from_hms_opt(15, 30, 15).unwrap();
        assert_eq!(f.format_time(time, FormatStyle::Short), "3:30 PM");
        assert_eq!(f.format_time(time, FormatStyle::Medium), "3:30:15 PM");
    }

    #[test]
    fn test_date_time_joining() {
        let f = formatter();
        let date_time = date().and_hms_opt(9, 5, 0).unwrap();
        assert_eq!(f.format_date_time(date_time, FormatStyle::Long, FormatStyle::Short), "January 5, 2024 at 9:05 AM");
        assert_eq!(f.format_date_time(date_time, FormatStyle::Medium, FormatStyle::Short), "Jan 5, 2024, 9:05 AM");
    }

    #[test]
    fn test_timestamp_uses_time_zone() {
        let f = formatter();
        let instant = Utc.with_ymd_and_hms(2024, 1, 5, 3, 0, 0).unwrap();
        assert_eq!(f.format_timestamp(instant), "January 4, 2024 at 10:00 PM");
        assert_eq!(
            f.format_timestamp_with(instant, FormatStyle::Short, FormatStyle::Long),
            "1/4/24, 10:00:00 PM EST"
        );
    }

    #[test]
    fn test_numbers() {
        let f = formatter();
        assert_eq!(f.format_number(1234567.891), "1,234,567.891");
        assert_eq!(f.format_number(12.5), "12.5");
        assert_eq!(f.format_number(-1000.0), "-1,000");
        assert_eq!(f.format_integer(2.5), "2");
        assert_eq!(f.format_integer(3.5), "4");
        assert_eq!(f.format_integer(1000.0), "1,000");
        assert_eq!(f.format_percent(0.25), "25%");
    }

    #[test]
    fn test_duration() {
        let f = formatter();
        assert_eq!(f.format_duration_seconds(7201), "2 hours, 1 second");
        assert_eq!(f.format_duration_seconds(60), "1 minute");
        assert_eq!(f.format_duration_seconds(3725), "1 hour, 2 minutes, 5 seconds");
        assert_eq!(f.format_duration_seconds(0), "");
    }

    #[test]
    fn test_phone_numbers() {
        let f = formatter();
        assert_eq!(f.format_phone_number(Some("2155551212")).as_deref(), Some("(215) 555-1212"));
        assert_eq!(f.format_phone_number(Some(" +1 215-555-1212 ")).as_deref(), Some("(215) 555-1212"));
        assert_eq!(f.format_phone_number(Some("+44 20 7946 0958")).as_deref(), Some("+44 20 7946 0958"));
        assert_eq!(f.format_phone_number(Some("+353 1 234 567")).as_deref(), Some("+353 1 234 567"));
        assert_eq!(f.format_phone_number(Some("+12155551212")).as_deref(), Some("(215) 555-1212"));
        assert_eq!(f.format_phone_number(Some("   ")), None);
        assert_eq!(f.format_phone_number(None), None);
    }

    #[test]
    fn test_hex_color_and_weekday() {
        let f = formatter();
        assert_eq!(f.format_hex_color(3692510), "#3857de");
        assert_eq!(f.format_hex_color(0), "#000000");
        assert_eq!(f.format_day_of_week(Weekday::Sun, FormatStyle::Short), "Sun");
        assert_eq!(f.format_day_of_week(Weekday::Wed, FormatStyle::Full), "Wednesday");
    }
}
