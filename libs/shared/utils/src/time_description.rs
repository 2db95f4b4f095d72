use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

const DATE_PATTERN: &str = "%a, %b %-d";

/// `Thu, Nov 16 @ 10:00-11:30AM`. The leading meridiem is dropped when it
/// matches the trailing one.
pub fn time_range_description(start: DateTime<Utc>, end: DateTime<Utc>, time_zone: Tz) -> String {
    let start = start.with_timezone(&time_zone);
    let end = end.with_timezone(&time_zone);

    let start_meridiem = start.format("%p").to_string();
    let end_meridiem = end.format("%p").to_string();

    format!(
        "{} @ {}{}-{}{}",
        start.format(DATE_PATTERN),
        start.format("%-I:%M"),
        if start_meridiem == end_meridiem { "" } else { start_meridiem.as_str() },
        end.format("%-I:%M"),
        end_meridiem
    )
}

/// Local date-times are interpreted in `time_zone` first.
pub fn local_time_range_description(start: NaiveDateTime, end: NaiveDateTime, time_zone: Tz) -> String {
    time_range_description(to_instant(start, time_zone), to_instant(end, time_zone), time_zone)
}

/// `Mon, Jan 8 - Fri, Jan 12`, or a single date when both are equal.
pub fn date_range_description(start: NaiveDate, end: NaiveDate) -> String {
    let start_description = start.format(DATE_PATTERN).to_string();

    if start == end {
        return start_description;
    }

    format!("{} - {}", start_description, end.format(DATE_PATTERN))
}

/// Resolves a wall-clock time in `time_zone`. Gaps roll forward an hour, overlaps take the earlier instant.
pub fn to_instant(local: NaiveDateTime, time_zone: Tz) -> DateTime<Utc> {
    match time_zone.from_local_datetime(&local).earliest() {
        Some(zoned) => zoned.with_timezone(&Utc),
        None => {
            let shifted = local + chrono::Duration::hours(1);
            time_zone
                .from_local_datetime(&shifted)
                .earliest()
                .map(|zoned| zoned.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&local))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_same_meridiem_is_collapsed() {
        let description = local_time_range_description(local(2023, 11, 16, 10, 0), local(2023, 11, 16, 11, 30), New_York);
        assert_eq!(description, "Thu, Nov 16 @ 10:00-11:30AM");
    }

    #[test]
    fn test_different_meridiem_is_kept() {
        let description = local_time_range_description(local(2023, 11, 16, 11, 30), local(2023, 11, 16, 12, 30), New_York);
        assert_eq!(description, "Thu, Nov 16 @ 11:30AM-12:30PM");
    }

    #[test]
    fn test_instants_rendered_in_zone() {
        let start = Utc.with_ymd_and_hms(2023, 11, 16, 15, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2023, 11, 16, 16, 0, 0).unwrap();
        assert_eq!(time_range_description(start, end, New_York), "Thu, Nov 16 @ 10:00-11:00AM");
    }

    #[test]
    fn test_date_range() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 12).unwrap();
        assert_eq!(date_range_description(start, end), "Mon, Jan 8 - Fri, Jan 12");
        assert_eq!(date_range_description(start, start), "Mon, Jan 8");
    }

    #[test]
    fn test_gap_rolls_forward() {
        // 2:30 AM does not exist on 2024-03-10 in New York
        let instant = to_instant(local(2024, 3, 10, 2, 30), New_York);
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 3, 10, 7, 30, 0).unwrap());
    }
}
