use anyhow::Context;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone};

use crate::settings::Settings;

const DAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// The most recently completed week ending on the configured weekday;
/// explicit `startDate`/`endDate` overrides replace either boundary.
pub fn resolve_window<Tz: TimeZone>(
    settings: &Settings,
    now: DateTime<Tz>,
) -> anyhow::Result<(DateTime<Tz>, DateTime<Tz>)> {
    let tz = now.timezone();
    let (mut start, mut end) = week_window(now, settings.start_day.as_deref());

    if let Some(value) = settings.start_date.as_deref() {
        start = parse_override(value, &tz)?;
    }
    if let Some(value) = settings.end_date.as_deref() {
        end = parse_override(value, &tz)?;
    }

    Ok((start, end))
}

// `[boundary - 7 days, boundary - 1 ms]` where `boundary` is midnight
// of the most recent occurrence of `start_day`. Unknown names degrade
// to Sunday.
pub fn week_window<Tz: TimeZone>(
    now: DateTime<Tz>,
    start_day: Option<&str>,
) -> (DateTime<Tz>, DateTime<Tz>) {
    let target = weekday_index(start_day);
    let today = i64::from(now.weekday().num_days_from_sunday());

    let mut end = midnight_of(now.clone() + Duration::days(target - today));
    if now < end {
        end = end - Duration::days(7);
    }

    let start = end.clone() - Duration::days(7);
    (start, end - Duration::milliseconds(1))
}

// Millisecond precision with an explicit offset, as the search API
// expects in `created:` ranges.
pub fn format_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string()
}

fn weekday_index(name: Option<&str>) -> i64 {
    name.and_then(|name| {
        DAY_NAMES
            .iter()
            .position(|day| day.eq_ignore_ascii_case(name))
    })
    .map(|idx| idx as i64)
    .unwrap_or(0)
}

fn midnight_of<Tz: TimeZone>(dt: DateTime<Tz>) -> DateTime<Tz> {
    dt.clone().with_time(NaiveTime::MIN).single().unwrap_or(dt)
}

fn parse_override<Tz: TimeZone>(value: &str, tz: &Tz) -> anyhow::Result<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(tz));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date override: {value}"))?;
    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .single()
        .with_context(|| format!("date override is not a valid local time: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn settings(start_day: Option<&str>, start_date: Option<&str>, end_date: Option<&str>) -> Settings {
        Settings {
            author: "alice".to_string(),
            start_day: start_day.map(str::to_string),
            start_date: start_date.map(str::to_string),
            end_date: end_date.map(str::to_string),
            ignore_organizations: Vec::new(),
        }
    }

    // 2025-08-20 is a Wednesday.
    fn wednesday_afternoon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 20, 15, 30, 0).unwrap()
    }

    #[test]
    fn default_window_ends_on_most_recent_sunday() {
        let (start, end) = week_window(wednesday_afternoon(), None);

        assert_eq!(start, Utc.with_ymd_and_hms(2025, 8, 10, 0, 0, 0).unwrap());
        assert_eq!(
            end,
            Utc.with_ymd_and_hms(2025, 8, 17, 0, 0, 0).unwrap() - Duration::milliseconds(1)
        );
    }

    #[test]
    fn window_for_weekday_earlier_in_week() {
        let (start, end) = week_window(wednesday_afternoon(), Some("monday"));

        assert_eq!(start, Utc.with_ymd_and_hms(2025, 8, 11, 0, 0, 0).unwrap());
        assert_eq!(
            end,
            Utc.with_ymd_and_hms(2025, 8, 18, 0, 0, 0).unwrap() - Duration::milliseconds(1)
        );
    }

    #[test]
    fn window_for_weekday_later_in_week_steps_back() {
        // Friday of the current week is still in the future, so the
        // window ends on the previous Friday.
        let (start, end) = week_window(wednesday_afternoon(), Some("friday"));

        assert_eq!(start, Utc.with_ymd_and_hms(2025, 8, 8, 0, 0, 0).unwrap());
        assert_eq!(
            end,
            Utc.with_ymd_and_hms(2025, 8, 15, 0, 0, 0).unwrap() - Duration::milliseconds(1)
        );
    }

    #[test]
    fn window_duration_is_one_week_minus_one_millisecond() {
        for day in [None, Some("sunday"), Some("Wednesday"), Some("saturday")] {
            let (start, end) = week_window(wednesday_afternoon(), day);
            assert_eq!((end - start).num_milliseconds(), 7 * 24 * 3600 * 1000 - 1);
            assert!(end < wednesday_afternoon());
        }
    }

    #[test]
    fn unknown_weekday_falls_back_to_sunday() {
        let now = wednesday_afternoon();
        assert_eq!(week_window(now, Some("noday")), week_window(now, Some("sunday")));
        assert_eq!(week_window(now, Some("noday")), week_window(now, None));
    }

    #[test]
    fn weekday_name_is_case_insensitive() {
        let now = wednesday_afternoon();
        assert_eq!(week_window(now, Some("MONDAY")), week_window(now, Some("monday")));
    }

    #[test]
    fn resolve_window_without_overrides_matches_week_window() {
        let now = wednesday_afternoon();
        let resolved = resolve_window(&settings(Some("monday"), None, None), now).unwrap();
        assert_eq!(resolved, week_window(now, Some("monday")));
    }

    #[test]
    fn resolve_window_overrides_start_only() {
        let now = wednesday_afternoon();
        let (start, end) =
            resolve_window(&settings(None, Some("2025-08-01T12:00:00+00:00"), None), now).unwrap();

        assert_eq!(start, Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap());
        assert_eq!(end, week_window(now, None).1);
    }

    #[test]
    fn resolve_window_overrides_end_only() {
        let now = wednesday_afternoon();
        let (start, end) =
            resolve_window(&settings(None, None, Some("2025-08-19T00:00:00+00:00")), now).unwrap();

        assert_eq!(start, week_window(now, None).0);
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 8, 19, 0, 0, 0).unwrap());
    }

    #[test]
    fn resolve_window_accepts_plain_dates() {
        let now = wednesday_afternoon();
        let (start, end) = resolve_window(
            &settings(None, Some("2025-08-01"), Some("2025-08-08")),
            now,
        )
        .unwrap();

        assert_eq!(start, Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 8, 8, 0, 0, 0).unwrap());
    }

    #[test]
    fn resolve_window_rejects_garbage_override() {
        let err = resolve_window(&settings(None, Some("not-a-date"), None), wednesday_afternoon())
            .unwrap_err();
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn format_timestamp_includes_milliseconds_and_offset() {
        let tz = chrono::FixedOffset::east_opt(9 * 3600).unwrap();
        let dt = tz.with_ymd_and_hms(2025, 8, 17, 0, 0, 0).unwrap() + Duration::milliseconds(123);
        assert_eq!(format_timestamp(&dt), "2025-08-17T00:00:00.123+09:00");

        let utc = Utc.with_ymd_and_hms(2025, 8, 17, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(&utc), "2025-08-17T00:00:00.000+00:00");
    }
}
