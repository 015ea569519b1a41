//! Date helpers between server ISO-8601 strings, `<input>` values, and the
//! `YYYY.MM.DD` display format.
//!
//! The server omits the offset on some timestamps. For display those are wall
//! clock times in the viewer's zone; [`parse_utc`] reads them as UTC for
//! comparisons and payload normalisation. Display and input conversions run
//! in the browser's local zone; the `_in` variants take an explicit zone.

#[cfg(test)]
#[path = "datetime_test.rs"]
mod datetime_test;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Parse a server timestamp as UTC; offset-less values are UTC wall clock.
#[must_use]
pub fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    parse_in(raw, &Utc)
}

/// Parse a server timestamp into zone `tz`. Offset-less values are taken as
/// wall clock times in `tz`, so a birthday at midnight keeps its day.
#[must_use]
pub fn parse_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok().or_else(|| {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    })?;
    tz.from_local_datetime(&naive).earliest()
}

#[must_use]
pub fn to_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[must_use]
pub fn now_iso() -> String {
    to_iso(Utc::now())
}

#[must_use]
pub fn format_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    parse_in(raw, tz).map_or_else(String::new, |dt| dt.format("%Y.%m.%d").to_string())
}

#[must_use]
pub fn format_datetime_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    parse_in(raw, tz).map_or_else(String::new, |dt| dt.format("%Y.%m.%d %H:%M").to_string())
}

#[must_use]
pub fn format_time_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    parse_in(raw, tz).map_or_else(String::new, |dt| dt.format("%H:%M").to_string())
}

/// `HH:MM` in local time.
#[must_use]
pub fn format_time(raw: &str) -> String {
    format_time_in(raw, &Local)
}

/// `YYYY.MM.DD` in local time; empty for unparseable input.
#[must_use]
pub fn format_date(raw: &str) -> String {
    format_date_in(raw, &Local)
}

/// `YYYY.MM.DD HH:MM` in local time; empty for unparseable input.
#[must_use]
pub fn format_datetime(raw: &str) -> String {
    format_datetime_in(raw, &Local)
}

/// Convert a `datetime-local` (`YYYY-MM-DDTHH:MM`) or `date` input value in
/// zone `tz` to a UTC ISO string.
#[must_use]
pub fn input_to_iso_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<String> {
    let input = input.trim();
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    let local = tz.from_local_datetime(&naive).earliest()?;
    Some(to_iso(local.with_timezone(&Utc)))
}

#[must_use]
pub fn local_input_to_iso(input: &str) -> Option<String> {
    input_to_iso_in(input, &Local)
}

/// Inverse of [`input_to_iso_in`] for prefilling `datetime-local` inputs.
#[must_use]
pub fn iso_to_input_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    parse_in(raw, tz).map_or_else(String::new, |dt| dt.format("%Y-%m-%dT%H:%M").to_string())
}

#[must_use]
pub fn iso_to_local_input(raw: &str) -> String {
    iso_to_input_in(raw, &Local)
}

/// `YYYY-MM-DD` for `date` inputs (birthdays).
#[must_use]
pub fn iso_to_date_input(raw: &str) -> String {
    parse_in(raw, &Local).map_or_else(String::new, |dt| dt.format("%Y-%m-%d").to_string())
}
