use super::*;
use chrono::{FixedOffset, Utc};

// =============================================================
// Parsing
// =============================================================

#[test]
fn parse_utc_accepts_rfc3339_with_offset() {
    let dt = parse_utc("2024-03-01T12:00:00+03:00").unwrap();
    assert_eq!(to_iso(dt), "2024-03-01T09:00:00.000Z");
}

#[test]
fn parse_utc_reads_offsetless_timestamps_as_utc() {
    let dt = parse_utc("2024-03-01T12:30:00.123456").unwrap();
    assert_eq!(to_iso(dt), "2024-03-01T12:30:00.123Z");
}

#[test]
fn parse_utc_accepts_bare_dates() {
    assert_eq!(to_iso(parse_utc("1990-05-17").unwrap()), "1990-05-17T00:00:00.000Z");
}

#[test]
fn parse_utc_rejects_garbage() {
    assert!(parse_utc("").is_none());
    assert!(parse_utc("yesterday").is_none());
}

// =============================================================
// Display
// =============================================================

#[test]
fn format_date_uses_dotted_year_month_day() {
    assert_eq!(format_date_in("2024-03-01T12:00:00Z", &Utc), "2024.03.01");
}

#[test]
fn format_datetime_applies_zone() {
    let msk = FixedOffset::east_opt(3 * 3600).unwrap();
    assert_eq!(format_datetime_in("2024-03-01T22:15:00Z", &msk), "2024.03.02 01:15");
}

#[test]
fn format_time_keeps_hours_and_minutes() {
    let msk = FixedOffset::east_opt(3 * 3600).unwrap();
    assert_eq!(format_time_in("2024-03-01T06:05:59Z", &msk), "09:05");
    assert_eq!(format_time_in("bad", &Utc), "");
}

#[test]
fn offsetless_birthday_keeps_its_day_west_of_utc() {
    let west = FixedOffset::west_opt(5 * 3600).unwrap();
    assert_eq!(format_date_in("2000-01-01T00:00:00", &west), "2000.01.01");
    assert_eq!(format_date_in("2000-01-01", &west), "2000.01.01");
}

#[test]
fn offsetless_timestamps_display_as_wall_clock() {
    let west = FixedOffset::west_opt(5 * 3600).unwrap();
    assert_eq!(format_datetime_in("2024-03-01T09:30:00.5", &west), "2024.03.01 09:30");
    // Explicit offsets are still converted.
    assert_eq!(format_datetime_in("2024-03-01T02:00:00Z", &west), "2024.02.29 21:00");
}

#[test]
fn format_is_empty_for_unparseable_input() {
    assert_eq!(format_date_in("n/a", &Utc), "");
    assert_eq!(format_datetime_in("", &Utc), "");
}

// =============================================================
// Inputs
// =============================================================

#[test]
fn input_to_iso_converts_local_to_utc() {
    let msk = FixedOffset::east_opt(3 * 3600).unwrap();
    assert_eq!(
        input_to_iso_in("2024-03-01T10:00", &msk).as_deref(),
        Some("2024-03-01T07:00:00.000Z")
    );
}

#[test]
fn input_to_iso_accepts_date_inputs() {
    assert_eq!(input_to_iso_in("2000-01-02", &Utc).as_deref(), Some("2000-01-02T00:00:00.000Z"));
}

#[test]
fn input_to_iso_rejects_blank() {
    assert_eq!(input_to_iso_in("  ", &Utc), None);
}

#[test]
fn iso_to_input_inverts_input_to_iso() {
    let msk = FixedOffset::east_opt(3 * 3600).unwrap();
    let iso = input_to_iso_in("2024-03-01T10:00", &msk).unwrap();
    assert_eq!(iso_to_input_in(&iso, &msk), "2024-03-01T10:00");
}

#[test]
fn iso_to_date_input_drops_time() {
    assert_eq!(iso_to_date_input("1990-05-17T00:00:00"), "1990-05-17");
}
