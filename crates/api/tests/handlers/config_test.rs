use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use lexcita_api::config::ApiConfig;
use lexcita_core::scheduling::BookingScope;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn config() -> ApiConfig {
    ApiConfig::new("postgres://localhost/lexcita", "x".repeat(32))
}

#[test]
fn test_defaults() {
    let config = config();

    assert_eq!(config.server_addr(), "0.0.0.0:3000");
    assert_eq!(config.session_ttl_hours, 24);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.timezone, chrono_tz::America::Guayaquil);
    assert_eq!(config.booking_scope, BookingScope::Lawyer);
    assert_eq!(config.office_opens, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    assert_eq!(config.office_closes, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
    assert_eq!(config.slot_step_minutes, 30);
    assert_eq!(config.calendar_domain, "lexcita.local");
    assert!(config.cors_origins.is_none());
    assert!(config.validate().is_ok());
}

#[rstest]
#[case(1, true)]
#[case(720, true)]
#[case(0, false)]
#[case(-5, false)]
#[case(721, false)]
#[case(i64::MAX, false)]
fn test_session_ttl_is_bounded(#[case] hours: i64, #[case] accepted: bool) {
    let mut config = config();
    config.session_ttl_hours = hours;

    assert_eq!(config.validate().is_ok(), accepted);
}

#[test]
fn test_short_secret_is_rejected() {
    let config = ApiConfig::new("postgres://localhost/lexcita", "too-short");
    assert!(config.validate().is_err());
}

#[test]
fn test_office_hours_must_be_ordered() {
    let mut config = config();
    config.office_opens = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
    config.office_closes = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_slot_step_must_be_positive() {
    let mut config = config();
    config.slot_step_minutes = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_office_window_is_local() {
    let window = config()
        .office_window(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap())
        .unwrap();

    assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 2, 15, 13, 0, 0).unwrap());
    assert_eq!(window.end, Utc.with_ymd_and_hms(2024, 2, 15, 23, 0, 0).unwrap());
}
