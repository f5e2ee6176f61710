use chrono::{Datelike, Duration, Weekday};
use chrono_tz::{America::Bogota, Asia::Tokyo};
use staffdesk::{
    error::AppError,
    models::weekly_report::WeeklyReport,
    services::{attendance, reports},
    utils::time::Clock,
};

mod support;

use support::{entry, friday, john, report, state_in_zone};

#[test]
fn tokyo_friday_morning_counts_as_friday() {
    // 08:30 JST on Friday is still Thursday in UTC.
    let state = state_in_zone(Tokyo, friday(), 8, 30);
    assert_eq!(state.clock.now_utc().weekday(), Weekday::Thu);
    let session = john(&state);

    let record = attendance::check_in(&state, &session).unwrap();
    assert_eq!(record.date, friday());

    let daily =
        reports::submit_daily(&state, &session, report(vec![entry("Testing", 3.0)])).unwrap();
    assert_eq!(daily.date, friday());

    let weekly = reports::submit_weekly(&state, &session).unwrap();
    assert_eq!(weekly.week_start, friday() - Duration::days(4));
    assert_eq!(weekly.daily_reports, vec![daily.id]);
}

#[test]
fn thursday_night_west_of_utc_is_still_thursday() {
    // 23:30 in UTC-5 on Thursday is already Friday in UTC.
    let thursday = friday() - Duration::days(1);
    let state = state_in_zone(Bogota, thursday, 23, 30);
    assert_eq!(state.clock.now_utc().weekday(), Weekday::Fri);
    let session = john(&state);

    let record = attendance::check_in(&state, &session).unwrap();
    assert_eq!(record.date, thursday);
    let daily =
        reports::submit_daily(&state, &session, report(vec![entry("Testing", 3.0)])).unwrap();
    assert_eq!(daily.date, thursday);

    let err = reports::submit_weekly(&state, &session).unwrap_err();
    assert!(matches!(err, AppError::Ineligible(_)));
    assert!(state.repo.load::<WeeklyReport>().unwrap().is_empty());
}
