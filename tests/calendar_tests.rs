use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use study_ahead::calendar::{
    days_until, desired_study_date, desired_study_moment, long_display, short_display, week_dates,
    week_start,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    date.and_hms_opt(h, m, 0).unwrap()
}

#[test]
fn week_starts_on_monday() {
    // 2025-03-16 is a Sunday
    assert_eq!(week_start(d(2025, 3, 16)), d(2025, 3, 10));
    assert_eq!(week_start(d(2025, 3, 10)), d(2025, 3, 10));

    let week = week_dates(d(2025, 3, 12));
    assert_eq!(week.len(), 7);
    assert_eq!(week[0].weekday(), Weekday::Mon);
    assert_eq!(week[6], d(2025, 3, 16));
}

#[test]
fn desired_date_is_offset_before_class() {
    let now = at(d(2025, 3, 1), 9, 0);
    assert_eq!(desired_study_date(d(2025, 3, 10), 2, now), d(2025, 3, 8));
}

#[test]
fn past_desired_date_clamps_to_today_morning() {
    let now = at(d(2025, 3, 9), 21, 30);
    assert_eq!(desired_study_moment(d(2025, 3, 10), 2, now), at(d(2025, 3, 9), 6, 0));
    // Midnight today is already behind us as well.
    assert_eq!(desired_study_date(d(2025, 3, 11), 2, now), d(2025, 3, 9));
}

#[test]
fn offsets_beyond_the_calendar_clamp_to_today() {
    let now = at(d(2025, 3, 1), 9, 0);
    assert_eq!(
        desired_study_moment(d(2025, 3, 10), 100_000_000, now),
        at(d(2025, 3, 1), 6, 0)
    );
    assert_eq!(desired_study_date(d(2025, 3, 10), i64::MAX, now), d(2025, 3, 1));
}

#[test]
fn days_until_truncates_partial_days() {
    let now = at(d(2025, 3, 11), 10, 0);
    assert_eq!(days_until(d(2025, 3, 17), now), 5);
    assert_eq!(days_until(d(2025, 3, 12), now), 0);
}

#[test]
fn display_formats() {
    assert_eq!(short_display(d(2025, 3, 10)), "Mon, 2025-03-10");
    assert_eq!(long_display(d(2025, 3, 10)), "Monday, 2025-03-10");
}
