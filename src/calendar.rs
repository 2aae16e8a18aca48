use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Hour a clamped study session is pinned to when its ideal date has passed.
pub const CLAMP_HOUR: u32 = 6;

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The seven dates Monday..Sunday of the week containing `anchor`.
pub fn week_dates(anchor: NaiveDate) -> Vec<NaiveDate> {
    consecutive_days(week_start(anchor)).take(7).collect()
}

/// Endless run of calendar days starting at `from`.
pub fn consecutive_days(from: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    from.iter_days()
}

/// The moment a study session for a class on `class_date` should happen.
///
/// That is `days_ahead` days before the class (at midnight), or today at
/// [`CLAMP_HOUR`] when that moment already lies before `now`. An offset
/// reaching past the representable calendar counts as lying before `now`.
pub fn desired_study_moment(
    class_date: NaiveDate,
    days_ahead: i64,
    now: NaiveDateTime,
) -> NaiveDateTime {
    let desired = Duration::try_days(days_ahead)
        .and_then(|offset| class_date.and_time(NaiveTime::MIN).checked_sub_signed(offset));
    match desired {
        Some(desired) if desired >= now => desired,
        _ => clamped_today(now),
    }
}

pub fn desired_study_date(
    class_date: NaiveDate,
    days_ahead: i64,
    now: NaiveDateTime,
) -> NaiveDate {
    desired_study_moment(class_date, days_ahead, now).date()
}

fn clamped_today(now: NaiveDateTime) -> NaiveDateTime {
    now.date()
        .and_hms_opt(CLAMP_HOUR, 0, 0)
        .unwrap_or_else(|| now.date().and_time(NaiveTime::MIN))
}

/// Whole days from `now` until midnight of `date`, truncated.
pub fn days_until(date: NaiveDate, now: NaiveDateTime) -> i64 {
    (date.and_time(NaiveTime::MIN) - now).num_days()
}

/// `Mon, 2025-03-10`
pub fn short_display(date: NaiveDate) -> String {
    date.format("%a, %Y-%m-%d").to_string()
}

/// `Monday, 2025-03-10`
pub fn long_display(date: NaiveDate) -> String {
    date.format("%A, %Y-%m-%d").to_string()
}
