use chrono::{NaiveDate, NaiveTime};
use study_ahead::{StudyPlan, StudySession};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn session(subject: &str, class_date: NaiveDate, occurrence: usize) -> StudySession {
    StudySession::new(subject, class_date, NaiveTime::from_hms_opt(8, 15, 0).unwrap(), occurrence)
}

fn sample_plan() -> StudyPlan {
    let mut plan = StudyPlan::new();
    plan.push(d(2025, 3, 8), session("Math", d(2025, 3, 10), 1));
    plan.push(d(2025, 3, 10), session("Physics", d(2025, 3, 12), 1));
    plan.push(d(2025, 3, 10), session("Math", d(2025, 3, 12), 2));
    plan
}

#[test]
fn mark_completed_finds_session_by_subject_and_class_date() {
    let mut plan = sample_plan();
    assert!(plan.mark_completed("Math", d(2025, 3, 12)));
    let day = plan.day(d(2025, 3, 10));
    assert!(!day[0].completed);
    assert!(day[1].completed);

    // Marking is idempotent, not a toggle.
    assert!(plan.mark_completed("Math", d(2025, 3, 12)));
    assert!(plan.day(d(2025, 3, 10))[1].completed);
}

#[test]
fn mark_completed_reports_miss_without_changes() {
    let mut plan = sample_plan();
    let before = plan.clone();
    assert!(!plan.mark_completed("Chemistry", d(2025, 3, 12)));
    assert!(!plan.mark_completed("Math", d(2025, 3, 11)));
    assert_eq!(plan, before);
}

#[test]
fn toggle_at_flips_by_position() {
    let mut plan = sample_plan();
    assert!(plan.toggle_at(d(2025, 3, 10), 0));
    assert!(plan.day(d(2025, 3, 10))[0].completed);
    assert!(plan.toggle_at(d(2025, 3, 10), 0));
    assert!(!plan.day(d(2025, 3, 10))[0].completed);
}

#[test]
fn toggle_at_out_of_range_is_a_no_op() {
    let mut plan = sample_plan();
    let before = plan.clone();
    assert!(!plan.toggle_at(d(2025, 3, 10), 2));
    assert!(!plan.toggle_at(d(2025, 3, 9), 0));
    assert_eq!(plan, before);
}

#[test]
fn class_dates_and_subject_lookups_are_sorted_and_distinct() {
    let plan = sample_plan();
    assert_eq!(plan.class_dates(), vec![d(2025, 3, 10), d(2025, 3, 12)]);
    assert_eq!(
        plan.subjects_on_class_date(d(2025, 3, 12)),
        vec!["Math".to_string(), "Physics".to_string()]
    );
    assert_eq!(plan.session_count(), 3);
    assert_eq!(plan.day_count(), 2);
}

#[test]
fn completed_sessions_remember_their_study_date() {
    let mut plan = sample_plan();
    plan.mark_completed("Physics", d(2025, 3, 12));
    let completed = plan.completed_sessions();
    assert_eq!(completed.len(), 1);
    let (study_date, session) = &completed[0];
    assert_eq!(*study_date, d(2025, 3, 10));
    assert_eq!(session.subject, "Physics");
}

#[test]
fn completed_sessions_keep_distinct_topics_of_one_class_date() {
    let time = NaiveTime::from_hms_opt(8, 15, 0).unwrap();
    let mut plan = StudyPlan::new();
    for (study_date, occurrence) in [(d(2025, 3, 7), 1), (d(2025, 3, 8), 2), (d(2025, 3, 9), 2)] {
        let mut session = StudySession::new("ET", d(2025, 3, 10), time, occurrence);
        session.completed = true;
        plan.push(study_date, session);
    }

    let completed = plan.completed_sessions();
    let placed: Vec<(NaiveDate, &str)> = completed
        .iter()
        .map(|(date, s)| (*date, s.topic.as_str()))
        .collect();
    assert_eq!(
        placed,
        vec![
            (d(2025, 3, 7), "Class 1 preparation"),
            (d(2025, 3, 8), "Class 2 preparation"),
        ]
    );
}
