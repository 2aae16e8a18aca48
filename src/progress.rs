//! Read-only views over a study plan.

use crate::calendar::{days_until, short_display, week_dates};
use crate::class::SubjectIndex;
use crate::plan::StudyPlan;
use crate::session::StudySession;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

/// The part of `plan` falling in the Monday-to-Sunday week containing `anchor`.
pub fn weekly_view(plan: &StudyPlan, anchor: NaiveDate) -> StudyPlan {
    week_dates(anchor)
        .into_iter()
        .flat_map(|date| plan.day(date).iter().cloned().map(move |s| (date, s)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingDay {
    pub date: NaiveDate,
    pub display: String,
    pub completed: usize,
    pub total: usize,
}

/// Study days on or after `today`, ascending, at most `limit` of them.
pub fn upcoming_days(plan: &StudyPlan, today: NaiveDate, limit: usize) -> Vec<UpcomingDay> {
    plan.days()
        .filter(|(date, _)| *date >= today)
        .take(limit)
        .map(|(date, sessions)| {
            let completed = sessions.iter().filter(|s| s.completed).count();
            let total = sessions.len();
            UpcomingDay {
                date,
                display: format!("{} ({completed}/{total} completed)", short_display(date)),
                completed,
                total,
            }
        })
        .collect()
}

/// Distinct subjects appearing anywhere in the plan, sorted.
pub fn subjects(plan: &StudyPlan) -> Vec<String> {
    let mut names: Vec<String> = plan.sessions().map(|(_, s)| s.subject.clone()).collect();
    names.sort();
    names.dedup();
    names
}

/// All sessions of `subject` with their study dates, ordered by class date.
pub fn sessions_by_subject<'a>(
    plan: &'a StudyPlan,
    subject: &str,
) -> Vec<(NaiveDate, &'a StudySession)> {
    let mut found: Vec<(NaiveDate, &StudySession)> =
        plan.sessions().filter(|(_, s)| s.subject == subject).collect();
    found.sort_by_key(|(_, s)| s.class_date);
    found
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubjectProgress {
    pub total: usize,
    pub completed: usize,
}

impl SubjectProgress {
    pub fn percent(&self) -> f64 {
        percentage(self.completed, self.total)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub total_sessions: usize,
    pub completed_sessions: usize,
    pub completion_rate: f64,
    pub by_subject: BTreeMap<String, SubjectProgress>,
}

fn percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}

pub fn progress(plan: &StudyPlan) -> ProgressReport {
    let mut total_sessions = 0;
    let mut completed_sessions = 0;
    let mut by_subject: BTreeMap<String, SubjectProgress> = BTreeMap::new();

    for (_, session) in plan.sessions() {
        let entry = by_subject.entry(session.subject.clone()).or_default();
        total_sessions += 1;
        entry.total += 1;
        if session.completed {
            completed_sessions += 1;
            entry.completed += 1;
        }
    }

    ProgressReport {
        total_sessions,
        completed_sessions,
        completion_rate: percentage(completed_sessions, total_sessions),
        by_subject,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextClass {
    pub date: NaiveDate,
    pub days_until: i64,
}

/// How far a subject's preparation runs ahead of its classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AheadStatus {
    pub subject: String,
    pub prepared: usize,
    pub total_classes: usize,
    /// `None` when the subject has no class after `now`.
    pub next_class: Option<NextClass>,
}

impl AheadStatus {
    pub fn describe(&self) -> String {
        match self.next_class {
            Some(next) => format!(
                "{}/{} classes prepared, next class in {} days",
                self.prepared, self.total_classes, next.days_until
            ),
            None => "No upcoming classes".to_string(),
        }
    }
}

pub fn ahead_status(
    subjects: &SubjectIndex,
    plan: &StudyPlan,
    now: NaiveDateTime,
) -> Vec<AheadStatus> {
    subjects
        .iter()
        .map(|(subject, classes)| {
            let next_class = classes
                .iter()
                .map(|c| c.start_date)
                .filter(|date| date.and_time(NaiveTime::MIN) > now)
                .min()
                .map(|date| NextClass {
                    date,
                    days_until: days_until(date, now),
                });
            let prepared = plan
                .sessions()
                .filter(|(_, s)| s.subject == subject && s.completed)
                .count();
            AheadStatus {
                subject: subject.to_string(),
                prepared,
                total_classes: classes.len(),
                next_class,
            }
        })
        .collect()
}
