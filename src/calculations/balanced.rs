use super::{Candidate, candidates};
use crate::calendar::consecutive_days;
use crate::class::SubjectIndex;
use crate::plan::StudyPlan;
use crate::session::{SessionKey, StudySession};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Assigns one session per consecutive day in class-date order, so the plan
/// has no gaps between its first and last scheduled day.
pub struct BalancedPass<'a> {
    subjects: &'a SubjectIndex,
    days_ahead: i64,
}

impl<'a> BalancedPass<'a> {
    pub fn new(subjects: &'a SubjectIndex, days_ahead: i64) -> Self {
        Self { subjects, days_ahead }
    }

    /// Fresh plan starting at the earliest desired study date.
    pub fn execute(&self, now: NaiveDateTime) -> StudyPlan {
        let mut pending = candidates(self.subjects, self.days_ahead, now);
        pending.sort_by_key(|c| c.session.class_date);

        let plan = match pending.iter().map(|c| c.desired).min() {
            Some(start) => Self::walk(pending, start),
            None => StudyPlan::new(),
        };
        info!(
            sessions = plan.session_count(),
            days = plan.day_count(),
            "generated balanced plan"
        );
        plan
    }

    /// Plan starting today. Sessions completed in `previous` are left out of
    /// the walk and re-inserted on the study date they had there.
    pub fn reschedule(&self, previous: &StudyPlan, now: NaiveDateTime) -> StudyPlan {
        let carried = previous.completed_sessions();
        let fresh = candidates(self.subjects, self.days_ahead, now);
        let mut pending = without_carried(fresh, &carried);
        pending.sort_by_key(|c| c.session.class_date);

        let mut plan = Self::walk(pending, now.date());
        let carried_count = carried.len();
        for (study_date, session) in carried {
            plan.push(study_date, session);
        }
        info!(
            sessions = plan.session_count(),
            days = plan.day_count(),
            carried = carried_count,
            "rescheduled balanced plan"
        );
        plan
    }

    fn walk(pending: Vec<Candidate>, start: NaiveDate) -> StudyPlan {
        let mut plan = StudyPlan::new();
        for (candidate, study_date) in pending.into_iter().zip(consecutive_days(start)) {
            debug!(
                subject = %candidate.session.subject,
                class_date = %candidate.session.class_date,
                %study_date,
                "placed session"
            );
            plan.push(study_date, candidate.session);
        }
        plan
    }
}

/// Drops one candidate per carried session of the same subject and class
/// date. A candidate with the carried session's topic is preferred; otherwise
/// the earliest unmatched candidate of that key goes.
fn without_carried(
    pending: Vec<Candidate>,
    carried: &[(NaiveDate, StudySession)],
) -> Vec<Candidate> {
    let mut open: BTreeMap<SessionKey, Vec<&str>> = BTreeMap::new();
    for (_, session) in carried {
        open.entry(session.key()).or_default().push(&session.topic);
    }

    let mut keep = vec![true; pending.len()];
    for (idx, candidate) in pending.iter().enumerate() {
        let Some(topics) = open.get_mut(&candidate.session.key()) else {
            continue;
        };
        if let Some(pos) = topics.iter().position(|t| *t == candidate.session.topic) {
            topics.swap_remove(pos);
            keep[idx] = false;
        }
    }
    for (idx, candidate) in pending.iter().enumerate() {
        if !keep[idx] {
            continue;
        }
        if let Some(topics) = open.get_mut(&candidate.session.key()) {
            if topics.pop().is_some() {
                keep[idx] = false;
            }
        }
    }

    pending
        .into_iter()
        .zip(keep)
        .filter_map(|(candidate, kept)| kept.then_some(candidate))
        .collect()
}
