use super::candidates;
use crate::class::SubjectIndex;
use crate::plan::StudyPlan;
use chrono::NaiveDateTime;
use tracing::{debug, info};

/// Places every session exactly `days_ahead` days before its class, or today
/// when that date has passed. Days may collect several sessions or none.
pub struct DirectOffset<'a> {
    subjects: &'a SubjectIndex,
    days_ahead: i64,
}

impl<'a> DirectOffset<'a> {
    pub fn new(subjects: &'a SubjectIndex, days_ahead: i64) -> Self {
        Self { subjects, days_ahead }
    }

    pub fn execute(&self, now: NaiveDateTime) -> StudyPlan {
        let mut plan = StudyPlan::new();
        for candidate in candidates(self.subjects, self.days_ahead, now) {
            debug!(
                subject = %candidate.session.subject,
                class_date = %candidate.session.class_date,
                study_date = %candidate.desired,
                "placed session"
            );
            plan.push(candidate.desired, candidate.session);
        }
        info!(
            sessions = plan.session_count(),
            days = plan.day_count(),
            "generated direct-offset plan"
        );
        plan
    }
}
