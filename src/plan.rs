use crate::session::StudySession;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Date-indexed schedule of study sessions.
///
/// Days are kept in ascending order. Order within a day is insertion order
/// and only matters for positional toggling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudyPlan {
    days: BTreeMap<NaiveDate, Vec<StudySession>>,
}

impl StudyPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, study_date: NaiveDate, session: StudySession) {
        self.days.entry(study_date).or_default().push(session);
    }

    pub fn day(&self, study_date: NaiveDate) -> &[StudySession] {
        self.days.get(&study_date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &[StudySession])> {
        self.days.iter().map(|(date, sessions)| (*date, sessions.as_slice()))
    }

    pub fn study_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Every session paired with its study date, in study-date order.
    pub fn sessions(&self) -> impl Iterator<Item = (NaiveDate, &StudySession)> {
        self.days
            .iter()
            .flat_map(|(date, sessions)| sessions.iter().map(move |s| (*date, s)))
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn session_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Completed sessions with the study date they were placed on, in
    /// study-date order. Repeats of the same class and topic are kept once.
    pub fn completed_sessions(&self) -> Vec<(NaiveDate, StudySession)> {
        let mut seen = BTreeSet::new();
        self.sessions()
            .filter(|(_, s)| s.completed && seen.insert((s.key(), s.topic.as_str())))
            .map(|(date, s)| (date, s.clone()))
            .collect()
    }

    /// Sets `completed` on the session preparing for `subject`'s class on
    /// `class_date`. Returns `false` when no such session exists.
    pub fn mark_completed(&mut self, subject: &str, class_date: NaiveDate) -> bool {
        for sessions in self.days.values_mut() {
            if let Some(session) = sessions.iter_mut().find(|s| s.matches(subject, class_date)) {
                session.completed = true;
                info!(subject, %class_date, "marked session completed");
                return true;
            }
        }
        info!(subject, %class_date, "session not found");
        false
    }

    /// Flips `completed` on the `index`th session of `study_date`.
    /// Returns `false` for an unknown date or an out-of-range index.
    pub fn toggle_at(&mut self, study_date: NaiveDate, index: usize) -> bool {
        match self.days.get_mut(&study_date).and_then(|s| s.get_mut(index)) {
            Some(session) => {
                session.completed = !session.completed;
                debug!(%study_date, index, completed = session.completed, "toggled session");
                true
            }
            None => false,
        }
    }

    /// Distinct class dates across the plan, ascending.
    pub fn class_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.sessions().map(|(_, s)| s.class_date).collect();
        dates.sort();
        dates.dedup();
        dates
    }

    /// Distinct subjects having a class on `class_date`, sorted.
    pub fn subjects_on_class_date(&self, class_date: NaiveDate) -> Vec<String> {
        let mut subjects: Vec<String> = self
            .sessions()
            .filter(|(_, s)| s.class_date == class_date)
            .map(|(_, s)| s.subject.clone())
            .collect();
        subjects.sort();
        subjects.dedup();
        subjects
    }
}

impl FromIterator<(NaiveDate, StudySession)> for StudyPlan {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, StudySession)>>(iter: I) -> Self {
        let mut plan = StudyPlan::new();
        for (date, session) in iter {
            plan.push(date, session);
        }
        plan
    }
}
