//! Study plan generation.
//!
//! Both modes derive one session per imported class. [`DirectOffset`] places
//! each session a fixed number of days before its class; [`BalancedPass`]
//! spreads sessions over consecutive days so no day in the plan is empty.

pub mod balanced;
pub mod direct_offset;

pub use balanced::BalancedPass;
pub use direct_offset::DirectOffset;

use crate::calendar::desired_study_date;
use crate::class::SubjectIndex;
use crate::plan::StudyPlan;
use crate::session::StudySession;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanMode {
    /// Each session lands `days_ahead` days before its class.
    Direct,
    /// One session per consecutive day, in class-date order.
    #[default]
    Balanced,
}

impl PlanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanMode::Direct => "direct",
            PlanMode::Balanced => "balanced",
        }
    }
}

impl fmt::Display for PlanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(PlanMode::Direct),
            "balanced" => Ok(PlanMode::Balanced),
            other => Err(format!("unknown plan mode '{other}' (expected direct|balanced)")),
        }
    }
}

/// A freshly derived session and the date it would ideally be studied on.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub session: StudySession,
    pub desired: NaiveDate,
}

/// One candidate per class, subjects in index order, classes by start date.
pub(crate) fn candidates(
    subjects: &SubjectIndex,
    days_ahead: i64,
    now: NaiveDateTime,
) -> Vec<Candidate> {
    let mut out = Vec::with_capacity(subjects.total_classes());
    for (subject, classes) in subjects.iter() {
        for (idx, class) in classes.iter().enumerate() {
            let session = StudySession::new(subject, class.start_date, class.start_time, idx + 1)
                .with_location(class.location.clone().unwrap_or_default());
            out.push(Candidate {
                session,
                desired: desired_study_date(class.start_date, days_ahead, now),
            });
        }
    }
    out
}

/// Entry point used by the binary and the shell.
#[derive(Debug, Clone, Copy)]
pub struct PlanGenerator {
    pub days_ahead: i64,
    pub mode: PlanMode,
}

impl PlanGenerator {
    pub fn new(days_ahead: i64, mode: PlanMode) -> Self {
        Self { days_ahead, mode }
    }

    /// Builds a fresh plan in the configured mode.
    pub fn generate(&self, subjects: &SubjectIndex, now: NaiveDateTime) -> StudyPlan {
        match self.mode {
            PlanMode::Direct => DirectOffset::new(subjects, self.days_ahead).execute(now),
            PlanMode::Balanced => BalancedPass::new(subjects, self.days_ahead).execute(now),
        }
    }

    /// Rebuilds the plan from today, keeping sessions already completed in
    /// `previous` on their original study dates. Always balanced.
    pub fn reschedule(
        &self,
        subjects: &SubjectIndex,
        previous: &StudyPlan,
        now: NaiveDateTime,
    ) -> StudyPlan {
        BalancedPass::new(subjects, self.days_ahead).reschedule(previous, now)
    }
}
