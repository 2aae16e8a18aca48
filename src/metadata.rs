use crate::class::SubjectIndex;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const GENERATED_ON_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Header block stored next to the plan in the state file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanMetadata {
    pub generated_on: String,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub total_classes: usize,
}

impl PlanMetadata {
    pub fn new(subjects: &SubjectIndex, generated_on: NaiveDateTime) -> Self {
        Self {
            generated_on: generated_on.format(GENERATED_ON_FORMAT).to_string(),
            subjects: subjects.names().map(str::to_string).collect(),
            total_classes: subjects.total_classes(),
        }
    }

    /// Whether `subjects` has the same subject names and class count the
    /// plan was generated from.
    pub fn matches(&self, subjects: &SubjectIndex) -> bool {
        self.total_classes == subjects.total_classes()
            && self.subjects.iter().map(String::as_str).eq(subjects.names())
    }

    pub fn generated_on(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.generated_on, GENERATED_ON_FORMAT).ok()
    }
}
