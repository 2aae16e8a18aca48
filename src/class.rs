use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;

/// Separator between the course name and the event suffix in a raw subject field.
pub const SUBJECT_SEPARATOR: &str = "::";

/// One calendar entry for a course meeting, as imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub subject: String,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl ClassRecord {
    pub fn new(subject: impl Into<String>, start_date: NaiveDate, start_time: NaiveTime) -> Self {
        Self {
            subject: subject.into(),
            start_date,
            start_time,
            location: None,
            description: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// The grouping key: everything before the first separator, trimmed.
    pub fn subject_key(&self) -> &str {
        normalize_subject(&self.subject)
    }
}

pub fn normalize_subject(raw: &str) -> &str {
    match raw.find(SUBJECT_SEPARATOR) {
        Some(idx) => raw[..idx].trim(),
        None => raw.trim(),
    }
}

/// Class records grouped by normalized subject, each group ordered by start date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectIndex {
    subjects: BTreeMap<String, Vec<ClassRecord>>,
}

impl SubjectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups records by their subject key. Sorting is stable, so records
    /// sharing a start date keep their import order.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ClassRecord>,
    {
        let mut index = Self::new();
        for record in records {
            index
                .subjects
                .entry(record.subject_key().to_string())
                .or_default()
                .push(record.clone());
        }
        for classes in index.subjects.values_mut() {
            classes.sort_by_key(|c| c.start_date);
        }
        index
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.subjects.keys().map(String::as_str)
    }

    pub fn classes(&self, subject: &str) -> &[ClassRecord] {
        self.subjects.get(subject).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ClassRecord])> {
        self.subjects
            .iter()
            .map(|(name, classes)| (name.as_str(), classes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn total_classes(&self) -> usize {
        self.subjects.values().map(Vec::len).sum()
    }
}
