use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A planned preparation task for one specific class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub subject: String,
    pub class_date: NaiveDate,
    #[serde(with = "hour_minute")]
    pub class_time: NaiveTime,
    pub topic: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub location: String,
}

impl StudySession {
    pub fn new(
        subject: impl Into<String>,
        class_date: NaiveDate,
        class_time: NaiveTime,
        occurrence: usize,
    ) -> Self {
        Self {
            subject: subject.into(),
            class_date,
            class_time,
            topic: topic_for(occurrence),
            completed: false,
            location: String::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn key(&self) -> SessionKey {
        SessionKey {
            subject: self.subject.clone(),
            class_date: self.class_date,
        }
    }

    pub fn matches(&self, subject: &str, class_date: NaiveDate) -> bool {
        self.subject == subject && self.class_date == class_date
    }

    pub fn status_marker(&self) -> &'static str {
        if self.completed { "✓" } else { "◯" }
    }
}

/// Topic label for the 1-based `occurrence` of a class within its subject.
pub fn topic_for(occurrence: usize) -> String {
    format!("Class {occurrence} preparation")
}

/// Identity of a session: the subject plus the date of the class it prepares for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey {
    pub subject: String,
    pub class_date: NaiveDate,
}

/// Class times are stored as `HH:MM`; older files may carry seconds.
mod hour_minute {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%H:%M";
    const FORMAT_WITH_SECONDS: &str = "%H:%M:%S";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, FORMAT_WITH_SECONDS))
            .map_err(|e| D::Error::custom(format!("invalid class time '{raw}': {e}")))
    }
}
