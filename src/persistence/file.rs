use super::{LoadedPlan, PersistenceResult, PlanFile, PlanStore};
use crate::metadata::PlanMetadata;
use crate::plan::StudyPlan;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const PLAN_KEY: &str = "study_plan";
const METADATA_KEY: &str = "metadata";

/// Plan store backed by a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonPlanStore {
    path: PathBuf,
}

impl JsonPlanStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl PlanStore for JsonPlanStore {
    fn save_plan(&self, plan: &StudyPlan, metadata: &PlanMetadata) -> PersistenceResult<()> {
        save_plan_to_json(plan, metadata, &self.path)
    }

    fn load_plan(&self) -> PersistenceResult<LoadedPlan> {
        load_plan_from_json(&self.path)
    }
}

pub fn save_plan_to_json<P: AsRef<Path>>(
    plan: &StudyPlan,
    metadata: &PlanMetadata,
    path: P,
) -> PersistenceResult<()> {
    let path = path.as_ref();
    let snapshot = PlanFile {
        metadata: metadata.clone(),
        study_plan: plan.clone(),
    };
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &snapshot)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!(
        path = %path.display(),
        sessions = plan.session_count(),
        "study plan saved"
    );
    Ok(())
}

/// Reads a state file. Unreadable paths are errors; unparseable content
/// yields an empty plan.
pub fn load_plan_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<LoadedPlan> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let loaded = parse_plan(&content);
    info!(
        path = %path.display(),
        sessions = loaded.plan.session_count(),
        "study plan loaded"
    );
    Ok(loaded)
}

/// Accepts both the `{metadata, study_plan}` layout and a bare plan mapping.
pub fn parse_plan(content: &str) -> LoadedPlan {
    if content.trim().is_empty() {
        return LoadedPlan::default();
    }
    let value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "state file is not valid JSON, starting with an empty plan");
            return LoadedPlan::default();
        }
    };
    match value {
        Value::Null => LoadedPlan::default(),
        Value::Object(mut map) if map.contains_key(PLAN_KEY) => {
            let metadata = map
                .remove(METADATA_KEY)
                .and_then(|m| serde_json::from_value::<PlanMetadata>(m).ok());
            let plan = match map.remove(PLAN_KEY) {
                Some(Value::Null) | None => StudyPlan::new(),
                Some(raw) => plan_from_value(raw),
            };
            LoadedPlan { metadata, plan }
        }
        legacy => LoadedPlan {
            metadata: None,
            plan: plan_from_value(legacy),
        },
    }
}

fn plan_from_value(value: Value) -> StudyPlan {
    serde_json::from_value(value).unwrap_or_else(|err| {
        warn!(error = %err, "study plan has an unexpected shape, starting with an empty plan");
        StudyPlan::new()
    })
}
