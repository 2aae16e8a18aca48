use crate::metadata::PlanMetadata;
use crate::plan::StudyPlan;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// On-disk layout: metadata followed by the plan itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanFile {
    pub metadata: PlanMetadata,
    pub study_plan: StudyPlan,
}

/// What a load produced. Files in the bare legacy layout carry no metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedPlan {
    pub metadata: Option<PlanMetadata>,
    pub plan: StudyPlan,
}

pub trait PlanStore {
    fn save_plan(&self, plan: &StudyPlan, metadata: &PlanMetadata) -> PersistenceResult<()>;
    fn load_plan(&self) -> PersistenceResult<LoadedPlan>;
}

pub mod file;

pub use file::{JsonPlanStore, load_plan_from_json, parse_plan, save_plan_to_json};
