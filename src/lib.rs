pub mod calculations;
pub mod calendar;
pub mod class;
pub mod config;
pub mod import;
pub mod metadata;
pub mod persistence;
pub mod plan;
pub mod progress;
pub mod session;
pub mod shell;

pub use calculations::{PlanGenerator, PlanMode};
pub use class::{ClassRecord, SubjectIndex};
pub use config::{ConfigError, PlannerConfig};
pub use import::{ClassImport, ImportError, import_classes, parse_classes};
pub use metadata::PlanMetadata;
pub use persistence::{
    JsonPlanStore, LoadedPlan, PersistenceError, PlanFile, PlanStore, load_plan_from_json,
    save_plan_to_json,
};
pub use plan::StudyPlan;
pub use session::{SessionKey, StudySession};
pub use shell::{AppState, Console, LineConsole, Shell, ShellError, ShellExit};
