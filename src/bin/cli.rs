use anyhow::{Context, bail};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use study_ahead::shell::render;
use study_ahead::{
    AppState, JsonPlanStore, LineConsole, PlanGenerator, PlanMode, PlanStore, PlannerConfig,
    Shell, StudyPlan, import_classes, progress,
};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "study-ahead", version, about = "Plan study sessions ahead of your classes")]
struct Cli {
    /// Calendar export (CSV) listing the class sessions
    #[arg(long, default_value = "classes.csv")]
    csv: PathBuf,
    /// State file holding the study plan
    #[arg(long, default_value = "study_plan.json")]
    output: PathBuf,
    /// How many days to study ahead of each class
    #[arg(long)]
    days_ahead: Option<i64>,
    /// Placement rule for a newly generated plan (direct|balanced)
    #[arg(long)]
    mode: Option<PlanMode>,
    /// JSON file with planner settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Launch the interactive menu
    #[arg(long)]
    ui: bool,
    /// Regenerate the plan from today, keeping completed sessions where they are
    #[arg(long)]
    reschedule: bool,
    /// Print this week's sessions and progress
    #[arg(long)]
    view_week: bool,
    /// Mark the session for a class as completed
    #[arg(long, num_args = 2, value_names = ["CLASS_DATE", "SUBJECT"])]
    mark_completed: Option<Vec<String>>,
    /// Log filter, e.g. warn, info, debug
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<PlannerConfig> {
    let mut config = match &cli.config {
        Some(path) => PlannerConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlannerConfig::default(),
    };
    if let Some(days_ahead) = cli.days_ahead {
        config.days_ahead = days_ahead;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    config.validate()?;
    Ok(config)
}

fn save(store: &JsonPlanStore, state: &AppState, now: NaiveDateTime) -> anyhow::Result<()> {
    store
        .save_plan(&state.plan, &state.metadata(now))
        .with_context(|| format!("saving {}", store.path().display()))?;
    println!("Study plan saved to {}", store.path().display());
    Ok(())
}

fn mark_completed(state: &mut AppState, args: &[String]) -> anyhow::Result<bool> {
    let [date_s, subject] = args else {
        bail!("--mark-completed expects <CLASS_DATE> <SUBJECT>");
    };
    let class_date = NaiveDate::parse_from_str(date_s, "%Y-%m-%d")
        .with_context(|| format!("invalid class date '{date_s}' (YYYY-MM-DD)"))?;
    let found = state.plan.mark_completed(subject, class_date);
    if found {
        println!("Marked {subject} for class on {class_date} as completed");
    } else {
        println!("Session not found: {subject} for class on {class_date}");
    }
    Ok(found)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let import = import_classes(&cli.csv)?;
    let store = JsonPlanStore::new(&cli.output);
    let now = Local::now().naive_local();

    let mut state = AppState {
        plan: StudyPlan::new(),
        subjects: import.subjects,
        generator: PlanGenerator::new(config.days_ahead, config.mode),
        upcoming_limit: config.upcoming_limit,
    };

    if store.exists() {
        let loaded = store
            .load_plan()
            .with_context(|| format!("loading {}", store.path().display()))?;
        state.plan = loaded.plan;
        match &loaded.metadata {
            Some(metadata) => {
                println!(
                    "Loaded existing plan: {} (generated on {})",
                    store.path().display(),
                    metadata.generated_on
                );
                if !metadata.matches(&state.subjects) {
                    warn!("calendar export differs from the one the plan was generated from");
                    println!(
                        "The calendar export changed since this plan was generated. \
                         Run with --reschedule to pick up the new classes."
                    );
                }
            }
            None => println!("Loaded existing plan: {}", store.path().display()),
        }
    } else {
        state.plan = state.generator.generate(&state.subjects, now);
        save(&store, &state, now)?;
    }

    if cli.reschedule {
        state.plan = state.generator.reschedule(&state.subjects, &state.plan, now);
        save(&store, &state, now)?;
        println!("Rescheduled and saved (skipping completed sessions).");
    }

    if let Some(args) = &cli.mark_completed {
        if mark_completed(&mut state, args)? {
            save(&store, &state, now)?;
        }
    }

    if cli.view_week {
        print!("{}", render::weekly_overview(&state.plan, now.date()));
        let report = progress::progress(&state.plan);
        let ahead = progress::ahead_status(&state.subjects, &state.plan, now);
        print!("{}", render::progress_statistics(&report, &ahead));
    }

    if cli.ui {
        let stdin = io::stdin();
        let console = LineConsole::new(stdin.lock(), io::stdout());
        let mut shell = Shell::new(console, store);
        shell.run(&mut state)?;
    } else {
        println!("Study plan loaded. Use --ui for the interactive menu.");
        println!("Total sessions: {}", state.plan.session_count());
        println!("Run with --reschedule to re-generate the schedule skipping completed sessions.");
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
