//! Menu-driven interactive loop.
//!
//! Every handler receives the [`AppState`] explicitly; the shell itself only
//! owns the console, the store and the clock.

pub mod console;
pub mod render;

pub use console::{Console, LineConsole};

use crate::calculations::PlanGenerator;
use crate::class::SubjectIndex;
use crate::metadata::PlanMetadata;
use crate::persistence::{PersistenceError, PlanStore};
use crate::plan::StudyPlan;
use crate::progress;
use chrono::{NaiveDate, NaiveDateTime};
use std::io;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("input closed")]
    InputClosed,
    #[error("console io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Everything a menu action may read or change.
#[derive(Debug, Clone)]
pub struct AppState {
    pub plan: StudyPlan,
    pub subjects: SubjectIndex,
    pub generator: PlanGenerator,
    pub upcoming_limit: usize,
}

impl AppState {
    pub fn metadata(&self, now: NaiveDateTime) -> PlanMetadata {
        PlanMetadata::new(&self.subjects, now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    Saved,
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    WeeklyOverview,
    UpcomingDays,
    MarkComplete,
    ProgressStatistics,
    BySubject,
    Reschedule,
    SaveAndExit,
    ExitWithoutSaving,
}

impl MenuAction {
    pub const ALL: [MenuAction; 8] = [
        MenuAction::WeeklyOverview,
        MenuAction::UpcomingDays,
        MenuAction::MarkComplete,
        MenuAction::ProgressStatistics,
        MenuAction::BySubject,
        MenuAction::Reschedule,
        MenuAction::SaveAndExit,
        MenuAction::ExitWithoutSaving,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::WeeklyOverview => "View weekly overview",
            MenuAction::UpcomingDays => "View upcoming study days",
            MenuAction::MarkComplete => "Mark sessions as complete",
            MenuAction::ProgressStatistics => "View progress statistics",
            MenuAction::BySubject => "View by subject",
            MenuAction::Reschedule => "Reschedule (skip completed)",
            MenuAction::SaveAndExit => "Save and exit",
            MenuAction::ExitWithoutSaving => "Exit without saving",
        }
    }
}

fn with_back(mut choices: Vec<String>, back: &str) -> Vec<String> {
    choices.push(back.to_string());
    choices
}

pub struct Shell<C, S> {
    console: C,
    store: S,
    clock: Box<dyn Fn() -> NaiveDateTime>,
}

impl<C: Console, S: PlanStore> Shell<C, S> {
    pub fn new(console: C, store: S) -> Self {
        Self {
            console,
            store,
            clock: Box::new(|| chrono::Local::now().naive_local()),
        }
    }

    /// Replaces the wall clock, e.g. to pin "today" in tests.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> NaiveDateTime + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    pub fn into_console(self) -> C {
        self.console
    }

    fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Runs the main menu until an exit action. Closed input exits without saving.
    pub fn run(&mut self, state: &mut AppState) -> Result<ShellExit, ShellError> {
        match self.main_menu(state) {
            Err(ShellError::InputClosed) => {
                info!("input closed, leaving without saving");
                Ok(ShellExit::Discarded)
            }
            other => other,
        }
    }

    fn main_menu(&mut self, state: &mut AppState) -> Result<ShellExit, ShellError> {
        let choices: Vec<String> = MenuAction::ALL.iter().map(|a| a.label().to_string()).collect();
        loop {
            let picked = self.console.select("What would you like to do?", &choices)?;
            let Some(action) = MenuAction::ALL.get(picked) else {
                continue;
            };
            match action {
                MenuAction::WeeklyOverview => self.weekly_overview(state)?,
                MenuAction::UpcomingDays => self.upcoming_days(state)?,
                MenuAction::MarkComplete => self.mark_sessions_complete(state)?,
                MenuAction::ProgressStatistics => self.progress_statistics(state)?,
                MenuAction::BySubject => self.view_by_subject(state)?,
                MenuAction::Reschedule => self.reschedule(state)?,
                MenuAction::SaveAndExit => {
                    self.save(state)?;
                    self.console.show("Study plan saved. Goodbye!")?;
                    return Ok(ShellExit::Saved);
                }
                MenuAction::ExitWithoutSaving => {
                    self.console.show("Exiting without saving. Goodbye!")?;
                    return Ok(ShellExit::Discarded);
                }
            }
        }
    }

    fn save(&mut self, state: &AppState) -> Result<(), ShellError> {
        let metadata = state.metadata(self.now());
        self.store.save_plan(&state.plan, &metadata)?;
        Ok(())
    }

    fn weekly_overview(&mut self, state: &AppState) -> Result<(), ShellError> {
        let text = render::weekly_overview(&state.plan, self.today());
        self.console.show(&text)?;
        self.console.pause()
    }

    fn upcoming_days(&mut self, state: &mut AppState) -> Result<(), ShellError> {
        loop {
            let days = progress::upcoming_days(&state.plan, self.today(), state.upcoming_limit);
            if days.is_empty() {
                self.console.show("No upcoming study days found.")?;
                return self.console.pause();
            }
            let choices = with_back(
                days.iter().map(|d| d.display.clone()).collect(),
                "Return to main menu",
            );
            let picked = self.console.select("Select a day to view details:", &choices)?;
            match days.get(picked) {
                Some(day) => self.day_details(state, day.date)?,
                None => return Ok(()),
            }
        }
    }

    fn day_details(&mut self, state: &mut AppState, date: NaiveDate) -> Result<(), ShellError> {
        loop {
            let sessions = state.plan.day(date);
            self.console.show(&render::day_detail(date, sessions))?;
            let choices = vec![
                format!("Toggle completion for session 1-{}", sessions.len()),
                "Return to day selection".to_string(),
            ];
            if self.console.select("What would you like to do?", &choices)? != 0 {
                return Ok(());
            }
            self.toggle_session(state, date)?;
        }
    }

    fn toggle_session(&mut self, state: &mut AppState, date: NaiveDate) -> Result<(), ShellError> {
        let count = state.plan.day(date).len();
        let choices = with_back((1..=count).map(|n| n.to_string()).collect(), "Cancel");
        let picked = self.console.select("Select a session to toggle:", &choices)?;
        if picked < count && state.plan.toggle_at(date, picked) {
            self.console.show(&format!("Session {} toggled.", picked + 1))?;
        }
        Ok(())
    }

    fn mark_sessions_complete(&mut self, state: &mut AppState) -> Result<(), ShellError> {
        loop {
            let class_dates = state.plan.class_dates();
            if class_dates.is_empty() {
                return self.console.show("No sessions found in study plan.");
            }
            let choices = with_back(
                class_dates.iter().map(|d| d.to_string()).collect(),
                "Return to main menu",
            );
            let picked = self.console.select("Select a class date:", &choices)?;
            let Some(&class_date) = class_dates.get(picked) else {
                return Ok(());
            };

            let subjects = state.plan.subjects_on_class_date(class_date);
            let choices = with_back(subjects.clone(), "Return to date selection");
            let picked = self.console.select("Select a subject:", &choices)?;
            let Some(subject) = subjects.get(picked) else {
                continue;
            };

            if state.plan.mark_completed(subject, class_date) {
                self.console.show(&format!(
                    "Marked {subject} for class on {class_date} as completed"
                ))?;
            } else {
                self.console.show(&format!(
                    "Session not found: {subject} for class on {class_date}"
                ))?;
            }
            return self.console.pause();
        }
    }

    fn progress_statistics(&mut self, state: &AppState) -> Result<(), ShellError> {
        let report = progress::progress(&state.plan);
        let ahead = progress::ahead_status(&state.subjects, &state.plan, self.now());
        self.console.show(&render::progress_statistics(&report, &ahead))?;
        self.console.pause()
    }

    fn view_by_subject(&mut self, state: &AppState) -> Result<(), ShellError> {
        loop {
            let subjects = progress::subjects(&state.plan);
            if subjects.is_empty() {
                return self.console.show("No subjects found in study plan.");
            }
            let choices = with_back(subjects.clone(), "Return to main menu");
            let picked = self.console.select("Select a subject:", &choices)?;
            let Some(subject) = subjects.get(picked) else {
                return Ok(());
            };
            let sessions = progress::sessions_by_subject(&state.plan, subject);
            self.console.show(&render::subject_sessions(subject, &sessions))?;
            self.console.pause()?;
        }
    }

    fn reschedule(&mut self, state: &mut AppState) -> Result<(), ShellError> {
        state.plan = state
            .generator
            .reschedule(&state.subjects, &state.plan, self.now());
        self.save(state)?;
        self.console
            .show("Study plan regenerated, skipping completed sessions.")
    }
}
