//! Text screens shared by the shell and the one-shot command line views.

use crate::calendar::{long_display, short_display};
use crate::plan::StudyPlan;
use crate::progress::{AheadStatus, ProgressReport, weekly_view};
use crate::session::StudySession;
use chrono::NaiveDate;
use std::fmt::Write;

const WIDE_RULE: usize = 60;
const NARROW_RULE: usize = 40;

fn class_line(session: &StudySession) -> String {
    format!(
        "Class: {} at {}",
        session.class_date,
        session.class_time.format("%H:%M")
    )
}

pub fn weekly_overview(plan: &StudyPlan, anchor: NaiveDate) -> String {
    let week = weekly_view(plan, anchor);
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "=".repeat(WIDE_RULE));
    let _ = writeln!(out, "WEEKLY STUDY OVERVIEW");
    let _ = writeln!(out, "{}", "=".repeat(WIDE_RULE));
    if week.is_empty() {
        let _ = writeln!(out, "\nNo study sessions this week.");
    }
    for (date, sessions) in week.days() {
        let _ = writeln!(out, "\n{}:", long_display(date));
        let _ = writeln!(out, "{}", "-".repeat(NARROW_RULE));
        for session in sessions {
            let _ = writeln!(
                out,
                "  {} {} - {}",
                session.status_marker(),
                session.subject,
                session.topic
            );
            let _ = writeln!(out, "    {}", class_line(session));
        }
    }
    out
}

pub fn day_detail(date: NaiveDate, sessions: &[StudySession]) -> String {
    let completed = sessions.iter().filter(|s| s.completed).count();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n{} ({}/{} completed):",
        short_display(date),
        completed,
        sessions.len()
    );
    let _ = writeln!(out, "{}", "-".repeat(NARROW_RULE));
    for (idx, session) in sessions.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} {} - {}",
            idx + 1,
            session.status_marker(),
            session.subject,
            session.topic
        );
        let _ = writeln!(out, "   {}", class_line(session));
        let _ = writeln!(out, "   Location: {}", session.location);
    }
    out
}

pub fn progress_statistics(report: &ProgressReport, ahead: &[AheadStatus]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "=".repeat(WIDE_RULE));
    let _ = writeln!(out, "PROGRESS STATISTICS");
    let _ = writeln!(out, "{}", "=".repeat(WIDE_RULE));
    let _ = writeln!(
        out,
        "\nOverall completion: {}/{} ({:.1}%)",
        report.completed_sessions, report.total_sessions, report.completion_rate
    );
    let _ = writeln!(out, "\nSubject breakdown:");
    for (subject, stats) in &report.by_subject {
        let _ = writeln!(
            out,
            "  {}: {}/{} ({:.1}%)",
            subject,
            stats.completed,
            stats.total,
            stats.percent()
        );
    }
    let _ = writeln!(out, "\nAhead status:");
    for status in ahead {
        let _ = writeln!(out, "  {}: {}", status.subject, status.describe());
    }
    out
}

pub fn subject_sessions(subject: &str, sessions: &[(NaiveDate, &StudySession)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nStudy sessions for {subject}:");
    let _ = writeln!(out, "{}", "=".repeat(WIDE_RULE));
    for (study_date, session) in sessions {
        let _ = writeln!(
            out,
            "{} Study on {} for class on {}",
            session.status_marker(),
            study_date,
            session.class_date
        );
        let _ = writeln!(out, "   Topic: {}", session.topic);
        let _ = writeln!(out, "   Location: {}", session.location);
    }
    out
}
