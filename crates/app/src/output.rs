use std::fmt::Write as _;

use practice_core::model::{ProgressUpdate, SessionProgress, WeeklyEntry};
use practice_core::streak::StreakOutcome;
use services::ProgressView;

const BAR_WIDTH: u32 = 20;

pub fn status(view: &ProgressView) -> String {
    let mut out = String::new();
    let percent = (view.goal_fraction * 100.0).round();
    let _ = writeln!(
        out,
        "{}  {}/{} min ({percent}%){}",
        view.date,
        view.minutes,
        view.goal_minutes,
        if view.is_complete { "  goal met" } else { "" },
    );
    let _ = writeln!(
        out,
        "streak {} (best {}), {} days practiced{}",
        view.current_streak,
        view.best_streak,
        view.total_days_practiced,
        if view.is_perfect_day { ", perfect day" } else { "" },
    );
    for ring in &view.rings {
        let _ = writeln!(out, "  {:<11}{:>4}", ring.category.as_str(), ring.accuracy.to_string());
    }
    match &view.session {
        Some(session) => out.push_str(&session_line(session)),
        None => out.push_str("no active session\n"),
    }
    out
}

pub fn session_line(session: &SessionProgress) -> String {
    format!(
        "session: {} {}/{} answered, {} correct{}\n",
        session.category,
        session.answered,
        session.total,
        session.correct,
        if session.is_finished { " (finished)" } else { "" },
    )
}

pub fn update(update: &ProgressUpdate) -> String {
    let mut out = format!(
        "credited {} at {}: {} min today\n",
        update.category,
        update.accuracy,
        update.today.total_minutes()
    );
    match update.streak {
        Some(StreakOutcome::Started) => out.push_str("goal met, streak started\n"),
        Some(StreakOutcome::Extended) => out.push_str("goal met, streak extended\n"),
        Some(StreakOutcome::Broken { missed_days }) => {
            let _ = writeln!(out, "goal met, new streak after {missed_days} missed day(s)");
        }
        Some(StreakOutcome::SameDay) => out.push_str("goal met\n"),
        Some(StreakOutcome::ClockSkew { last }) => {
            let _ = writeln!(out, "goal met, streak unchanged (last practice {last})");
        }
        None => {}
    }
    out
}

pub fn week(entries: &[WeeklyEntry]) -> String {
    let peak = entries.iter().map(|e| e.minutes).max().unwrap_or(0).max(1);
    let mut out = String::new();
    for entry in entries {
        let filled = entry.minutes * BAR_WIDTH / peak;
        let bar = "#".repeat(usize::try_from(filled).unwrap_or(0));
        let _ = writeln!(
            out,
            "{} {:<width$} {:>3} min{}",
            entry.date.format("%a %m-%d"),
            bar,
            entry.minutes,
            if entry.is_perfect { " *" } else { "" },
            width = usize::try_from(BAR_WIDTH).unwrap_or(0),
        );
    }
    out
}
