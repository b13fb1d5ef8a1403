use chrono::{Duration, NaiveDate};
use practice_core::model::{
    DailyGoal, ProgressSnapshot, TodayProgress, UserStats, WEEKLY_WINDOW_DAYS, WeeklyEntry,
    WeeklyHistory,
};

/// Build a demo document with `days` consecutive goal-meeting days ending
/// yesterday, and an empty day for `today`.
///
/// Only the newest seven days land in the weekly history; the streak and
/// day count cover all of them.
#[must_use]
pub fn demo_snapshot(today: NaiveDate, days: u32, goal: DailyGoal) -> ProgressSnapshot {
    let window = days.min(u32::try_from(WEEKLY_WINDOW_DAYS).unwrap_or(u32::MAX));
    let history = WeeklyHistory::from_entries((1..=window).rev().map(|back| {
        let date = today - Duration::days(i64::from(back));
        let minutes = goal.minutes() + 2 * (back % 3);
        WeeklyEntry::new(date, minutes, back % 2 == 0)
    }));

    let last_practice = (days > 0).then(|| today - Duration::days(1));
    let stats = UserStats::from_persisted(days, days, last_practice, goal, days);

    ProgressSnapshot::from_parts(stats, TodayProgress::empty(today), None, history)
}
