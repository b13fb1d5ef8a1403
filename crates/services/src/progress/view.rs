use chrono::NaiveDate;

use practice_core::model::{
    Accuracy, PracticeCategory, ProgressSnapshot, SessionProgress, WeeklyEntry,
};

/// Accuracy ring for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRing {
    pub category: PracticeCategory,
    pub accuracy: Accuracy,
}

/// Presentation-agnostic read model of the progress document.
///
/// No pre-formatted strings; screens format dates and percentages themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub date: NaiveDate,
    pub rings: Vec<CategoryRing>,
    pub minutes: u32,
    pub goal_minutes: u32,
    /// `minutes / goal_minutes`, clamped to `1.0`.
    pub goal_fraction: f64,
    pub is_complete: bool,
    pub is_perfect_day: bool,
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_days_practiced: u32,
    pub session: Option<SessionProgress>,
    /// Seven bars ending at `date`, including today's minutes so far.
    pub week: Vec<WeeklyEntry>,
}

impl ProgressView {
    #[must_use]
    pub fn build(snapshot: &ProgressSnapshot, today: NaiveDate) -> Self {
        let progress = snapshot.today_progress();
        let stats = snapshot.user_stats();
        let goal_minutes = stats.daily_goal().minutes();

        let rings = PracticeCategory::ALL
            .iter()
            .map(|&category| CategoryRing {
                category,
                accuracy: progress.score(category),
            })
            .collect();

        let mut history = snapshot.weekly_progress().clone();
        if progress.date() == today && progress.total_minutes() > 0 {
            history.record(progress.weekly_entry());
        }

        Self {
            date: today,
            rings,
            minutes: progress.total_minutes(),
            goal_minutes,
            goal_fraction: goal_fraction(progress.total_minutes(), goal_minutes),
            is_complete: progress.is_complete(),
            is_perfect_day: progress.is_perfect_day(),
            current_streak: stats.current_streak(),
            best_streak: stats.best_streak(),
            total_days_practiced: stats.total_days_practiced(),
            session: snapshot.active_session().map(|s| s.progress()),
            week: history.chart(today),
        }
    }

    #[must_use]
    pub fn ring(&self, category: PracticeCategory) -> Accuracy {
        self.rings
            .iter()
            .find(|ring| ring.category == category)
            .map_or(Accuracy::ZERO, |ring| ring.accuracy)
    }
}

fn goal_fraction(minutes: u32, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (f64::from(minutes) / f64::from(goal)).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use practice_core::time::{fixed_now, fixed_today};

    #[test]
    fn view_reports_rings_goal_and_chart() {
        let today = fixed_today();
        let mut snapshot = ProgressSnapshot::fresh(today);
        snapshot.record_weekly_entry(WeeklyEntry::new(today - Duration::days(2), 12, true));
        snapshot.update_progress(PracticeCategory::Grammar, Accuracy::new(80).unwrap(), today);
        snapshot.start_session(PracticeCategory::Speaking, fixed_now());

        let view = ProgressView::build(&snapshot, today);
        assert_eq!(view.ring(PracticeCategory::Grammar).percent(), 80);
        assert_eq!(view.ring(PracticeCategory::Speaking), Accuracy::ZERO);
        assert_eq!(view.minutes, 2);
        assert!((view.goal_fraction - 0.2).abs() < f64::EPSILON);
        assert_eq!(view.session.unwrap().category, PracticeCategory::Speaking);

        assert_eq!(view.week.len(), 7);
        assert_eq!(view.week[6].date, today);
        assert_eq!(view.week[6].minutes, 2);
        assert_eq!(view.week[4].minutes, 12);
        assert_eq!(view.week[5].minutes, 0);
    }

    #[test]
    fn goal_fraction_is_clamped() {
        assert!((goal_fraction(30, 10) - 1.0).abs() < f64::EPSILON);
        assert!(goal_fraction(0, 10).abs() < f64::EPSILON);
    }
}
