use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days kept in the rolling history window.
pub const WEEKLY_WINDOW_DAYS: usize = 7;

/// Practice recorded for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyEntry {
    pub date: NaiveDate,
    pub minutes: u32,
    pub is_perfect: bool,
}

impl WeeklyEntry {
    #[must_use]
    pub fn new(date: NaiveDate, minutes: u32, is_perfect: bool) -> Self {
        Self {
            date,
            minutes,
            is_perfect,
        }
    }
}

/// Rolling history of at most seven distinct dates, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyHistory(Vec<WeeklyEntry>);

impl WeeklyHistory {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a history from arbitrary entries, enforcing the window rules.
    ///
    /// Later entries win over earlier ones for the same date.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = WeeklyEntry>) -> Self {
        let mut history = Self::new();
        for entry in entries {
            history.record(entry);
        }
        history
    }

    #[must_use]
    pub fn entries(&self) -> &[WeeklyEntry] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&WeeklyEntry> {
        self.0.iter().find(|e| e.date == date)
    }

    /// Insert or replace the entry for `entry.date`, then keep the newest seven.
    pub fn record(&mut self, entry: WeeklyEntry) {
        match self.0.binary_search_by_key(&entry.date, |e| e.date) {
            Ok(pos) => self.0[pos] = entry,
            Err(pos) => self.0.insert(pos, entry),
        }
        if self.0.len() > WEEKLY_WINDOW_DAYS {
            let excess = self.0.len() - WEEKLY_WINDOW_DAYS;
            self.0.drain(..excess);
        }
    }

    pub(crate) fn normalize(&mut self) {
        let entries = std::mem::take(&mut self.0);
        *self = Self::from_entries(entries);
    }

    /// Seven bars ending at `end`, filling days without an entry with zero minutes.
    #[must_use]
    pub fn chart(&self, end: NaiveDate) -> Vec<WeeklyEntry> {
        (0..WEEKLY_WINDOW_DAYS)
            .rev()
            .map(|back| {
                let date = end - Duration::days(i64::try_from(back).unwrap_or(0));
                self.get(date)
                    .copied()
                    .unwrap_or_else(|| WeeklyEntry::new(date, 0, false))
            })
            .collect()
    }

    /// Total minutes across the stored window.
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        self.0.iter().map(|e| e.minutes).fold(0, u32::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    fn is_sorted_unique(history: &WeeklyHistory) -> bool {
        history.entries().windows(2).all(|w| w[0].date < w[1].date)
    }

    #[test]
    fn keeps_newest_seven_sorted() {
        let mut history = WeeklyHistory::new();
        for d in [9, 2, 5, 1, 7, 3, 8, 4, 6] {
            history.record(WeeklyEntry::new(day(d), d, false));
            assert!(history.len() <= WEEKLY_WINDOW_DAYS);
            assert!(is_sorted_unique(&history));
        }
        let minutes: Vec<u32> = history.entries().iter().map(|e| e.minutes).collect();
        assert_eq!(minutes, vec![3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn rerecording_a_date_overwrites_in_place() {
        let mut history = WeeklyHistory::new();
        history.record(WeeklyEntry::new(day(1), 4, false));
        history.record(WeeklyEntry::new(day(2), 6, false));
        history.record(WeeklyEntry::new(day(1), 10, true));

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0], WeeklyEntry::new(day(1), 10, true));
    }

    #[test]
    fn older_date_than_full_window_is_dropped() {
        let mut history =
            WeeklyHistory::from_entries((10..17).map(|d| WeeklyEntry::new(day(d), 2, false)));
        history.record(WeeklyEntry::new(day(1), 2, false));
        assert_eq!(history.len(), 7);
        assert!(history.get(day(1)).is_none());
        assert_eq!(history.entries()[0].date, day(10));
    }

    #[test]
    fn chart_fills_missing_days() {
        let history = WeeklyHistory::from_entries([
            WeeklyEntry::new(day(3), 6, false),
            WeeklyEntry::new(day(7), 12, true),
        ]);
        let chart = history.chart(day(7));
        assert_eq!(chart.len(), 7);
        assert_eq!(chart[0].date, day(1));
        assert_eq!(chart[2].minutes, 6);
        assert_eq!(chart[1].minutes, 0);
        assert!(chart[6].is_perfect);
        assert_eq!(history.total_minutes(), 18);
    }
}
