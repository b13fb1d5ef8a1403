use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DailyGoalError {
    #[error("daily goal must be at least one minute")]
    Zero,
}

/// Minutes of practice per day that count as meeting the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DailyGoal(u32);

impl DailyGoal {
    /// Goals offered by the settings screen. Other positive values are accepted.
    pub const CHOICES: [u32; 4] = [5, 10, 15, 20];

    /// Creates a daily goal.
    ///
    /// # Errors
    ///
    /// Returns `DailyGoalError::Zero` if `minutes` is zero.
    pub fn new(minutes: u32) -> Result<Self, DailyGoalError> {
        if minutes == 0 {
            return Err(DailyGoalError::Zero);
        }
        Ok(Self(minutes))
    }

    #[must_use]
    pub fn minutes(self) -> u32 {
        self.0
    }

    /// Returns true if `minutes` reaches this goal.
    #[must_use]
    pub fn is_met_by(self, minutes: u32) -> bool {
        minutes >= self.0
    }

    /// Returns true if the goal is one of the presented choices.
    #[must_use]
    pub fn is_standard_choice(self) -> bool {
        Self::CHOICES.contains(&self.0)
    }
}

impl Default for DailyGoal {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<u32> for DailyGoal {
    type Error = DailyGoalError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DailyGoal> for u32 {
    fn from(value: DailyGoal) -> Self {
        value.0
    }
}

impl fmt::Display for DailyGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert_eq!(DailyGoal::new(0), Err(DailyGoalError::Zero));
    }

    #[test]
    fn non_standard_positive_goal_is_accepted() {
        let goal = DailyGoal::new(7).unwrap();
        assert!(!goal.is_standard_choice());
        assert!(goal.is_met_by(7));
        assert!(!goal.is_met_by(6));
    }

    #[test]
    fn default_is_ten_minutes() {
        assert_eq!(DailyGoal::default().minutes(), 10);
        assert!(DailyGoal::default().is_standard_choice());
    }
}
