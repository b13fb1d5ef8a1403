use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccuracyError {
    #[error("accuracy must be between 0 and 100, got {0}")]
    OutOfRange(u32),
}

/// Percentage of correct answers in `[0, 100]`.
///
/// A zero score for a category means it has not been practiced today.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct Accuracy(u8);

impl Accuracy {
    pub const ZERO: Accuracy = Accuracy(0);
    pub const PERFECT: Accuracy = Accuracy(100);

    /// Creates an accuracy value.
    ///
    /// # Errors
    ///
    /// Returns `AccuracyError::OutOfRange` if `percent` is above 100.
    pub fn new(percent: u32) -> Result<Self, AccuracyError> {
        u8::try_from(percent)
            .ok()
            .filter(|p| *p <= 100)
            .map(Self)
            .ok_or(AccuracyError::OutOfRange(percent))
    }

    /// Creates an accuracy value, clamping anything above 100.
    #[must_use]
    pub fn saturating(percent: u32) -> Self {
        Self(u8::try_from(percent.min(100)).unwrap_or(100))
    }

    /// Rounds `correct / total` to the nearest whole percent.
    ///
    /// An empty session scores zero; `correct` above `total` scores 100.
    #[must_use]
    pub fn from_score(correct: u32, total: u32) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        let correct = u64::from(correct.min(total));
        let total = u64::from(total);
        let rounded = (correct * 200 + total) / (total * 2);
        Self::saturating(u32::try_from(rounded).unwrap_or(100))
    }

    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_attempted(self) -> bool {
        self.0 > 0
    }
}

impl TryFrom<u32> for Accuracy {
    type Error = AccuracyError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Accuracy> for u32 {
    fn from(value: Accuracy) -> Self {
        u32::from(value.0)
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
