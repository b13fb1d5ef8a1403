use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four practice skills tracked per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeCategory {
    Speaking,
    Vocabulary,
    Listening,
    Grammar,
}

impl PracticeCategory {
    pub const ALL: [PracticeCategory; 4] = [
        PracticeCategory::Speaking,
        PracticeCategory::Vocabulary,
        PracticeCategory::Listening,
        PracticeCategory::Grammar,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PracticeCategory::Speaking => "speaking",
            PracticeCategory::Vocabulary => "vocabulary",
            PracticeCategory::Listening => "listening",
            PracticeCategory::Grammar => "grammar",
        }
    }
}

impl fmt::Display for PracticeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a category from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError {
    raw: String,
}

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown practice category `{}` (expected speaking, vocabulary, listening or grammar)",
            self.raw
        )
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for PracticeCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        PracticeCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ParseCategoryError { raw: s.to_string() })
    }
}
