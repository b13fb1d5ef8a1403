use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Accuracy, PracticeCategory};

/// Number of questions in every practice session.
pub const QUESTIONS_PER_SESSION: u32 = 10;

/// The single practice activity currently in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSession {
    #[serde(rename = "type")]
    category: PracticeCategory,
    question_index: u32,
    total_questions: u32,
    score: u32,
    start_time: DateTime<Utc>,
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub category: PracticeCategory,
    pub answered: u32,
    pub total: u32,
    pub correct: u32,
    pub is_finished: bool,
}

impl ActiveSession {
    /// Start a fresh session in `category`.
    #[must_use]
    pub fn start(category: PracticeCategory, started_at: DateTime<Utc>) -> Self {
        Self {
            category,
            question_index: 0,
            total_questions: QUESTIONS_PER_SESSION,
            score: 0,
            start_time: started_at,
        }
    }

    #[must_use]
    pub fn category(&self) -> PracticeCategory {
        self.category
    }

    #[must_use]
    pub fn question_index(&self) -> u32 {
        self.question_index
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.start_time
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.question_index >= self.total_questions
    }

    /// Record the answer to the current question and move to the next one.
    ///
    /// Answers past the last question are ignored. Returns whether the
    /// answer was counted.
    pub fn record_answer(&mut self, correct: bool) -> bool {
        if self.is_finished() {
            return false;
        }
        self.question_index += 1;
        if correct {
            self.score += 1;
        }
        true
    }

    /// Accuracy over the whole session, counting unanswered questions as wrong.
    #[must_use]
    pub fn accuracy(&self) -> Accuracy {
        Accuracy::from_score(self.score, self.total_questions)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            category: self.category,
            answered: self.question_index,
            total: self.total_questions,
            correct: self.score,
            is_finished: self.is_finished(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn fresh_session_shape() {
        let session = ActiveSession::start(PracticeCategory::Listening, fixed_now());
        assert_eq!(session.question_index(), 0);
        assert_eq!(session.total_questions(), 10);
        assert_eq!(session.score(), 0);
        assert!(!session.is_finished());
    }

    #[test]
    fn answers_stop_at_last_question() {
        let mut session = ActiveSession::start(PracticeCategory::Grammar, fixed_now());
        for i in 0..10 {
            assert!(session.record_answer(i % 3 != 0));
        }
        assert!(session.is_finished());
        assert!(!session.record_answer(true));
        assert_eq!(session.question_index(), 10);
        assert_eq!(session.score(), 6);
        assert_eq!(session.accuracy().percent(), 60);
    }

    #[test]
    fn serializes_category_as_type() {
        let session = ActiveSession::start(PracticeCategory::Speaking, fixed_now());
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["type"], "speaking");
        assert_eq!(json["totalQuestions"], 10);
    }
}
