mod account;
mod accuracy;
mod category;
mod goal;
mod ids;
mod progress;
mod session;
mod snapshot;
mod stats;
mod today;
mod weekly;

pub use account::{
    AccountValidationError, Credentials, EmailAddress, LoginDraft, Password, PasswordResetDraft,
    PasswordUpdateDraft, ProfileDraft, ProfileUpdate, Registration, RegistrationDraft,
    VerificationLink,
};
pub use ids::{ParseIdError, UserId};

pub use accuracy::{Accuracy, AccuracyError};
pub use category::{ParseCategoryError, PracticeCategory};
pub use goal::{DailyGoal, DailyGoalError};
pub use progress::{ProgressUpdate, Rollover, SessionTransition};
pub use session::{ActiveSession, QUESTIONS_PER_SESSION, SessionProgress};
pub use snapshot::{ProgressSnapshot, SNAPSHOT_VERSION, SnapshotError};
pub use stats::UserStats;
pub use today::{DayRecord, MINUTES_PER_SESSION, TodayProgress};
pub use weekly::{WEEKLY_WINDOW_DAYS, WeeklyEntry, WeeklyHistory};
