mod daily;
mod tracker;
mod view;

pub use daily::DailyProgressService;
pub use tracker::ProgressTracker;
pub use view::{CategoryRing, ProgressView};
