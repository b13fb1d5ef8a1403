#![forbid(unsafe_code)]

pub mod account_service;
pub mod app_services;
pub mod error;
pub mod progress;
pub mod sync;

pub use practice_core::Clock;

pub use account_service::{
    Account, AccountNotice, AccountService, AuthGateway, AuthUser, AvatarUpload, UserProfile,
};
pub use app_services::AppServices;
pub use error::{AccountError, AppServicesError, GatewayError, ProgressError};
pub use progress::{CategoryRing, DailyProgressService, ProgressTracker, ProgressView};
pub use sync::{LoggingProgressSync, ProgressSync, ProgressSyncReport, SyncError};
