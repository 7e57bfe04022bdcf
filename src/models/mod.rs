// src/models/mod.rs

//! Domain models for the client.
//!
//! Entities come in two states: a reference known only by URL (plus what a
//! listing row shows), and a loaded form carrying every field of the page.

mod category;
mod config;
mod feed;
pub(crate) mod reply;
mod selectors;
mod submission;
mod thread;
mod user;
mod wall;

// Re-export all public types
pub use category::Category;
pub use config::{ClientConfig, Config, LoggingConfig};
pub use feed::{BlogCategory, SubmissionFeed, SubmissionType, ThreadFeed};
pub use reply::{Comment, ROOT_ID, Reply};
pub use selectors::{Selectors, SubmissionSelectors, ThreadSelectors, UserSelectors, WallSelectors};
pub use submission::{
    Download, Submission, SubmissionDetails, SubmissionKind, SubmissionState, SubmissionSummary,
};
pub use thread::{Thread, ThreadDetails, ThreadState, ThreadSummary};
pub use user::{User, UserProfile, UserState, Username};
pub use wall::{WallPost, WallPostDetails, WallPostState, WallPostSummary};
