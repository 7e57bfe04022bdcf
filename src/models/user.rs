// src/models/user.rs

//! Member profiles.

use std::sync::{Arc, OnceLock};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{Submission, Thread};
use crate::services::{SubmissionLoader, ThreadLoader, UserLoader};
use crate::utils::url::sub_page;

/// A site member.
///
/// The forum threads and submissions of a member are separate collections,
/// populated only through [`User::load_threads`] and
/// [`User::load_submissions`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    url: String,
    state: UserState,
    #[serde(skip)]
    threads: OnceLock<Vec<Arc<Thread>>>,
    #[serde(skip)]
    submissions: OnceLock<Vec<Arc<Submission>>>,
}

/// Lifecycle of a [`User`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserState {
    /// Known from a link; the link text usually carries the name.
    Reference { name: Option<String> },
    Loaded(Box<UserProfile>),
}

/// Everything read from a member's profile pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub about: String,
    pub rank_class: String,
    pub xp: i64,
    pub id: u64,
    pub profile_views: i64,
    pub level: i64,
    pub joined: NaiveDateTime,
    pub subscribers: Vec<User>,
    pub subscriptions: Vec<User>,
}

impl User {
    pub fn reference(url: impl Into<String>) -> Self {
        Self::with_state(url, UserState::Reference { name: None })
    }

    /// A reference whose display name is already known.
    pub fn named(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_state(
            url,
            UserState::Reference {
                name: Some(name.into()),
            },
        )
    }

    pub fn loaded(url: impl Into<String>, profile: UserProfile) -> Self {
        Self::with_state(url, UserState::Loaded(Box::new(profile)))
    }

    fn with_state(url: impl Into<String>, state: UserState) -> Self {
        Self {
            url: url.into(),
            state,
            threads: OnceLock::new(),
            submissions: OnceLock::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> &UserState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, UserState::Loaded(_))
    }

    pub fn profile(&self) -> Result<&UserProfile> {
        self.require("profile")
    }

    fn require(&self, field: &'static str) -> Result<&UserProfile> {
        match &self.state {
            UserState::Loaded(profile) => Ok(profile),
            UserState::Reference { .. } => Err(AppError::unloaded(&self.url, field)),
        }
    }

    pub fn name(&self) -> Result<&str> {
        match &self.state {
            UserState::Loaded(profile) => Ok(&profile.name),
            UserState::Reference { name: Some(name) } => Ok(name),
            UserState::Reference { name: None } => Err(AppError::unloaded(&self.url, "name")),
        }
    }

    pub fn about(&self) -> Result<&str> {
        self.require("about").map(|p| p.about.as_str())
    }

    pub fn rank_class(&self) -> Result<&str> {
        self.require("rank_class").map(|p| p.rank_class.as_str())
    }

    pub fn xp(&self) -> Result<i64> {
        self.require("xp").map(|p| p.xp)
    }

    pub fn id(&self) -> Result<u64> {
        self.require("id").map(|p| p.id)
    }

    pub fn profile_views(&self) -> Result<i64> {
        self.require("profile_views").map(|p| p.profile_views)
    }

    pub fn level(&self) -> Result<i64> {
        self.require("level").map(|p| p.level)
    }

    pub fn joined(&self) -> Result<NaiveDateTime> {
        self.require("joined").map(|p| p.joined)
    }

    pub fn subscribers(&self) -> Result<&[User]> {
        self.require("subscribers").map(|p| p.subscribers.as_slice())
    }

    pub fn subscriptions(&self) -> Result<&[User]> {
        self.require("subscriptions")
            .map(|p| p.subscriptions.as_slice())
    }

    /// Forum threads started by this member, once loaded.
    pub fn threads(&self) -> Result<&[Arc<Thread>]> {
        self.threads
            .get()
            .map(Vec::as_slice)
            .ok_or_else(|| AppError::unloaded(sub_page(&self.url, "forum"), "threads"))
    }

    /// Submissions posted by this member, once loaded.
    pub fn submissions(&self) -> Result<&[Arc<Submission>]> {
        self.submissions
            .get()
            .map(Vec::as_slice)
            .ok_or_else(|| AppError::unloaded(sub_page(&self.url, "submissions"), "submissions"))
    }

    pub fn thread_by_url(&self, url: &str) -> Result<Option<&Arc<Thread>>> {
        Ok(self.threads()?.iter().find(|t| t.url() == url))
    }

    /// Threads whose title equals `title`; titles need not be unique.
    pub fn threads_by_title(&self, title: &str) -> Result<Vec<&Arc<Thread>>> {
        Ok(self
            .threads()?
            .iter()
            .filter(|t| t.title().is_ok_and(|t| t == title))
            .collect())
    }

    pub fn submission_by_url(&self, url: &str) -> Result<Option<&Arc<Submission>>> {
        Ok(self.submissions()?.iter().find(|s| s.url() == url))
    }

    pub fn submissions_by_title(&self, title: &str) -> Result<Vec<&Arc<Submission>>> {
        Ok(self
            .submissions()?
            .iter()
            .filter(|s| s.title().is_ok_and(|t| t == title))
            .collect())
    }

    /// Populate [`User::threads`] through `loader`. Only the first call fetches.
    pub fn load_threads(&self, loader: &mut ThreadLoader) -> Result<&[Arc<Thread>]> {
        if let Some(threads) = self.threads.get() {
            return Ok(threads);
        }
        let threads = loader.load_user_threads(self)?;
        Ok(self.threads.get_or_init(|| threads))
    }

    /// Populate [`User::submissions`] through `loader`. Only the first call fetches.
    pub fn load_submissions(&self, loader: &mut SubmissionLoader) -> Result<&[Arc<Submission>]> {
        if let Some(submissions) = self.submissions.get() {
            return Ok(submissions);
        }
        let submissions = loader.load_user_submissions(self)?;
        Ok(self.submissions.get_or_init(|| submissions))
    }

    /// The loaded form of this member, through `loader`'s cache.
    pub fn resolve(&self, loader: &mut UserLoader) -> Result<Arc<User>> {
        loader.get(&self.url)
    }
}

/// Anything that names a member, for ignore lists.
pub trait Username {
    fn username(&self) -> Result<String>;
}

impl Username for str {
    fn username(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl Username for String {
    fn username(&self) -> Result<String> {
        Ok(self.clone())
    }
}

impl Username for User {
    fn username(&self) -> Result<String> {
        self.name().map(str::to_string)
    }
}

impl Username for Arc<User> {
    fn username(&self) -> Result<String> {
        self.as_ref().username()
    }
}

impl<T: Username + ?Sized> Username for &T {
    fn username(&self) -> Result<String> {
        (**self).username()
    }
}
