// src/models/thread.rs

//! Forum thread entity.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{Category, Reply, User, reply};
use crate::services::ThreadLoader;

/// A forum thread, either referenced from a listing or fully loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thread {
    url: String,
    state: ThreadState,
}

/// Lifecycle of a [`Thread`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadState {
    /// Known by URL; listing pages also expose a summary.
    Reference(Option<ThreadSummary>),
    /// Every field read from the thread page.
    Loaded(Box<ThreadDetails>),
}

/// What a thread listing row shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadSummary {
    pub title: String,
    pub author: User,
    pub category: Option<Category>,
}

/// Every field of a loaded thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadDetails {
    pub category: Option<Category>,
    pub title: String,
    pub content: String,
    pub author: User,
    pub votes: i64,
    pub views: i64,
    pub id: u64,
    pub locked: bool,
    pub timestamp: NaiveDateTime,
    /// Replies in page order, with children linked.
    pub replies: Vec<Reply>,
}

impl Thread {
    /// A thread known only by its URL.
    pub fn reference(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: ThreadState::Reference(None),
        }
    }

    /// A thread as seen on a listing page.
    pub fn listed(url: impl Into<String>, summary: ThreadSummary) -> Self {
        Self {
            url: url.into(),
            state: ThreadState::Reference(Some(summary)),
        }
    }

    /// A fully loaded thread.
    pub fn loaded(url: impl Into<String>, details: ThreadDetails) -> Self {
        Self {
            url: url.into(),
            state: ThreadState::Loaded(Box::new(details)),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> &ThreadState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ThreadState::Loaded(_))
    }

    /// All loaded fields at once.
    pub fn details(&self) -> Result<&ThreadDetails> {
        self.require("details")
    }

    fn require(&self, field: &'static str) -> Result<&ThreadDetails> {
        match &self.state {
            ThreadState::Loaded(details) => Ok(details),
            ThreadState::Reference(_) => Err(AppError::unloaded(&self.url, field)),
        }
    }

    fn summary(&self, field: &'static str) -> Result<&ThreadSummary> {
        match &self.state {
            ThreadState::Reference(Some(summary)) => Ok(summary),
            _ => Err(AppError::unloaded(&self.url, field)),
        }
    }

    pub fn title(&self) -> Result<&str> {
        match &self.state {
            ThreadState::Loaded(details) => Ok(&details.title),
            _ => self.summary("title").map(|s| s.title.as_str()),
        }
    }

    pub fn author(&self) -> Result<&User> {
        match &self.state {
            ThreadState::Loaded(details) => Ok(&details.author),
            _ => self.summary("author").map(|s| &s.author),
        }
    }

    /// The thread's category; `None` when its path is not a known category.
    pub fn category(&self) -> Result<Option<Category>> {
        match &self.state {
            ThreadState::Loaded(details) => Ok(details.category),
            _ => self.summary("category").map(|s| s.category),
        }
    }

    pub fn content(&self) -> Result<&str> {
        self.require("content").map(|d| d.content.as_str())
    }

    pub fn votes(&self) -> Result<i64> {
        self.require("votes").map(|d| d.votes)
    }

    pub fn views(&self) -> Result<i64> {
        self.require("views").map(|d| d.views)
    }

    pub fn id(&self) -> Result<u64> {
        self.require("id").map(|d| d.id)
    }

    pub fn locked(&self) -> Result<bool> {
        self.require("locked").map(|d| d.locked)
    }

    pub fn timestamp(&self) -> Result<NaiveDateTime> {
        self.require("timestamp").map(|d| d.timestamp)
    }

    pub fn replies(&self) -> Result<&[Reply]> {
        self.require("replies").map(|d| d.replies.as_slice())
    }

    /// The reply with the given id, if this thread has one.
    pub fn reply(&self, id: u64) -> Result<Option<&Reply>> {
        Ok(reply::find(self.replies()?, id))
    }

    /// Top-level replies in page order.
    pub fn root_replies(&self) -> Result<Vec<&Reply>> {
        Ok(self.replies()?.iter().filter(|r| r.is_root()).collect())
    }

    /// Direct answers to reply `id`.
    pub fn children(&self, id: u64) -> Result<Vec<&Reply>> {
        Ok(reply::children_of(self.replies()?, id))
    }

    /// The loaded form of this thread, through `loader`'s cache.
    pub fn resolve(&self, loader: &mut ThreadLoader) -> Result<Arc<Thread>> {
        loader.get(&self.url)
    }
}
