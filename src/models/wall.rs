// src/models/wall.rs

//! Wall posts on member profiles.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{Comment, User, reply};
use crate::services::WallPostLoader;

/// A post on a member's wall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallPost {
    url: String,
    state: WallPostState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WallPostState {
    Reference(Option<WallPostSummary>),
    Loaded(Box<WallPostDetails>),
}

/// What a wall listing row shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallPostSummary {
    pub author: User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallPostDetails {
    pub author: User,
    pub id: u64,
    pub content: String,
    pub likes: i64,
    pub timestamp: NaiveDateTime,
    pub comments: Vec<Comment>,
}

impl WallPost {
    pub fn reference(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: WallPostState::Reference(None),
        }
    }

    pub fn listed(url: impl Into<String>, summary: WallPostSummary) -> Self {
        Self {
            url: url.into(),
            state: WallPostState::Reference(Some(summary)),
        }
    }

    pub fn loaded(url: impl Into<String>, details: WallPostDetails) -> Self {
        Self {
            url: url.into(),
            state: WallPostState::Loaded(Box::new(details)),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> &WallPostState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, WallPostState::Loaded(_))
    }

    pub fn details(&self) -> Result<&WallPostDetails> {
        self.require("details")
    }

    fn require(&self, field: &'static str) -> Result<&WallPostDetails> {
        match &self.state {
            WallPostState::Loaded(details) => Ok(details),
            WallPostState::Reference(_) => Err(AppError::unloaded(&self.url, field)),
        }
    }

    pub fn author(&self) -> Result<&User> {
        match &self.state {
            WallPostState::Loaded(details) => Ok(&details.author),
            WallPostState::Reference(Some(summary)) => Ok(&summary.author),
            WallPostState::Reference(None) => Err(AppError::unloaded(&self.url, "author")),
        }
    }

    pub fn id(&self) -> Result<u64> {
        self.require("id").map(|d| d.id)
    }

    pub fn content(&self) -> Result<&str> {
        self.require("content").map(|d| d.content.as_str())
    }

    pub fn likes(&self) -> Result<i64> {
        self.require("likes").map(|d| d.likes)
    }

    pub fn timestamp(&self) -> Result<NaiveDateTime> {
        self.require("timestamp").map(|d| d.timestamp)
    }

    pub fn comments(&self) -> Result<&[Comment]> {
        self.require("comments").map(|d| d.comments.as_slice())
    }

    pub fn comment(&self, id: u64) -> Result<Option<&Comment>> {
        Ok(reply::find(self.comments()?, id))
    }

    pub fn resolve(&self, loader: &mut WallPostLoader) -> Result<Arc<WallPost>> {
        loader.get(&self.url)
    }
}
