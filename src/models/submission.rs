// src/models/submission.rs

//! Submission entity and its kinds.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{Comment, SubmissionType, User, reply};
use crate::services::SubmissionLoader;

/// A member submission (project, skin, pack, server, mod or blog).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    url: String,
    state: SubmissionState,
}

/// Lifecycle of a [`Submission`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Reference(Option<SubmissionSummary>),
    Loaded(Box<SubmissionDetails>),
}

/// What a submission listing row shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionSummary {
    pub title: String,
    pub author: User,
}

/// Fields shared by every submission kind, plus the kind payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionDetails {
    pub kind: SubmissionKind,
    pub title: String,
    pub media: Vec<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub author: User,
    pub diamonds: i64,
    pub views: i64,
    pub views_today: i64,
    pub favorites: i64,
    pub id: u64,
    pub comments: Vec<Comment>,
    pub timestamp: NaiveDateTime,
}

/// Kind-specific payload, resolved from the page's type label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubmissionKind {
    Project(Download),
    Skin(Download),
    TexturePack(Download),
    Mod(Download),
    Server { ip: String },
    Blog,
}

/// Download links of a downloadable submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Download {
    /// Primary download; `None` when the page offers no download action.
    pub url: Option<String>,
    pub mirrors: Vec<String>,
}

impl SubmissionKind {
    pub fn submission_type(&self) -> SubmissionType {
        match self {
            SubmissionKind::Project(_) => SubmissionType::Projects,
            SubmissionKind::Skin(_) => SubmissionType::Skins,
            SubmissionKind::TexturePack(_) => SubmissionType::TexturePacks,
            SubmissionKind::Mod(_) => SubmissionType::Mods,
            SubmissionKind::Server { .. } => SubmissionType::Servers,
            SubmissionKind::Blog => SubmissionType::Blogs,
        }
    }

    pub fn download(&self) -> Option<&Download> {
        match self {
            SubmissionKind::Project(d)
            | SubmissionKind::Skin(d)
            | SubmissionKind::TexturePack(d)
            | SubmissionKind::Mod(d) => Some(d),
            SubmissionKind::Server { .. } | SubmissionKind::Blog => None,
        }
    }

    pub fn server_ip(&self) -> Option<&str> {
        match self {
            SubmissionKind::Server { ip } => Some(ip),
            _ => None,
        }
    }
}

impl Submission {
    pub fn reference(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: SubmissionState::Reference(None),
        }
    }

    pub fn listed(url: impl Into<String>, summary: SubmissionSummary) -> Self {
        Self {
            url: url.into(),
            state: SubmissionState::Reference(Some(summary)),
        }
    }

    pub fn loaded(url: impl Into<String>, details: SubmissionDetails) -> Self {
        Self {
            url: url.into(),
            state: SubmissionState::Loaded(Box::new(details)),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SubmissionState::Loaded(_))
    }

    pub fn details(&self) -> Result<&SubmissionDetails> {
        self.require("details")
    }

    fn require(&self, field: &'static str) -> Result<&SubmissionDetails> {
        match &self.state {
            SubmissionState::Loaded(details) => Ok(details),
            SubmissionState::Reference(_) => Err(AppError::unloaded(&self.url, field)),
        }
    }

    pub fn kind(&self) -> Result<&SubmissionKind> {
        self.require("kind").map(|d| &d.kind)
    }

    pub fn submission_type(&self) -> Result<SubmissionType> {
        self.require("type").map(|d| d.kind.submission_type())
    }

    pub fn title(&self) -> Result<&str> {
        match &self.state {
            SubmissionState::Loaded(details) => Ok(&details.title),
            SubmissionState::Reference(Some(summary)) => Ok(&summary.title),
            SubmissionState::Reference(None) => Err(AppError::unloaded(&self.url, "title")),
        }
    }

    pub fn author(&self) -> Result<&User> {
        match &self.state {
            SubmissionState::Loaded(details) => Ok(&details.author),
            SubmissionState::Reference(Some(summary)) => Ok(&summary.author),
            SubmissionState::Reference(None) => Err(AppError::unloaded(&self.url, "author")),
        }
    }

    pub fn media(&self) -> Result<&[String]> {
        self.require("media").map(|d| d.media.as_slice())
    }

    pub fn description(&self) -> Result<&str> {
        self.require("description").map(|d| d.description.as_str())
    }

    pub fn tags(&self) -> Result<&[String]> {
        self.require("tags").map(|d| d.tags.as_slice())
    }

    pub fn diamonds(&self) -> Result<i64> {
        self.require("diamonds").map(|d| d.diamonds)
    }

    pub fn views(&self) -> Result<i64> {
        self.require("views").map(|d| d.views)
    }

    pub fn views_today(&self) -> Result<i64> {
        self.require("views_today").map(|d| d.views_today)
    }

    pub fn favorites(&self) -> Result<i64> {
        self.require("favorites").map(|d| d.favorites)
    }

    pub fn id(&self) -> Result<u64> {
        self.require("id").map(|d| d.id)
    }

    pub fn comments(&self) -> Result<&[Comment]> {
        self.require("comments").map(|d| d.comments.as_slice())
    }

    pub fn comment(&self, id: u64) -> Result<Option<&Comment>> {
        Ok(reply::find(self.comments()?, id))
    }

    pub fn timestamp(&self) -> Result<NaiveDateTime> {
        self.require("timestamp").map(|d| d.timestamp)
    }

    /// Download links; `None` for kinds that have no download.
    pub fn download(&self) -> Result<Option<&Download>> {
        self.require("download").map(|d| d.kind.download())
    }

    /// Server address; `None` for kinds other than servers.
    pub fn server_ip(&self) -> Result<Option<&str>> {
        self.require("server_ip").map(|d| d.kind.server_ip())
    }

    /// The loaded form of this submission, through `loader`'s cache.
    pub fn resolve(&self, loader: &mut SubmissionLoader) -> Result<Arc<Submission>> {
        loader.get(&self.url)
    }
}
