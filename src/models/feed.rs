// src/models/feed.rs

//! Listing orders and submission types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Sort order for forum thread listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadFeed {
    Hot,
    Newest,
    Active,
    Best,
}

impl ThreadFeed {
    pub const ALL: [ThreadFeed; 4] = [
        ThreadFeed::Hot,
        ThreadFeed::Newest,
        ThreadFeed::Active,
        ThreadFeed::Best,
    ];

    /// Query string selecting this order.
    pub fn query(&self) -> &'static str {
        match self {
            ThreadFeed::Hot => "?thread_sort=hotness",
            ThreadFeed::Newest => "?thread_sort=newest",
            ThreadFeed::Active => "?thread_sort=active",
            ThreadFeed::Best => "?thread_sort=score",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ThreadFeed::Hot => "hot",
            ThreadFeed::Newest => "newest",
            ThreadFeed::Active => "active",
            ThreadFeed::Best => "best",
        }
    }
}

impl FromStr for ThreadFeed {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| AppError::invalid_argument(format!("unknown thread feed '{s}'")))
    }
}

/// Sort order for submission listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionFeed {
    Trending,
    Updated,
    New,
    Best,
    Views,
    Downloads,
}

impl SubmissionFeed {
    pub const ALL: [SubmissionFeed; 6] = [
        SubmissionFeed::Trending,
        SubmissionFeed::Updated,
        SubmissionFeed::New,
        SubmissionFeed::Best,
        SubmissionFeed::Views,
        SubmissionFeed::Downloads,
    ];

    /// Query string selecting this order.
    pub fn query(&self) -> &'static str {
        match self {
            SubmissionFeed::Trending => "?order=order_hot",
            SubmissionFeed::Updated => "?order=order_updated",
            SubmissionFeed::New => "?order=order_latest",
            SubmissionFeed::Best => "?order=order_popularity",
            SubmissionFeed::Views => "?order=order_views",
            SubmissionFeed::Downloads => "?order=order_downloads",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SubmissionFeed::Trending => "trending",
            SubmissionFeed::Updated => "updated",
            SubmissionFeed::New => "new",
            SubmissionFeed::Best => "best",
            SubmissionFeed::Views => "views",
            SubmissionFeed::Downloads => "downloads",
        }
    }
}

impl FromStr for SubmissionFeed {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| AppError::invalid_argument(format!("unknown submission feed '{s}'")))
    }
}

/// The kinds of submission the site lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionType {
    Projects,
    Skins,
    TexturePacks,
    Servers,
    Mods,
    Blogs,
}

impl SubmissionType {
    pub const ALL: [SubmissionType; 6] = [
        SubmissionType::Projects,
        SubmissionType::Skins,
        SubmissionType::TexturePacks,
        SubmissionType::Servers,
        SubmissionType::Mods,
        SubmissionType::Blogs,
    ];

    /// Path segment under `/resources/`.
    pub fn segment(&self) -> &'static str {
        match self {
            SubmissionType::Projects => "projects",
            SubmissionType::Skins => "skins",
            SubmissionType::TexturePacks => "texture_packs",
            SubmissionType::Servers => "servers",
            SubmissionType::Mods => "mods",
            SubmissionType::Blogs => "blogs",
        }
    }

    /// Label printed in a submission page's context bar.
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionType::Projects => "Projects",
            SubmissionType::Skins => "Skins",
            SubmissionType::TexturePacks => "Texture Packs",
            SubmissionType::Servers => "Servers",
            SubmissionType::Mods => "Mods",
            SubmissionType::Blogs => "Blogs",
        }
    }

    /// Map a context-bar label back to its type.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for SubmissionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|t| t.segment() == wanted)
            .or_else(|| Self::from_label(s))
            .ok_or_else(|| AppError::invalid_argument(format!("unknown submission type '{s}'")))
    }
}

/// Blog sub-categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlogCategory {
    #[default]
    All,
    Article,
    Tutorial,
    Review,
    Interview,
    Story,
    LetsPlay,
    Art,
    Comic,
    Other,
}

impl BlogCategory {
    pub const ALL: [BlogCategory; 10] = [
        BlogCategory::All,
        BlogCategory::Article,
        BlogCategory::Tutorial,
        BlogCategory::Review,
        BlogCategory::Interview,
        BlogCategory::Story,
        BlogCategory::LetsPlay,
        BlogCategory::Art,
        BlogCategory::Comic,
        BlogCategory::Other,
    ];

    /// Path segment under `/resources/blogs/`; empty for all blogs.
    pub fn segment(&self) -> &'static str {
        match self {
            BlogCategory::All => "",
            BlogCategory::Article => "article",
            BlogCategory::Tutorial => "tutorial",
            BlogCategory::Review => "review",
            BlogCategory::Interview => "interview",
            BlogCategory::Story => "story",
            BlogCategory::LetsPlay => "letsplay",
            BlogCategory::Art => "art",
            BlogCategory::Comic => "comic",
            BlogCategory::Other => "other",
        }
    }
}

impl FromStr for BlogCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(BlogCategory::All);
        }
        Self::ALL
            .into_iter()
            .find(|c| !c.segment().is_empty() && c.segment() == wanted)
            .ok_or_else(|| AppError::invalid_argument(format!("unknown blog category '{s}'")))
    }
}
