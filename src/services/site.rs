// src/services/site.rs

//! Entry point owning one loader per entity kind.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Config, Username};
use crate::services::{SubmissionLoader, ThreadLoader, UserLoader, WallPostLoader};
use crate::utils::http::{HttpFetcher, PageFetcher};

/// The site, seen through its four loaders.
///
/// Loaders share one fetcher but keep separate caches and ignore lists.
pub struct Site {
    forums: ThreadLoader,
    submissions: SubmissionLoader,
    users: UserLoader,
    walls: WallPostLoader,
}

impl Site {
    /// Validate `config` and connect over HTTP.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let fetcher = Arc::new(HttpFetcher::new(&config.client)?);
        Self::with_fetcher(fetcher, config)
    }

    /// Build the loaders over any page source.
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, config: &Config) -> Result<Self> {
        Ok(Self {
            forums: ThreadLoader::new(Arc::clone(&fetcher), config)?,
            submissions: SubmissionLoader::new(Arc::clone(&fetcher), config)?,
            users: UserLoader::new(Arc::clone(&fetcher), config)?,
            walls: WallPostLoader::new(fetcher, config)?,
        })
    }

    pub fn forums(&mut self) -> &mut ThreadLoader {
        &mut self.forums
    }

    pub fn submissions(&mut self) -> &mut SubmissionLoader {
        &mut self.submissions
    }

    pub fn users(&mut self) -> &mut UserLoader {
        &mut self.users
    }

    pub fn walls(&mut self) -> &mut WallPostLoader {
        &mut self.walls
    }

    /// Add the same names to every loader's ignore list.
    pub fn ignore_everywhere<U: Username>(&mut self, users: &[U]) -> Result<()> {
        self.forums.ignore_users(users)?;
        self.submissions.ignore_users(users)?;
        self.users.ignore_users(users)?;
        self.walls.ignore_users(users)?;
        Ok(())
    }
}
