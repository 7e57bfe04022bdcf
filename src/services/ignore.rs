// src/services/ignore.rs

//! Per-loader ignore lists.

use std::collections::HashSet;

use crate::error::Result;
use crate::models::Username;

/// Member names whose rows are dropped from listings.
///
/// Only listing pages consult the list; loading a post by URL never does.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    names: HashSet<String>,
}

impl IgnoreList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore every member in `users`.
    ///
    /// Fails on the first member whose name is not known, leaving earlier
    /// names added.
    pub fn ignore_users<I>(&mut self, users: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Username,
    {
        for user in users {
            let name = user.username()?;
            log::debug!("Ignoring rows by {name}");
            self.names.insert(name);
        }
        Ok(())
    }

    /// Stop ignoring `user`. Returns whether the name was present.
    pub fn remove(&mut self, user: impl Username) -> Result<bool> {
        Ok(self.names.remove(&user.username()?))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Ignored names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.iter().cloned().collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
