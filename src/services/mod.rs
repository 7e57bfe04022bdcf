//! Loaders and the machinery they share.
//!
//! - Per-kind loaders (`ThreadLoader`, `SubmissionLoader`, `UserLoader`, `WallPostLoader`)
//! - Listing pagination with ignore lists (`Paginator`, `IgnoreList`)
//! - Reply tree reconstruction (`ReplyTree`)
//! - The `Site` facade owning one loader of each kind

mod ignore;
mod pagination;
mod site;
mod submissions;
mod threads;
mod tree;
mod users;
mod walls;

pub use ignore::IgnoreList;
pub use pagination::{ListingRow, Paginator};
pub use site::Site;
pub use submissions::SubmissionLoader;
pub use threads::ThreadLoader;
pub use tree::ReplyTree;
pub use users::UserLoader;
pub use walls::WallPostLoader;

use std::collections::HashSet;

use crate::models::{Submission, Thread, User, WallPost};

/// An entity addressed by its page URL.
pub trait Resource {
    fn url(&self) -> &str;
}

impl Resource for Thread {
    fn url(&self) -> &str {
        Thread::url(self)
    }
}

impl Resource for Submission {
    fn url(&self) -> &str {
        Submission::url(self)
    }
}

impl Resource for User {
    fn url(&self) -> &str {
        User::url(self)
    }
}

impl Resource for WallPost {
    fn url(&self) -> &str {
        WallPost::url(self)
    }
}

impl<T: Resource + ?Sized> Resource for std::sync::Arc<T> {
    fn url(&self) -> &str {
        (**self).url()
    }
}

/// Drop later entries whose URL was already seen, keeping order.
///
/// Listings shift while they are paged, so one row can show up on two pages.
pub fn distinct_by_url<T: Resource>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.url().to_string()))
        .collect()
}
