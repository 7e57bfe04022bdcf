// src/models/reply.rs

//! Flat reply/comment records.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::User;

/// Parent id carried by top-level replies.
pub const ROOT_ID: u64 = 0;

/// A reply to a forum thread, or a comment on a submission or wall post.
///
/// Records are flat: the tree is expressed through `parent_id` and the
/// `children` ids filled in by [`ReplyTree`](crate::services::ReplyTree)
/// while the page is parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub id: u64,
    pub parent_id: u64,
    pub author: User,
    pub content: String,
    pub timestamp: NaiveDateTime,
    pub votes: i64,
    pub children: Vec<u64>,
}

/// Comments share the reply record.
pub type Comment = Reply;

impl Reply {
    pub fn new(
        id: u64,
        parent_id: u64,
        author: User,
        content: impl Into<String>,
        timestamp: NaiveDateTime,
        votes: i64,
    ) -> Self {
        Self {
            id,
            parent_id,
            author,
            content: content.into(),
            timestamp,
            votes,
            children: Vec::new(),
        }
    }

    /// Whether this reply sits at the top level.
    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_ID
    }
}

/// Look up `id` in a flat reply list.
pub(crate) fn find(replies: &[Reply], id: u64) -> Option<&Reply> {
    replies.iter().find(|r| r.id == id)
}

/// Direct children of `id`, in the order they were linked.
pub(crate) fn children_of(replies: &[Reply], id: u64) -> Vec<&Reply> {
    find(replies, id)
        .map(|parent| {
            parent
                .children
                .iter()
                .filter_map(|child| find(replies, *child))
                .collect()
        })
        .unwrap_or_default()
}
