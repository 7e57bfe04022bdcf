// src/services/tree.rs

//! Reply tree reconstruction for one page load.

use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::{ROOT_ID, Reply};
use crate::parser::ReplyFields;

/// Registry linking flat replies under their parents.
///
/// A tree lives for a single detail page. Replies must arrive in page order:
/// a parent is registered before any reply that answers it.
#[derive(Debug, Default)]
pub struct ReplyTree {
    records: Vec<Reply>,
    index: HashMap<u64, usize>,
}

impl ReplyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `reply` and append its id to its parent's children.
    pub fn insert(&mut self, reply: Reply) -> Result<()> {
        if reply.parent_id != ROOT_ID {
            let parent = self
                .index
                .get(&reply.parent_id)
                .copied()
                .ok_or(AppError::OrphanReply {
                    id: reply.id,
                    parent: reply.parent_id,
                })?;
            self.records[parent].children.push(reply.id);
        }
        self.index.insert(reply.id, self.records.len());
        self.records.push(reply);
        Ok(())
    }

    pub fn get(&self, id: u64) -> Option<&Reply> {
        self.index.get(&id).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The linked replies in insertion order.
    pub fn into_records(self) -> Vec<Reply> {
        self.records
    }

    /// Link replies read from a page, keeping page order.
    pub fn build(fields: Vec<ReplyFields>) -> Result<Vec<Reply>> {
        let mut tree = Self::new();
        for field in fields {
            tree.insert(Reply::new(
                field.id,
                field.parent_id,
                field.author.into_user(),
                field.content,
                field.timestamp,
                field.votes,
            ))?;
        }
        Ok(tree.into_records())
    }
}
