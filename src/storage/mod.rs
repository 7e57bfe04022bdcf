//! In-memory entity storage.
//!
//! Every loader owns one [`EntityCache`] keyed by canonical page URL. Entries
//! live as long as the loader; nothing is persisted.

pub mod cache;

// Re-export for convenience
pub use cache::EntityCache;
