// src/services/threads.rs

//! Forum thread loader.

use std::ops::Range;
use std::sync::Arc;

use scraper::Html;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Category, Config, Thread, ThreadDetails, ThreadFeed, ThreadSummary, User, Username};
use crate::parser::{ThreadFields, ThreadParser};
use crate::services::{IgnoreList, ListingRow, Paginator, ReplyTree};
use crate::storage::EntityCache;
use crate::utils::http::PageFetcher;
use crate::utils::url::{encode_keywords, join, sub_page};

/// Loads threads and thread listings, caching loaded threads by URL.
pub struct ThreadLoader {
    fetcher: Arc<dyn PageFetcher>,
    origin: Url,
    parser: ThreadParser,
    cache: EntityCache<String, Thread>,
    ignored: IgnoreList,
}

impl ThreadLoader {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher,
            origin: Url::parse(&config.client.base_url)?,
            parser: ThreadParser::new(&config.selectors.thread)?,
            cache: EntityCache::new(),
            ignored: IgnoreList::new(),
        })
    }

    /// The cached thread at `url`, loading it on a miss.
    pub fn get(&mut self, url: &str) -> Result<Arc<Thread>> {
        if let Some(thread) = self.cache.get(url) {
            log::debug!("Thread cache hit: {url}");
            return Ok(thread);
        }
        self.load(url)
    }

    /// Fetch and parse the thread at `url`, replacing any cached copy.
    pub fn load(&mut self, url: &str) -> Result<Arc<Thread>> {
        let base = Url::parse(url)?;
        let doc = self.fetcher.fetch(url)?;
        let fields = self
            .parser
            .thread(&doc, &base)
            .map_err(|e| AppError::missing_post(url, e))?;
        let thread = Thread::loaded(url, details(fields)?);
        Ok(self.cache.put(url.to_string(), Arc::new(thread)))
    }

    /// Whether `url` has been loaded by this loader.
    pub fn is_loaded(&self, url: &str) -> bool {
        self.cache.contains(url)
    }

    /// Newest threads matching `keywords` across the forums.
    pub fn search_threads(&self, keywords: &str, amount: usize) -> Result<Vec<Arc<Thread>>> {
        let path = format!("/forums/search/?keywords={}", encode_keywords(keywords));
        self.take(&path, amount)
    }

    /// Threads matching `keywords` within one category.
    pub fn search_category_threads(
        &self,
        category: Category,
        keywords: &str,
        amount: usize,
    ) -> Result<Vec<Arc<Thread>>> {
        let path = format!(
            "{}search/?keywords={}",
            category.path(),
            encode_keywords(keywords)
        );
        self.take(&path, amount)
    }

    /// Newest threads of a category.
    pub fn get_category(&self, category: Category, amount: usize) -> Result<Vec<Arc<Thread>>> {
        let path = format!("{}{}", category.path(), ThreadFeed::Newest.query());
        self.take(&path, amount)
    }

    pub fn get_category_pages(
        &self,
        category: Category,
        pages: Range<u32>,
    ) -> Result<Vec<Arc<Thread>>> {
        self.range(category.path(), pages)
    }

    pub fn get_feed_category(
        &self,
        category: Category,
        feed: ThreadFeed,
        amount: usize,
    ) -> Result<Vec<Arc<Thread>>> {
        self.take(&format!("{}{}", category.path(), feed.query()), amount)
    }

    pub fn get_feed_category_pages(
        &self,
        category: Category,
        feed: ThreadFeed,
        pages: Range<u32>,
    ) -> Result<Vec<Arc<Thread>>> {
        self.range(&format!("{}{}", category.path(), feed.query()), pages)
    }

    /// Threads across every category, in `feed` order.
    pub fn get_feed_threads(&self, feed: ThreadFeed, amount: usize) -> Result<Vec<Arc<Thread>>> {
        self.take(&format!("/forums/{}", feed.query()), amount)
    }

    pub fn get_feed_pages(&self, feed: ThreadFeed, pages: Range<u32>) -> Result<Vec<Arc<Thread>>> {
        self.range(&format!("/forums/{}", feed.query()), pages)
    }

    /// Newest threads across every category on the given pages.
    pub fn get_pages(&self, pages: Range<u32>) -> Result<Vec<Arc<Thread>>> {
        self.range(&format!("/forums/{}", ThreadFeed::Newest.query()), pages)
    }

    /// Every thread listed on `user`'s forum page, loaded through the cache.
    pub fn load_user_threads(&mut self, user: &User) -> Result<Vec<Arc<Thread>>> {
        let url = sub_page(user.url(), "forum");
        let base = Url::parse(&url)?;
        let doc = self.fetcher.fetch(&url)?;
        let links = self.parser.member_threads(&doc, &base);
        log::debug!("{} threads listed at {url}", links.len());
        links.iter().map(|link| self.get(link)).collect()
    }

    /// Hide listing rows by these members.
    pub fn ignore_users<I>(&mut self, users: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Username,
    {
        self.ignored.ignore_users(users)?;
        Ok(self)
    }

    pub fn remove_ignored_user(&mut self, user: impl Username) -> Result<bool> {
        self.ignored.remove(user)
    }

    pub fn ignored_usernames(&self) -> Vec<String> {
        self.ignored.names()
    }

    fn take(&self, path: &str, amount: usize) -> Result<Vec<Arc<Thread>>> {
        let url = join(self.origin.as_str(), path);
        Paginator::new(self.fetcher.as_ref(), &self.ignored).take(&url, amount, |doc| self.rows(doc))
    }

    fn range(&self, path: &str, pages: Range<u32>) -> Result<Vec<Arc<Thread>>> {
        let url = join(self.origin.as_str(), path);
        Paginator::new(self.fetcher.as_ref(), &self.ignored).range(&url, pages, |doc| self.rows(doc))
    }

    fn rows(&self, doc: &Html) -> Vec<ListingRow<Arc<Thread>>> {
        self.parser
            .listing(doc, &self.origin)
            .into_iter()
            .map(|row| ListingRow {
                author: row.author.name.clone(),
                item: Arc::new(Thread::listed(
                    row.url,
                    ThreadSummary {
                        title: row.title,
                        author: row.author.into_user(),
                        category: row.category,
                    },
                )),
            })
            .collect()
    }
}

fn details(fields: ThreadFields) -> Result<ThreadDetails> {
    Ok(ThreadDetails {
        category: fields.category,
        title: fields.title,
        content: fields.content,
        author: fields.author.into_user(),
        votes: fields.votes,
        views: fields.views,
        id: fields.id,
        locked: fields.locked,
        timestamp: fields.timestamp,
        replies: ReplyTree::build(fields.replies)?,
    })
}
