// src/services/walls.rs

//! Wall post loader.

use std::ops::Range;
use std::sync::Arc;

use scraper::Html;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, User, Username, WallPost, WallPostDetails, WallPostSummary};
use crate::parser::WallParser;
use crate::services::{IgnoreList, ListingRow, Paginator, ReplyTree};
use crate::storage::EntityCache;
use crate::utils::http::PageFetcher;
use crate::utils::url::sub_page;

/// Loads posts from member walls.
pub struct WallPostLoader {
    fetcher: Arc<dyn PageFetcher>,
    parser: WallParser,
    cache: EntityCache<String, WallPost>,
    ignored: IgnoreList,
}

impl WallPostLoader {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher,
            parser: WallParser::new(&config.selectors.wall)?,
            cache: EntityCache::new(),
            ignored: IgnoreList::new(),
        })
    }

    pub fn get(&mut self, url: &str) -> Result<Arc<WallPost>> {
        if let Some(post) = self.cache.get(url) {
            log::debug!("Wall post cache hit: {url}");
            return Ok(post);
        }
        self.load(url)
    }

    pub fn load(&mut self, url: &str) -> Result<Arc<WallPost>> {
        let base = Url::parse(url)?;
        let doc = self.fetcher.fetch(url)?;
        let fields = self
            .parser
            .post(&doc, &base)
            .map_err(|e| AppError::missing_post(url, e))?;
        let post = WallPost::loaded(
            url,
            WallPostDetails {
                author: fields.author.into_user(),
                id: fields.id,
                content: fields.content,
                likes: fields.likes,
                timestamp: fields.timestamp,
                comments: ReplyTree::build(fields.comments)?,
            },
        );
        Ok(self.cache.put(url.to_string(), Arc::new(post)))
    }

    pub fn is_loaded(&self, url: &str) -> bool {
        self.cache.contains(url)
    }

    /// Every post on the first page of `user`'s wall, loaded through the cache.
    pub fn load_user_wall_posts(&mut self, user: &User) -> Result<Vec<Arc<WallPost>>> {
        let url = sub_page(user.url(), "wall");
        let base = Url::parse(&url)?;
        let doc = self.fetcher.fetch(&url)?;
        let links = self.parser.member_wall(&doc, &base);
        log::debug!("{} wall posts listed at {url}", links.len());
        links.iter().map(|link| self.get(link)).collect()
    }

    /// The latest `amount` posts on `user`'s wall.
    pub fn get_wall_posts(&self, user: &User, amount: usize) -> Result<Vec<Arc<WallPost>>> {
        let url = sub_page(user.url(), "wall");
        let base = Url::parse(&url)?;
        Paginator::new(self.fetcher.as_ref(), &self.ignored)
            .take(&url, amount, |doc| self.rows(doc, &base))
    }

    pub fn get_wall_pages(&self, user: &User, pages: Range<u32>) -> Result<Vec<Arc<WallPost>>> {
        let url = sub_page(user.url(), "wall");
        let base = Url::parse(&url)?;
        Paginator::new(self.fetcher.as_ref(), &self.ignored)
            .range(&url, pages, |doc| self.rows(doc, &base))
    }

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

    fn rows(&self, doc: &Html, base: &Url) -> Vec<ListingRow<Arc<WallPost>>> {
        self.parser
            .listing(doc, base)
            .into_iter()
            .map(|row| ListingRow {
                author: row.author.name.clone(),
                item: Arc::new(WallPost::listed(
                    row.url,
                    WallPostSummary {
                        author: row.author.into_user(),
                    },
                )),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::{self, BASE, FixtureFetcher};

    fn post_url(id: u64) -> String {
        format!("{BASE}/member/steve/wall/post/{id}/")
    }

    fn wall() -> String {
        format!("{BASE}/member/steve/wall/")
    }

    fn loader(fetcher: FixtureFetcher) -> (Arc<FixtureFetcher>, WallPostLoader) {
        let fetcher = Arc::new(fetcher);
        let loader = WallPostLoader::new(fetcher.clone(), &Config::default()).unwrap();
        (fetcher, loader)
    }

    fn steve() -> User {
        User::named(format!("{BASE}/member/steve/"), "steve")
    }

    #[test]
    fn test_load_post_with_comments() {
        let url = post_url(9);
        let (fetcher, mut loader) =
            loader(FixtureFetcher::new().with(&url, testing::wall_post_page(9, &[1, 2])));

        let post = loader.get(&url).unwrap();
        let again = loader.get(&url).unwrap();

        assert!(Arc::ptr_eq(&post, &again));
        assert_eq!(fetcher.hits(&url), 1);
        assert_eq!(post.id().ok(), Some(9));
        assert_eq!(post.likes().ok(), Some(7));
        assert_eq!(post.comments().unwrap().len(), 2);
        assert!(post.comments().unwrap().iter().all(|c| c.is_root()));
    }

    #[test]
    fn test_deleted_post_is_missing_post() {
        let url = post_url(10);
        let (_, mut loader) = loader(FixtureFetcher::new().with(&url, "<p>gone</p>"));
        assert!(loader.load(&url).unwrap_err().is_missing_post());
    }

    #[test]
    fn test_load_user_wall_posts() {
        let (fetcher, mut loader) = loader(
            FixtureFetcher::new()
                .with(wall(), testing::wall_listing(&[(1, "alex"), (2, "bob")]))
                .with(post_url(1), testing::wall_post_page(1, &[]))
                .with(post_url(2), testing::wall_post_page(2, &[])),
        );

        let posts = loader.load_user_wall_posts(&steve()).unwrap();

        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.is_loaded()));
        assert!(loader.is_loaded(&post_url(2)));
        assert_eq!(fetcher.total(), 3);
    }

    #[test]
    fn test_wall_pagination_with_ignore_list() {
        let (_, mut loader) = loader(
            FixtureFetcher::new()
                .with(wall(), testing::wall_listing(&[(1, "alex"), (2, "bob")]))
                .with(
                    format!("{}?p=2", wall()),
                    testing::wall_listing(&[(3, "alex"), (4, "carl")]),
                ),
        );
        loader.ignore_users(["bob"]).unwrap();

        let posts = loader.get_wall_posts(&steve(), 3).unwrap();

        let urls: Vec<_> = posts.iter().map(|p| p.url().to_string()).collect();
        assert_eq!(urls, vec![post_url(1), post_url(3), post_url(4)]);
        assert!(posts.iter().all(|p| !p.is_loaded()));
    }

    #[test]
    fn test_wall_page_range() {
        let (fetcher, loader) = loader(
            FixtureFetcher::new()
                .with(format!("{}?p=2", wall()), testing::wall_listing(&[(5, "alex")])),
        );
        let posts = loader.get_wall_pages(&steve(), 2..3).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].author().and_then(|a| a.name()).ok(), Some("alex"));
        assert_eq!(fetcher.total(), 1);
    }
}
