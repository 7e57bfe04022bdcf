// src/services/users.rs

//! Member profile loader.

use std::ops::Range;
use std::sync::Arc;

use scraper::Html;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, User, UserProfile, Username};
use crate::parser::{MemberRow, UserParser};
use crate::services::{IgnoreList, ListingRow, Paginator};
use crate::storage::EntityCache;
use crate::utils::http::PageFetcher;
use crate::utils::url::{encode_keywords, join, sub_page};

/// Loads member profiles and member listings.
///
/// A profile spans four pages: the profile itself, `about/`, `subscribers/`
/// and `subscriptions/`.
pub struct UserLoader {
    fetcher: Arc<dyn PageFetcher>,
    origin: Url,
    parser: UserParser,
    cache: EntityCache<String, User>,
    ignored: IgnoreList,
}

impl UserLoader {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher,
            origin: Url::parse(&config.client.base_url)?,
            parser: UserParser::new(&config.selectors.user)?,
            cache: EntityCache::new(),
            ignored: IgnoreList::new(),
        })
    }

    pub fn get(&mut self, url: &str) -> Result<Arc<User>> {
        if let Some(user) = self.cache.get(url) {
            log::debug!("User cache hit: {url}");
            return Ok(user);
        }
        self.load(url)
    }

    /// Fetch every profile page of `url`, replacing any cached copy.
    pub fn load(&mut self, url: &str) -> Result<Arc<User>> {
        let missing = |e| AppError::missing_post(url, e);

        let doc = self.fetcher.fetch(url)?;
        let profile = self.parser.profile(&doc).map_err(missing)?;
        let doc = self.fetcher.fetch(&sub_page(url, "about"))?;
        let about = self.parser.about(&doc).map_err(missing)?;
        let subscribers = self.members(&sub_page(url, "subscribers"))?;
        let subscriptions = self.members(&sub_page(url, "subscriptions"))?;

        let user = User::loaded(
            url,
            UserProfile {
                name: profile.name,
                about: about.about,
                rank_class: about.rank_class,
                xp: about.xp,
                id: profile.id,
                profile_views: about.profile_views,
                level: about.level,
                joined: about.joined,
                subscribers: subscribers.into_iter().map(MemberRow::into_user).collect(),
                subscriptions: subscriptions.into_iter().map(MemberRow::into_user).collect(),
            },
        );
        Ok(self.cache.put(url.to_string(), Arc::new(user)))
    }

    pub fn is_loaded(&self, url: &str) -> bool {
        self.cache.contains(url)
    }

    fn members(&self, url: &str) -> Result<Vec<MemberRow>> {
        let base = Url::parse(url)?;
        let doc = self.fetcher.fetch(url)?;
        Ok(self.parser.team(&doc, &base))
    }

    /// Load every member subscribed to `user`.
    pub fn load_user_subscribers(&mut self, user: &User) -> Result<Vec<Arc<User>>> {
        self.load_members(&sub_page(user.url(), "subscribers"))
    }

    /// Load every member `user` subscribes to.
    pub fn load_user_subscriptions(&mut self, user: &User) -> Result<Vec<Arc<User>>> {
        self.load_members(&sub_page(user.url(), "subscriptions"))
    }

    fn load_members(&mut self, url: &str) -> Result<Vec<Arc<User>>> {
        let members = self.members(url)?;
        log::debug!("{} members listed at {url}", members.len());
        members.iter().map(|member| self.get(&member.url)).collect()
    }

    /// Members whose names match `keywords`.
    pub fn search_members(&self, keywords: &str, amount: usize) -> Result<Vec<Arc<User>>> {
        let url = join(
            self.origin.as_str(),
            &format!("/members/?keywords={}", encode_keywords(keywords)),
        );
        Paginator::new(self.fetcher.as_ref(), &self.ignored)
            .take(&url, amount, |doc| self.rows(doc))
    }

    pub fn get_member_pages(&self, pages: Range<u32>) -> Result<Vec<Arc<User>>> {
        let url = join(self.origin.as_str(), "/members/");
        Paginator::new(self.fetcher.as_ref(), &self.ignored)
            .range(&url, pages, |doc| self.rows(doc))
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

    fn rows(&self, doc: &Html) -> Vec<ListingRow<Arc<User>>> {
        self.parser
            .listing(doc, &self.origin)
            .into_iter()
            .map(|member| ListingRow {
                author: member.name.clone(),
                item: Arc::new(member.into_user()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::{self, BASE, FixtureFetcher};

    fn member(name: &str) -> String {
        format!("{BASE}/member/{name}/")
    }

    /// Serve a full profile for `name` with the given subscribers.
    fn with_profile(
        fetcher: FixtureFetcher,
        name: &str,
        id: u64,
        subscribers: &[&str],
    ) -> FixtureFetcher {
        let url = member(name);
        fetcher
            .with(&url, testing::profile_page(name, id))
            .with(format!("{url}about/"), testing::about_page())
            .with(format!("{url}subscribers/"), testing::team_page(subscribers))
            .with(format!("{url}subscriptions/"), testing::team_page(&[]))
    }

    fn loader(fetcher: FixtureFetcher) -> (Arc<FixtureFetcher>, UserLoader) {
        let fetcher = Arc::new(fetcher);
        let loader = UserLoader::new(fetcher.clone(), &Config::default()).unwrap();
        (fetcher, loader)
    }

    #[test]
    fn test_load_reads_four_pages() {
        let (fetcher, mut loader) =
            loader(with_profile(FixtureFetcher::new(), "steve", 42, &["alex", "bob"]));

        let user = loader.get(&member("steve")).unwrap();

        assert_eq!(fetcher.total(), 4);
        assert_eq!(user.name().ok(), Some("steve"));
        assert_eq!(user.id().ok(), Some(42));
        assert_eq!(user.level().ok(), Some(31));
        assert_eq!(user.xp().ok(), Some(1200));
        assert_eq!(user.about().ok(), Some("I build castles."));
        let subscribers = user.subscribers().unwrap();
        assert_eq!(subscribers.len(), 2);
        assert!(!subscribers[0].is_loaded());
        assert_eq!(subscribers[1].name().ok(), Some("bob"));
        assert!(user.subscriptions().unwrap().is_empty());
    }

    #[test]
    fn test_get_is_memoized() {
        let (fetcher, mut loader) = loader(with_profile(FixtureFetcher::new(), "steve", 1, &[]));
        let first = loader.get(&member("steve")).unwrap();
        let second = loader.get(&member("steve")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetcher.total(), 4);
    }

    #[test]
    fn test_missing_profile_is_missing_post() {
        let url = member("ghost");
        let (_, mut loader) = loader(FixtureFetcher::new().with(&url, "<html><body></body></html>"));
        assert!(loader.load(&url).unwrap_err().is_missing_post());
    }

    #[test]
    fn test_load_user_subscribers_resolves_through_cache() {
        let fetcher = with_profile(FixtureFetcher::new(), "steve", 1, &["alex"]);
        let fetcher = with_profile(fetcher, "alex", 2, &[]);
        let (fetcher, mut loader) = loader(fetcher);
        let alex = loader.get(&member("alex")).unwrap();
        let steve = User::reference(member("steve"));

        let subscribers = loader.load_user_subscribers(&steve).unwrap();

        assert_eq!(subscribers.len(), 1);
        assert!(Arc::ptr_eq(&subscribers[0], &alex));
        assert_eq!(fetcher.hits(&format!("{}subscribers/", member("steve"))), 1);
        assert_eq!(fetcher.hits(&member("alex")), 1);
    }

    #[test]
    fn test_search_members_skips_ignored() {
        let url = format!("{BASE}/members/?keywords=st");
        let (_, mut loader) = loader(
            FixtureFetcher::new()
                .with(&url, testing::team_page(&["steve", "stan", "stu"]))
                .with(format!("{url}&p=2"), testing::team_page(&["stella"])),
        );
        loader.ignore_users(["stan"]).unwrap();

        let found = loader.search_members("st", 3).unwrap();
        let names: Vec<_> = found.iter().map(|u| u.name().unwrap().to_string()).collect();
        assert_eq!(names, vec!["steve", "stu", "stella"]);
    }

    #[test]
    fn test_resolve_reference() {
        let (_, mut loader) = loader(with_profile(FixtureFetcher::new(), "steve", 9, &[]));
        let reference = User::named(member("steve"), "steve");
        let loaded = reference.resolve(&mut loader).unwrap();
        assert!(loaded.is_loaded());
        assert_eq!(loaded.id().ok(), Some(9));
    }
}
