// src/services/submissions.rs

//! Submission loader.

use std::ops::Range;
use std::sync::Arc;

use scraper::Html;
use url::Url;

use crate::error::{AppError, ParseError, Result};
use crate::models::{
    BlogCategory, Config, Download, Submission, SubmissionDetails, SubmissionFeed, SubmissionKind,
    SubmissionSummary, SubmissionType, User, Username,
};
use crate::parser::{SubmissionFields, SubmissionParser};
use crate::services::{IgnoreList, ListingRow, Paginator, ReplyTree};
use crate::storage::EntityCache;
use crate::utils::http::PageFetcher;
use crate::utils::url::{encode_keywords, join, sub_page};

/// Loads submissions of every kind and submission listings.
pub struct SubmissionLoader {
    fetcher: Arc<dyn PageFetcher>,
    origin: Url,
    parser: SubmissionParser,
    cache: EntityCache<String, Submission>,
    ignored: IgnoreList,
}

impl SubmissionLoader {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher,
            origin: Url::parse(&config.client.base_url)?,
            parser: SubmissionParser::new(&config.selectors.submission)?,
            cache: EntityCache::new(),
            ignored: IgnoreList::new(),
        })
    }

    pub fn get(&mut self, url: &str) -> Result<Arc<Submission>> {
        if let Some(submission) = self.cache.get(url) {
            log::debug!("Submission cache hit: {url}");
            return Ok(submission);
        }
        self.load(url)
    }

    /// Fetch and parse the submission at `url`, replacing any cached copy.
    ///
    /// The kind comes from the page's type label; a label with no known kind
    /// is [`AppError::UnsupportedType`].
    pub fn load(&mut self, url: &str) -> Result<Arc<Submission>> {
        let base = Url::parse(url)?;
        let doc = self.fetcher.fetch(url)?;

        let label = self
            .parser
            .type_label(&doc)
            .map_err(|e| AppError::missing_post(url, e))?;
        let submission_type =
            SubmissionType::from_label(&label).ok_or_else(|| AppError::UnsupportedType {
                url: url.to_string(),
                label: label.clone(),
            })?;

        let fields = self
            .parser
            .submission(&doc, &base)
            .map_err(|e| AppError::missing_post(url, e))?;
        let kind = self.kind(url, submission_type, &fields)?;
        let submission = Submission::loaded(url, details(kind, fields)?);
        Ok(self.cache.put(url.to_string(), Arc::new(submission)))
    }

    pub fn is_loaded(&self, url: &str) -> bool {
        self.cache.contains(url)
    }

    fn kind(
        &self,
        url: &str,
        submission_type: SubmissionType,
        fields: &SubmissionFields,
    ) -> Result<SubmissionKind> {
        let kind = match submission_type {
            SubmissionType::Projects => SubmissionKind::Project(download(&fields.downloads, 0)),
            // The first action on a skin page is the preview
            SubmissionType::Skins => SubmissionKind::Skin(download(&fields.downloads, 1)),
            SubmissionType::TexturePacks => {
                SubmissionKind::TexturePack(download(&fields.downloads, 0))
            }
            SubmissionType::Mods => SubmissionKind::Mod(download(&fields.downloads, 0)),
            SubmissionType::Servers => {
                let ip = fields.server_ip.clone().ok_or_else(|| {
                    AppError::missing_post(url, ParseError::missing(self.parser.server_ip_selector()))
                })?;
                SubmissionKind::Server { ip }
            }
            SubmissionType::Blogs => SubmissionKind::Blog,
        };
        Ok(kind)
    }

    /// Submissions of type `submission_type` matching `keywords`.
    pub fn search_submissions(
        &self,
        keywords: &str,
        submission_type: SubmissionType,
        amount: usize,
    ) -> Result<Vec<Arc<Submission>>> {
        let path = format!(
            "/resources/{}/?keywords={}",
            submission_type.segment(),
            encode_keywords(keywords)
        );
        self.take(&path, amount)
    }

    pub fn search_submissions_feed(
        &self,
        keywords: &str,
        submission_type: SubmissionType,
        feed: SubmissionFeed,
        amount: usize,
    ) -> Result<Vec<Arc<Submission>>> {
        let path = format!(
            "/resources/{}/{}&keywords={}",
            submission_type.segment(),
            feed.query(),
            encode_keywords(keywords)
        );
        self.take(&path, amount)
    }

    /// Newest blogs of a category.
    pub fn get_blogs(&self, category: BlogCategory, amount: usize) -> Result<Vec<Arc<Submission>>> {
        self.get_blogs_feed(category, SubmissionFeed::New, amount)
    }

    pub fn get_blogs_feed(
        &self,
        category: BlogCategory,
        feed: SubmissionFeed,
        amount: usize,
    ) -> Result<Vec<Arc<Submission>>> {
        self.take(&blog_path(category, feed), amount)
    }

    pub fn get_blog_pages(
        &self,
        category: BlogCategory,
        pages: Range<u32>,
    ) -> Result<Vec<Arc<Submission>>> {
        self.get_blog_feed_pages(category, SubmissionFeed::New, pages)
    }

    pub fn get_blog_feed_pages(
        &self,
        category: BlogCategory,
        feed: SubmissionFeed,
        pages: Range<u32>,
    ) -> Result<Vec<Arc<Submission>>> {
        self.range(&blog_path(category, feed), pages)
    }

    /// Newest submissions of a type other than blogs.
    pub fn get_type(
        &self,
        submission_type: SubmissionType,
        amount: usize,
    ) -> Result<Vec<Arc<Submission>>> {
        self.get_type_feed(submission_type, SubmissionFeed::New, amount)
    }

    pub fn get_type_feed(
        &self,
        submission_type: SubmissionType,
        feed: SubmissionFeed,
        amount: usize,
    ) -> Result<Vec<Arc<Submission>>> {
        self.take(&type_path(submission_type, feed)?, amount)
    }

    pub fn get_type_pages(
        &self,
        submission_type: SubmissionType,
        pages: Range<u32>,
    ) -> Result<Vec<Arc<Submission>>> {
        self.get_feed_type_pages(submission_type, SubmissionFeed::New, pages)
    }

    pub fn get_feed_type_pages(
        &self,
        submission_type: SubmissionType,
        feed: SubmissionFeed,
        pages: Range<u32>,
    ) -> Result<Vec<Arc<Submission>>> {
        self.range(&type_path(submission_type, feed)?, pages)
    }

    /// Every submission on `user`'s submissions page, loaded through the cache.
    pub fn load_user_submissions(&mut self, user: &User) -> Result<Vec<Arc<Submission>>> {
        let url = sub_page(user.url(), "submissions");
        let base = Url::parse(&url)?;
        let doc = self.fetcher.fetch(&url)?;
        let links = self.parser.member_submissions(&doc, &base);
        log::debug!("{} submissions listed at {url}", links.len());
        links.iter().map(|link| self.get(link)).collect()
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

    fn take(&self, path: &str, amount: usize) -> Result<Vec<Arc<Submission>>> {
        let url = join(self.origin.as_str(), path);
        Paginator::new(self.fetcher.as_ref(), &self.ignored)
            .take(&url, amount, |doc| self.rows(doc))
    }

    fn range(&self, path: &str, pages: Range<u32>) -> Result<Vec<Arc<Submission>>> {
        let url = join(self.origin.as_str(), path);
        Paginator::new(self.fetcher.as_ref(), &self.ignored)
            .range(&url, pages, |doc| self.rows(doc))
    }

    fn rows(&self, doc: &Html) -> Vec<ListingRow<Arc<Submission>>> {
        self.parser
            .listing(doc, &self.origin)
            .into_iter()
            .map(|row| ListingRow {
                author: row.author.name.clone(),
                item: Arc::new(Submission::listed(
                    row.url,
                    SubmissionSummary {
                        title: row.title,
                        author: row.author.into_user(),
                    },
                )),
            })
            .collect()
    }
}

/// Listing path of a type; blogs have their own listings.
fn type_path(submission_type: SubmissionType, feed: SubmissionFeed) -> Result<String> {
    if submission_type == SubmissionType::Blogs {
        return Err(AppError::invalid_argument(
            "blogs are listed by blog category, not by submission type",
        ));
    }
    Ok(format!(
        "/resources/{}/{}",
        submission_type.segment(),
        feed.query()
    ))
}

fn blog_path(category: BlogCategory, feed: SubmissionFeed) -> String {
    match category.segment() {
        "" => format!("/resources/blogs/{}", feed.query()),
        segment => format!("/resources/blogs/{segment}/{}", feed.query()),
    }
}

/// Primary link at `primary`; every later link is a mirror.
fn download(links: &[String], primary: usize) -> Download {
    Download {
        url: links.get(primary).cloned(),
        mirrors: links.iter().skip(primary + 1).cloned().collect(),
    }
}

fn details(kind: SubmissionKind, fields: SubmissionFields) -> Result<SubmissionDetails> {
    Ok(SubmissionDetails {
        kind,
        title: fields.title,
        media: fields.media,
        description: fields.description,
        tags: fields.tags,
        author: fields.author.into_user(),
        diamonds: fields.diamonds,
        views: fields.views,
        views_today: fields.views_today,
        favorites: fields.favorites,
        id: fields.id,
        comments: ReplyTree::build(fields.comments)?,
        timestamp: fields.timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::{self, BASE, FixtureFetcher};

    fn project_url(slug: &str) -> String {
        format!("{BASE}/project/{slug}/")
    }

    fn loader(fetcher: FixtureFetcher) -> (Arc<FixtureFetcher>, SubmissionLoader) {
        let fetcher = Arc::new(fetcher);
        let loader = SubmissionLoader::new(fetcher.clone(), &Config::default()).unwrap();
        (fetcher, loader)
    }

    fn load(label: &str) -> Result<Arc<Submission>> {
        let url = project_url("castle");
        let (_, mut loader) = loader(
            FixtureFetcher::new().with(&url, testing::submission_page(label, 77, &[(1, 0), (2, 1)])),
        );
        loader.load(&url)
    }

    fn rows(prefix: &str, authors: &[&str]) -> String {
        let slugs: Vec<String> = (0..authors.len()).map(|i| format!("{prefix}{i}")).collect();
        let rows: Vec<(&str, &str)> = slugs
            .iter()
            .zip(authors)
            .map(|(slug, author)| (slug.as_str(), *author))
            .collect();
        testing::submission_listing(&rows)
    }

    #[test]
    fn test_hidden_trailing_comment_keeps_submission() {
        let url = project_url("castle");
        let html = testing::submission_page("Projects", 77, &[(1, 0), (2, 1), (3, 0)]);
        let last = html.rfind(r#"<span class="score">3</span>"#).unwrap();
        let html = format!(
            r#"{}<span class="score">hidden</span>{}"#,
            &html[..last],
            &html[last + r#"<span class="score">3</span>"#.len()..]
        );
        let (_, mut loader) = loader(FixtureFetcher::new().with(&url, html));

        let submission = loader.load(&url).unwrap();
        let comments = submission.comments().unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].children, vec![2]);
    }

    #[test]
    fn test_project_downloads() {
        let project = load("Projects").unwrap();
        assert_eq!(project.submission_type().ok(), Some(SubmissionType::Projects));
        let download = project.download().unwrap().unwrap();
        assert_eq!(
            download.url.as_deref(),
            Some(format!("{BASE}/files/castle-preview.png").as_str())
        );
        assert_eq!(download.mirrors.len(), 2);
    }

    #[test]
    fn test_skin_download_skips_preview() {
        let skin = load("Skins").unwrap();
        let download = skin.download().unwrap().unwrap();
        assert_eq!(
            download.url.as_deref(),
            Some(format!("{BASE}/files/castle.zip").as_str())
        );
        assert_eq!(download.mirrors, vec!["https://mirror.example.com/castle.zip"]);
    }

    #[test]
    fn test_server_and_blog_kinds() {
        let server = load("Servers").unwrap();
        assert_eq!(server.server_ip().ok(), Some(Some("play.example.com")));
        assert!(server.download().unwrap().is_none());

        let blog = load("Blogs").unwrap();
        assert_eq!(blog.kind().ok(), Some(&SubmissionKind::Blog));
    }

    #[test]
    fn test_comments_are_linked() {
        let mod_ = load("Mods").unwrap();
        assert_eq!(mod_.comment(1).unwrap().unwrap().children, vec![2]);
        assert_eq!(mod_.comments().unwrap().len(), 2);
        assert_eq!(mod_.title().ok(), Some("Castle"));
        assert_eq!(mod_.views().ok(), Some(1500));
    }

    #[test]
    fn test_unknown_label_is_unsupported() {
        match load("Maps") {
            Err(AppError::UnsupportedType { label, url }) => {
                assert_eq!(label, "Maps");
                assert_eq!(url, project_url("castle"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_server_without_address_is_missing_post() {
        let url = project_url("srv");
        let html = testing::submission_page("Servers", 3, &[]).replace("server_form", "other_form");
        let (_, mut loader) = loader(FixtureFetcher::new().with(&url, html));
        assert!(loader.load(&url).unwrap_err().is_missing_post());
    }

    #[test]
    fn test_get_is_memoized() {
        let url = project_url("castle");
        let (fetcher, mut loader) = loader(
            FixtureFetcher::new().with(&url, testing::submission_page("Projects", 77, &[])),
        );
        let first = loader.get(&url).unwrap();
        let second = loader.get(&url).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetcher.hits(&url), 1);
    }

    #[test]
    fn test_blogs_rejected_by_type_listings() {
        let (fetcher, loader) = loader(FixtureFetcher::new());
        for result in [
            loader.get_type(SubmissionType::Blogs, 5),
            loader.get_type_feed(SubmissionType::Blogs, SubmissionFeed::Best, 5),
            loader.get_type_pages(SubmissionType::Blogs, 1..2),
            loader.get_feed_type_pages(SubmissionType::Blogs, SubmissionFeed::Views, 1..2),
        ] {
            assert!(matches!(result, Err(AppError::InvalidArgument(_))));
        }
        assert_eq!(fetcher.total(), 0);
    }

    #[test]
    fn test_type_listing_with_ignored_author() {
        let url = format!("{BASE}/resources/projects/?order=order_latest");
        let (_, mut loader) = loader(
            FixtureFetcher::new()
                .with(&url, rows("a", &["x", "spam", "y"]))
                .with(format!("{url}&p=2"), rows("b", &["spam", "z"])),
        );
        loader.ignore_users(["spam"]).unwrap();

        let listed = loader.get_type(SubmissionType::Projects, 3).unwrap();
        let urls: Vec<_> = listed.iter().map(|s| s.url().to_string()).collect();
        assert_eq!(urls, vec![project_url("a0"), project_url("a2"), project_url("b1")]);
        assert!(listed.iter().all(|s| !s.is_loaded()));
    }

    #[test]
    fn test_blog_listing_paths() {
        let all = format!("{BASE}/resources/blogs/?order=order_latest");
        let tutorials = format!("{BASE}/resources/blogs/tutorial/?order=order_views");
        let (fetcher, loader) = loader(
            FixtureFetcher::new()
                .with(&all, rows("a", &["x"]))
                .with(format!("{tutorials}&p=1"), rows("t", &["y", "z"])),
        );

        assert_eq!(loader.get_blogs(BlogCategory::All, 1).unwrap().len(), 1);
        let pages = loader
            .get_blog_feed_pages(BlogCategory::Tutorial, SubmissionFeed::Views, 1..2)
            .unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(fetcher.total(), 2);
    }

    #[test]
    fn test_search_feed_path() {
        let url = format!("{BASE}/resources/skins/?order=order_hot&keywords=creeper");
        let (fetcher, loader) = loader(FixtureFetcher::new().with(&url, rows("s", &["a"])));
        let found = loader
            .search_submissions_feed("creeper", SubmissionType::Skins, SubmissionFeed::Trending, 1)
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(fetcher.hits(&url), 1);
    }

    #[test]
    fn test_load_user_submissions() {
        let page = format!("{BASE}/member/steve/submissions/");
        let castle = project_url("castle");
        let listing = r#"<div class="resource"><a href="/project/castle/">Castle</a></div>"#;
        let (fetcher, mut loader) = loader(
            FixtureFetcher::new()
                .with(&page, listing)
                .with(&castle, testing::submission_page("Projects", 77, &[])),
        );

        let user = User::named(format!("{BASE}/member/steve/"), "steve");
        let submissions = user.load_submissions(&mut loader).unwrap();
        assert_eq!(submissions.len(), 1);
        assert!(loader.is_loaded(&castle));
        assert!(user.submission_by_url(&castle).unwrap().is_some());
        assert_eq!(user.submissions_by_title("Castle").unwrap().len(), 1);
        assert_eq!(fetcher.hits(&page), 1);
    }
}
