// src/parser/submission.rs

//! Submission pages and submission listings.

use chrono::NaiveDateTime;
use scraper::{ElementRef, Html};
use url::Url;

use super::{
    CommentFields, Css, MemberLink, Parsed, link, own_text, parse_datetime, parse_id, parse_number,
    rich_text, text,
};
use crate::error::Result;
use crate::models::SubmissionSelectors;
use crate::utils::resolve_url;
use crate::utils::url::youtube_watch_url;

/// Raw fields of a submission page.
///
/// The type label decides which kind-specific fields matter; the loader maps
/// it to a kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFields {
    pub type_label: String,
    pub title: String,
    pub author: MemberLink,
    pub timestamp: NaiveDateTime,
    pub diamonds: i64,
    pub views: i64,
    pub views_today: i64,
    pub favorites: i64,
    /// Download action targets in page order
    pub downloads: Vec<String>,
    pub id: u64,
    pub tags: Vec<String>,
    /// Empty when the page has no description block
    pub description: String,
    pub server_ip: Option<String>,
    pub media: Vec<String>,
    pub comments: Vec<CommentFields>,
}

/// One row of a submission listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRow {
    pub url: String,
    pub title: String,
    pub author: MemberLink,
}

#[derive(Debug, Clone)]
pub struct SubmissionParser {
    type_label: Css,
    author: Css,
    title: Css,
    timestamp: Css,
    statistics: Css,
    download: Css,
    id: Css,
    tags: Css,
    description: Css,
    server_ip: Css,
    media: Css,
    comment: Css,
    comment_header_link: Css,
    comment_time: Css,
    comment_text: Css,
    comment_id: Css,
    comment_score: Css,
    listing_row: Css,
    listing_author: Css,
    member_submission: Css,
    anchor: Css,
}

impl SubmissionParser {
    pub fn new(selectors: &SubmissionSelectors) -> Result<Self> {
        Ok(Self {
            type_label: Css::new(&selectors.type_label)?,
            author: Css::new(&selectors.author)?,
            title: Css::new(&selectors.title)?,
            timestamp: Css::new(&selectors.timestamp)?,
            statistics: Css::new(&selectors.statistics)?,
            download: Css::new(&selectors.download)?,
            id: Css::new(&selectors.id)?,
            tags: Css::new(&selectors.tags)?,
            description: Css::new(&selectors.description)?,
            server_ip: Css::new(&selectors.server_ip)?,
            media: Css::new(&selectors.media)?,
            comment: Css::new(&selectors.comment)?,
            comment_header_link: Css::new(&selectors.comment_header_link)?,
            comment_time: Css::new(&selectors.comment_time)?,
            comment_text: Css::new(&selectors.comment_text)?,
            comment_id: Css::new(&selectors.comment_id)?,
            comment_score: Css::new(&selectors.comment_score)?,
            listing_row: Css::new(&selectors.listing_row)?,
            listing_author: Css::new(&selectors.listing_author)?,
            member_submission: Css::new(&selectors.member_submission)?,
            anchor: Css::new("a")?,
        })
    }

    /// Selector text of the server address input, for error reports.
    pub fn server_ip_selector(&self) -> &str {
        self.server_ip.source()
    }

    /// The context-bar type label alone.
    pub fn type_label(&self, doc: &Html) -> Parsed<String> {
        self.type_label
            .nth(doc.root_element(), 1)
            .map(own_text)
    }

    /// Read a submission page fetched from `base`.
    pub fn submission(&self, doc: &Html, base: &Url) -> Parsed<SubmissionFields> {
        let root = doc.root_element();

        let type_label = self.type_label(doc)?;
        let author = MemberLink::read(self.author.first(root)?, self.author.source(), base)?;
        let title = own_text(self.title.first(root)?);
        let timestamp = parse_datetime(self.timestamp.attr(root, "title")?)?;

        let stat = |n: usize, field: &'static str| -> Parsed<i64> {
            parse_number(field, &own_text(self.statistics.nth(root, n)?))
        };
        let diamonds = stat(0, "diamonds")?;
        let views = stat(1, "views")?;
        let views_today = stat(2, "views_today")?;
        let favorites = stat(4, "favorites")?;

        let downloads = self
            .download
            .all(root)
            .into_iter()
            .filter_map(|a| link(a, self.download.source(), base).ok())
            .collect();
        let id = parse_id("id", &own_text(self.id.first(root)?))?;
        let tags = self
            .tags
            .all(root)
            .into_iter()
            .map(own_text)
            .filter(|t| !t.is_empty())
            .collect();
        let description = self
            .description
            .find(root)
            .map(rich_text)
            .unwrap_or_default();
        let server_ip = self
            .server_ip
            .find(root)
            .and_then(|input| input.value().attr("value"))
            .map(|ip| ip.trim().to_string());
        let media = self.media_urls(root, base);
        let comments = self.comments(root, base)?;

        Ok(SubmissionFields {
            type_label,
            title,
            author,
            timestamp,
            diamonds,
            views,
            views_today,
            favorites,
            downloads,
            id,
            tags,
            description,
            server_ip,
            media,
            comments,
        })
    }

    fn media_urls(&self, root: ElementRef<'_>, base: &Url) -> Vec<String> {
        self.media
            .all(root)
            .into_iter()
            .filter_map(|el| el.value().attr("src"))
            .map(|src| youtube_watch_url(&resolve_url(base, src)))
            .collect()
    }

    fn comments(&self, root: ElementRef<'_>, base: &Url) -> Parsed<Vec<CommentFields>> {
        let mut comments = Vec::new();
        for item in self.comment.all(root) {
            let score = self
                .comment_score
                .find(item)
                .and_then(|score| parse_number("votes", &text(score)).ok());
            let Some(votes) = score else {
                log::debug!(
                    "Comment without a score after {} comments; ignoring the rest",
                    comments.len()
                );
                break;
            };

            let author = MemberLink::read(
                self.comment_header_link.nth(item, 1)?,
                self.comment_header_link.source(),
                base,
            )?;
            let timestamp = parse_datetime(self.comment_time.attr(item, "title")?)?;
            let content = rich_text(self.comment_text.first(item)?);
            let id = parse_id("comment_id", &own_text(self.comment_id.first(item)?))?;
            let parent_id = match item.value().attr("data-parent-id") {
                Some(raw) => parse_id("parent_id", raw)?,
                None => 0,
            };
            comments.push(CommentFields {
                id,
                parent_id,
                author,
                content,
                timestamp,
                votes,
            });
        }
        Ok(comments)
    }

    /// Rows of a submission listing. Rows without a link or author are skipped.
    pub fn listing(&self, doc: &Html, base: &Url) -> Vec<SubmissionRow> {
        self.listing_row
            .all(doc.root_element())
            .into_iter()
            .filter_map(|row| {
                let title_link = self.anchor.find(row)?;
                let url = link(title_link, "a", base).ok()?;
                let author = self.listing_author.find(row)?;
                let author = MemberLink::read(author, self.listing_author.source(), base).ok()?;
                Some(SubmissionRow {
                    url,
                    title: own_text(title_link),
                    author,
                })
            })
            .collect()
    }

    /// Submission links on a member's submissions page.
    pub fn member_submissions(&self, doc: &Html, base: &Url) -> Vec<String> {
        let mut links: Vec<String> = Vec::new();
        for a in self.member_submission.all(doc.root_element()) {
            if let Ok(url) = link(a, self.member_submission.source(), base) {
                // A card may link its image and its title to the same page
                if links.last() != Some(&url) {
                    links.push(url);
                }
            }
        }
        links
    }
}
