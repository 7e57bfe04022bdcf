// src/parser/thread.rs

//! Forum thread pages and thread listings.

use chrono::NaiveDateTime;
use scraper::{ElementRef, Html};
use url::Url;

use super::{
    Css, MemberLink, Parsed, ReplyFields, attr, link, own_text, parse_datetime, parse_id,
    parse_number, rich_text,
};
use crate::error::Result;
use crate::models::{Category, ThreadSelectors};

/// Raw fields of a thread page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadFields {
    pub category: Option<Category>,
    pub title: String,
    pub content: String,
    pub author: MemberLink,
    pub votes: i64,
    pub views: i64,
    pub id: u64,
    pub locked: bool,
    pub timestamp: NaiveDateTime,
    /// Replies in page order, up to the first one without a score.
    pub replies: Vec<ReplyFields>,
}

/// One row of a thread listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadRow {
    pub url: String,
    pub title: String,
    pub author: MemberLink,
    pub category: Option<Category>,
}

#[derive(Debug, Clone)]
pub struct ThreadParser {
    author: Css,
    category: Css,
    locked: Css,
    content: Css,
    subtitle: Css,
    subtitle_stat: Css,
    subtitle_time: Css,
    thread_id: Css,
    title: Css,
    reply: Css,
    reply_score: Css,
    reply_author: Css,
    reply_time: Css,
    reply_content: Css,
    listing_row: Css,
    listing_author: Css,
    member_thread: Css,
    anchor: Css,
}

impl ThreadParser {
    pub fn new(selectors: &ThreadSelectors) -> Result<Self> {
        Ok(Self {
            author: Css::new(&selectors.author)?,
            category: Css::new(&selectors.category)?,
            locked: Css::new(&selectors.locked)?,
            content: Css::new(&selectors.content)?,
            subtitle: Css::new(&selectors.subtitle)?,
            subtitle_stat: Css::new(&selectors.subtitle_stat)?,
            subtitle_time: Css::new(&selectors.subtitle_time)?,
            thread_id: Css::new(&selectors.thread_id)?,
            title: Css::new(&selectors.title)?,
            reply: Css::new(&selectors.reply)?,
            reply_score: Css::new(&selectors.reply_score)?,
            reply_author: Css::new(&selectors.reply_author)?,
            reply_time: Css::new(&selectors.reply_time)?,
            reply_content: Css::new(&selectors.reply_content)?,
            listing_row: Css::new(&selectors.listing_row)?,
            listing_author: Css::new(&selectors.listing_author)?,
            member_thread: Css::new(&selectors.member_thread)?,
            anchor: Css::new("a")?,
        })
    }

    /// Read a thread page fetched from `base`.
    pub fn thread(&self, doc: &Html, base: &Url) -> Parsed<ThreadFields> {
        let root = doc.root_element();

        let author = MemberLink::read(self.author.first(root)?, self.author.source(), base)?;
        // Unknown crumbs leave the category absent
        let category = self
            .category
            .last(root)
            .and_then(|crumb| crumb.value().attr("href"))
            .and_then(Category::from_path);
        let locked = self.locked.find(root).is_some();
        let content = self.content.find(root).map(rich_text).unwrap_or_default();

        let subtitle = self.subtitle.first(root)?;
        let votes = parse_number("votes", &own_text(self.subtitle_stat.nth(subtitle, 0)?))?;
        let views = parse_number("views", &own_text(self.subtitle_stat.nth(subtitle, 2)?))?;
        let time = self.subtitle_time.first(subtitle)?;
        let timestamp = parse_datetime(attr(time, self.subtitle_time.source(), "title")?)?;

        let id = parse_id("id", self.thread_id.attr(root, "data-id")?)?;
        let title = own_text(self.title.first(root)?);
        let replies = self.replies(root, base)?;

        Ok(ThreadFields {
            category,
            title,
            content,
            author,
            votes,
            views,
            id,
            locked,
            timestamp,
            replies,
        })
    }

    fn replies(&self, root: ElementRef<'_>, base: &Url) -> Parsed<Vec<ReplyFields>> {
        let mut replies = Vec::new();
        for item in self.reply.all(root) {
            let score = self
                .reply_score
                .find(item)
                .and_then(|score| parse_number("votes", &own_text(score)).ok());
            let Some(votes) = score else {
                log::debug!(
                    "Reply without a score after {} replies; ignoring the rest",
                    replies.len()
                );
                break;
            };

            let author = MemberLink::read(
                self.reply_author.first(item)?,
                self.reply_author.source(),
                base,
            )?;
            let timestamp = parse_datetime(self.reply_time.attr(item, "title")?)?;
            let content = rich_text(self.reply_content.first(item)?);
            let parent_id = parse_id(
                "parent_id",
                attr(item, self.reply.source(), "data-parent-id")?,
            )?;
            let id = parse_id("reply_id", attr(item, self.reply.source(), "data-id")?)?;

            replies.push(ReplyFields {
                id,
                parent_id,
                author,
                content,
                timestamp,
                votes,
            });
        }
        Ok(replies)
    }

    /// Rows of a thread listing. Rows without a title link or author are skipped.
    pub fn listing(&self, doc: &Html, base: &Url) -> Vec<ThreadRow> {
        self.listing_row
            .all(doc.root_element())
            .into_iter()
            .filter_map(|row| {
                let parsed = self.row(row, base);
                if parsed.is_none() {
                    log::debug!("Skipping unreadable thread row");
                }
                parsed
            })
            .collect()
    }

    fn row(&self, row: ElementRef<'_>, base: &Url) -> Option<ThreadRow> {
        let anchors = self.anchor.all(row);
        let title_link = anchors.first().copied()?;
        let url = link(title_link, "a", base).ok()?;
        let title = own_text(title_link);
        let category = anchors
            .get(1)
            .and_then(|a| a.value().attr("href"))
            .and_then(Category::from_path);
        let author = self.listing_author.find(row)?;
        let author = MemberLink::read(author, self.listing_author.source(), base).ok()?;
        Some(ThreadRow {
            url,
            title,
            author,
            category,
        })
    }

    /// Thread links on a member's forum page.
    pub fn member_threads(&self, doc: &Html, base: &Url) -> Vec<String> {
        self.member_thread
            .all(doc.root_element())
            .into_iter()
            .filter_map(|a| link(a, self.member_thread.source(), base).ok())
            .collect()
    }
}
