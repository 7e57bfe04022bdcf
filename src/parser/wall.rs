// src/parser/wall.rs

//! Wall post pages and wall listings.

use chrono::NaiveDateTime;
use scraper::{ElementRef, Html};
use url::Url;

use super::{
    Css, MemberLink, Parsed, ReplyFields, attr, own_text, parse_datetime, parse_id,
    parse_number, rich_text,
};
use crate::error::Result;
use crate::models::{ROOT_ID, WallSelectors};
use crate::utils::resolve_url;

/// Raw fields of a wall post page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallPostFields {
    pub author: MemberLink,
    pub id: u64,
    pub content: String,
    pub likes: i64,
    pub timestamp: NaiveDateTime,
    /// Wall comments are flat; every parent is the root.
    pub comments: Vec<ReplyFields>,
}

/// One post on a member's wall listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallRow {
    pub url: String,
    pub author: MemberLink,
}

#[derive(Debug, Clone)]
pub struct WallParser {
    header_link: Css,
    header_time: Css,
    content: Css,
    options: Css,
    likes: Css,
    comment: Css,
    comment_author: Css,
    comment_time: Css,
    comment_text: Css,
    listing_row: Css,
}

impl WallParser {
    pub fn new(selectors: &WallSelectors) -> Result<Self> {
        Ok(Self {
            header_link: Css::new(&selectors.header_link)?,
            header_time: Css::new(&selectors.header_time)?,
            content: Css::new(&selectors.content)?,
            options: Css::new(&selectors.options)?,
            likes: Css::new(&selectors.likes)?,
            comment: Css::new(&selectors.comment)?,
            comment_author: Css::new(&selectors.comment_author)?,
            comment_time: Css::new(&selectors.comment_time)?,
            comment_text: Css::new(&selectors.comment_text)?,
            listing_row: Css::new(&selectors.listing_row)?,
        })
    }

    /// Read a wall post page fetched from `base`.
    pub fn post(&self, doc: &Html, base: &Url) -> Parsed<WallPostFields> {
        let root = doc.root_element();

        // The header opens with an avatar link; the named link follows it
        let author = MemberLink::read(
            self.header_link.nth(root, 1)?,
            self.header_link.source(),
            base,
        )?;
        let timestamp = parse_datetime(self.header_time.attr(root, "title")?)?;
        let content = rich_text(self.content.first(root)?);
        let id = parse_id("id", self.options.attr(root, "post-id")?)?;
        let likes = parse_number("likes", &own_text(self.likes.first(root)?))?;

        let comments = self
            .comment
            .all(root)
            .into_iter()
            .map(|item| self.comment(item, base))
            .collect::<Parsed<Vec<_>>>()?;

        Ok(WallPostFields {
            author,
            id,
            content,
            likes,
            timestamp,
            comments,
        })
    }

    fn comment(&self, item: ElementRef<'_>, base: &Url) -> Parsed<ReplyFields> {
        let author = MemberLink::read(
            self.comment_author.first(item)?,
            self.comment_author.source(),
            base,
        )?;
        let timestamp = parse_datetime(self.comment_time.attr(item, "title")?)?;
        let content = rich_text(self.comment_text.first(item)?);
        let id = parse_id(
            "comment_id",
            attr(item, self.comment.source(), "data-comment-id")?,
        )?;
        Ok(ReplyFields {
            id,
            parent_id: ROOT_ID,
            author,
            content,
            timestamp,
            votes: 0,
        })
    }

    /// Post links of a member's wall page.
    pub fn member_wall(&self, doc: &Html, base: &Url) -> Vec<String> {
        self.options
            .all(doc.root_element())
            .into_iter()
            .filter_map(|opts| opts.value().attr("direct-url"))
            .map(|href| resolve_url(base, href))
            .collect()
    }

    /// Rows of a wall listing. Rows without a post link or author are skipped.
    pub fn listing(&self, doc: &Html, base: &Url) -> Vec<WallRow> {
        self.listing_row
            .all(doc.root_element())
            .into_iter()
            .filter_map(|row| {
                let href = self.options.find(row)?.value().attr("direct-url")?;
                let author = self.header_link.nth(row, 1).ok()?;
                let author = MemberLink::read(author, self.header_link.source(), base).ok()?;
                Some(WallRow {
                    url: resolve_url(base, href),
                    author,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::utils::testing::{self, BASE};

    fn parser() -> WallParser {
        WallParser::new(&WallSelectors::default()).unwrap()
    }

    fn base() -> Url {
        Url::parse(&format!("{BASE}/member/steve/wall/post/9/")).unwrap()
    }

    #[test]
    fn test_wall_post_fields() {
        let html = testing::wall_post_page(9, &[31, 32]);
        let fields = parser().post(&Html::parse_document(&html), &base()).unwrap();

        assert_eq!(fields.id, 9);
        assert_eq!(fields.likes, 7);
        assert_eq!(fields.content, "Hi there\nfriend");
        assert_eq!(fields.author.url, format!("{BASE}/member/alex/"));
        assert_eq!(fields.author.name.as_deref(), Some("alex"));
        assert_eq!(fields.timestamp.to_string(), "2021-06-01 12:30:00");

        let ids: Vec<_> = fields.comments.iter().map(|c| (c.id, c.parent_id)).collect();
        assert_eq!(ids, vec![(31, ROOT_ID), (32, ROOT_ID)]);
        assert_eq!(fields.comments[1].content, "Thanks 32");
        assert_eq!(fields.comments[0].author.name.as_deref(), Some("bob"));
    }

    #[test]
    fn test_deleted_wall_post_is_structural() {
        let html = "<html><body><p>This post no longer exists.</p></body></html>";
        let err = parser()
            .post(&Html::parse_document(html), &base())
            .unwrap_err();
        assert_eq!(err, ParseError::missing(".wall_header.table a [1]"));
    }

    #[test]
    fn test_listing_rows() {
        let html = testing::wall_listing(&[(1, "alex"), (2, "bob")]);
        let rows = parser().listing(&Html::parse_document(&html), &base());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].url, format!("{BASE}/member/steve/wall/post/1/"));
        assert_eq!(rows[1].author.name.as_deref(), Some("bob"));
    }

    #[test]
    fn test_member_wall_links() {
        let html = testing::wall_listing(&[(4, "alex"), (5, "alex")]);
        let links = parser().member_wall(&Html::parse_document(&html), &base());
        assert_eq!(
            links,
            vec![
                format!("{BASE}/member/steve/wall/post/4/"),
                format!("{BASE}/member/steve/wall/post/5/"),
            ]
        );
    }
}
