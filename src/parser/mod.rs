// src/parser/mod.rs

//! Field extraction from fetched pages.
//!
//! Each page family has a parser compiled once from its configured selectors.
//! Parsers return raw field records; turning those into entities is left to
//! the loaders.

mod submission;
mod thread;
mod user;
mod wall;

pub use submission::{SubmissionFields, SubmissionParser, SubmissionRow};
pub use thread::{ThreadFields, ThreadParser, ThreadRow};
pub use user::{AboutFields, MemberRow, ProfileFields, UserParser};
pub use wall::{WallParser, WallPostFields, WallRow};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use scraper::{ElementRef, Node, Selector};
use url::Url;

use crate::error::{AppError, ParseError, Result};
use crate::models::User;
use crate::utils::resolve_url;

/// Outcome of reading one field.
pub type Parsed<T> = std::result::Result<T, ParseError>;

/// A flat reply or comment as read from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyFields {
    pub id: u64,
    pub parent_id: u64,
    pub author: MemberLink,
    pub content: String,
    pub timestamp: NaiveDateTime,
    pub votes: i64,
}

/// Comments carry the same fields as forum replies.
pub type CommentFields = ReplyFields;

/// A compiled selector that remembers its source text for error reports.
#[derive(Debug, Clone)]
pub(crate) struct Css {
    source: String,
    selector: Selector,
}

impl Css {
    pub(crate) fn new(source: &str) -> Result<Self> {
        let selector =
            Selector::parse(source).map_err(|e| AppError::selector(source, format!("{e:?}")))?;
        Ok(Self {
            source: source.to_string(),
            selector,
        })
    }

    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn find<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        scope.select(&self.selector).next()
    }

    pub(crate) fn first<'a>(&self, scope: ElementRef<'a>) -> Parsed<ElementRef<'a>> {
        self.find(scope)
            .ok_or_else(|| ParseError::missing(&self.source))
    }

    /// The `n`th match, counting from zero.
    pub(crate) fn nth<'a>(&self, scope: ElementRef<'a>, n: usize) -> Parsed<ElementRef<'a>> {
        scope
            .select(&self.selector)
            .nth(n)
            .ok_or_else(|| ParseError::missing(format!("{} [{n}]", self.source)))
    }

    pub(crate) fn all<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        scope.select(&self.selector).collect()
    }

    pub(crate) fn last<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        scope.select(&self.selector).last()
    }

    /// Attribute `name` of the first match.
    pub(crate) fn attr<'a>(&self, scope: ElementRef<'a>, name: &str) -> Parsed<&'a str> {
        attr(self.first(scope)?, &self.source, name)
    }
}

/// Attribute `name` of `element`; `context` names the element in errors.
pub(crate) fn attr<'a>(element: ElementRef<'a>, context: &str, name: &str) -> Parsed<&'a str> {
    element
        .value()
        .attr(name)
        .ok_or_else(|| ParseError::missing_attr(context, name))
}

/// Text directly inside `element`, excluding descendants, whitespace collapsed.
pub(crate) fn own_text(element: ElementRef<'_>) -> String {
    let raw: String = element
        .children()
        .filter_map(|child| child.value().as_text().map(|t| &**t))
        .collect();
    collapse(&raw)
}

/// All text inside `element`, whitespace collapsed.
pub(crate) fn text(element: ElementRef<'_>) -> String {
    collapse(&element.text().collect::<String>())
}

/// Readable text of a post body.
///
/// Line breaks become newlines; images and links keep their target as
/// ` (url)` after their text.
pub(crate) fn rich_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_rich(element, &mut out);
    out.split('\n')
        .map(collapse)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn push_rich(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                let el = child.value();
                match el.name() {
                    "br" => out.push('\n'),
                    "img" => {
                        if let Some(src) = el.attr("src") {
                            out.push_str(&format!(" ({src})"));
                        }
                    }
                    "a" => {
                        push_rich(child, out);
                        if let Some(href) = el.attr("href") {
                            out.push_str(&format!(" ({href})"));
                        }
                    }
                    "script" | "style" => {}
                    _ => push_rich(child, out),
                }
            }
            _ => {}
        }
    }
}

fn collapse(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a displayed counter such as `1,234`.
pub(crate) fn parse_number(field: &'static str, raw: &str) -> Parsed<i64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Parse a numeric identifier.
pub(crate) fn parse_id(field: &'static str, raw: &str) -> Parsed<u64> {
    raw.trim().parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Parse a `title` timestamp such as `2020-01-02T03:04:05-05:00`.
///
/// Only the date and the hour and minute are kept.
pub(crate) fn parse_datetime(raw: &str) -> Parsed<NaiveDateTime> {
    let invalid = || ParseError::InvalidDate {
        value: raw.to_string(),
    };
    let (date, time) = raw.trim().split_once('T').ok_or_else(invalid)?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())?;
    let time = time.get(..5).ok_or_else(invalid)?;
    let time = NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| invalid())?;
    Ok(date.and_time(time))
}

/// Parse a join date such as `Mar 9, 2014`, at midnight.
pub(crate) fn parse_date(raw: &str) -> Parsed<NaiveDateTime> {
    NaiveDate::parse_from_str(raw.trim(), "%b %d, %Y")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| ParseError::InvalidDate {
            value: raw.to_string(),
        })
}

/// Absolute target of a link element.
pub(crate) fn link(element: ElementRef<'_>, context: &str, base: &Url) -> Parsed<String> {
    attr(element, context, "href").map(|href| resolve_url(base, href))
}

/// A member link: profile URL and, when the link shows it, the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberLink {
    pub url: String,
    pub name: Option<String>,
}

impl MemberLink {
    pub(crate) fn read(element: ElementRef<'_>, context: &str, base: &Url) -> Parsed<Self> {
        let url = link(element, context, base)?;
        let name = Some(own_text(element)).filter(|n| !n.is_empty());
        Ok(Self { url, name })
    }

    /// The member as a reference entity.
    pub fn into_user(self) -> User {
        match self.name {
            Some(name) => User::named(self.url, name),
            None => User::reference(self.url),
        }
    }
}
