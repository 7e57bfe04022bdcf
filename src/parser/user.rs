// src/parser/user.rs

//! Member profile, about and member listing pages.

use chrono::NaiveDateTime;
use scraper::Html;
use url::Url;

use super::{Css, MemberLink, Parsed, own_text, parse_date, parse_id, parse_number};
use crate::error::{ParseError, Result};
use crate::models::UserSelectors;

/// Fields of the main profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFields {
    pub name: String,
    pub id: u64,
}

/// Fields of the `about/` sub-page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutFields {
    pub about: String,
    pub rank_class: String,
    pub level: i64,
    pub profile_views: i64,
    pub xp: i64,
    pub joined: NaiveDateTime,
}

/// A member cell on a subscriber, subscription or member listing page.
pub type MemberRow = MemberLink;

#[derive(Debug, Clone)]
pub struct UserParser {
    name: Css,
    profile_bar: Css,
    about: Css,
    rank_class: Css,
    level: Css,
    statistics: Css,
    team_link: Css,
    listing_row: Css,
    anchor: Css,
}

impl UserParser {
    pub fn new(selectors: &UserSelectors) -> Result<Self> {
        Ok(Self {
            name: Css::new(&selectors.name)?,
            profile_bar: Css::new(&selectors.profile_bar)?,
            about: Css::new(&selectors.about)?,
            rank_class: Css::new(&selectors.rank_class)?,
            level: Css::new(&selectors.level)?,
            statistics: Css::new(&selectors.statistics)?,
            team_link: Css::new(&selectors.team_link)?,
            listing_row: Css::new(&selectors.listing_row)?,
            anchor: Css::new("a")?,
        })
    }

    pub fn profile(&self, doc: &Html) -> Parsed<ProfileFields> {
        let root = doc.root_element();
        let name = own_text(self.name.first(root)?);
        let id = parse_id("id", self.profile_bar.attr(root, "profile-id")?)?;
        Ok(ProfileFields { name, id })
    }

    pub fn about(&self, doc: &Html) -> Parsed<AboutFields> {
        let root = doc.root_element();
        let about = own_text(self.about.first(root)?);
        let rank_class = own_text(self.rank_class.first(root)?);

        let badge = own_text(self.level.first(root)?);
        // Badge reads "Level N"
        let level = badge
            .split_whitespace()
            .find_map(|word| parse_number("level", word).ok())
            .ok_or_else(|| ParseError::InvalidNumber {
                field: "level",
                value: badge.clone(),
            })?;

        let stat = |n: usize| self.statistics.nth(root, n).map(own_text);
        let profile_views = parse_number("profile_views", &stat(1)?)?;
        let xp = parse_number("xp", &stat(2)?)?;
        let joined = parse_date(&stat(12)?)?;

        Ok(AboutFields {
            about,
            rank_class,
            level,
            profile_views,
            xp,
            joined,
        })
    }

    /// Members linked from a subscriber or subscription page.
    pub fn team(&self, doc: &Html, base: &Url) -> Vec<MemberRow> {
        self.team_link
            .all(doc.root_element())
            .into_iter()
            .filter_map(|a| MemberLink::read(a, self.team_link.source(), base).ok())
            .collect()
    }

    /// Rows of a member listing. Rows without a link are skipped.
    pub fn listing(&self, doc: &Html, base: &Url) -> Vec<MemberRow> {
        self.listing_row
            .all(doc.root_element())
            .into_iter()
            .filter_map(|row| {
                // The last link of a cell carries the name; the first may be an avatar
                let anchor = self.anchor.last(row)?;
                MemberLink::read(anchor, "a", base).ok()
            })
            .collect()
    }
}
