// src/models/selectors.rs

//! CSS selectors for each page family of the site.
//!
//! Defaults follow the live markup. Overriding them in the config file is how
//! layout changes are absorbed without a rebuild.

use serde::{Deserialize, Serialize};

/// Selectors for every page family.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Selectors {
    #[serde(default)]
    pub thread: ThreadSelectors,

    #[serde(default)]
    pub submission: SubmissionSelectors,

    #[serde(default)]
    pub user: UserSelectors,

    #[serde(default)]
    pub wall: WallSelectors,
}

impl Selectors {
    /// Every configured selector with its dotted config key.
    pub fn entries(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        let families: [(&str, Vec<(&str, &str)>); 4] = [
            ("thread", self.thread.entries()),
            ("submission", self.submission.entries()),
            ("user", self.user.entries()),
            ("wall", self.wall.entries()),
        ];
        for (family, entries) in families {
            for (key, value) in entries {
                out.push((format!("selectors.{family}.{key}"), value));
            }
        }
        out
    }
}

/// Forum thread pages and thread listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadSelectors {
    /// Link to the thread author
    pub author: String,
    /// Breadcrumb category links; the last one names the category
    pub category: String,
    /// Present only on locked threads
    pub locked: String,
    /// Opening post body
    pub content: String,
    /// Subtitle holding votes, views and the timestamp
    pub subtitle: String,
    /// Counters within the subtitle: votes first, views third
    pub subtitle_stat: String,
    /// Timestamp within the subtitle
    pub subtitle_time: String,
    /// Element carrying the thread id in `data-id`
    pub thread_id: String,
    pub title: String,
    /// Reply items, in page order
    pub reply: String,
    pub reply_score: String,
    pub reply_author: String,
    pub reply_time: String,
    pub reply_content: String,
    /// Rows of a thread listing
    pub listing_row: String,
    /// Author link within a listing row
    pub listing_author: String,
    /// Thread links on a member's forum page
    pub member_thread: String,
}

impl Default for ThreadSelectors {
    fn default() -> Self {
        Self {
            author: ".mini-info a".into(),
            category: "#context_header .thread_crumb_context .category".into(),
            locked: "[title=\"locked\"]".into(),
            content: ".thread_content".into(),
            subtitle: ".thread_subtitle".into(),
            subtitle_stat: "span".into(),
            subtitle_time: "abbr".into(),
            thread_id: "#visiting_thread".into(),
            title: "title".into(),
            reply: ".forum_reply_container .forum_reply".into(),
            reply_score: ".score_container .score_box .score".into(),
            reply_author: ".content_box .member_box a".into(),
            reply_time: ".content_box .member_box .time_box abbr".into(),
            reply_content: ".content_box .contents.pmc_readmore".into(),
            listing_row: ".thread_box".into(),
            listing_author: ".thread_subtitle a".into(),
            member_thread: "a.title".into(),
        }
    }
}

impl ThreadSelectors {
    fn entries(&self) -> Vec<(&str, &str)> {
        vec![
            ("author", &self.author),
            ("category", &self.category),
            ("locked", &self.locked),
            ("content", &self.content),
            ("subtitle", &self.subtitle),
            ("subtitle_stat", &self.subtitle_stat),
            ("subtitle_time", &self.subtitle_time),
            ("thread_id", &self.thread_id),
            ("title", &self.title),
            ("reply", &self.reply),
            ("reply_score", &self.reply_score),
            ("reply_author", &self.reply_author),
            ("reply_time", &self.reply_time),
            ("reply_content", &self.reply_content),
            ("listing_row", &self.listing_row),
            ("listing_author", &self.listing_author),
            ("member_thread", &self.member_thread),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.as_str()))
        .collect()
    }
}

/// Submission pages and submission listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionSelectors {
    /// Context bar links; the second one is the type label
    pub type_label: String,
    pub author: String,
    pub title: String,
    pub timestamp: String,
    /// Counters: diamonds, views, views today, (skipped), favorites
    pub statistics: String,
    /// Download action links
    pub download: String,
    pub id: String,
    pub tags: String,
    pub description: String,
    /// Input holding a server address
    pub server_ip: String,
    /// Gallery images and embedded videos
    pub media: String,
    pub comment: String,
    /// Links in a comment header; the second one is the author
    pub comment_header_link: String,
    pub comment_time: String,
    pub comment_text: String,
    pub comment_id: String,
    pub comment_score: String,
    pub listing_row: String,
    pub listing_author: String,
    /// Submission links on a member's submissions page
    pub member_submission: String,
}

impl Default for SubmissionSelectors {
    fn default() -> Self {
        Self {
            type_label: "#post_context a".into(),
            author: ".mini-info a".into(),
            title: "h1".into(),
            timestamp: "#resource-info .post_date.txt-subtle abbr".into(),
            statistics: "#resource-info .resource-statistics span".into(),
            download: ".content-actions a".into(),
            id: "#resource_id".into(),
            tags: "#item_tags a".into(),
            description: "#r-text-block".into(),
            server_ip: "[name=\"server_form\"] input[value]".into(),
            media: ".media-gallery img, .media-gallery iframe".into(),
            comment: "#comment-list .comment-item".into(),
            comment_header_link: ".comment-header a".into(),
            comment_time: ".comment-header abbr".into(),
            comment_text: ".comment-text".into(),
            comment_id: ".comment_id.hidden".into(),
            comment_score: ".score".into(),
            listing_row: ".r-info".into(),
            listing_author: ".contributed a".into(),
            member_submission: ".resource a".into(),
        }
    }
}

impl SubmissionSelectors {
    fn entries(&self) -> Vec<(&str, &str)> {
        vec![
            ("type_label", &self.type_label),
            ("author", &self.author),
            ("title", &self.title),
            ("timestamp", &self.timestamp),
            ("statistics", &self.statistics),
            ("download", &self.download),
            ("id", &self.id),
            ("tags", &self.tags),
            ("description", &self.description),
            ("server_ip", &self.server_ip),
            ("media", &self.media),
            ("comment", &self.comment),
            ("comment_header_link", &self.comment_header_link),
            ("comment_time", &self.comment_time),
            ("comment_text", &self.comment_text),
            ("comment_id", &self.comment_id),
            ("comment_score", &self.comment_score),
            ("listing_row", &self.listing_row),
            ("listing_author", &self.listing_author),
            ("member_submission", &self.member_submission),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.as_str()))
        .collect()
    }
}

/// Member profile, about, subscriber and member listing pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSelectors {
    pub name: String,
    /// Element carrying the member id in `profile-id`
    pub profile_bar: String,
    pub about: String,
    pub rank_class: String,
    /// "Level N" badge
    pub level: String,
    /// About-page statistics cells: views second, XP third, join date thirteenth
    pub statistics: String,
    /// Member links on subscriber and subscription pages
    pub team_link: String,
    /// Rows of a member listing
    pub listing_row: String,
}

impl Default for UserSelectors {
    fn default() -> Self {
        Self {
            name: "#member-title h1".into(),
            profile_bar: "#profile-bar".into(),
            about: "#memberpage-about".into(),
            rank_class: ".member-rank-class".into(),
            level: ".stat.level.submenu_trigger".into(),
            statistics:
                "#memberpage-about #about_more .info_pane .member_card_stats .statistics tbody .stat"
                    .into(),
            team_link: ".team_cell a".into(),
            listing_row: ".team_cell".into(),
        }
    }
}

impl UserSelectors {
    fn entries(&self) -> Vec<(&str, &str)> {
        vec![
            ("name", &self.name),
            ("profile_bar", &self.profile_bar),
            ("about", &self.about),
            ("rank_class", &self.rank_class),
            ("level", &self.level),
            ("statistics", &self.statistics),
            ("team_link", &self.team_link),
            ("listing_row", &self.listing_row),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.as_str()))
        .collect()
    }
}

/// Wall post pages and wall listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WallSelectors {
    /// Header links; the second one is the author
    pub header_link: String,
    pub header_time: String,
    pub content: String,
    /// Element carrying `post-id` and `direct-url`
    pub options: String,
    pub likes: String,
    pub comment: String,
    pub comment_author: String,
    pub comment_time: String,
    pub comment_text: String,
    /// Posts of a paginated wall listing
    pub listing_row: String,
}

impl Default for WallSelectors {
    fn default() -> Self {
        Self {
            header_link: ".wall_header.table a".into(),
            header_time: ".wall_header.table abbr".into(),
            content: ".wall_content".into(),
            options: ".post_options".into(),
            likes: ".counter.likes_count".into(),
            comment: ".item_comment".into(),
            comment_author: "a".into(),
            comment_time: "abbr".into(),
            comment_text: ".item_comment_contents .text".into(),
            listing_row: ".wall_post".into(),
        }
    }
}

impl WallSelectors {
    fn entries(&self) -> Vec<(&str, &str)> {
        vec![
            ("header_link", &self.header_link),
            ("header_time", &self.header_time),
            ("content", &self.content),
            ("options", &self.options),
            ("likes", &self.likes),
            ("comment", &self.comment),
            ("comment_author", &self.comment_author),
            ("comment_time", &self.comment_time),
            ("comment_text", &self.comment_text),
            ("listing_row", &self.listing_row),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.as_str()))
        .collect()
    }
}
