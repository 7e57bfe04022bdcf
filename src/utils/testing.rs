//! In-memory page source for offline tests.

use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use scraper::Html;

use crate::error::{AppError, Result};
use crate::utils::http::PageFetcher;

/// Serves fixed HTML per URL and counts every request.
#[derive(Debug, Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, String>,
    hits: Mutex<HashMap<String, usize>>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Requests made for `url`, served or not.
    pub fn hits(&self, url: &str) -> usize {
        self.hits
            .lock()
            .map(|hits| hits.get(url).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.hits
            .lock()
            .map(|hits| hits.values().sum())
            .unwrap_or(0)
    }
}

impl PageFetcher for FixtureFetcher {
    fn fetch(&self, url: &str) -> Result<Html> {
        if let Ok(mut hits) = self.hits.lock() {
            *hits.entry(url.to_string()).or_default() += 1;
        }
        self.pages
            .get(url)
            .map(|html| Html::parse_document(html))
            .ok_or_else(|| AppError::Io(io::Error::new(io::ErrorKind::NotFound, url.to_string())))
    }
}

pub const BASE: &str = "https://www.planetminecraft.com";

/// A thread page with replies given as `(id, parent_id)` in page order.
pub fn thread_page(id: u64, title: &str, replies: &[(u64, u64)], locked: bool) -> String {
    let replies: String = replies
        .iter()
        .map(|(reply, parent)| {
            format!(
                r#"<div class="forum_reply" data-id="{reply}" data-parent-id="{parent}">
                     <div class="score_container"><div class="score_box"><span class="score">2</span></div></div>
                     <div class="content_box">
                       <div class="member_box"><a href="/member/alex/">alex</a>
                         <div class="time_box"><abbr title="2020-01-03T10:00:00-05:00">1 day ago</abbr></div>
                       </div>
                       <div class="contents pmc_readmore">Reply {reply}</div>
                     </div>
                   </div>"#
            )
        })
        .collect();
    let lock = if locked { r#"<i title="locked"></i>"# } else { "" };
    format!(
        r#"<html><head><title>{title}</title></head><body>
           <div id="context_header"><div class="thread_crumb_context">
             <a class="category" href="/forums/">Forums</a>
             <a class="category" href="/forums/pmc/">PMC</a>
             <a class="category" href="/forums/pmc/introductions/">Introductions</a>
           </div></div>
           <div class="mini-info"><a href="/member/steve/">Steve</a></div>
           {lock}
           <div class="thread_subtitle"><span>5</span> votes <span>&middot;</span> <span>1,234</span> views
             <abbr title="2020-01-02T03:04:05-05:00">2 years ago</abbr></div>
           <div id="visiting_thread" data-id="{id}"></div>
           <div class="thread_content">Welcome<br>to the forum</div>
           <div class="forum_reply_container">{replies}<!-- trailing --></div>
           </body></html>"#
    )
}

/// A thread listing with rows given as `(slug, author)`.
pub fn thread_listing(rows: &[(&str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(slug, author)| {
            format!(
                r#"<div class="thread_box">
                     <a href="/forums/pmc/introductions/{slug}/">{slug}</a>
                     <a href="/forums/pmc/introductions/">Introductions</a>
                     <div class="thread_subtitle">by <a href="/member/{author}/">{author}</a></div>
                   </div>"#
            )
        })
        .collect();
    format!("<html><body>{rows}</body></html>")
}

/// A submission page; `label` is the context-bar type label.
pub fn submission_page(label: &str, id: u64, comments: &[(u64, u64)]) -> String {
    let comments: String = comments
        .iter()
        .map(|(comment, parent)| {
            format!(
                r#"<div class="comment-item" data-parent-id="{parent}">
                     <div class="comment-header">
                       <a href="/member/alex/"><img src="/avatars/alex.png"></a>
                       <a href="/member/alex/">alex</a>
                       <abbr title="2019-05-05T08:00:00">yesterday</abbr>
                     </div>
                     <div class="comment-text">Comment {comment}</div>
                     <span class="comment_id hidden">{comment}</span>
                     <span class="score">3</span>
                   </div>"#
            )
        })
        .collect();
    format!(
        r#"<html><head><title>Castle</title></head><body>
           <div id="post_context"><a href="/resources/">Resources</a><a href="/resources/x/">{label}</a></div>
           <div class="mini-info"><a href="/member/steve/">Steve</a></div>
           <h1>Castle</h1>
           <div id="resource-info">
             <div class="post_date txt-subtle"><abbr title="2019-05-04T13:22:10-04:00">May 4</abbr></div>
             <div class="resource-statistics">
               <span>12</span><span>1,500</span><span>4</span><span>|</span><span>2</span>
             </div>
           </div>
           <div class="content-actions">
             <a href="/files/castle-preview.png">Preview</a>
             <a href="/files/castle.zip">Download</a>
             <a href="https://mirror.example.com/castle.zip">Mirror</a>
           </div>
           <div class="media-gallery">
             <img src="/files/castle.jpg">
             <iframe src="https://www.youtube.com/embed/abc123?rel=0"></iframe>
           </div>
           <span id="resource_id">{id}</span>
           <div id="item_tags"><a href="/tags/medieval/">medieval</a><a href="/tags/castle/">castle</a></div>
           <div id="r-text-block">A castle<br>with <a href="https://example.com/towers">towers</a></div>
           <form name="server_form"><input type="text" value="play.example.com"></form>
           <div id="comment-list">{comments}</div>
           </body></html>"#
    )
}

/// A submission listing with rows given as `(slug, author)`.
pub fn submission_listing(rows: &[(&str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(slug, author)| {
            format!(
                r#"<div class="r-info">
                     <a href="/project/{slug}/">{slug}</a>
                     <div class="contributed">by <a href="/member/{author}/">{author}</a></div>
                   </div>"#
            )
        })
        .collect();
    format!("<html><body>{rows}</body></html>")
}

/// A member's main profile page.
pub fn profile_page(name: &str, id: u64) -> String {
    format!(
        r#"<html><body>
           <div id="member-title"><h1>{name}</h1></div>
           <div id="profile-bar" profile-id="{id}"></div>
           </body></html>"#
    )
}

/// A member's about page.
pub fn about_page() -> String {
    let mut cells: Vec<String> = (0..13).map(|i| format!("cell {i}")).collect();
    cells[1] = "3,000".into();
    cells[2] = "1,200".into();
    cells[12] = "Mar 9, 2014".into();
    let cells: String = cells
        .iter()
        .map(|c| format!(r#"<tr><td class="stat">{c}</td></tr>"#))
        .collect();
    format!(
        r#"<html><body>
           <span class="member-rank-class">Senior</span>
           <div class="stat level submenu_trigger">Level 31</div>
           <div id="memberpage-about">I build castles.
             <div id="about_more"><div class="info_pane"><div class="member_card_stats">
               <table class="statistics"><tbody>{cells}</tbody></table>
             </div></div></div>
           </div>
           </body></html>"#
    )
}

/// A page of member cells linking to `members`.
pub fn team_page(members: &[&str]) -> String {
    let cells: String = members
        .iter()
        .map(|m| format!(r#"<div class="team_cell"><a href="/member/{m}/">{m}</a></div>"#))
        .collect();
    format!("<html><body>{cells}</body></html>")
}

/// A wall post page with comment ids.
pub fn wall_post_page(id: u64, comments: &[u64]) -> String {
    let comments: String = comments
        .iter()
        .map(|c| {
            format!(
                r#"<div class="item_comment" data-comment-id="{c}">
                     <a href="/member/bob/">bob</a>
                     <abbr title="2021-06-02T09:00:00">today</abbr>
                     <div class="item_comment_contents"><div class="text">Thanks {c}</div></div>
                   </div>"#
            )
        })
        .collect();
    format!(
        r#"<html><body>
           <div class="wall_header table">
             <a href="/member/steve/"><img src="/avatars/steve.png"></a>
             <a href="/member/alex/">alex</a>
             <abbr title="2021-06-01T12:30:00">June 1</abbr>
           </div>
           <div class="wall_content">Hi there<br>friend</div>
           <div class="post_options" post-id="{id}" direct-url="/member/steve/wall/post/{id}/"></div>
           <span class="counter likes_count">7</span>
           {comments}
           </body></html>"#
    )
}

/// A paginated wall listing with posts given as `(id, author)`.
pub fn wall_listing(posts: &[(u64, &str)]) -> String {
    let posts: String = posts
        .iter()
        .map(|(id, author)| {
            format!(
                r#"<div class="wall_post">
                     <div class="wall_header table">
                       <a href="/member/{author}/"><img src="/avatars/{author}.png"></a>
                       <a href="/member/{author}/">{author}</a>
                     </div>
                     <div class="post_options" post-id="{id}" direct-url="/member/steve/wall/post/{id}/"></div>
                   </div>"#
            )
        })
        .collect();
    format!("<html><body>{posts}</body></html>")
}
