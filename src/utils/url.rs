// src/utils/url.rs

//! URL construction for site pages.

use regex::Regex;

/// Join the site origin and an absolute path.
pub fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// A fixed sub-page of a member profile, e.g. `.../member/steve/forum/`.
///
/// # Examples
/// ```
/// use pmc::utils::url::sub_page;
///
/// assert_eq!(
///     sub_page("https://www.planetminecraft.com/member/steve", "wall"),
///     "https://www.planetminecraft.com/member/steve/wall/"
/// );
/// ```
pub fn sub_page(profile: &str, segment: &str) -> String {
    if profile.ends_with('/') {
        format!("{profile}{segment}/")
    } else {
        format!("{profile}/{segment}/")
    }
}

/// Append the listing page parameter.
pub fn with_page(url: &str, page: u32) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}p={page}")
}

/// Form-encode search keywords for a query string.
pub fn encode_keywords(keywords: &str) -> String {
    url::form_urlencoded::byte_serialize(keywords.as_bytes()).collect()
}

/// Rewrite an embedded YouTube player URL to its watch page.
pub fn youtube_watch_url(src: &str) -> String {
    let Ok(embed) = Regex::new(r"youtube(?:-nocookie)?\.com/embed/([A-Za-z0-9_-]+)") else {
        return src.to_string();
    };
    match embed.captures(src).and_then(|caps| caps.get(1)) {
        Some(id) => format!("https://www.youtube.com/watch?v={}", id.as_str()),
        None => src.to_string(),
    }
}
