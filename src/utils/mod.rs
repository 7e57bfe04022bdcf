//! Utility functions and helpers.

pub mod http;
#[cfg(test)]
pub(crate) mod testing;
pub mod url;

use ::url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://www.planetminecraft.com/forums/").unwrap();
        assert_eq!(
            resolve_url(&base, "pmc/introductions/"),
            "https://www.planetminecraft.com/forums/pmc/introductions/"
        );
        assert_eq!(
            resolve_url(&base, "/member/steve/"),
            "https://www.planetminecraft.com/member/steve/"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }
}
