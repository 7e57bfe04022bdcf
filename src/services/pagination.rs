// src/services/pagination.rs

//! Walking paginated listings.

use std::ops::Range;

use scraper::Html;

use crate::error::Result;
use crate::services::IgnoreList;
use crate::utils::http::PageFetcher;

/// An item read from a listing, with the author name used for ignoring.
#[derive(Debug, Clone)]
pub struct ListingRow<T> {
    pub author: Option<String>,
    pub item: T,
}

/// Fetches listing pages in order and filters rows through an ignore list.
pub struct Paginator<'a> {
    fetcher: &'a dyn PageFetcher,
    ignored: &'a IgnoreList,
}

impl<'a> Paginator<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, ignored: &'a IgnoreList) -> Self {
        Self { fetcher, ignored }
    }

    /// Collect `amount` items from `url` and the pages after it.
    ///
    /// The first page is the bare URL; later pages carry `p=2`, `p=3`, ...
    /// Stops early when a page has no rows at all. Ignored rows do not count
    /// toward `amount`.
    pub fn take<T, F>(&self, url: &str, amount: usize, mut extract: F) -> Result<Vec<T>>
    where
        F: FnMut(&Html) -> Vec<ListingRow<T>>,
    {
        let mut items = Vec::with_capacity(amount);
        let mut page: Option<u32> = None;

        while items.len() < amount {
            let doc = self.fetcher.fetch_page(url, page)?;
            let rows = extract(&doc);
            if rows.is_empty() {
                log::debug!(
                    "Listing {url} ran out after {} of {amount} items",
                    items.len()
                );
                break;
            }
            let remaining = amount - items.len();
            items.extend(self.visible(rows).take(remaining));
            page = Some(page.map_or(2, |p| p + 1));
        }

        Ok(items)
    }

    /// Every item on pages `pages.start` up to, not including, `pages.end`.
    pub fn range<T, F>(&self, url: &str, pages: Range<u32>, mut extract: F) -> Result<Vec<T>>
    where
        F: FnMut(&Html) -> Vec<ListingRow<T>>,
    {
        let mut items = Vec::new();
        for page in pages {
            let doc = self.fetcher.fetch_page(url, Some(page))?;
            items.extend(self.visible(extract(&doc)));
        }
        Ok(items)
    }

    fn visible<T>(&self, rows: Vec<ListingRow<T>>) -> impl Iterator<Item = T> {
        rows.into_iter().filter_map(|row| match &row.author {
            Some(name) if self.ignored.contains(name) => {
                log::debug!("Skipping row by ignored member {name}");
                None
            }
            _ => Some(row.item),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::FixtureFetcher;

    const URL: &str = "https://example.test/list/";

    // Pages hold rows as `<li data-author="..">item</li>`
    fn page(rows: &[(&str, &str)]) -> String {
        let rows: String = rows
            .iter()
            .map(|(author, item)| format!(r#"<li data-author="{author}">{item}</li>"#))
            .collect();
        format!("<ul>{rows}</ul>")
    }

    fn extract(doc: &Html) -> Vec<ListingRow<String>> {
        let li = scraper::Selector::parse("li").unwrap();
        doc.select(&li)
            .map(|el| ListingRow {
                author: el.value().attr("data-author").map(str::to_string),
                item: el.text().collect(),
            })
            .collect()
    }

    fn numbered(first: usize, author: &str) -> String {
        let owned: Vec<(String, String)> = (first..first + 5)
            .map(|n| (author.to_string(), format!("item{n}")))
            .collect();
        let rows: Vec<(&str, &str)> = owned.iter().map(|(a, i)| (a.as_str(), i.as_str())).collect();
        page(&rows)
    }

    #[test]
    fn test_take_stops_at_amount() {
        let fetcher = FixtureFetcher::new()
            .with(URL, numbered(1, "a"))
            .with(format!("{URL}?p=2"), numbered(6, "a"))
            .with(format!("{URL}?p=3"), numbered(11, "a"))
            .with(format!("{URL}?p=4"), numbered(16, "a"));
        let ignored = IgnoreList::new();

        let items = Paginator::new(&fetcher, &ignored)
            .take(URL, 12, extract)
            .unwrap();

        assert_eq!(items.len(), 12);
        assert_eq!(items.first().map(String::as_str), Some("item1"));
        assert_eq!(items.last().map(String::as_str), Some("item12"));
        assert_eq!(fetcher.total(), 3);
        assert_eq!(fetcher.hits(&format!("{URL}?p=4")), 0);
    }

    #[test]
    fn test_ignored_rows_are_made_up_later() {
        let first = page(&[
            ("a", "item1"),
            ("bob", "skip1"),
            ("a", "item2"),
            ("bob", "skip2"),
            ("a", "item3"),
        ]);
        let fetcher = FixtureFetcher::new()
            .with(URL, first)
            .with(format!("{URL}?p=2"), numbered(4, "a"));
        let mut ignored = IgnoreList::new();
        ignored.ignore_users(["bob"]).unwrap();

        let items = Paginator::new(&fetcher, &ignored)
            .take(URL, 5, extract)
            .unwrap();

        assert_eq!(items, vec!["item1", "item2", "item3", "item4", "item5"]);
        assert_eq!(fetcher.total(), 2);
    }

    #[test]
    fn test_empty_page_ends_listing() {
        let fetcher = FixtureFetcher::new()
            .with(URL, numbered(1, "a"))
            .with(format!("{URL}?p=2"), page(&[]));
        let ignored = IgnoreList::new();

        let items = Paginator::new(&fetcher, &ignored)
            .take(URL, 50, extract)
            .unwrap();

        assert_eq!(items.len(), 5);
        assert_eq!(fetcher.total(), 2);
    }

    #[test]
    fn test_zero_amount_fetches_nothing() {
        let fetcher = FixtureFetcher::new();
        let ignored = IgnoreList::new();
        let items = Paginator::new(&fetcher, &ignored)
            .take(URL, 0, extract)
            .unwrap();
        assert!(items.is_empty());
        assert_eq!(fetcher.total(), 0);
    }

    #[test]
    fn test_failed_page_aborts_listing() {
        let fetcher = FixtureFetcher::new().with(URL, numbered(1, "a"));
        let ignored = IgnoreList::new();
        let result = Paginator::new(&fetcher, &ignored).take(URL, 8, extract);
        assert!(result.is_err());
    }

    #[test]
    fn test_range_is_end_exclusive() {
        let url = "https://example.test/list/?order=new";
        let fetcher = FixtureFetcher::new()
            .with(format!("{url}&p=2"), numbered(6, "a"))
            .with(format!("{url}&p=3"), numbered(11, "a"));
        let ignored = IgnoreList::new();

        let items = Paginator::new(&fetcher, &ignored)
            .range(url, 2..4, extract)
            .unwrap();

        assert_eq!(items.len(), 10);
        assert_eq!(items[0], "item6");
        assert_eq!(fetcher.hits(&format!("{url}&p=4")), 0);
    }
}
