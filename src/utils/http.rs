// src/utils/http.rs

//! HTTP page fetching.

use std::time::Duration;

use scraper::Html;

use crate::error::Result;
use crate::models::ClientConfig;
use crate::utils::url::with_page;

/// Source of parsed pages.
///
/// Loaders only ever read through this trait, so any transport (or an
/// in-memory fixture) can stand in for the network.
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and parse it as HTML.
    fn fetch(&self, url: &str) -> Result<Html>;

    /// Fetch one page of a listing; `None` fetches the bare URL.
    fn fetch_page(&self, url: &str, page: Option<u32>) -> Result<Html> {
        match page {
            Some(page) => self.fetch(&with_page(url, page)),
            None => self.fetch(url),
        }
    }
}

/// Create a configured blocking HTTP client.
pub fn create_client(config: &ClientConfig) -> Result<reqwest::blocking::Client> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a page and parse it as HTML. Non-success statuses are errors.
pub fn fetch_page(client: &reqwest::blocking::Client, url: &str) -> Result<Html> {
    let response = client.get(url).send()?.error_for_status()?;
    let text = response.text()?;
    Ok(Html::parse_document(&text))
}

/// [`PageFetcher`] over a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
        })
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Html> {
        log::debug!("GET {url}");
        fetch_page(&self.client, url)
    }
}
