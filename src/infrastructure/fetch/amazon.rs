//! Amazon product page fetcher

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use scraper::{Html, Selector};
use tracing::debug;

use super::{accent, PageFetcher};
use crate::shared::errors::FetchError;
use crate::shared::types::PageSnapshot;

const TITLE_SELECTOR: &str = "#productTitle";
const PRICE_SELECTOR: &str = "#corePrice_feature_div span.a-offscreen";
const AVAILABILITY_SELECTOR: &str = "#availability > span";
const THUMBNAIL_PATTERN: &str = r#"\{\s*"landingImageUrl"\s*:\s*"(.+?)"\s*\}"#;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/111.0.0.0 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Extracts title, price, availability and the landing thumbnail from an
/// Amazon product page.
pub struct AmazonPageFetcher {
    client: reqwest::Client,
    title: Selector,
    price: Selector,
    availability: Selector,
    thumbnail: Regex,
}

impl AmazonPageFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB,en;q=0.9"));
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            title: selector(TITLE_SELECTOR),
            price: selector(PRICE_SELECTOR),
            availability: selector(AVAILABILITY_SELECTOR),
            thumbnail: Regex::new(THUMBNAIL_PATTERN).expect("static thumbnail pattern"),
        })
    }

    fn parse(&self, key: &str, body: &str) -> Result<PageSnapshot, FetchError> {
        let document = Html::parse_document(body);
        let text_of = |sel: &Selector| {
            document
                .select(sel)
                .next()
                .map(|element| element.text().collect::<String>().trim().to_string())
                .filter(|text| !text.is_empty())
        };

        let title = text_of(&self.title).ok_or_else(|| FetchError::InvalidProduct(key.to_string()))?;
        let price = text_of(&self.price);
        let availability = text_of(&self.availability);
        let thumbnail_url = self
            .thumbnail
            .captures(body)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string());

        Ok(PageSnapshot {
            title,
            price,
            availability,
            thumbnail_url,
        })
    }
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static css selector")
}

#[async_trait]
impl PageFetcher for AmazonPageFetcher {
    async fn fetch(&self, key: &str) -> Result<PageSnapshot, FetchError> {
        let body = self.client.get(key).send().await?.text().await?;
        debug!(product = %key, bytes = body.len(), "page fetched");
        self.parse(key, &body)
    }

    async fn accent_color(&self, thumbnail_url: &str) -> Result<String, FetchError> {
        let bytes = self.client.get(thumbnail_url).send().await?.bytes().await?;
        accent::dominant_color(&bytes)
    }
}
