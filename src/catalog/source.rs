//! Feed retrieval and parsing.
//!
//! The feed is a CSV table with a header row:
//! `id,title,club,price,sizes,variation_map,image,link`.
//! `sizes` is `|`-joined and `variation_map` is `|`-joined `size:variant_id` pairs.
use super::model::{CatalogSnapshot, Product};
use crate::error::{ShopError, ShopResult};
use anyhow::Context as _;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const LIST_DELIMITER: char = '|';
pub const PAIR_DELIMITER: char = ':';
const USER_AGENT: &str = concat!("catalog_bot/", env!("CARGO_PKG_VERSION"));

/// Anything that can produce a fresh snapshot. Each call is a full retrieval.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> ShopResult<CatalogSnapshot>;
}

pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpCatalogSource {
    pub fn new(url: Url, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("building catalog HTTP client")?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    #[tracing::instrument(level = "debug", skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> ShopResult<CatalogSnapshot> {
        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| ShopError::CatalogUnavailable(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ShopError::CatalogUnavailable(format!("status {status}")));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| ShopError::CatalogUnavailable(e.to_string()))?;
        let snapshot = parse_feed(&body)?;
        tracing::debug!(target = "catalog.fetch", products = snapshot.len(), "feed fetched");
        Ok(snapshot)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FeedRow {
    id: String,
    title: String,
    club: String,
    price: String,
    sizes: String,
    variation_map: String,
    image: String,
    link: String,
}

impl FeedRow {
    fn into_product(self) -> Option<Product> {
        if self.id.is_empty() || self.title.is_empty() {
            return None;
        }
        Some(Product {
            sizes: split_list(&self.sizes).map(str::to_string).collect(),
            variation_map: parse_variation_map(&self.variation_map),
            id: self.id,
            title: self.title,
            club: self.club,
            price: self.price,
            image: self.image,
            link: self.link,
        })
    }
}

/// Error pages and captive portals come back as HTML with a 200 status.
pub fn looks_like_markup(body: &str) -> bool {
    let head = body.trim_start();
    if head.starts_with('<') {
        return true;
    }
    let probe: String = head.chars().take(512).collect::<String>().to_lowercase();
    probe.contains("<html") || probe.contains("<body") || probe.contains("<!doctype")
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Malformed pairs are skipped rather than failing the whole row.
pub fn parse_variation_map(raw: &str) -> IndexMap<String, String> {
    split_list(raw)
        .filter_map(|pair| pair.split_once(PAIR_DELIMITER))
        .map(|(size, variant)| (size.trim(), variant.trim()))
        .filter(|(size, variant)| !size.is_empty() && !variant.is_empty())
        .map(|(size, variant)| (size.to_string(), variant.to_string()))
        .collect()
}

/// Parse a raw feed body into a snapshot.
pub fn parse_feed(body: &str) -> ShopResult<CatalogSnapshot> {
    if body.trim().is_empty() {
        return Err(ShopError::SourceFormat("empty body".into()));
    }
    if looks_like_markup(body) {
        return Err(ShopError::SourceFormat("body looks like markup".into()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(body.as_bytes());
    let mut products = Vec::new();
    let mut skipped = 0usize;
    for row in reader.deserialize::<FeedRow>() {
        match row.map(FeedRow::into_product) {
            Ok(Some(p)) => products.push(p),
            Ok(None) => skipped += 1,
            Err(e) => {
                skipped += 1;
                tracing::debug!(target = "catalog.parse", error = %e, "skipping unreadable row");
            }
        }
    }
    if skipped > 0 {
        tracing::warn!(target = "catalog.parse", skipped, kept = products.len(), "feed rows skipped");
    }
    if products.is_empty() {
        return Err(ShopError::SourceFormat("no usable rows".into()));
    }
    Ok(CatalogSnapshot::new(products))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,title,club,price,sizes,variation_map,image,link";

    #[test]
    fn parses_rows_and_lists() {
        let body = format!(
            "{HEADER}\n101,Home Kit 24/25,Barcelona,2499,S|M|L,S:9001|M:9002|L:9003,https://img/1.jpg,https://shop/p/101\n"
        );
        let snap = parse_feed(&body).expect("parse");
        assert_eq!(snap.len(), 1);
        let p = &snap.products()[0];
        assert_eq!(p.sizes, vec!["S", "M", "L"]);
        assert_eq!(p.variation_map.get("M").map(String::as_str), Some("9002"));
        assert_eq!(p.club, "Barcelona");
    }

    #[test]
    fn rejects_markup() {
        let err = parse_feed("<!DOCTYPE html><html><body>Login</body></html>").unwrap_err();
        assert!(matches!(err, ShopError::SourceFormat(_)));
    }

    #[test]
    fn rejects_header_only_feed() {
        let err = parse_feed(HEADER).unwrap_err();
        assert!(matches!(err, ShopError::SourceFormat(_)));
    }

    #[test]
    fn rows_without_id_are_skipped() {
        let body = format!("{HEADER}\n,No Id,Club,10,,,,\n7,Kept,Club,10,M,M:1,,\n");
        let snap = parse_feed(&body).expect("parse");
        assert_eq!(snap.ids(), vec!["7".to_string()]);
    }

    #[test]
    fn variation_map_tolerates_junk_pairs() {
        let map = parse_variation_map("S:1|broken|:2|M:|L:3");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("S").map(String::as_str), Some("1"));
        assert_eq!(map.get("L").map(String::as_str), Some("3"));
    }
}
