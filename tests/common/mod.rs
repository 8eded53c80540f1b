//! Shared fixtures for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use catalog_bot::catalog::{CatalogSnapshot, CatalogSource, Product};
use catalog_bot::{ShopError, ShopResult};
use indexmap::IndexMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn product(id: &str, title: &str, club: &str) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        club: club.to_string(),
        price: "1999".to_string(),
        sizes: vec!["S".into(), "M".into(), "L".into()],
        variation_map: IndexMap::from([
            ("S".to_string(), format!("{id}-s")),
            ("M".to_string(), format!("{id}-m")),
            ("L".to_string(), format!("{id}-l")),
        ]),
        image: format!("https://img.example.com/{id}.jpg"),
        link: format!("https://shop.example.com/p/{id}"),
    }
}

/// 12 products: club A has a1..a7, club B has b1..b5, interleaved in feed order.
pub fn twelve_across_two_clubs() -> CatalogSnapshot {
    let mut products = Vec::new();
    for i in 1..=7 {
        products.push(product(&format!("a{i}"), &format!("Alpha Jersey {i}"), "A"));
        if i <= 5 {
            products.push(product(&format!("b{i}"), &format!("Beta Jersey {i}"), "B"));
        }
    }
    CatalogSnapshot::new(products)
}

/// Source returning queued results in order, then repeating the last one.
pub struct ScriptedSource {
    script: Mutex<Vec<ShopResult<CatalogSnapshot>>>,
    pub calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedSource {
    pub fn new(script: Vec<ShopResult<CatalogSnapshot>>) -> Self {
        Self {
            script: Mutex::new(script),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub fn always(snapshot: CatalogSnapshot) -> Self {
        Self::new(vec![Ok(snapshot)])
    }

    pub fn down() -> Self {
        Self::new(vec![Err(ShopError::CatalogUnavailable("connection refused".into()))])
    }

    pub fn slow(snapshot: CatalogSnapshot, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::always(snapshot)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for ScriptedSource {
    async fn fetch(&self) -> ShopResult<CatalogSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.remove(0)
        } else {
            script[0].clone()
        }
    }
}
