//! Pure lookups over a single snapshot.
use super::model::{CatalogSnapshot, Product};
use crate::error::{ShopError, ShopResult};
use std::collections::BTreeSet;

/// Exact, case-sensitive club match in feed order.
pub fn by_club<'a>(snapshot: &'a CatalogSnapshot, name: &str) -> Vec<&'a Product> {
    snapshot
        .products()
        .iter()
        .filter(|p| p.club == name)
        .collect()
}

/// Case-insensitive substring match on the title. A blank keyword matches nothing.
pub fn by_keyword<'a>(snapshot: &'a CatalogSnapshot, text: &str) -> Vec<&'a Product> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    snapshot
        .products()
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect()
}

pub fn by_id<'a>(snapshot: &'a CatalogSnapshot, id: &str) -> ShopResult<&'a Product> {
    snapshot
        .products()
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| ShopError::NotFound(id.to_string()))
}

/// Sorted, de-duplicated, non-blank club labels.
pub fn distinct_clubs(snapshot: &CatalogSnapshot) -> Vec<String> {
    snapshot
        .products()
        .iter()
        .filter(|p| !p.club.trim().is_empty())
        .map(|p| p.club.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
