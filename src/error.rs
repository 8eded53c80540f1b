//! Failure taxonomy for catalog lookups and navigation transitions.
//! Every variant is recovered at the interaction boundary and shown to the user as a short notice.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    /// Network failure, non-success status, or fetch timeout.
    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(String),
    /// The feed arrived but could not be turned into any usable product rows.
    #[error("catalog feed malformed: {0}")]
    SourceFormat(String),
    /// A product id carried by a token is missing from the freshly fetched snapshot.
    #[error("product {0} is no longer listed")]
    ProductGone(String),
    /// The keyword a page token refers to is no longer held for this chat.
    #[error("search session expired")]
    StaleSession,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unrecognized navigation token")]
    UnrecognizedToken,
}

impl ShopError {
    /// Short text safe to show in chat.
    pub fn user_message(&self) -> &'static str {
        match self {
            ShopError::CatalogUnavailable(_) => {
                "⚠️ The catalog could not be reached right now. Please try again in a moment."
            }
            ShopError::SourceFormat(_) => {
                "⚠️ The catalog feed is temporarily unreadable. Please try again later."
            }
            ShopError::ProductGone(_) => "❌ That item is no longer in stock.",
            ShopError::StaleSession => {
                "⌛ This search has expired. Please run the search command again."
            }
            ShopError::NotFound(_) => "❌ Nothing matched that selection.",
            ShopError::UnrecognizedToken => "❓ This button is outdated. Please start again.",
        }
    }
}

pub type ShopResult<T> = Result<T, ShopError>;
