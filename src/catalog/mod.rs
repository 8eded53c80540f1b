//! Catalog snapshot layer: fetching the feed and querying what came back.
//!
//! Nothing here memoizes. Every interaction fetches its own snapshot so stock changes show up
//! immediately, at the cost of one HTTP round trip per click.

pub mod model;
pub mod page;
pub mod query;
pub mod source;

pub use model::{CatalogSnapshot, Product};
pub use page::{Page, page_count, paginate};
pub use query::{by_club, by_id, by_keyword, distinct_clubs};
pub use source::{CatalogSource, HttpCatalogSource, parse_feed};
