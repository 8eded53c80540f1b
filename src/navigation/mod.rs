//! The browse state machine: club menu → product page → variant menu → checkout link.
//!
//! Every transition fetches its own snapshot, so a token is resolved against current stock rather
//! than whatever was on screen when the button was drawn. A transition either returns a complete
//! [`Screen`] or an error; callers only touch the chat message on `Ok`, which keeps the previous
//! screen intact on failure.

pub mod screen;
pub mod session;

pub use screen::{Basis, CheckoutLink, ClubMenu, ProductPage, Screen, VariantMenu};
pub use session::{SearchSession, SearchSessions};

use crate::catalog::{self, CatalogSnapshot, CatalogSource, Product, paginate};
use crate::constants::{CLUB_MENU_PAGE_SIZE, PRODUCT_PAGE_SIZE};
use crate::error::{ShopError, ShopResult};
use crate::interactions::ids::{NavToken, club_digest};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub struct Navigator {
    source: Arc<dyn CatalogSource>,
    sessions: Arc<SearchSessions>,
    checkout_base: Url,
    fetch_timeout: Duration,
    page_size: usize,
}

impl Navigator {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        sessions: Arc<SearchSessions>,
        checkout_base: Url,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            source,
            sessions,
            checkout_base,
            fetch_timeout,
            page_size: PRODUCT_PAGE_SIZE,
        }
    }

    /// One bounded fetch. A source that does not answer within the timeout counts as unavailable.
    pub async fn snapshot(&self) -> ShopResult<CatalogSnapshot> {
        match tokio::time::timeout(self.fetch_timeout, self.source.fetch()).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(target = "catalog.fetch", timeout_ms = self.fetch_timeout.as_millis() as u64, "catalog fetch timed out");
                Err(ShopError::CatalogUnavailable("fetch timed out".into()))
            }
        }
    }

    /// Entry point for the browse command.
    pub async fn browse_clubs(&self) -> ShopResult<Screen> {
        self.club_menu(0).await
    }

    /// Entry point for the search command. Opens a fresh session for `chat` only once the
    /// snapshot has been fetched, so a failed search leaves the previous session usable.
    pub async fn search(&self, chat: u64, keyword: &str) -> ShopResult<Screen> {
        let keyword = keyword.trim();
        let snapshot = self.snapshot().await?;
        let session = self.sessions.open(chat, keyword).await;
        Ok(self.product_page(
            &snapshot,
            Basis::Search {
                session,
                keyword: keyword.to_string(),
            },
            0,
        ))
    }

    /// Resolve a button token into the next screen.
    pub async fn apply(&self, chat: u64, token: &NavToken) -> ShopResult<Screen> {
        let screen = match token {
            NavToken::ClubMenu { page } => self.club_menu(*page).await?,
            NavToken::ClubPage { club, page } => {
                let snapshot = self.snapshot().await?;
                self.product_page(&snapshot, Basis::Club(club.clone()), *page)
            }
            NavToken::ClubDigest { digest, page } => {
                let snapshot = self.snapshot().await?;
                let club = catalog::distinct_clubs(&snapshot)
                    .into_iter()
                    .find(|c| club_digest(c) == *digest)
                    .ok_or_else(|| ShopError::NotFound(format!("club {digest:016x}")))?;
                self.product_page(&snapshot, Basis::Club(club), *page)
            }
            NavToken::SearchPage { session, page } => {
                let keyword = self.sessions.keyword(chat, *session).await?;
                let snapshot = self.snapshot().await?;
                self.product_page(
                    &snapshot,
                    Basis::Search {
                        session: *session,
                        keyword,
                    },
                    *page,
                )
            }
            NavToken::Select { product_id } => {
                let snapshot = self.snapshot().await?;
                let product = catalog::by_id(&snapshot, product_id)
                    .map_err(|_| ShopError::ProductGone(product_id.clone()))?
                    .clone();
                Screen::VariantMenu(VariantMenu {
                    choices: product.variant_choices(),
                    product,
                })
            }
            NavToken::Variant {
                product_id,
                variant_id,
            } => Screen::CheckoutLink(CheckoutLink {
                url: self.checkout_url(product_id, variant_id),
                product_id: product_id.clone(),
                variant_id: variant_id.clone(),
            }),
            NavToken::Unrecognized => return Err(ShopError::UnrecognizedToken),
        };
        tracing::debug!(target = "nav", chat_id = chat, state = screen.state(), "transition");
        Ok(screen)
    }

    /// `{base}?add-to-cart={product}&variation_id={variant}`, appended to any query the base has.
    pub fn checkout_url(&self, product_id: &str, variant_id: &str) -> Url {
        let mut url = self.checkout_base.clone();
        url.query_pairs_mut()
            .append_pair("add-to-cart", product_id)
            .append_pair("variation_id", variant_id);
        url
    }

    async fn club_menu(&self, page: usize) -> ShopResult<Screen> {
        let snapshot = self.snapshot().await?;
        let clubs = catalog::distinct_clubs(&snapshot);
        Ok(Screen::ClubMenu(ClubMenu {
            page: paginate(&clubs, page, CLUB_MENU_PAGE_SIZE),
        }))
    }

    fn product_page(&self, snapshot: &CatalogSnapshot, basis: Basis, page: usize) -> Screen {
        let matches = match &basis {
            Basis::Club(club) => catalog::by_club(snapshot, club),
            Basis::Search { keyword, .. } => catalog::by_keyword(snapshot, keyword),
        };
        let page = paginate(&matches, page, self.page_size).map(Product::clone);
        Screen::ProductPage(ProductPage { basis, page })
    }
}
