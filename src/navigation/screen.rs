//! Rendered-state values produced by the navigator. The Discord layer turns these into embeds.
use crate::interactions::ids::NavToken;
use crate::catalog::{Page, Product};
use url::Url;

/// What a product page was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Basis {
    Club(String),
    Search { session: u64, keyword: String },
}

impl Basis {
    /// Token that re-renders this basis at `page`.
    pub fn page_token(&self, page: usize) -> NavToken {
        match self {
            Basis::Club(club) => NavToken::club_page(club, page),
            Basis::Search { session, .. } => NavToken::SearchPage {
                session: *session,
                page,
            },
        }
    }

    pub fn heading(&self) -> String {
        match self {
            Basis::Club(club) => format!("🏷 {club}"),
            Basis::Search { keyword, .. } => format!("🔎 \"{keyword}\""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubMenu {
    pub page: Page<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPage {
    pub basis: Basis,
    pub page: Page<Product>,
}

impl ProductPage {
    pub fn prev_token(&self) -> Option<NavToken> {
        self.page
            .has_prev()
            .then(|| self.basis.page_token(self.page.index - 1))
    }

    pub fn next_token(&self) -> Option<NavToken> {
        self.page
            .has_next()
            .then(|| self.basis.page_token(self.page.index + 1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantMenu {
    pub product: Product,
    /// `(size, variant_id)` in display order.
    pub choices: Vec<(String, String)>,
}

impl VariantMenu {
    pub fn tokens(&self) -> Vec<(String, NavToken)> {
        self.choices
            .iter()
            .map(|(size, variant)| {
                (
                    size.clone(),
                    NavToken::Variant {
                        product_id: self.product.id.clone(),
                        variant_id: variant.clone(),
                    },
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLink {
    pub product_id: String,
    pub variant_id: String,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    ClubMenu(ClubMenu),
    ProductPage(ProductPage),
    VariantMenu(VariantMenu),
    CheckoutLink(CheckoutLink),
}

impl Screen {
    pub fn state(&self) -> &'static str {
        match self {
            Screen::ClubMenu(_) => "club_menu",
            Screen::ProductPage(_) => "product_page",
            Screen::VariantMenu(_) => "variant_menu",
            Screen::CheckoutLink(_) => "checkout_link",
        }
    }
}
