//! Product rows and the immutable snapshot they arrive in.
use indexmap::IndexMap;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub title: String,
    /// Category label; may be blank.
    pub club: String,
    pub price: String,
    pub sizes: Vec<String>,
    /// size label -> variant id, in feed order. Keys need not line up with `sizes`.
    pub variation_map: IndexMap<String, String>,
    pub image: String,
    pub link: String,
}

impl Product {
    /// Sizes that can actually be ordered, as `(label, variant_id)` pairs.
    ///
    /// Listed sizes come first in their listed order; variants whose size label is not in `sizes`
    /// are appended afterwards so that a mismatched feed still offers every purchasable variant.
    /// Sizes sharing one variant id collapse into a single choice labelled `"S / M"`, so every
    /// variant id appears at most once.
    pub fn variant_choices(&self) -> Vec<(String, String)> {
        let listed = self
            .sizes
            .iter()
            .filter_map(|s| self.variation_map.get_key_value(s));
        let extras = self
            .variation_map
            .iter()
            .filter(|(size, _)| !self.sizes.contains(*size));

        let mut out: Vec<(String, String)> = Vec::with_capacity(self.variation_map.len());
        let mut seen_sizes = HashSet::new();
        for (size, variant) in listed.chain(extras) {
            if !seen_sizes.insert(size) {
                continue;
            }
            match out.iter_mut().find(|(_, v)| *v == *variant) {
                Some((label, _)) => {
                    label.push_str(" / ");
                    label.push_str(size);
                }
                None => out.push((size.clone(), variant.clone())),
            }
        }
        out
    }

    pub fn sizes_label(&self) -> String {
        if self.sizes.is_empty() {
            "—".to_string()
        } else {
            self.sizes.join(", ")
        }
    }
}

/// One fetched view of the feed. Never reused across interactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.products.iter().map(|p| p.id.clone()).collect()
    }
}
