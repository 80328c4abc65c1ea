use serde::{Deserialize, Serialize};

/// One harvested listing. Field order is the CSV column order.
///
/// `url` is canonical (query string stripped) and unique across a run — the
/// pagination controller's seen-set enforces that. `current_price` /
/// `original_price` are numeric text (`"30.00"`), empty when no amount could
/// be parsed out of `price_display`; `original_price` mirrors `current_price`
/// unless the raw text carried an explicit "original price" label.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Product {
    pub url: String,
    pub title: String,
    pub price_display: String,
    pub current_price: String,
    pub original_price: String,
}

/// Result of harvesting a single catalog page.
///
/// `card_count` is the raw candidate count — every card found on the page,
/// duplicates included — which drives the end-of-catalog decision. `products`
/// holds only the cards not seen on earlier pages, in DOM order.
#[derive(Debug, Default)]
pub struct PageHarvest {
    pub products: Vec<Product>,
    pub card_count: usize,
}
