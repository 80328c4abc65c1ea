pub mod browser;
pub mod core;
pub mod harvest;
pub mod output;

// --- Primary exports ---
pub use core::config::{HarvestConfig, LocaleTarget};
pub use core::types;
pub use core::types::*;

pub use browser::{CatalogBrowser, ListingHandle};
pub use harvest::paginate::Harvester;
pub use harvest::price::{parse_price, ParsedPrice};
