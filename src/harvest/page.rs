//! Whole-page harvesting: candidate discovery with selector fallback,
//! per-card extraction, and run-level dedup.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::browser::CatalogBrowser;
use crate::core::types::PageHarvest;
use crate::harvest::card::extract_card;
use crate::harvest::selectors;

/// Harvest every candidate card on the current page, in DOM order.
///
/// `seen` is the run-scoped canonical-URL set: cards already in it are
/// counted but not re-collected (the marketplace re-renders listings across
/// paginated requests). `card_count` in the result is the raw candidate
/// count, duplicates included — that number, not the new-product count,
/// drives the end-of-catalog decision upstream.
///
/// This never fails: a query fault degrades to an empty candidate list, a
/// bad card is skipped.
pub async fn harvest_page(page: &dyn CatalogBrowser, seen: &mut HashSet<String>) -> PageHarvest {
    let mut cards = match page.query_all(selectors::CARD).await {
        Ok(cards) => cards,
        Err(e) => {
            warn!("card query failed (treating page as empty): {}", e);
            Vec::new()
        }
    };

    if cards.is_empty() {
        // Newer grid template renders bare listing links.
        cards = match page.query_all(selectors::CARD_FALLBACK).await {
            Ok(cards) => cards,
            Err(e) => {
                warn!("fallback card query failed: {}", e);
                Vec::new()
            }
        };
    }

    let card_count = cards.len();
    let mut products = Vec::new();

    for card in &cards {
        let Some(product) = extract_card(card.as_ref()).await else {
            debug!("skipping card with no resolvable link");
            continue;
        };
        if !seen.insert(product.url.clone()) {
            continue; // already collected on a prior page
        }
        products.push(product);
    }

    PageHarvest {
        products,
        card_count,
    }
}
