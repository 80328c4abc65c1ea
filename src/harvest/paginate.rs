//! Pagination controller: drives navigation page by page, owns the run state
//! (seen-set + result collection), and decides continuation vs termination.
//!
//! The manual-challenge checkpoint is deliberately plain control flow: after
//! detection we just keep waiting (minutes, not seconds) for a listing to
//! become visible. A human solving the challenge in the headed window is what
//! flips that wait to success; nothing else needs to know it happened.

use std::collections::HashSet;

use anyhow::Result;
use tracing::{info, warn};

use crate::browser::CatalogBrowser;
use crate::core::config::{HarvestConfig, LocaleTarget};
use crate::core::types::Product;
use crate::harvest::page::harvest_page;
use crate::harvest::selectors;

pub struct Harvester {
    cfg: HarvestConfig,
}

impl Harvester {
    pub fn new(cfg: HarvestConfig) -> Self {
        Self { cfg }
    }

    /// Run the full harvest against one shop.
    ///
    /// Termination is always a designed outcome: a listing-wait timeout or a
    /// partial page ends the run normally with whatever was collected.
    /// Navigation and locale faults are logged and tolerated.
    pub async fn run(&self, page: &dyn CatalogBrowser) -> Result<Vec<Product>> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut products: Vec<Product> = Vec::new();

        let first_url = self.page_url(1);
        info!("Navigating to {}", first_url);
        if let Err(e) = page.goto(&first_url).await {
            // The page may still hold partial content worth inspecting.
            warn!("Navigation warning (continuing): {}", e);
        }

        if self.detect_challenge(page).await {
            warn!("⚠️ Challenge detected! Solve it in the browser window.");
            warn!("Harvesting resumes automatically once listing items appear.");
        }

        if let Some(target) = &self.cfg.locale {
            if let Err(e) = self.normalize_locale(page, target).await {
                warn!("Locale normalization failed (continuing as-is): {}", e);
            }
        }

        let mut page_num: u32 = 1;
        loop {
            if page_num > 1 {
                let url = self.page_url(page_num);
                info!("Harvesting page {}: {}", page_num, url);
                if let Err(e) = page.goto(&url).await {
                    warn!("Navigation warning (continuing): {}", e);
                }
            }

            // Long bound on purpose: this is the manual-captcha checkpoint.
            let visible = page
                .wait_for_any(selectors::LISTING_WAIT, self.cfg.listing_wait)
                .await
                .unwrap_or(false);
            if !visible {
                info!(
                    "No listings on page {} after {:?} — treating as end of catalog",
                    page_num, self.cfg.listing_wait
                );
                break;
            }

            let harvest = harvest_page(page, &mut seen).await;
            info!(
                "Page {}: {} cards, {} new products ({} total)",
                page_num,
                harvest.card_count,
                harvest.products.len(),
                products.len() + harvest.products.len()
            );
            products.extend(harvest.products);

            if harvest.card_count < self.cfg.full_page_size {
                info!(
                    "Partial page ({} < {}) — last page reached",
                    harvest.card_count, self.cfg.full_page_size
                );
                break;
            }

            page_num += 1;
            self.inter_page_delay().await;
        }

        info!("Harvest complete: {} products across {} page(s)", products.len(), page_num);
        Ok(products)
    }

    fn page_url(&self, page_num: u32) -> String {
        format!(
            "{}?ref=items_pagination&page={}",
            self.cfg.shop_url, page_num
        )
    }

    /// Challenge markers: keyword in the landing URL, or a challenge iframe.
    async fn detect_challenge(&self, page: &dyn CatalogBrowser) -> bool {
        let url = page.current_url().await.unwrap_or_default();
        if url.contains("captcha") {
            return true;
        }
        page.has_challenge_frame().await.unwrap_or(false)
    }

    /// Pre-harvest locale pinning (region + currency).
    ///
    /// Reads the locale affordance's current state and only drives the
    /// selection dialog on a mismatch. Callers treat any `Err` here as
    /// non-fatal — harvesting proceeds in whatever locale is in effect.
    async fn normalize_locale(
        &self,
        page: &dyn CatalogBrowser,
        target: &LocaleTarget,
    ) -> Result<()> {
        let Some(state) = page.text_of(selectors::LOCALE_TRIGGER).await? else {
            info!("No locale affordance on this storefront — skipping normalization");
            return Ok(());
        };

        if state.contains(&target.region) && state.contains(&target.currency) {
            info!("Locale already {} / {}", target.region, target.currency);
            return Ok(());
        }

        info!(
            "Normalizing locale: '{}' → {} / {}",
            state.trim(),
            target.region,
            target.currency
        );
        page.click(selectors::LOCALE_TRIGGER).await?;
        page.wait_for_any(
            selectors::LOCALE_REGION_SELECT,
            std::time::Duration::from_secs(10),
        )
        .await?;
        page.select_option(selectors::LOCALE_REGION_SELECT, &target.region)
            .await?;
        page.select_option(selectors::LOCALE_CURRENCY_SELECT, &target.currency)
            .await?;
        page.click(selectors::LOCALE_SUBMIT).await?;

        // The submit reloads the storefront; wait for listings to come back.
        page.wait_for_any(
            selectors::LISTING_WAIT,
            std::time::Duration::from_secs(60),
        )
        .await?;
        info!("Locale set to {} / {}", target.region, target.currency);
        Ok(())
    }

    /// Randomized pause between pages so request timing is not uniform.
    async fn inter_page_delay(&self) {
        use rand::prelude::*;
        let ms = {
            let mut rng = rand::rng();
            rng.random_range(self.cfg.page_delay_min_ms..=self.cfg.page_delay_max_ms)
        };
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    }
}
