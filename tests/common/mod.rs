//! Scripted in-memory browser for scenario tests.
//!
//! Implements the harvester's capability traits over fixture data: a list of
//! catalog "pages", each a list of fake cards. Navigation switches pages by
//! parsing the `page=` query parameter; interactions are recorded so tests
//! can assert on the locale-dialog flow.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use shoprake::browser::{CatalogBrowser, ListingHandle};
use shoprake::harvest::selectors;
use shoprake::HarvestConfig;

#[derive(Clone, Debug, Default)]
pub struct FakeCard {
    pub tag: String,
    pub href: Option<String>,
    pub title: Option<String>,
    pub symbol: Option<String>,
    pub value: Option<String>,
    pub price_area: Option<String>,
    /// Text content when this handle stands in for a child node.
    pub text: Option<String>,
}

impl FakeCard {
    /// A well-formed container card for listing number `n`.
    pub fn listing(n: usize) -> Self {
        Self {
            tag: "div".into(),
            href: Some(format!(
                "https://www.etsy.com/listing/{}/item-{}?ref=shop_home",
                1000 + n,
                n
            )),
            title: Some(format!("Item {}", n)),
            symbol: Some("$".into()),
            value: Some(format!("{}.00", 10 + n % 50)),
            price_area: None,
            text: None,
        }
    }

    /// The newer grid shape: the card is itself the anchor.
    pub fn anchor_listing(n: usize) -> Self {
        Self {
            tag: "a".into(),
            ..Self::listing(n)
        }
    }

    pub fn with_price_area(mut self, raw: &str) -> Self {
        self.price_area = Some(raw.to_string());
        self
    }

    pub fn without_link(mut self) -> Self {
        self.href = None;
        self
    }

    fn child(text: &str) -> Box<dyn ListingHandle> {
        Box::new(FakeCard {
            tag: "span".into(),
            text: Some(text.to_string()),
            ..Default::default()
        })
    }
}

#[async_trait]
impl ListingHandle for FakeCard {
    async fn tag_name(&self) -> Result<String> {
        Ok(self.tag.to_uppercase())
    }

    async fn attr(&self, name: &str) -> Result<Option<String>> {
        if name == "href" {
            Ok(self.href.clone())
        } else {
            Ok(None)
        }
    }

    async fn query(&self, selector: &str) -> Result<Option<Box<dyn ListingHandle>>> {
        let found = match selector {
            "a" => self.href.as_ref().map(|h| {
                Box::new(FakeCard {
                    tag: "a".into(),
                    href: Some(h.clone()),
                    ..Default::default()
                }) as Box<dyn ListingHandle>
            }),
            s if s == selectors::TITLE => self.title.as_deref().map(FakeCard::child),
            s if s == selectors::CURRENCY_SYMBOL => self.symbol.as_deref().map(FakeCard::child),
            s if s == selectors::CURRENCY_VALUE => self.value.as_deref().map(FakeCard::child),
            s if s == selectors::PRICE_AREA => self.price_area.as_deref().map(FakeCard::child),
            _ => None,
        };
        Ok(found)
    }

    async fn text(&self) -> Result<Option<String>> {
        Ok(self.text.clone())
    }

    async fn inner_text(&self) -> Result<Option<String>> {
        Ok(self.text.clone())
    }
}

#[derive(Default)]
pub struct FakeBrowser {
    pages: Vec<Vec<FakeCard>>,
    /// Serve cards only through the fallback selector (newer grid template).
    pub fallback_only: bool,
    pub challenge_frame: bool,
    pub locale_state: Option<String>,

    current: AtomicUsize,
    pub navigations: Mutex<Vec<String>>,
    pub clicks: Mutex<Vec<String>>,
    pub selections: Mutex<Vec<(String, String)>>,
}

impl FakeBrowser {
    pub fn with_pages(pages: Vec<Vec<FakeCard>>) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    /// Pages of `sizes.len()` pages with the given card counts, all listings
    /// globally unique.
    pub fn shop(sizes: &[usize]) -> Self {
        let mut n = 0;
        let pages = sizes
            .iter()
            .map(|&count| {
                (0..count)
                    .map(|_| {
                        n += 1;
                        FakeCard::listing(n)
                    })
                    .collect()
            })
            .collect();
        Self::with_pages(pages)
    }

    pub fn navigation_count(&self) -> usize {
        self.navigations.lock().unwrap().len()
    }

    fn current_cards(&self) -> Vec<FakeCard> {
        self.pages
            .get(self.current.load(Ordering::Relaxed))
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl CatalogBrowser for FakeBrowser {
    async fn goto(&self, url: &str) -> Result<()> {
        let page_num: usize = url
            .split("page=")
            .nth(1)
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);
        self.current.store(page_num.saturating_sub(1), Ordering::Relaxed);
        self.navigations.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self
            .navigations
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default())
    }

    async fn wait_for_any(&self, selector: &str, _timeout: Duration) -> Result<bool> {
        if selector == selectors::LISTING_WAIT {
            return Ok(!self.current_cards().is_empty());
        }
        // Locale dialog elements appear as soon as they are asked for.
        Ok(true)
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn ListingHandle>>> {
        let serves_primary = selector == selectors::CARD && !self.fallback_only;
        let serves_fallback = selector == selectors::CARD_FALLBACK && self.fallback_only;
        if !serves_primary && !serves_fallback {
            return Ok(Vec::new());
        }
        Ok(self
            .current_cards()
            .into_iter()
            .map(|c| Box::new(c) as Box<dyn ListingHandle>)
            .collect())
    }

    async fn has_challenge_frame(&self) -> Result<bool> {
        Ok(self.challenge_frame)
    }

    async fn text_of(&self, selector: &str) -> Result<Option<String>> {
        if selector == selectors::LOCALE_TRIGGER {
            return Ok(self.locale_state.clone());
        }
        Ok(None)
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.clicks.lock().unwrap().push(selector.to_string());
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<()> {
        self.selections
            .lock()
            .unwrap()
            .push((selector.to_string(), value.to_string()));
        Ok(())
    }
}

/// Run config tuned for tests: tiny waits, no real delays.
pub fn test_config(full_page_size: usize) -> HarvestConfig {
    HarvestConfig {
        shop_url: "https://www.etsy.com/shop/FixtureShop".into(),
        full_page_size,
        listing_wait: Duration::from_millis(10),
        nav_timeout: Duration::from_secs(1),
        page_delay_min_ms: 0,
        page_delay_max_ms: 1,
        locale: None,
        output: "products.csv".into(),
        headless: true,
    }
}
