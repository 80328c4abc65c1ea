//! `CatalogBrowser` / `ListingHandle` over a live `chromiumoxide` page.
//!
//! Element waits are plain selector polls — the same heuristic shape as a
//! networkidle wait, but anchored on the one thing the harvester actually
//! cares about: a listing becoming queryable.

use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chromiumoxide::{Element, Page};
use tracing::debug;

use super::{CatalogBrowser, ListingHandle};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

const CHALLENGE_IFRAME_SELECTOR: &str = "iframe[src*='captcha']";

pub struct CdpBrowser {
    page: Page,
    nav_timeout: Duration,
}

impl CdpBrowser {
    pub fn new(page: Page, nav_timeout: Duration) -> Self {
        Self { page, nav_timeout }
    }
}

#[async_trait]
impl CatalogBrowser for CdpBrowser {
    async fn goto(&self, url: &str) -> Result<()> {
        tokio::time::timeout(self.nav_timeout, self.page.goto(url))
            .await
            .map_err(|_| anyhow!("navigation timed out after {:?}: {}", self.nav_timeout, url))??;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    async fn wait_for_any(&self, selector: &str, timeout: Duration) -> Result<bool> {
        let start = Instant::now();
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(true);
            }
            if start.elapsed() >= timeout {
                return Ok(false);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn ListingHandle>>> {
        let elements = match self.page.find_elements(selector).await {
            Ok(els) => els,
            Err(e) => {
                debug!("query_all({}): {}", selector, e);
                Vec::new()
            }
        };
        Ok(elements
            .into_iter()
            .map(|el| Box::new(CdpCard { el }) as Box<dyn ListingHandle>)
            .collect())
    }

    async fn has_challenge_frame(&self) -> Result<bool> {
        Ok(self
            .page
            .find_elements(CHALLENGE_IFRAME_SELECTOR)
            .await
            .map(|els| !els.is_empty())
            .unwrap_or(false))
    }

    async fn text_of(&self, selector: &str) -> Result<Option<String>> {
        match self.page.find_element(selector).await {
            Ok(el) => Ok(el.inner_text().await?),
            Err(_) => Ok(None),
        }
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let el = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| anyhow!("click target not found ({}): {}", selector, e))?;
        el.click().await?;
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<()> {
        // DOM-level option matching by value or display text, then a bubbled
        // change event so the site's own handlers run.
        let js = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el) return false;
                const want = {val};
                const opt = Array.from(el.options).find(
                    o => o.value === want || o.textContent.trim() === want
                );
                if (!opt) return false;
                el.value = opt.value;
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()"#,
            sel = serde_json::to_string(selector)?,
            val = serde_json::to_string(value)?,
        );
        let matched: bool = self
            .page
            .evaluate(js)
            .await?
            .into_value::<serde_json::Value>()
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if !matched {
            return Err(anyhow!("no option '{}' in select '{}'", value, selector));
        }
        Ok(())
    }
}

pub struct CdpCard {
    el: Element,
}

#[async_trait]
impl ListingHandle for CdpCard {
    async fn tag_name(&self) -> Result<String> {
        let ret = self
            .el
            .call_js_fn("function() { return this.tagName; }", false)
            .await?;
        Ok(ret
            .result
            .value
            .as_ref()
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string())
    }

    async fn attr(&self, name: &str) -> Result<Option<String>> {
        Ok(self.el.attribute(name).await?)
    }

    async fn query(&self, selector: &str) -> Result<Option<Box<dyn ListingHandle>>> {
        Ok(self
            .el
            .find_element(selector)
            .await
            .ok()
            .map(|el| Box::new(CdpCard { el }) as Box<dyn ListingHandle>))
    }

    async fn text(&self) -> Result<Option<String>> {
        let ret = self
            .el
            .call_js_fn("function() { return this.textContent; }", false)
            .await?;
        Ok(ret
            .result
            .value
            .as_ref()
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()))
    }

    async fn inner_text(&self) -> Result<Option<String>> {
        Ok(self.el.inner_text().await?)
    }
}
