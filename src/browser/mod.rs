//! Browser collaborator seam.
//!
//! The harvest core never touches `chromiumoxide` directly — it talks to two
//! object-safe traits, so the whole pagination/extraction pipeline runs
//! unchanged against the scripted fixtures in the test suite.

pub mod cdp;
pub mod launch;

pub use cdp::{CdpBrowser, CdpCard};
pub use launch::{find_chrome_executable, BrowserSession, LaunchError};

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

/// A loaded catalog page plus the handful of page-level capabilities the
/// harvester needs: navigation, selector queries, bounded visibility waits,
/// challenge-frame detection, and the few interactions the locale dialog uses.
#[async_trait]
pub trait CatalogBrowser: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    async fn current_url(&self) -> Result<String>;

    /// Wait until at least one element matches `selector`, up to `timeout`.
    /// `Ok(false)` means the bound elapsed with no match — not an error.
    async fn wait_for_any(&self, selector: &str, timeout: Duration) -> Result<bool>;

    /// All elements matching `selector`, in DOM order. Query failures degrade
    /// to an empty list at the implementation level.
    async fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn ListingHandle>>>;

    /// `true` when a challenge iframe is present on the current page.
    async fn has_challenge_frame(&self) -> Result<bool>;

    /// Inner text of the first element matching `selector`; `Ok(None)` when
    /// nothing matches.
    async fn text_of(&self, selector: &str) -> Result<Option<String>>;

    async fn click(&self, selector: &str) -> Result<()>;

    /// Set a `<select>` matching `selector` to the option whose value or
    /// display text equals `value`, firing a `change` event.
    async fn select_option(&self, selector: &str, value: &str) -> Result<()>;
}

/// Ephemeral handle to one rendered listing card (or a descendant of one).
/// A card may be detached by the time it is read; every accessor is fallible
/// and the extractor treats failures as field-level defaults.
#[async_trait]
pub trait ListingHandle: Send + Sync {
    async fn tag_name(&self) -> Result<String>;

    async fn attr(&self, name: &str) -> Result<Option<String>>;

    /// First descendant matching `selector`; `Ok(None)` when absent.
    async fn query(&self, selector: &str) -> Result<Option<Box<dyn ListingHandle>>>;

    /// `textContent` of the node.
    async fn text(&self) -> Result<Option<String>>;

    /// Rendered `innerText` of the node (layout-aware, keeps line structure).
    async fn inner_text(&self) -> Result<Option<String>>;
}
