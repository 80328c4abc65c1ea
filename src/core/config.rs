use std::time::Duration;

// ---------------------------------------------------------------------------
// HarvestConfig — file-based config loader (shoprake.json) with env-var fallback
// ---------------------------------------------------------------------------

/// Locale target for the optional pre-harvest normalization step
/// (mirrors the `locale` key in shoprake.json).
#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LocaleTarget {
    /// Region display name as the storefront renders it, e.g. `United States`.
    pub region: String,
    /// ISO currency code, e.g. `USD`.
    pub currency: String,
}

/// Raw shape of `shoprake.json`. Every field optional; resolution happens in
/// [`HarvestConfig`].
#[derive(serde::Deserialize, Default, Clone, Debug)]
pub struct ConfigFile {
    /// Shop catalog base URL, e.g. `https://www.etsy.com/shop/RubyVibeCo`.
    pub shop_url: Option<String>,
    /// Cards on a full catalog page; a shorter page ends pagination. Default: 36.
    pub full_page_size: Option<usize>,
    /// Upper bound on the wait for listings to appear, in seconds. This is the
    /// manual-captcha checkpoint — keep it generous. Default: 300.
    pub listing_wait_secs: Option<u64>,
    /// Per-navigation timeout in seconds. Default: 60.
    pub nav_timeout_secs: Option<u64>,
    /// Randomized inter-page delay bounds, in milliseconds. Default: 1500–3500.
    pub page_delay_min_ms: Option<u64>,
    pub page_delay_max_ms: Option<u64>,
    /// When set, the harvester tries to pin the storefront to this locale
    /// before the first harvest. Failures there are never fatal.
    pub locale: Option<LocaleTarget>,
    /// CSV output path. Default: `products.csv`.
    pub output: Option<String>,
    /// Launch the browser without a window. Defaults to `false` — a visible
    /// window is what makes manual challenge solving possible.
    pub headless: Option<bool>,
}

/// Fully-resolved run configuration: file value → `SHOPRAKE_*` env var → default.
#[derive(Clone, Debug)]
pub struct HarvestConfig {
    pub shop_url: String,
    pub full_page_size: usize,
    pub listing_wait: Duration,
    pub nav_timeout: Duration,
    pub page_delay_min_ms: u64,
    pub page_delay_max_ms: u64,
    pub locale: Option<LocaleTarget>,
    pub output: String,
    pub headless: bool,
}

impl ConfigFile {
    pub fn resolve_full_page_size(&self) -> usize {
        if let Some(n) = self.full_page_size {
            return n.max(1);
        }
        env_parse("SHOPRAKE_FULL_PAGE_SIZE").unwrap_or(36)
    }

    pub fn resolve_listing_wait_secs(&self) -> u64 {
        if let Some(n) = self.listing_wait_secs {
            return n;
        }
        env_parse("SHOPRAKE_LISTING_WAIT_SECS").unwrap_or(300)
    }

    pub fn resolve_nav_timeout_secs(&self) -> u64 {
        if let Some(n) = self.nav_timeout_secs {
            return n;
        }
        env_parse("SHOPRAKE_NAV_TIMEOUT_SECS").unwrap_or(60)
    }

    /// Delay bounds, swapped into order when min > max.
    pub fn resolve_page_delay_ms(&self) -> (u64, u64) {
        let min = self
            .page_delay_min_ms
            .or_else(|| env_parse("SHOPRAKE_PAGE_DELAY_MIN_MS"))
            .unwrap_or(1500);
        let max = self
            .page_delay_max_ms
            .or_else(|| env_parse("SHOPRAKE_PAGE_DELAY_MAX_MS"))
            .unwrap_or(3500);
        if min > max {
            (max, min)
        } else {
            (min, max)
        }
    }

    pub fn resolve_output(&self) -> String {
        if let Some(o) = &self.output {
            if !o.trim().is_empty() {
                return o.clone();
            }
        }
        std::env::var("SHOPRAKE_OUTPUT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "products.csv".to_string())
    }

    pub fn resolve_headless(&self) -> bool {
        if let Some(b) = self.headless {
            return b;
        }
        std::env::var("SHOPRAKE_HEADLESS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false)
    }

    /// Resolve into a run config. `shop_url` must come from somewhere —
    /// file, `SHOPRAKE_SHOP_URL`, or the caller's override (CLI/prompt).
    pub fn resolve(&self, shop_url_override: Option<String>) -> Option<HarvestConfig> {
        let shop_url = shop_url_override
            .or_else(|| self.shop_url.clone())
            .or_else(|| std::env::var("SHOPRAKE_SHOP_URL").ok())
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())?;

        let (page_delay_min_ms, page_delay_max_ms) = self.resolve_page_delay_ms();
        Some(HarvestConfig {
            shop_url,
            full_page_size: self.resolve_full_page_size(),
            listing_wait: Duration::from_secs(self.resolve_listing_wait_secs()),
            nav_timeout: Duration::from_secs(self.resolve_nav_timeout_secs()),
            page_delay_min_ms,
            page_delay_max_ms,
            locale: self.locale.clone(),
            output: self.resolve_output(),
            headless: self.resolve_headless(),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Load `shoprake.json` from standard locations.
///
/// Search order (first found wins):
/// 1. `SHOPRAKE_CONFIG` env var path
/// 2. `./shoprake.json`  (process cwd)
/// 3. `../shoprake.json` (one level up)
///
/// Missing file → `ConfigFile::default()` (silent, env-var fallbacks apply).
/// Parse error → log a warning, return `ConfigFile::default()`.
pub fn load_config_file() -> ConfigFile {
    let candidates: Vec<std::path::PathBuf> = {
        let mut v = vec![
            std::path::PathBuf::from("shoprake.json"),
            std::path::PathBuf::from("../shoprake.json"),
        ];
        if let Ok(env_path) = std::env::var("SHOPRAKE_CONFIG") {
            v.insert(0, std::path::PathBuf::from(env_path));
        }
        v
    };

    for path in &candidates {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<ConfigFile>(&contents) {
                Ok(cfg) => {
                    tracing::info!("shoprake.json loaded from {}", path.display());
                    return cfg;
                }
                Err(e) => {
                    tracing::warn!(
                        "shoprake.json parse error at {}: {} — using defaults",
                        path.display(),
                        e
                    );
                    return ConfigFile::default();
                }
            },
            Err(_) => continue, // not found at this path — try next
        }
    }

    ConfigFile::default()
}
