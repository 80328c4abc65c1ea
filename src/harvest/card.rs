//! Single-card extraction: resolve the card's structural variant, pull out
//! url/title/price, and hand the raw price text to the parser.
//!
//! A card is polymorphic over two shapes — it either *is* the link element or
//! *wraps* one. Field reads are individually fallible (the card can detach
//! mid-harvest); a failed read defaults the field, never the card, and only a
//! missing href drops the card entirely.

use crate::browser::ListingHandle;
use crate::core::types::Product;
use crate::harvest::price::parse_price;
use crate::harvest::selectors;

/// Title sentinel when no title region resolves.
const UNKNOWN_TITLE: &str = "Unknown";

/// UTF-8 en dash read back through a single-byte decode. Shows up in listing
/// titles that round-tripped a legacy feed.
const MANGLED_EN_DASH: &str = "â€“";

/// Extract one product from a rendered card. `None` means "not a valid
/// listing — skip", which covers vanished cards and cards with no resolvable
/// link.
pub async fn extract_card(card: &dyn ListingHandle) -> Option<Product> {
    let href = resolve_href(card).await?;
    let url = canonical_url(&href);

    let title = match card.query(selectors::TITLE).await {
        Ok(Some(el)) => el
            .text()
            .await
            .ok()
            .flatten()
            .map(|t| normalize_title(&t))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        _ => UNKNOWN_TITLE.to_string(),
    };

    let price_display = resolve_price_text(card).await;
    let parsed = parse_price(&price_display);

    Some(Product {
        url,
        title,
        price_display,
        current_price: parsed.current,
        original_price: parsed.original,
    })
}

/// The card's own href when it is an anchor, otherwise the first descendant
/// anchor's. `None` when neither yields one.
async fn resolve_href(card: &dyn ListingHandle) -> Option<String> {
    let tag = card.tag_name().await.ok()?;
    if tag.eq_ignore_ascii_case("a") {
        return card.attr("href").await.ok().flatten();
    }
    match card.query("a").await {
        Ok(Some(link)) => link.attr("href").await.ok().flatten(),
        _ => None,
    }
}

/// Query-stripped listing URL — the dedup key.
pub fn canonical_url(href: &str) -> String {
    href.split('?').next().unwrap_or(href).to_string()
}

/// Trim and undo the known mis-decoded en-dash byte sequence.
pub fn normalize_title(raw: &str) -> String {
    raw.trim().replace(MANGLED_EN_DASH, "–")
}

/// Raw price text for the parser: the richer price area's inner text when the
/// region exists (it may carry the original/sale pair), otherwise the
/// structured symbol+value concatenation.
async fn resolve_price_text(card: &dyn ListingHandle) -> String {
    let mut structured = String::new();

    if let Ok(Some(symbol_el)) = card.query(selectors::CURRENCY_SYMBOL).await {
        if let Ok(Some(symbol)) = symbol_el.text().await {
            structured.push_str(symbol.trim());
        }
    }
    if let Ok(Some(value_el)) = card.query(selectors::CURRENCY_VALUE).await {
        if let Ok(Some(value)) = value_el.text().await {
            structured.push_str(value.trim());
        }
    }

    match card.query(selectors::PRICE_AREA).await {
        Ok(Some(area)) => match area.inner_text().await {
            Ok(Some(text)) => text.replace('\n', " "),
            _ => structured,
        },
        _ => structured,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_url_strips_query() {
        assert_eq!(
            canonical_url("https://www.etsy.com/listing/123/mug?ref=shop_home&frs=1"),
            "https://www.etsy.com/listing/123/mug"
        );
        assert_eq!(
            canonical_url("https://www.etsy.com/listing/123/mug"),
            "https://www.etsy.com/listing/123/mug"
        );
    }

    #[test]
    fn normalize_title_trims_and_fixes_en_dash() {
        assert_eq!(
            normalize_title("  Mug â€“ Handmade \n"),
            "Mug – Handmade"
        );
        assert_eq!(normalize_title("Plain title"), "Plain title");
    }
}
