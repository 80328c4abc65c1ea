//! Raw price text → normalized `(current, original)` pair.
//!
//! Price regions come out of the grid as free-form text: a lone amount, a
//! symbol-prefixed amount, or a sale pair where an "Original Price" label and
//! its amount sit in the same blob as the discounted amount. This never
//! fails — garbage in, empty fields out.

use std::sync::OnceLock;

use regex::Regex;

/// Optional symbol, required integer part (commas allowed), optional 1–2
/// digit fraction. Group 1 is the digits only.
fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[$€£]?\s*(\d[\d,]*(?:\.\d{1,2})?)").expect("valid amount pattern")
    })
}

/// An amount explicitly labeled as the pre-sale price. The label is the only
/// thing that makes an amount "original" — two bare amounts never do.
fn original_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)original\s+price\D*(\d[\d,]*(?:\.\d{1,2})?)")
            .expect("valid original-price pattern")
    })
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedPrice {
    /// Numeric text of the price currently asked, `""` when none was found.
    pub current: String,
    /// Numeric text of the pre-sale price; mirrors `current` when the text
    /// carries no "original price" label.
    pub original: String,
}

/// Parse a raw price blob.
///
/// `original` is the amount following an "original price" label, when one
/// exists. `current` is the first amount whose digits are not that labeled
/// amount — so `"Original Price $45.00 $30.00"` yields current `30.00`,
/// original `45.00`, while a lone labeled amount falls back to mirroring.
pub fn parse_price(raw: &str) -> ParsedPrice {
    let original_span = original_re()
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| (m.start(), m.end()));

    let current = amount_re()
        .captures_iter(raw)
        .filter_map(|c| c.get(1))
        .find(|m| match original_span {
            Some((start, end)) => m.end() <= start || m.start() >= end,
            None => true,
        })
        .map(|m| m.as_str().to_string());

    let original = original_span.map(|(start, end)| raw[start..end].to_string());

    match (current, original) {
        (Some(current), Some(original)) => ParsedPrice { current, original },
        (Some(current), None) => ParsedPrice {
            original: current.clone(),
            current,
        },
        (None, Some(original)) => ParsedPrice {
            current: original.clone(),
            original,
        },
        (None, None) => ParsedPrice::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_amount_mirrors() {
        let p = parse_price("$24.99");
        assert_eq!(p.current, "24.99");
        assert_eq!(p.original, "24.99");
    }

    #[test]
    fn bare_amount_without_symbol() {
        let p = parse_price("1,299.00");
        assert_eq!(p.current, "1,299.00");
        assert_eq!(p.original, "1,299.00");
    }

    #[test]
    fn integer_amount_no_fraction() {
        let p = parse_price("€45");
        assert_eq!(p.current, "45");
        assert_eq!(p.original, "45");
    }

    #[test]
    fn sale_pair_with_label() {
        let p = parse_price("Original Price $45.00 $30.00");
        assert_eq!(p.current, "30.00");
        assert_eq!(p.original, "45.00");
    }

    #[test]
    fn sale_pair_label_after_current() {
        let p = parse_price("$30.00 Original Price: $45.00");
        assert_eq!(p.current, "30.00");
        assert_eq!(p.original, "45.00");
    }

    #[test]
    fn label_case_insensitive() {
        let p = parse_price("original price €12.50 €9.99");
        assert_eq!(p.current, "9.99");
        assert_eq!(p.original, "12.50");
    }

    #[test]
    fn lone_labeled_amount_mirrors() {
        let p = parse_price("Original Price $45.00");
        assert_eq!(p.current, "45.00");
        assert_eq!(p.original, "45.00");
    }

    #[test]
    fn two_unlabeled_amounts_take_first() {
        // Policy: never infer "original" without an explicit label.
        let p = parse_price("$30.00 $45.00");
        assert_eq!(p.current, "30.00");
        assert_eq!(p.original, "30.00");
    }

    #[test]
    fn no_amount_is_empty_not_error() {
        let p = parse_price("Sold out");
        assert_eq!(p, ParsedPrice::default());
        assert!(parse_price("").current.is_empty());
    }

    #[test]
    fn amount_embedded_in_label_text() {
        let p = parse_price("USD 18.00\nOnly 2 left");
        assert_eq!(p.current, "18.00");
    }
}
