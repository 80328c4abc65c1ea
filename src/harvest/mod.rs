//! The pagination-and-extraction core.

pub mod card;
pub mod page;
pub mod paginate;
pub mod price;

pub mod selectors {
    //! CSS selectors for the marketplace's catalog templates.
    //!
    //! The grid is rendered by (at least) two template generations, so card
    //! discovery is a primary compound selector plus a looser fallback.

    /// Card containers across both known grid layouts.
    pub const CARD: &str =
        "div.js-merch-stash-check-listing, li.wt-list-inline__item .v2-listing-card";

    /// Looser fallback when the compound selector yields nothing.
    pub const CARD_FALLBACK: &str = "a.listing-link";

    /// Any listing link — the "page has rendered" signal the long challenge
    /// wait blocks on.
    pub const LISTING_WAIT: &str = "a.listing-link, a.v2-listing-card__link";

    pub const TITLE: &str = "h3, .v2-listing-card__title";

    pub const CURRENCY_SYMBOL: &str = ".currency-symbol";
    pub const CURRENCY_VALUE: &str = ".currency-value";

    /// Richer price region; its inner text may carry the original/sale pair.
    pub const PRICE_AREA: &str = ".n-listing-card__price, .v2-listing-card__info div p";

    /// Locale affordance in the page footer plus the selection dialog it opens.
    pub const LOCALE_TRIGGER: &str =
        "button[data-selector='locale-overlay-trigger'], #locale-picker-value";
    pub const LOCALE_REGION_SELECT: &str = "select#region-selector, select[name='region']";
    pub const LOCALE_CURRENCY_SELECT: &str = "select#currency-selector, select[name='currency']";
    pub const LOCALE_SUBMIT: &str =
        "button[data-selector='locale-overlay-submit'], .locale-overlay button[type='submit']";
}
