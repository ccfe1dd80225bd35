//! Trend and profit scoring.
//!
//! Pure functions over normalized signal values and the per-cycle economics
//! parameters. Every function is total for finite, non-negative input and
//! rounds its result to two decimal places for display/storage consistency.

use dropsight_core::CycleParams;

use crate::EPSILON;

/// Trend score weights: search interest, marketplace orders, social buzz.
pub const TREND_WEIGHTS: (f64, f64, f64) = (0.5, 0.3, 0.2);

/// Profit potential weights: trend score, profit margin percent.
pub const POTENTIAL_WEIGHTS: (f64, f64) = (0.65, 0.35);

/// Simple profit economics for one product under a cycle's parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitBreakdown {
    pub sell_price: f64,
    pub profit: f64,
    pub margin_pct: f64,
}

/// Round to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weighted trend score from the three normalized signal values.
#[must_use]
pub fn trend_score(norm_search: f64, norm_orders: f64, norm_buzz: f64) -> f64 {
    let (w_search, w_orders, w_buzz) = TREND_WEIGHTS;
    round2(w_search * norm_search + w_orders * norm_orders + w_buzz * norm_buzz)
}

/// Sell price, profit, and margin for a sourced price under the cycle's
/// markup multiplier and shipping cost.
#[must_use]
pub fn profit_breakdown(price: f64, params: CycleParams) -> ProfitBreakdown {
    let sell_price = price * params.markup + params.shipping;
    let profit = sell_price - price - params.shipping;
    let margin_pct = profit / (sell_price + EPSILON) * 100.0;

    ProfitBreakdown {
        sell_price: round2(sell_price),
        profit: round2(profit),
        margin_pct: round2(margin_pct),
    }
}

/// Final ranking metric: weighted trend score and profit margin.
#[must_use]
pub fn profit_potential(trend: f64, margin_pct: f64) -> f64 {
    let (w_trend, w_margin) = POTENTIAL_WEIGHTS;
    round2(w_trend * trend + w_margin * margin_pct)
}
