use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of a scored batch: a single tracked product with its raw signal
/// values and the derived ranking metrics for one pipeline cycle.
///
/// The `*_score` fields hold the raw adapter values (search-interest growth,
/// marketplace order count, social-buzz score); `trend_score` is computed
/// from their batch-relative normalized forms. All numeric fields are
/// rounded to two decimal places at creation and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRow {
    /// Cycle timestamp; every row of one snapshot shares this value.
    pub time: DateTime<Utc>,
    pub product: String,
    /// Raw search-interest growth, percent.
    pub google_score: f64,
    /// Raw marketplace order/popularity count.
    pub ali_score: f64,
    /// Raw social-buzz score.
    pub tiktok_score: f64,
    /// Sourced unit price in the marketplace's currency.
    pub price: f64,
    /// Profit margin percent under this cycle's markup and shipping params.
    pub profit_margin: f64,
    /// Weighted combination of the normalized signals, 0-100 scale.
    pub trend_score: f64,
    /// Final ranking metric: weighted trend score and profit margin.
    pub profit_potential: f64,
    pub image_url: Option<String>,
}

/// User-adjustable economics parameters for one pipeline cycle.
///
/// Supplied per invocation (dashboard inputs or CLI flags); not persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleParams {
    /// Sell price multiplier applied to the sourced unit price.
    pub markup: f64,
    /// Flat shipping cost added to the sell price.
    pub shipping: f64,
}

impl Default for CycleParams {
    fn default() -> Self {
        Self {
            markup: 2.5,
            shipping: 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn cycle_params_defaults() {
        let params = CycleParams::default();
        assert!((params.markup - 2.5).abs() < f64::EPSILON);
        assert!((params.shipping - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn serde_roundtrip_scored_row() {
        let row = ScoredRow {
            time: Utc::now(),
            product: "Air Fryer".to_string(),
            google_score: 42.5,
            ali_score: 310.0,
            tiktok_score: 71.0,
            price: 23.99,
            profit_margin: 55.71,
            trend_score: 68.4,
            profit_potential: 63.96,
            image_url: Some("https://img.example.com/fryer.jpg".to_string()),
        };
        let json = serde_json::to_string(&row).expect("serialization failed");
        let decoded: ScoredRow = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded, row);
    }

    #[test]
    fn scored_row_image_url_is_nullable() {
        let json = r#"{
            "time": "2026-07-15T00:00:00Z",
            "product": "Projector",
            "google_score": 10.0,
            "ali_score": 10.0,
            "tiktok_score": 10.0,
            "price": 20.0,
            "profit_margin": 50.0,
            "trend_score": 30.0,
            "profit_potential": 30.0,
            "image_url": null
        }"#;
        let row: ScoredRow = serde_json::from_str(json).expect("deserialization failed");
        assert!(row.image_url.is_none());
    }
}
