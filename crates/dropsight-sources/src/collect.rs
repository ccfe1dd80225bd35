//! Signal collection across all adapters.

use std::collections::HashMap;

use dropsight_core::TrackedProduct;

use crate::marketplace::MarketQuote;
use crate::{fallback, marketplace, search_interest, social_buzz, SourceConfig};

/// All raw signal readings for one tracked product in one fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSignals {
    pub name: String,
    /// Search-interest growth, percent.
    pub search_growth: f64,
    /// Social-buzz score.
    pub buzz: f64,
    /// Marketplace price/order reading.
    pub quote: MarketQuote,
}

/// Collect signals from all sources for the tracked products.
///
/// The three adapters run concurrently as isolated fault domains: a failure
/// in one never blocks the others, and any missing value (whether from a
/// whole-source failure or a single skipped product) is filled from the
/// central [`fallback`] policy. The result always has exactly one entry per
/// tracked product, in input order.
pub async fn collect_signals(
    client: &reqwest::Client,
    config: &SourceConfig,
    products: &[TrackedProduct],
) -> Vec<ProductSignals> {
    let search_fut = async {
        match &config.trends_url {
            Some(base_url) => {
                search_interest::fetch_search_growth(client, base_url, products).await
            }
            None => {
                tracing::debug!("no trend service configured; search signal uses fallback");
                Ok(HashMap::new())
            }
        }
    };
    let market_fut = marketplace::fetch_market_quotes(client, &config.market_url, products);
    let buzz_fut = social_buzz::fetch_social_buzz(client, config.buzz_url.as_deref(), products);

    let (search_res, market_res, buzz_res) = tokio::join!(search_fut, market_fut, buzz_fut);

    let mut search = unwrap_or_warn(search_res, "search_interest");
    let mut quotes = unwrap_or_warn(market_res, "marketplace");
    let mut buzz = unwrap_or_warn(buzz_res, "social_buzz");

    let mut filled = 0usize;
    let batch = products
        .iter()
        .map(|product| {
            let search_growth = search.remove(&product.name).unwrap_or_else(|| {
                filled += 1;
                fallback::search_growth()
            });
            let buzz = buzz.remove(&product.name).unwrap_or_else(|| {
                filled += 1;
                fallback::buzz_score()
            });
            let quote = quotes.remove(&product.name).unwrap_or_else(|| {
                filled += 1;
                fallback::market_quote()
            });
            ProductSignals {
                name: product.name.clone(),
                search_growth,
                buzz,
                quote,
            }
        })
        .collect();

    if filled > 0 {
        tracing::info!(filled, products = products.len(), "signal gaps filled from fallback policy");
    }

    batch
}

fn unwrap_or_warn<T: Default>(result: Result<T, crate::SourceError>, source: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(source, error = %e, "adapter failed; falling back");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tracked(name: &str) -> TrackedProduct {
        TrackedProduct {
            name: name.to_string(),
            keyword: None,
        }
    }

    /// A config whose every source either points nowhere routable or is
    /// disabled: the total-failure scenario.
    fn dead_config() -> SourceConfig {
        SourceConfig {
            trends_url: Some("http://127.0.0.1:9".to_string()),
            market_url: "http://127.0.0.1:9".to_string(),
            buzz_url: Some("http://127.0.0.1:9".to_string()),
            timeout_secs: 1,
            user_agent: "dropsight-test".to_string(),
        }
    }

    #[tokio::test]
    async fn total_source_failure_still_yields_complete_batch() {
        let client = crate::build_client(1, "dropsight-test").expect("client");
        let products = [tracked("A"), tracked("B"), tracked("C")];

        let batch = collect_signals(&client, &dead_config(), &products).await;

        assert_eq!(batch.len(), 3);
        for (signals, product) in batch.iter().zip(&products) {
            assert_eq!(signals.name, product.name);
            assert!(fallback::SEARCH_GROWTH_RANGE.contains(&signals.search_growth));
            assert!(fallback::BUZZ_RANGE.contains(&signals.buzz));
            assert!(fallback::PRICE_RANGE.contains(&signals.quote.price));
        }
    }

    #[tokio::test]
    async fn live_sources_and_fallback_mix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/interest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "samples": [10.0, 20.0, 30.0]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/wholesale"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<img src="https://cdn.example.com/x.jpg"> $12.00 340 sold"#,
            ))
            .mount(&server)
            .await;

        let config = SourceConfig {
            trends_url: Some(server.uri()),
            market_url: server.uri(),
            buzz_url: None,
            timeout_secs: 6,
            user_agent: "dropsight-test".to_string(),
        };

        let client = crate::build_client(6, "dropsight-test").expect("client");
        let batch = collect_signals(&client, &config, &[tracked("Car Vacuum")]).await;

        assert_eq!(batch.len(), 1);
        let signals = &batch[0];
        assert!((signals.search_growth - 100.0).abs() < 1e-6);
        assert!((signals.quote.price - 12.0).abs() < 1e-9);
        assert!((signals.quote.orders - 340.0).abs() < 1e-9);
        assert!(fallback::BUZZ_RANGE.contains(&signals.buzz));
    }

    #[tokio::test]
    async fn empty_product_list_yields_empty_batch() {
        let client = crate::build_client(1, "dropsight-test").expect("client");
        let batch = collect_signals(&client, &dead_config(), &[]).await;
        assert!(batch.is_empty());
    }
}
