//! Search-interest growth adapter.

use std::collections::HashMap;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use dropsight_core::TrackedProduct;

use crate::SourceError;

/// Trailing window requested from the trend service, in days.
const WINDOW_DAYS: u32 = 14;

/// Samples needed for the full recent-2 vs prior-7 growth split.
const FULL_SPLIT_MIN_SAMPLES: usize = 9;

const EPSILON: f64 = 1e-9;

#[derive(Debug, Deserialize)]
struct SeriesBody {
    samples: Vec<f64>,
}

/// Fetch per-product search-interest growth from the trend service.
///
/// Queries `{base_url}/interest?q={keyword}&days=14` per product and folds
/// the returned sample series into a percent-growth figure. Products whose
/// fetch or series fails are skipped (logged); the caller substitutes the
/// fallback value for them.
///
/// # Errors
///
/// This function itself only errors on conditions affecting every product;
/// per-product failures are absorbed. Currently always returns `Ok`.
pub async fn fetch_search_growth(
    client: &reqwest::Client,
    base_url: &str,
    products: &[TrackedProduct],
) -> Result<HashMap<String, f64>, SourceError> {
    let mut growth = HashMap::new();

    for product in products {
        let keyword = product.keyword();
        let encoded = utf8_percent_encode(&keyword, NON_ALPHANUMERIC).to_string();
        let url = format!("{base_url}/interest?q={encoded}&days={WINDOW_DAYS}");

        match fetch_series(client, &url).await {
            Ok(samples) => match growth_from_series(&samples) {
                Some(value) => {
                    growth.insert(product.name.clone(), value);
                }
                None => {
                    tracing::warn!(
                        product = %product.name,
                        samples = samples.len(),
                        "trend series too short; skipping"
                    );
                }
            },
            Err(e) => {
                tracing::warn!(product = %product.name, error = %e, "trend fetch failed; skipping");
            }
        }
    }

    Ok(growth)
}

async fn fetch_series(client: &reqwest::Client, url: &str) -> Result<Vec<f64>, SourceError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let body: SeriesBody = response.json().await?;
    Ok(body.samples)
}

/// Percent growth of the recent average over the prior average.
///
/// With at least nine samples: recent = mean of the last 2, prior = mean of
/// the 7 preceding them. With fewer, the reduced split is recent = the last
/// sample vs prior = all earlier samples. Under two samples there is no
/// prior window and the series is unusable.
pub(crate) fn growth_from_series(samples: &[f64]) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }

    let (recent, prior) = if samples.len() >= FULL_SPLIT_MIN_SAMPLES {
        let split = samples.len() - 2;
        (&samples[split..], &samples[split - 7..split])
    } else {
        let split = samples.len() - 1;
        (&samples[split..], &samples[..split])
    };

    let recent_avg = mean(recent);
    let prior_avg = mean(prior);
    Some((recent_avg - prior_avg) / (prior_avg + EPSILON) * 100.0)
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tracked(name: &str) -> TrackedProduct {
        TrackedProduct {
            name: name.to_string(),
            keyword: None,
        }
    }

    #[test]
    fn growth_needs_at_least_two_samples() {
        assert!(growth_from_series(&[]).is_none());
        assert!(growth_from_series(&[42.0]).is_none());
    }

    #[test]
    fn growth_uses_reduced_split_for_short_series() {
        // recent = [30], prior = [10, 20] -> (30 - 15) / 15 * 100 = 100%
        let growth = growth_from_series(&[10.0, 20.0, 30.0]).expect("growth");
        assert!((growth - 100.0).abs() < 1e-6, "got {growth}");
    }

    #[test]
    fn growth_uses_full_split_for_long_series() {
        // 14 samples; recent = mean of last 2 = 50, prior = mean of the 7
        // preceding = 20 -> 150% growth.
        let mut samples = vec![0.0; 5];
        samples.extend_from_slice(&[20.0; 7]);
        samples.extend_from_slice(&[40.0, 60.0]);
        let growth = growth_from_series(&samples).expect("growth");
        assert!((growth - 150.0).abs() < 1e-6, "got {growth}");
    }

    #[test]
    fn growth_is_finite_when_prior_is_zero() {
        let growth = growth_from_series(&[0.0, 0.0, 10.0]).expect("growth");
        assert!(growth.is_finite());
        assert!(growth > 0.0);
    }

    #[test]
    fn flat_series_has_zero_growth() {
        let growth = growth_from_series(&[25.0; 14]).expect("growth");
        assert!(growth.abs() < 1e-6, "got {growth}");
    }

    #[tokio::test]
    async fn fetch_search_growth_parses_series() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/interest"))
            .and(query_param("q", "air fryer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "samples": [10.0, 20.0, 30.0]
            })))
            .mount(&server)
            .await;

        let client = crate::build_client(6, "dropsight-test").expect("client");
        let growth = fetch_search_growth(&client, &server.uri(), &[tracked("Air Fryer")])
            .await
            .expect("fetch");

        let value = growth.get("Air Fryer").copied().expect("growth entry");
        assert!((value - 100.0).abs() < 1e-6, "got {value}");
    }

    #[tokio::test]
    async fn fetch_search_growth_skips_failing_products() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/interest"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = crate::build_client(6, "dropsight-test").expect("client");
        let growth = fetch_search_growth(&client, &server.uri(), &[tracked("Projector")])
            .await
            .expect("fetch");

        assert!(growth.is_empty());
    }

    #[tokio::test]
    async fn fetch_search_growth_skips_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/interest"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = crate::build_client(6, "dropsight-test").expect("client");
        let growth = fetch_search_growth(&client, &server.uri(), &[tracked("Projector")])
            .await
            .expect("fetch");

        assert!(growth.is_empty());
    }
}
