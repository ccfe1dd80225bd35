//! Social-buzz adapter.

use std::collections::HashMap;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use dropsight_core::TrackedProduct;

use crate::{fallback, SourceError};

/// Fetch per-product buzz scores.
///
/// With a configured service the scores come from
/// `{base_url}/buzz?products={comma-separated names}` as a JSON object of
/// `name -> score`; entries for untracked names are ignored and missing
/// tracked names are left to the caller's fallback fill. Without a
/// configured service every product gets a declared random stand-in from
/// [`fallback::BUZZ_RANGE`]; there is no real source to degrade from, so
/// this path is not an error.
///
/// # Errors
///
/// Returns [`SourceError`] when the configured service is unreachable,
/// responds with a non-success status, or returns a malformed body.
pub async fn fetch_social_buzz(
    client: &reqwest::Client,
    base_url: Option<&str>,
    products: &[TrackedProduct],
) -> Result<HashMap<String, f64>, SourceError> {
    let Some(base_url) = base_url else {
        tracing::debug!("no buzz service configured; using declared stand-in scores");
        return Ok(products
            .iter()
            .map(|p| (p.name.clone(), fallback::buzz_score()))
            .collect());
    };

    let joined = products
        .iter()
        .map(|p| utf8_percent_encode(&p.name, NON_ALPHANUMERIC).to_string())
        .collect::<Vec<_>>()
        .join(",");
    let url = format!("{base_url}/buzz?products={joined}");

    let response = client.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            status: status.as_u16(),
            url,
        });
    }

    let scores: HashMap<String, f64> = response.json().await?;

    Ok(products
        .iter()
        .filter_map(|p| scores.get(&p.name).map(|score| (p.name.clone(), *score)))
        .collect())
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

    #[tokio::test]
    async fn stand_in_scores_cover_every_product() {
        let client = crate::build_client(6, "dropsight-test").expect("client");
        let products = [tracked("Smartwatch"), tracked("Projector")];

        let scores = fetch_social_buzz(&client, None, &products)
            .await
            .expect("stand-in never fails");

        assert_eq!(scores.len(), 2);
        for score in scores.values() {
            assert!(fallback::BUZZ_RANGE.contains(score), "out of range: {score}");
        }
    }

    #[tokio::test]
    async fn configured_service_scores_are_used() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/buzz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Smartwatch": 64.0,
                "Unrelated Product": 99.0
            })))
            .mount(&server)
            .await;

        let client = crate::build_client(6, "dropsight-test").expect("client");
        let products = [tracked("Smartwatch"), tracked("Projector")];

        let scores = fetch_social_buzz(&client, Some(&server.uri()), &products)
            .await
            .expect("fetch");

        assert_eq!(scores.get("Smartwatch").copied(), Some(64.0));
        // Untracked entries dropped; missing tracked names left for fallback.
        assert!(!scores.contains_key("Unrelated Product"));
        assert!(!scores.contains_key("Projector"));
    }

    #[tokio::test]
    async fn configured_service_error_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/buzz"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = crate::build_client(6, "dropsight-test").expect("client");
        let result = fetch_social_buzz(&client, Some(&server.uri()), &[tracked("Projector")]).await;

        assert!(
            matches!(result, Err(SourceError::Status { status: 500, .. })),
            "expected Status error, got: {result:?}"
        );
    }
}
