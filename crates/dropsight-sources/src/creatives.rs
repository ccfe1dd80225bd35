//! Best-effort ad-creative lookup.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::scan::scan_jpg_urls;

/// Maximum creatives returned per product.
pub const MAX_CREATIVES: usize = 6;

/// One ad creative surfaced for a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdCreative {
    pub image_url: String,
    pub source_url: Option<String>,
    pub caption: Option<String>,
}

/// Fetch up to [`MAX_CREATIVES`] creatives for a keyword by scanning the
/// marketplace search page for listing images.
///
/// Never fails: any fetch error or imageless page yields a single
/// placeholder creative so the dashboard always has something to render.
pub async fn fetch_ad_creatives(
    client: &reqwest::Client,
    market_url: &str,
    keyword: &str,
) -> Vec<AdCreative> {
    let encoded = utf8_percent_encode(keyword, NON_ALPHANUMERIC).to_string();
    let url = format!("{market_url}/wholesale?SearchText={encoded}");

    let creatives = match fetch_creatives_from_page(client, &url, keyword).await {
        Ok(creatives) => creatives,
        Err(e) => {
            tracing::warn!(keyword, error = %e, "creative fetch failed; using placeholder");
            Vec::new()
        }
    };

    if creatives.is_empty() {
        return vec![placeholder_creative(keyword)];
    }
    creatives
}

async fn fetch_creatives_from_page(
    client: &reqwest::Client,
    url: &str,
    keyword: &str,
) -> Result<Vec<AdCreative>, crate::SourceError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(crate::SourceError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let html = response.text().await?;

    Ok(scan_jpg_urls(&html)
        .into_iter()
        .take(MAX_CREATIVES)
        .map(|image_url| AdCreative {
            image_url,
            source_url: Some(url.to_string()),
            caption: Some(keyword.to_string()),
        })
        .collect())
}

fn placeholder_creative(keyword: &str) -> AdCreative {
    AdCreative {
        image_url: placeholder_image_url(keyword),
        source_url: None,
        caption: Some("Sample Ad".to_string()),
    }
}

/// Placeholder thumbnail for products with no scraped image.
#[must_use]
pub fn placeholder_image_url(keyword: &str) -> String {
    let encoded = utf8_percent_encode(keyword, NON_ALPHANUMERIC).to_string();
    format!("https://via.placeholder.com/80x48.png?text={encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn placeholder_image_url_encodes_keyword() {
        let url = placeholder_image_url("air fryer");
        assert_eq!(url, "https://via.placeholder.com/80x48.png?text=air%20fryer");
    }

    #[tokio::test]
    async fn creatives_scanned_from_listing_page() {
        let server = MockServer::start().await;
        let body = r#"
            <img src="https://cdn.example.com/1.jpg">
            <img src="https://cdn.example.com/2.jpg">
        "#;
        Mock::given(method("GET"))
            .and(path("/wholesale"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let client = crate::build_client(6, "dropsight-test").expect("client");
        let creatives = fetch_ad_creatives(&client, &server.uri(), "air fryer").await;

        assert_eq!(creatives.len(), 2);
        assert_eq!(creatives[0].image_url, "https://cdn.example.com/1.jpg");
        assert_eq!(creatives[0].caption.as_deref(), Some("air fryer"));
        assert!(creatives[0].source_url.is_some());
    }

    #[tokio::test]
    async fn fetch_failure_yields_single_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wholesale"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = crate::build_client(6, "dropsight-test").expect("client");
        let creatives = fetch_ad_creatives(&client, &server.uri(), "projector").await;

        assert_eq!(creatives.len(), 1);
        assert!(creatives[0].image_url.starts_with("https://via.placeholder.com/"));
        assert_eq!(creatives[0].caption.as_deref(), Some("Sample Ad"));
        assert!(creatives[0].source_url.is_none());
    }
}
