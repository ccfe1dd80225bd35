//! Marketplace price/order adapter.
//!
//! Scrapes the catalog search page per product keyword. Extraction is
//! best-effort text scanning (see [`crate::scan`]); the scraping strategy is
//! contained here so a structured catalog API could replace it without
//! touching the scoring pipeline.

use std::collections::HashMap;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use dropsight_core::TrackedProduct;

use crate::scan::{extract_orders, extract_price, scan_jpg_urls};
use crate::{fallback, SourceError};

/// Fixed assumed sell-side markup used to derive the marketplace margin.
pub const ASSUMED_MARKUP: f64 = 2.5;

/// One product's marketplace reading for a cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketQuote {
    /// Sourced unit price.
    pub price: f64,
    /// Order/popularity count scanned from the listing page.
    pub orders: f64,
    /// Margin percent under [`ASSUMED_MARKUP`].
    pub margin_pct: f64,
    /// Representative listing image, when one could be extracted.
    pub image_url: Option<String>,
}

/// Margin percent for a price sold at the fixed assumed markup:
/// `sell = price * 2.5`, margin = `(sell - price) / sell * 100`.
#[must_use]
pub fn assumed_margin_pct(price: f64) -> f64 {
    let sell = price * ASSUMED_MARKUP;
    if sell <= 0.0 {
        return 0.0;
    }
    (sell - price) / sell * 100.0
}

/// Fetch per-product marketplace quotes from the catalog search page.
///
/// Queries `{base_url}/wholesale?SearchText={keyword}` per product. Pages
/// with no recognisable price are skipped (logged); the caller substitutes a
/// fallback quote. A missing order marker on an otherwise usable page takes
/// the fallback order count directly, keeping the price and image that were
/// found.
///
/// # Errors
///
/// Per-product failures are absorbed; currently always returns `Ok`.
pub async fn fetch_market_quotes(
    client: &reqwest::Client,
    base_url: &str,
    products: &[TrackedProduct],
) -> Result<HashMap<String, MarketQuote>, SourceError> {
    let mut quotes = HashMap::new();

    for product in products {
        let keyword = product.keyword();
        let encoded = utf8_percent_encode(&keyword, NON_ALPHANUMERIC).to_string();
        let url = format!("{base_url}/wholesale?SearchText={encoded}");

        match fetch_page(client, &url).await {
            Ok(html) => match parse_quote(&html) {
                Some(quote) => {
                    quotes.insert(product.name.clone(), quote);
                }
                None => {
                    tracing::warn!(
                        product = %product.name,
                        "no price found on listing page; skipping"
                    );
                }
            },
            Err(e) => {
                tracing::warn!(
                    product = %product.name,
                    error = %e,
                    "marketplace fetch failed; skipping"
                );
            }
        }
    }

    Ok(quotes)
}

async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, SourceError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response.text().await?)
}

pub(crate) fn parse_quote(html: &str) -> Option<MarketQuote> {
    let price = extract_price(html)?;
    let orders = extract_orders(html).unwrap_or_else(fallback::orders);
    let image_url = scan_jpg_urls(html).into_iter().next();

    Some(MarketQuote {
        price,
        orders,
        margin_pct: assumed_margin_pct(price),
        image_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LISTING_PAGE: &str = r#"
        <div class="item">
            <img src="https://cdn.example.com/earbuds.jpg">
            <span class="price">US $14.99</span>
            <span class="sold">2,310 sold</span>
        </div>
    "#;

    fn tracked(name: &str) -> TrackedProduct {
        TrackedProduct {
            name: name.to_string(),
            keyword: None,
        }
    }

    #[test]
    fn assumed_margin_is_sixty_percent() {
        // (2.5p - p) / 2.5p is price-independent.
        assert!((assumed_margin_pct(10.0) - 60.0).abs() < 1e-9);
        assert!((assumed_margin_pct(33.33) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn assumed_margin_zero_price_is_zero() {
        assert!((assumed_margin_pct(0.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_quote_extracts_all_fields() {
        let quote = parse_quote(LISTING_PAGE).expect("quote");
        assert!((quote.price - 14.99).abs() < 1e-9);
        assert!((quote.orders - 2310.0).abs() < 1e-9);
        assert!((quote.margin_pct - 60.0).abs() < 1e-9);
        assert_eq!(
            quote.image_url.as_deref(),
            Some("https://cdn.example.com/earbuds.jpg")
        );
    }

    #[test]
    fn parse_quote_none_without_price() {
        assert!(parse_quote("<div>sold out</div>").is_none());
    }

    #[test]
    fn parse_quote_missing_orders_takes_fallback() {
        let quote = parse_quote("<span>$9.50</span>").expect("quote");
        assert!(fallback::ORDERS_RANGE.contains(&quote.orders));
        assert!(quote.image_url.is_none());
    }

    #[tokio::test]
    async fn fetch_market_quotes_parses_listing_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wholesale"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_PAGE))
            .mount(&server)
            .await;

        let client = crate::build_client(6, "dropsight-test").expect("client");
        let quotes = fetch_market_quotes(&client, &server.uri(), &[tracked("Wireless Earbuds")])
            .await
            .expect("fetch");

        let quote = quotes.get("Wireless Earbuds").expect("quote entry");
        assert!((quote.price - 14.99).abs() < 1e-9);
    }

    #[tokio::test]
    async fn fetch_market_quotes_skips_error_responses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wholesale"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = crate::build_client(6, "dropsight-test").expect("client");
        let quotes = fetch_market_quotes(&client, &server.uri(), &[tracked("Projector")])
            .await
            .expect("fetch");

        assert!(quotes.is_empty());
    }
}
