//! Best-effort text scanning over marketplace listing pages.
//!
//! The catalog pages carry no stable markup contract, so extraction works on
//! raw text: a price-looking token, an order-count marker, and absolute
//! `.jpg` URLs. Misses are expected and handled by the fallback policy.

use std::sync::OnceLock;

use regex::Regex;

fn price_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:US\s*)?\$\s*([0-9]+(?:\.[0-9]{1,2})?)").expect("valid price regex")
    })
}

fn orders_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)([0-9][0-9,]*)\+?\s*(?:sold|orders?)").expect("valid orders regex")
    })
}

/// First plausible price on the page, if any. Zero prices are rejected.
pub(crate) fn extract_price(text: &str) -> Option<f64> {
    for caps in price_re().captures_iter(text) {
        if let Ok(price) = caps[1].parse::<f64>() {
            if price > 0.0 {
                return Some(price);
            }
        }
    }
    None
}

/// First order/popularity count, from markers like `1,234 sold` or `87 orders`.
pub(crate) fn extract_orders(text: &str) -> Option<f64> {
    let caps = orders_re().captures(text)?;
    caps[1].replace(',', "").parse::<f64>().ok()
}

/// All absolute `https://...jpg` URLs found in the text, in document order.
///
/// A candidate is rejected when the span between scheme and extension
/// contains quotes or whitespace (a scan that ran past the URL's end).
pub(crate) fn scan_jpg_urls(text: &str) -> Vec<String> {
    let mut urls = Vec::new();
    let mut search_from = 0usize;

    while let Some(rel_start) = text[search_from..].find("https://") {
        let start = search_from + rel_start;
        let Some(rel_end) = text[start..].find(".jpg") else {
            break;
        };
        let end = start + rel_end + ".jpg".len();
        search_from = start + 1;

        let candidate = &text[start..end];
        if candidate.contains('"') || candidate.contains('\'') || candidate.contains(char::is_whitespace) {
            continue;
        }
        urls.push(candidate.to_string());
        search_from = end;
    }

    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_price_finds_plain_dollar_amount() {
        assert_eq!(extract_price("now only $12.34 with free shipping"), Some(12.34));
    }

    #[test]
    fn extract_price_finds_us_prefixed_amount() {
        assert_eq!(extract_price("<span>US $8.99</span>"), Some(8.99));
    }

    #[test]
    fn extract_price_skips_zero() {
        assert_eq!(extract_price("$0.00 deposit, then $19.50"), Some(19.5));
    }

    #[test]
    fn extract_price_none_without_prices() {
        assert_eq!(extract_price("no currency markers here"), None);
    }

    #[test]
    fn extract_orders_parses_sold_marker() {
        assert_eq!(extract_orders("4,321 sold this month"), Some(4321.0));
    }

    #[test]
    fn extract_orders_parses_orders_marker() {
        assert_eq!(extract_orders("87 Orders"), Some(87.0));
    }

    #[test]
    fn extract_orders_none_without_marker() {
        assert_eq!(extract_orders("4321 happy customers"), None);
    }

    #[test]
    fn scan_jpg_urls_returns_clean_urls_in_order() {
        let html = r#"<img src="https://cdn.example.com/a.jpg"><img src="https://cdn.example.com/b.jpg">"#;
        assert_eq!(
            scan_jpg_urls(html),
            vec![
                "https://cdn.example.com/a.jpg".to_string(),
                "https://cdn.example.com/b.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn scan_jpg_urls_rejects_spans_crossing_attributes() {
        // The only ".jpg" is beyond the closing quote of an unrelated URL.
        let html = r#"<a href="https://example.com/page"> later text a.jpg"#;
        assert!(scan_jpg_urls(html).is_empty());
    }

    #[test]
    fn scan_jpg_urls_empty_input() {
        assert!(scan_jpg_urls("").is_empty());
    }
}
