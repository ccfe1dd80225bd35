use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use dropsight_db::NewCreative;
use dropsight_sources::fetch_ad_creatives;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct CreativeItem {
    pub image_url: String,
    pub source_url: Option<String>,
    pub caption: Option<String>,
}

/// Serve a product's ad creatives from the cache, refetching past the
/// freshness window. Cache failures degrade to an uncached fetch; the
/// endpoint itself never errors.
pub(super) async fn list_creatives(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product): Path<String>,
) -> Json<ApiResponse<Vec<CreativeItem>>> {
    #[allow(clippy::cast_possible_truncation)]
    let ttl_hours = state.config.creative_ttl_hours.clamp(1, i64::from(i32::MAX)) as i32;

    let cached = match dropsight_db::list_fresh_creatives(&state.pool, &product, ttl_hours).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(product = %product, error = %e, "creative cache read failed; fetching uncached");
            Vec::new()
        }
    };

    if !cached.is_empty() {
        return Json(ApiResponse {
            data: cached
                .into_iter()
                .map(|row| CreativeItem {
                    image_url: row.image_url,
                    source_url: row.source_url,
                    caption: row.caption,
                })
                .collect(),
            meta: ResponseMeta::new(req_id.0),
        });
    }

    let keyword = state
        .products
        .iter()
        .find(|p| p.name == product)
        .map_or_else(|| product.to_lowercase(), dropsight_core::TrackedProduct::keyword);

    let fetched = fetch_ad_creatives(&state.client, &state.sources.market_url, &keyword).await;

    let new_creatives: Vec<NewCreative<'_>> = fetched
        .iter()
        .map(|c| NewCreative {
            image_url: &c.image_url,
            source_url: c.source_url.as_deref(),
            caption: c.caption.as_deref(),
        })
        .collect();
    if let Err(e) = dropsight_db::replace_creatives(&state.pool, &product, &new_creatives).await {
        tracing::warn!(product = %product, error = %e, "creative cache write failed; serving uncached");
    }

    Json(ApiResponse {
        data: fetched
            .into_iter()
            .map(|c| CreativeItem {
                image_url: c.image_url,
                source_url: c.source_url,
                caption: c.caption,
            })
            .collect(),
        meta: ResponseMeta::new(req_id.0),
    })
}
