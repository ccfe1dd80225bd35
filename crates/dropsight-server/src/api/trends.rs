use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dropsight_core::CycleParams;
use dropsight_db::SnapshotRow;
use dropsight_pipeline::{compute_top_gainer, TopGainer};

use crate::middleware::RequestId;
use crate::refresh::run_refresh;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct TrendRowItem {
    pub time: DateTime<Utc>,
    pub product: String,
    pub google_score: f64,
    pub ali_score: f64,
    pub tiktok_score: f64,
    pub price: f64,
    pub profit_margin: f64,
    pub trend_score: f64,
    pub profit_potential: f64,
    pub image_url: Option<String>,
}

impl From<SnapshotRow> for TrendRowItem {
    fn from(row: SnapshotRow) -> Self {
        Self {
            time: row.time,
            product: row.product,
            google_score: row.google_score,
            ali_score: row.ali_score,
            tiktok_score: row.tiktok_score,
            price: row.price,
            profit_margin: row.profit_margin,
            trend_score: row.trend_score,
            profit_potential: row.profit_potential,
            image_url: row.image_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct TopGainerItem {
    pub product: String,
    pub delta: f64,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CycleRequest {
    pub markup: Option<f64>,
    pub shipping: Option<f64>,
}

/// Read history, degrading a read failure to an empty history: the charts
/// and the top-gainer badge render a neutral state instead of an error.
async fn history_or_empty(state: &AppState) -> Vec<SnapshotRow> {
    match dropsight_db::load_history(&state.pool).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "history read failed; treating as empty");
            Vec::new()
        }
    }
}

pub(super) async fn latest_snapshot(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<TrendRowItem>>> {
    let rows = match dropsight_db::load_latest_snapshot(&state.pool).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "latest snapshot read failed; treating as empty");
            Vec::new()
        }
    };

    Json(ApiResponse {
        data: rows.into_iter().map(TrendRowItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn trend_history(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<TrendRowItem>>> {
    let rows = history_or_empty(&state).await;

    Json(ApiResponse {
        data: rows.into_iter().map(TrendRowItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn top_gainer(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Option<TopGainerItem>>> {
    let history = history_or_empty(&state).await;
    let gainer = compute_top_gainer(&history).map(|TopGainer { product, delta }| TopGainerItem {
        product,
        delta,
    });

    Json(ApiResponse {
        data: gainer,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn trigger_cycle(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Option<Json<CycleRequest>>,
) -> Json<ApiResponse<Vec<TrendRowItem>>> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let params = CycleParams {
        markup: request.markup.unwrap_or(state.config.default_markup),
        shipping: request.shipping.unwrap_or(state.config.default_shipping),
    };

    let batch = run_refresh(&state, params).await;

    Json(ApiResponse {
        data: batch
            .into_iter()
            .map(|row| TrendRowItem {
                time: row.time,
                product: row.product,
                google_score: row.google_score,
                ali_score: row.ali_score,
                tiktok_score: row.tiktok_score,
                price: row.price,
                profit_margin: row.profit_margin,
                trend_score: row.trend_score,
                profit_potential: row.profit_potential,
                image_url: row.image_url,
            })
            .collect(),
        meta: ResponseMeta::new(req_id.0),
    })
}
