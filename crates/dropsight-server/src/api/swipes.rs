use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dropsight_db::{NewSwipe, SwipeRow};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct SwipeItem {
    pub id: i64,
    pub product: String,
    pub image_url: String,
    pub source_url: Option<String>,
    pub caption: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl From<SwipeRow> for SwipeItem {
    fn from(row: SwipeRow) -> Self {
        Self {
            id: row.id,
            product: row.product,
            image_url: row.image_url,
            source_url: row.source_url,
            caption: row.caption,
            saved_at: row.saved_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SaveSwipeRequest {
    pub product: String,
    pub image_url: String,
    pub source_url: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SavedSwipeData {
    pub id: i64,
}

pub(super) async fn save_swipe(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<SaveSwipeRequest>,
) -> Result<Json<ApiResponse<SavedSwipeData>>, ApiError> {
    if request.product.trim().is_empty() || request.image_url.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "product and image_url must be non-empty",
        ));
    }

    let id = dropsight_db::insert_swipe(
        &state.pool,
        &NewSwipe {
            product: &request.product,
            image_url: &request.image_url,
            source_url: request.source_url.as_deref(),
            caption: request.caption.as_deref(),
        },
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: SavedSwipeData { id },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_saved(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<SwipeItem>>>, ApiError> {
    let rows = dropsight_db::list_swipes(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(SwipeItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn export_csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = dropsight_db::list_swipes(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let mut csv = String::from("id,product,image_url,source_url,caption,saved_at\n");
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            row.id,
            csv_field(&row.product),
            csv_field(&row.image_url),
            csv_field(row.source_url.as_deref().unwrap_or("")),
            csv_field(row.caption.as_deref().unwrap_or("")),
            row.saved_at.to_rfc3339(),
        ));
    }

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"swipes.csv\"",
            ),
        ],
        csv,
    ))
}

/// Quote a CSV field when it contains a separator, quote, or line break;
/// embedded quotes are doubled.
pub(crate) fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
