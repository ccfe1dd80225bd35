//! The user's saved-swipe log: ad creatives bookmarked from the dashboard.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from `saved_swipes`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SwipeRow {
    pub id: i64,
    pub product: String,
    pub image_url: String,
    pub source_url: Option<String>,
    pub caption: Option<String>,
    pub saved_at: DateTime<Utc>,
}

pub struct NewSwipe<'a> {
    pub product: &'a str,
    pub image_url: &'a str,
    pub source_url: Option<&'a str>,
    pub caption: Option<&'a str>,
}

/// Save one swipe. Returns the generated id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on insert failure.
pub async fn insert_swipe(pool: &PgPool, swipe: &NewSwipe<'_>) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO saved_swipes (product, image_url, source_url, caption) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(swipe.product)
    .bind(swipe.image_url)
    .bind(swipe.source_url)
    .bind(swipe.caption)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// All saved swipes, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_swipes(pool: &PgPool) -> Result<Vec<SwipeRow>, DbError> {
    let rows = sqlx::query_as::<_, SwipeRow>(
        "SELECT id, product, image_url, source_url, caption, saved_at \
         FROM saved_swipes \
         ORDER BY saved_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
