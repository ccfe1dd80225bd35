//! Ad-creative cache, keyed by product with a freshness window.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from `ad_creatives`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CreativeRow {
    pub id: i64,
    pub product: String,
    pub image_url: String,
    pub source_url: Option<String>,
    pub caption: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

pub struct NewCreative<'a> {
    pub image_url: &'a str,
    pub source_url: Option<&'a str>,
    pub caption: Option<&'a str>,
}

/// Cached creatives for a product that are still inside the freshness
/// window. Empty means the cache is cold or stale and a refetch is due.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_fresh_creatives(
    pool: &PgPool,
    product: &str,
    ttl_hours: i32,
) -> Result<Vec<CreativeRow>, DbError> {
    let rows = sqlx::query_as::<_, CreativeRow>(
        "SELECT id, product, image_url, source_url, caption, fetched_at \
         FROM ad_creatives \
         WHERE product = $1 \
           AND fetched_at > NOW() - make_interval(hours => $2) \
         ORDER BY id ASC",
    )
    .bind(product)
    .bind(ttl_hours)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Replace a product's cached creatives wholesale: delete the old set and
/// insert the new one in a single transaction. Returns the number inserted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the transaction fails.
pub async fn replace_creatives(
    pool: &PgPool,
    product: &str,
    creatives: &[NewCreative<'_>],
) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM ad_creatives WHERE product = $1")
        .bind(product)
        .execute(&mut *tx)
        .await?;

    for creative in creatives {
        sqlx::query(
            "INSERT INTO ad_creatives (product, image_url, source_url, caption) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(product)
        .bind(creative.image_url)
        .bind(creative.source_url)
        .bind(creative.caption)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(creatives.len())
}
