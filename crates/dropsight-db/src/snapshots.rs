//! The append-only snapshot store.
//!
//! `trend_snapshots` is the single persisted time series: one row per
//! product per cycle, all rows of a cycle sharing one `time`. The API offers
//! append and read only; no update or delete exists, by contract.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use dropsight_core::ScoredRow;

use crate::DbError;

/// A persisted row from `trend_snapshots`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SnapshotRow {
    pub id: i64,
    pub time: DateTime<Utc>,
    pub product: String,
    pub google_score: f64,
    pub ali_score: f64,
    pub tiktok_score: f64,
    pub trend_score: f64,
    pub price: f64,
    pub profit_margin: f64,
    pub profit_potential: f64,
    pub image_url: Option<String>,
}

/// Append one snapshot: all rows in a single transaction, so the batch is
/// visible to readers together or not at all. Returns the number of rows
/// written; an empty batch is a no-op.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the transaction fails. The caller (the
/// orchestrator) logs the failure and continues the cycle.
pub async fn append_snapshot(pool: &PgPool, rows: &[ScoredRow]) -> Result<usize, DbError> {
    if rows.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;

    for row in rows {
        sqlx::query(
            "INSERT INTO trend_snapshots \
                 (time, product, google_score, ali_score, tiktok_score, \
                  trend_score, price, profit_margin, profit_potential, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(row.time)
        .bind(&row.product)
        .bind(row.google_score)
        .bind(row.ali_score)
        .bind(row.tiktok_score)
        .bind(row.trend_score)
        .bind(row.price)
        .bind(row.profit_margin)
        .bind(row.profit_potential)
        .bind(&row.image_url)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(rows.len())
}

/// The full persisted history, ordered by time ascending.
///
/// An empty table yields an empty `Vec`, not an error.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn load_history(pool: &PgPool) -> Result<Vec<SnapshotRow>, DbError> {
    let rows = sqlx::query_as::<_, SnapshotRow>(
        "SELECT id, time, product, google_score, ali_score, tiktok_score, \
                trend_score, price, profit_margin, profit_potential, image_url \
         FROM trend_snapshots \
         ORDER BY time ASC, id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// The most recent snapshot's rows, ranked by profit potential.
///
/// Empty when no snapshot has been appended yet.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn load_latest_snapshot(pool: &PgPool) -> Result<Vec<SnapshotRow>, DbError> {
    let rows = sqlx::query_as::<_, SnapshotRow>(
        "SELECT id, time, product, google_score, ali_score, tiktok_score, \
                trend_score, price, profit_margin, profit_potential, image_url \
         FROM trend_snapshots \
         WHERE time = (SELECT MAX(time) FROM trend_snapshots) \
         ORDER BY profit_potential DESC, product ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
