//! Database schema management for `paddysense`.
//!
//! Ensures required tables and indexes exist before serving requests.
//! Applied once on startup from `main.rs` (EMBP: single gateway call).

use anyhow::Result;
use sqlx::PgPool;

// ---

/// Create or update the database schema (idempotent).
///
/// Creates the append-only `sensor_readings` table served by the readings
/// endpoints. Safe to call on every startup; no-op if objects already exist.
///
/// Errors are propagated if any SQL execution fails.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    // Every measurement column is nullable: devices may report a partial
    // sensor complement, and an explicit null payload value is stored as-is.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sensor_readings (
            id          BIGSERIAL PRIMARY KEY,
            created_at  TIMESTAMPTZ NOT NULL,
            nitrogen    DOUBLE PRECISION,
            phosphorus  DOUBLE PRECISION,
            potassium   DOUBLE PRECISION,
            moisture    DOUBLE PRECISION,
            temperature DOUBLE PRECISION,
            humidity    DOUBLE PRECISION,
            ph          DOUBLE PRECISION
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Recency queries order by (created_at, id) descending.
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_sensor_readings_recency
            ON sensor_readings (created_at DESC, id DESC);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
