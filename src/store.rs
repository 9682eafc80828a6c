//! Reading store: append-only persistence for sensor readings.
//!
//! The store hands out monotonically increasing identifiers, so recency
//! ordering is by creation timestamp descending with ties broken by id
//! descending (most recently inserted first). Once an insert has been
//! acknowledged the reading is visible to every subsequent query.
//!
//! [`PgReadingStore`] is the production backend; [`MemReadingStore`] backs
//! tests and local development without a database.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::Mutex;

use crate::error::AppResult;
use crate::models::{NewReading, SensorReading};

// ---

#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Persist a reading stamped with the ingestion time; returns its id.
    async fn insert(&self, reading: NewReading) -> AppResult<i64>;

    /// The single most recent reading, if any. Equivalent to `recent(1)`.
    async fn latest(&self) -> AppResult<Option<SensorReading>>;

    /// Up to `limit` readings, most recent first.
    async fn recent(&self, limit: u32) -> AppResult<Vec<SensorReading>>;
}

pub type SharedStore = Arc<dyn ReadingStore>;

// ---

/// PostgreSQL-backed store over the shared connection pool.
#[derive(Clone)]
pub struct PgReadingStore {
    pool: PgPool,
}

impl PgReadingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const READING_COLUMNS: &str =
    "id, created_at, nitrogen, phosphorus, potassium, moisture, temperature, humidity, ph";

#[async_trait]
impl ReadingStore for PgReadingStore {
    async fn insert(&self, reading: NewReading) -> AppResult<i64> {
        // ---
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO sensor_readings (
                created_at, nitrogen, phosphorus, potassium,
                moisture, temperature, humidity, ph
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(Utc::now())
        .bind(reading.nitrogen)
        .bind(reading.phosphorus)
        .bind(reading.potassium)
        .bind(reading.moisture)
        .bind(reading.temperature)
        .bind(reading.humidity)
        .bind(reading.ph)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn latest(&self) -> AppResult<Option<SensorReading>> {
        // ---
        let reading = sqlx::query_as::<_, SensorReading>(&format!(
            "SELECT {READING_COLUMNS} FROM sensor_readings \
             ORDER BY created_at DESC, id DESC LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(reading)
    }

    async fn recent(&self, limit: u32) -> AppResult<Vec<SensorReading>> {
        // ---
        let readings = sqlx::query_as::<_, SensorReading>(&format!(
            "SELECT {READING_COLUMNS} FROM sensor_readings \
             ORDER BY created_at DESC, id DESC LIMIT $1"
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(readings)
    }
}

// ---

/// In-memory store with the same ordering contract as the SQL backend.
#[derive(Default)]
pub struct MemReadingStore {
    inner: Mutex<MemInner>,
}

#[derive(Default)]
struct MemInner {
    next_id: i64,
    rows: Vec<SensorReading>,
}

impl MemReadingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReadingStore for MemReadingStore {
    async fn insert(&self, reading: NewReading) -> AppResult<i64> {
        // ---
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let id = inner.next_id;

        inner.rows.push(SensorReading {
            id,
            created_at: Utc::now(),
            nitrogen: reading.nitrogen,
            phosphorus: reading.phosphorus,
            potassium: reading.potassium,
            moisture: reading.moisture,
            temperature: reading.temperature,
            humidity: reading.humidity,
            ph: reading.ph,
        });

        Ok(id)
    }

    async fn latest(&self) -> AppResult<Option<SensorReading>> {
        Ok(self.recent(1).await?.into_iter().next())
    }

    async fn recent(&self, limit: u32) -> AppResult<Vec<SensorReading>> {
        // ---
        let inner = self.inner.lock().await;
        let mut rows = inner.rows.clone();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        rows.truncate(limit as usize);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn reading(nitrogen: f64) -> NewReading {
        // ---
        NewReading {
            nitrogen: Some(nitrogen),
            phosphorus: Some(20.0),
            potassium: Some(100.0),
            moisture: Some(40.0),
            temperature: Some(27.0),
            humidity: Some(80.0),
            ph: Some(6.5),
        }
    }

    #[tokio::test]
    async fn latest_returns_most_recent_insert() {
        // ---
        let store = MemReadingStore::new();
        let first = store.insert(reading(10.0)).await.unwrap();
        let second = store.insert(reading(20.0)).await.unwrap();
        assert!(second > first, "ids must increase with insertion order");

        let latest = store.latest().await.unwrap().unwrap();
        assert_eq!(latest.id, second);
        assert_eq!(latest.nitrogen, Some(20.0));
    }

    #[tokio::test]
    async fn recent_orders_most_recent_first() {
        // ---
        let store = MemReadingStore::new();
        let r1 = store.insert(reading(1.0)).await.unwrap();
        let r2 = store.insert(reading(2.0)).await.unwrap();

        let recent = store.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, r2);
        assert_eq!(recent[1].id, r1);
    }

    #[tokio::test]
    async fn recent_never_exceeds_limit() {
        // ---
        let store = MemReadingStore::new();
        for n in 0..5 {
            store.insert(reading(n as f64)).await.unwrap();
        }

        assert_eq!(store.recent(3).await.unwrap().len(), 3);
        assert_eq!(store.recent(100).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn empty_store_has_no_latest() {
        // ---
        let store = MemReadingStore::new();
        assert!(store.latest().await.unwrap().is_none());
        assert!(store.recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn acknowledged_inserts_are_visible() {
        // ---
        let store = Arc::new(MemReadingStore::new());

        let mut handles = Vec::new();
        for n in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(
                async move { store.insert(reading(n as f64)).await },
            ));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let rows = store.recent(100).await.unwrap();
        assert_eq!(rows.len(), 8);
        // Ids are unique and strictly descending in the result.
        for pair in rows.windows(2) {
            assert!(pair[0].id > pair[1].id);
        }
    }
}
