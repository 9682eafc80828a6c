//! Sensor reading ingest and query endpoints.
//!
//! - `POST /api/readings` – ingest one reading pushed by a field device
//! - `GET  /api/readings` – most recent readings, newest first
//! - `GET  /api/readings/latest` – the single newest reading
//! - `GET  /api/soil-report` – threshold analysis for submitted values

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{NewReading, ReadingRecord};
use crate::state::AppState;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/readings", post(ingest).get(get_readings))
        .route("/api/readings/latest", get(latest_reading))
        .route("/api/soil-report", get(soil_report))
}

/// Handle `POST /api/readings`.
///
/// The payload must be a flat JSON object carrying all seven measurement
/// keys (see [`crate::models::REQUIRED_FIELDS`]); values may be numbers or
/// `null`. Values are stored exactly as sent. Responds with
/// `{"ok": true, "id": <id>}` once the reading is durably persisted.
async fn ingest(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Value>> {
    // ---
    let object = payload
        .as_object()
        .ok_or_else(|| AppError::Validation("expected a flat JSON object".to_string()))?;

    let reading = NewReading::from_payload(object)?;
    let id = state.store.insert(reading).await?;

    info!("ingested sensor reading id={id}");
    Ok(Json(json!({ "ok": true, "id": id })))
}

#[derive(Debug, Deserialize)]
struct ReadingsQuery {
    limit: Option<u32>,
}

/// Handle `GET /api/readings`.
///
/// `limit` defaults from config and is clamped to `1..=READINGS_MAX_LIMIT`;
/// asking for more than the cap quietly returns the cap.
async fn get_readings(
    Query(params): Query<ReadingsQuery>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReadingRecord>>> {
    // ---
    let limit = params
        .limit
        .unwrap_or(state.config.readings_default_limit)
        .clamp(1, state.config.readings_max_limit);

    let readings = state.store.recent(limit).await?;
    info!("returning {} readings (limit {limit})", readings.len());

    let moisture_min = state.config.moisture_min;
    let records = readings
        .into_iter()
        .map(|r| r.into_record(moisture_min))
        .collect();

    Ok(Json(records))
}

/// Handle `GET /api/readings/latest`. 404 while the store is empty.
async fn latest_reading(State(state): State<AppState>) -> AppResult<Json<ReadingRecord>> {
    // ---
    let reading = state
        .store
        .latest()
        .await?
        .ok_or_else(|| AppError::NotFound("no readings recorded yet".to_string()))?;

    Ok(Json(reading.into_record(state.config.moisture_min)))
}

#[derive(Debug, Deserialize)]
struct SoilReportQuery {
    nitrogen: Option<f64>,
    phosphorus: Option<f64>,
    potassium: Option<f64>,
    ph: Option<f64>,
}

/// Handle `GET /api/soil-report`.
///
/// Classifies each provided value against its threshold band and returns a
/// map keyed by nutrient name. Omitted parameters are simply absent from
/// the report, mirroring how optional probes are absent from readings.
async fn soil_report(
    Query(params): Query<SoilReportQuery>,
    State(state): State<AppState>,
) -> AppResult<Json<Map<String, Value>>> {
    // ---
    let values = [
        ("nitrogen", params.nitrogen),
        ("phosphorus", params.phosphorus),
        ("potassium", params.potassium),
        ("ph", params.ph),
    ];

    let mut report = Map::new();
    for (nutrient, value) in values {
        if let Some(value) = value {
            if let Some(analysis) = state.thresholds.analyze(nutrient, value) {
                report.insert(nutrient.to_string(), json!(analysis));
            }
        }
    }

    Ok(Json(report))
}
