//! Data models for sensor readings.
//!
//! A reading is immutable once stored: created on ingest, read many times,
//! never updated or deleted. Every measurement is optional so devices with
//! a partial sensor complement (no pH probe, say) can still report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::nutrients::moisture_action;

// ---

/// Field names a sensor payload must carry. Presence is checked by key,
/// not by value: an explicit `null` passes and is stored as absent.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "nitrogen",
    "phosphorus",
    "potassium",
    "moisture",
    "temperature",
    "humidity",
    "ph",
];

/// A validated reading as submitted by a device, before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    // ---
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub moisture: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub ph: Option<f64>,
}

/// A persisted reading with its store-assigned identity.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct SensorReading {
    // ---
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub moisture: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub ph: Option<f64>,
}

/// Flattened reading for API responses, carrying the moisture reference
/// threshold so a dashboard can render "needs water" without a second call.
#[derive(Debug, Serialize)]
pub struct ReadingRecord {
    // ---
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub moisture: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub ph: Option<f64>,
    pub moisture_min: f64,
    pub moisture_action: Option<&'static str>,
}

impl NewReading {
    /// Validate a flat JSON payload into a reading.
    ///
    /// Reports every missing key in one error, then every present value
    /// that is neither a number nor `null`. Numeric values are taken
    /// exactly as sent; no range or plausibility checks here, since
    /// out-of-range levels are what the analyzer exists to detect.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<NewReading, AppError> {
        // ---
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !payload.contains_key(**field))
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        let invalid: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| {
                let value = &payload[**field];
                !value.is_null() && value.as_f64().is_none()
            })
            .map(|field| field.to_string())
            .collect();
        if !invalid.is_empty() {
            return Err(AppError::InvalidFields(invalid));
        }

        let field = |name: &str| payload[name].as_f64();

        Ok(NewReading {
            nitrogen: field("nitrogen"),
            phosphorus: field("phosphorus"),
            potassium: field("potassium"),
            moisture: field("moisture"),
            temperature: field("temperature"),
            humidity: field("humidity"),
            ph: field("ph"),
        })
    }
}

impl SensorReading {
    /// Flatten for an API response against the configured moisture floor.
    pub fn into_record(self, moisture_min: f64) -> ReadingRecord {
        // ---
        ReadingRecord {
            id: self.id,
            created_at: self.created_at,
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            moisture: self.moisture,
            temperature: self.temperature,
            humidity: self.humidity,
            ph: self.ph,
            moisture_min,
            moisture_action: self.moisture.map(|pct| moisture_action(pct, moisture_min)),
        }
    }
}
