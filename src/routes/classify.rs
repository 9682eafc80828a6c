//! Leaf-disease classification and solution lookup endpoints.
//!
//! - `POST /api/classify` – classify an uploaded leaf image
//! - `GET  /api/diseases/{label}` – remedy entry for a classifier label

use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::solutions::{solution_for, DiseaseSolution};
use crate::state::AppState;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/classify", post(classify))
        .route("/api/diseases/{label}", get(disease_solution))
}

/// Handle `POST /api/classify`.
///
/// Takes the raw image bytes as the request body, forwards them to the
/// classifier adapter, and attaches the matching solution entry when the
/// label is in the remedy table. A label outside the table still returns
/// success, with `"solution": null`.
async fn classify(State(state): State<AppState>, image: Bytes) -> AppResult<Json<Value>> {
    // ---
    if image.is_empty() {
        return Err(AppError::Validation("empty image upload".to_string()));
    }

    let classification = state.classifier.classify(&image).await?;
    info!(
        "classified leaf image as '{}' ({:.1}%)",
        classification.label, classification.confidence
    );

    let solution = solution_for(&classification.label);
    Ok(Json(json!({
        "ok": true,
        "label": classification.label,
        "confidence": classification.confidence,
        "solution": solution,
    })))
}

/// Handle `GET /api/diseases/{label}`.
async fn disease_solution(Path(label): Path<String>) -> AppResult<Json<&'static DiseaseSolution>> {
    // ---
    let solution = solution_for(&label)
        .ok_or_else(|| AppError::NotFound(format!("no solution entry for '{label}'")))?;

    Ok(Json(solution))
}
