//! Disease classifier adapter.
//!
//! The pretrained leaf-disease model runs in a separate inference service;
//! this module only defines the boundary the rest of the app consumes and
//! an HTTP implementation of it. Any failure on this path (corrupt image,
//! model unavailable, nonsense response) surfaces as
//! [`AppError::Classifier`], never as a validation or storage error, so a
//! broken model can never stall or fail ingestion.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

// ---

/// A label and its confidence, as percent in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
}

#[async_trait]
pub trait DiseaseClassifier: Send + Sync {
    /// Classify raw image bytes. Deterministic for a fixed model version
    /// and fixed image.
    async fn classify(&self, image: &[u8]) -> AppResult<Classification>;
}

// ---

/// Classifier backed by an external HTTP inference service.
///
/// Sends the image as an `application/octet-stream` POST body and expects
/// a JSON `{"label": ..., "confidence": ...}` reply.
pub struct HttpClassifier {
    client: reqwest::Client,
    url: String,
}

impl HttpClassifier {
    pub fn new(url: impl Into<String>) -> Self {
        // ---
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl DiseaseClassifier for HttpClassifier {
    async fn classify(&self, image: &[u8]) -> AppResult<Classification> {
        // ---
        tracing::debug!("posting {} image bytes to {}", image.len(), self.url);

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await
            .map_err(|e| AppError::Classifier(format!("inference service unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Classifier(format!(
                "inference service returned {status}"
            )));
        }

        let classification: Classification = response
            .json()
            .await
            .map_err(|e| AppError::Classifier(format!("unparseable inference response: {e}")))?;

        check_classification(classification)
    }
}

/// Reject replies the model contract does not allow.
fn check_classification(classification: Classification) -> AppResult<Classification> {
    // ---
    if classification.label.is_empty() {
        return Err(AppError::Classifier("empty label from model".to_string()));
    }
    if !(0.0..=100.0).contains(&classification.confidence) {
        return Err(AppError::Classifier(format!(
            "confidence {} outside [0, 100]",
            classification.confidence
        )));
    }
    Ok(classification)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn well_formed_classification_passes() {
        // ---
        let c = check_classification(Classification {
            label: "brown_spot".into(),
            confidence: 91.4,
        })
        .unwrap();
        assert_eq!(c.label, "brown_spot");
    }

    #[test]
    fn confidence_outside_percent_range_is_rejected() {
        // ---
        let err = check_classification(Classification {
            label: "blast".into(),
            confidence: 140.0,
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Classifier(_)));
    }

    #[test]
    fn empty_label_is_rejected() {
        // ---
        let err = check_classification(Classification {
            label: String::new(),
            confidence: 50.0,
        })
        .unwrap_err();
        assert!(err.to_string().contains("classification failed"));
    }
}
