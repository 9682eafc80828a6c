use axum::Router;

use crate::state::AppState;

mod classify;
mod health;
mod readings;

// ---

pub fn router(state: AppState) -> Router {
    // ---
    Router::new()
        .merge(readings::router())
        .merge(classify::router())
        .merge(health::router())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod testutil {
    //! Shared fixtures for in-process route tests: an in-memory store, a
    //! canned classifier, and a config that never touches the environment.

    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::classifier::{Classification, DiseaseClassifier};
    use crate::error::{AppError, AppResult};
    use crate::nutrients::ThresholdTable;
    use crate::state::AppState;
    use crate::store::MemReadingStore;
    use crate::Config;

    // ---

    /// Always returns the same classification.
    pub struct FixedClassifier(pub Classification);

    #[async_trait]
    impl DiseaseClassifier for FixedClassifier {
        async fn classify(&self, _image: &[u8]) -> AppResult<Classification> {
            Ok(self.0.clone())
        }
    }

    /// Always fails, the way a down inference service would.
    pub struct FailingClassifier;

    #[async_trait]
    impl DiseaseClassifier for FailingClassifier {
        async fn classify(&self, _image: &[u8]) -> AppResult<Classification> {
            Err(AppError::Classifier("model unavailable".to_string()))
        }
    }

    pub fn test_config() -> Config {
        // ---
        Config {
            db_url: "postgres://unused".to_string(),
            db_pool_max: 1,
            classifier_url: "http://unused".to_string(),
            bind_port: 0,
            readings_default_limit: 100,
            readings_max_limit: 1000,
            moisture_min: 35.0,
        }
    }

    pub fn test_state(classifier: Arc<dyn DiseaseClassifier>) -> AppState {
        // ---
        AppState::new(
            Arc::new(MemReadingStore::new()),
            classifier,
            ThresholdTable::builtin(),
            test_config(),
        )
    }

    pub fn blast_classifier() -> Arc<dyn DiseaseClassifier> {
        Arc::new(FixedClassifier(Classification {
            label: "blast".to_string(),
            confidence: 97.3,
        }))
    }
}
