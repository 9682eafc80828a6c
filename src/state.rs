//! Shared application state injected into every route handler.
//!
//! Everything here is constructed once in `main.rs` and cloned per
//! request; there is no ambient global state. The store and classifier
//! sit behind trait objects so tests can substitute in-memory and fake
//! implementations.

use std::sync::Arc;

use crate::classifier::DiseaseClassifier;
use crate::nutrients::ThresholdTable;
use crate::store::SharedStore;
use crate::Config;

// ---

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub classifier: Arc<dyn DiseaseClassifier>,
    pub thresholds: Arc<ThresholdTable>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        store: SharedStore,
        classifier: Arc<dyn DiseaseClassifier>,
        thresholds: ThresholdTable,
        config: Config,
    ) -> Self {
        // ---
        Self {
            store,
            classifier,
            thresholds: Arc::new(thresholds),
            config,
        }
    }
}
