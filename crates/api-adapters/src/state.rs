use crate::metrics::Metrics;
use domains::ports::DocumentStore;
use services::{ServiceOptions, Services};
use std::sync::Arc;

/// State shared by every handler. Cloned per request; everything inside is
/// reference counted.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, options: ServiceOptions) -> Self {
        Self {
            services: Services::new(store, options),
            metrics: Arc::new(Metrics::new()),
        }
    }
}
