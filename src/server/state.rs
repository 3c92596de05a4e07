use std::path::PathBuf;
use std::sync::Arc;

use crate::occupancy::AggregateOptions;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub csv_path: Arc<PathBuf>,
    pub options: AggregateOptions,
}

impl AppState {
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: Arc::new(csv_path.into()),
            options: AggregateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AggregateOptions) -> Self {
        self.options = options;
        self
    }
}
