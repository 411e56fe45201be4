use std::sync::Arc;

use skin_gate::{NetworkClassifier, Pipeline};

use crate::settings::Settings;

/// Everything a request handler needs. Read-only after start-up, so it is
/// shared through a plain `Arc` without a lock.
pub struct AppState {
    pub pipeline: Pipeline<NetworkClassifier>,
    pub settings: Settings,
}

/// Shared state type: an `Arc<AppState>` handed to every request thread.
pub type SharedState = Arc<AppState>;
