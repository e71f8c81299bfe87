use std::sync::Arc;

use crate::assessment::sessions::SessionStore;
use crate::assessment::sink::CompletionSink;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: Arc<SessionStore>,
    /// Receives each confirmed assessment. Default: LogSink.
    pub sink: Arc<dyn CompletionSink>,
}
