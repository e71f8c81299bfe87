//! Completion sink: where a confirmed assessment is handed off.
//!
//! Default: `LogSink`, which only writes the record to the log. Nothing is
//! persisted. `AppState` holds an `Arc<dyn CompletionSink>`.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::assessment::models::AssessmentRecord;
use crate::errors::AppError;

#[async_trait]
pub trait CompletionSink: Send + Sync {
    async fn deliver(&self, session_id: Uuid, record: &AssessmentRecord) -> Result<(), AppError>;
}

pub struct LogSink;

#[async_trait]
impl CompletionSink for LogSink {
    async fn deliver(&self, session_id: Uuid, record: &AssessmentRecord) -> Result<(), AppError> {
        info!(%session_id, ?record, "Assessment data");
        Ok(())
    }
}
