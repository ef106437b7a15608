use super::domain::RecordId;
use super::record::IntakeRecord;

/// Persistence API the engine hands finished records to.
pub trait IntakeRecordApi: Send + Sync {
    fn create(&self, record: IntakeRecord) -> Result<RecordId, PersistenceError>;
    fn update(&self, id: &RecordId, record: IntakeRecord) -> Result<RecordId, PersistenceError>;
    fn get(&self, id: &RecordId) -> Result<IntakeRecord, PersistenceError>;
}

/// Opaque failure reported by the persistence API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    #[error("intake record {0} not found")]
    NotFound(RecordId),
    #[error("persistence request failed: {}", .message.as_deref().unwrap_or("no details provided"))]
    Failed { message: Option<String> },
}
