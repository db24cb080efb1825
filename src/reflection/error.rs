// Tue Jan 13 2026 - Alex

use crate::memory::MemoryError;
use crate::reflection::ObjectId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReflectionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Snapshot parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Object id {0} appears more than once")]
    DuplicateId(ObjectId),
    #[error("Snapshot memory error: {0}")]
    Memory(#[from] MemoryError),
}
