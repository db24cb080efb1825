// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),
    #[error("Virtual table of {0} at {1} is not readable")]
    VirtualTable(String, Address),
}
