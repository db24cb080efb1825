// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Access violation at address 0x{0:x}")]
    AccessViolation(u64),
    #[error("Read of {1} bytes failed at address 0x{0:x}")]
    ReadFailed(u64, usize),
    #[error("Binary parse error: {0}")]
    BinaryParseError(String),
    #[error("Region 0x{0:x} overlaps an already mapped region")]
    OverlappingRegion(u64),
    #[error("Not supported: {0}")]
    NotSupported(String),
}
