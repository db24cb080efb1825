// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Invalid pattern token: {0}")]
    InvalidPattern(String),
    #[error("Pattern too short: {0} bytes")]
    PatternTooShort(usize),
    #[error("Pattern has no significant byte: {0}")]
    InvalidWildcard(String),
    #[error("Pattern has {0} bytes but {1} mask entries")]
    MaskLengthMismatch(usize, usize),
}
