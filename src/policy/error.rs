// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Policy parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid policy: {0}")]
    Invalid(String),
}
