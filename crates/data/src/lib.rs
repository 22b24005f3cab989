pub mod csv_loader;
pub mod sample;
pub mod store;

pub use store::MemoryBarStore;

use sigwatch_core::CoreError;

/// Errors that can occur while ingesting bar data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("data not found: {0}")]
    NotFound(String),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Invalid(#[from] CoreError),
}
