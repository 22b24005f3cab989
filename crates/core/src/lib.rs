pub mod models;
pub mod traits;

pub use models::*;
pub use traits::*;

/// Errors raised by the core domain types.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Caller supplied malformed input (out-of-order bars, negative
    /// volume, non-positive prices).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
