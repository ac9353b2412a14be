//! Error types for MediaTime.

use thiserror::Error;

/// Main error type for timebase operations.
///
/// Every conversion reports an unusable frame rate through this type rather
/// than panicking, so callers can decide how to surface it.
#[derive(Error, Debug)]
pub enum TimebaseError {
    #[error("No frame rate given and no default rate configured")]
    MissingRate,

    #[error("Unsupported nominal frame rate: {0}")]
    UnsupportedRate(f64),

    #[error("Degenerate rational rate {rate}/{scale}")]
    DegenerateRate { rate: u32, scale: u32 },

    #[error("Seconds value is not finite: {0}")]
    NonFiniteSeconds(f64),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid timecode: {0}")]
    InvalidTimecode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for timebase operations.
pub type Result<T> = std::result::Result<T, TimebaseError>;
