//! MediaTime Core - frame-rate math for media review tooling
//!
//! This crate provides:
//! - Frame-rate normalization (nominal decimal or explicit rate/scale)
//! - Conversions between frame counts, seconds, and ticks
//!   (254,016,000,000 per second)
//! - Non-drop-frame `HH:MM:SS:FF` timecode
//! - Converter configuration (default rate, formula mode)
//!
//! All conversions are pure and return `Err` for an unusable rate instead of
//! panicking.

pub mod config;
pub mod error;
pub mod timebase;
pub mod timecode;

pub use config::TimebaseConfig;
pub use error::{Result, TimebaseError};
pub use timebase::{
    frames_to_seconds, frames_to_ticks, normalize, seconds_to_frames, seconds_to_ticks,
    ticks_to_frames, ticks_to_seconds, ConversionMode, RateSpec, RationalRate, TimebaseConverter,
    TICKS_PER_SECOND,
};
pub use timecode::Timecode;
