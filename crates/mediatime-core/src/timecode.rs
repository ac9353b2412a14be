//! Non-drop-frame `HH:MM:SS:FF` timecode.
//!
//! Frames are counted against the integer nominal rate (24 for 23.976,
//! 30 for 29.97, ...). Drop-frame notation with `;` is not accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TimebaseError};
use crate::timebase::RationalRate;

const SECONDS_PER_DAY: i64 = 24 * 3600;

/// A timecode within a single 24-hour day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timecode {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u32,
}

impl Timecode {
    pub const fn new(hours: u8, minutes: u8, seconds: u8, frames: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            frames,
        }
    }

    /// Integer frames per second used for counting at `rate`.
    pub fn base(rate: RationalRate) -> Result<u32> {
        if rate.is_degenerate() {
            return Err(TimebaseError::DegenerateRate {
                rate: rate.rate,
                scale: rate.scale,
            });
        }
        let (r, s) = (u64::from(rate.rate), u64::from(rate.scale));
        let base = (r + s / 2) / s;
        if base == 0 {
            return Err(TimebaseError::OutOfRange(format!(
                "rate {rate} is below one frame per second"
            )));
        }
        // base <= rate, which is a u32
        Ok(base as u32)
    }

    fn check_clock(&self) -> Result<()> {
        if self.hours >= 24 || self.minutes >= 60 || self.seconds >= 60 {
            return Err(TimebaseError::InvalidTimecode(format!(
                "{self} is not a valid time of day"
            )));
        }
        Ok(())
    }

    /// Absolute frame count at `rate`.
    pub fn to_frames(self, rate: RationalRate) -> Result<i64> {
        self.check_clock()?;
        let base = Self::base(rate)?;
        if self.frames >= base {
            return Err(TimebaseError::InvalidTimecode(format!(
                "frame field of {self} exceeds {base} fps timebase"
            )));
        }
        let seconds =
            i64::from(self.hours) * 3600 + i64::from(self.minutes) * 60 + i64::from(self.seconds);
        Ok(seconds * i64::from(base) + i64::from(self.frames))
    }

    /// Timecode of absolute frame `frames` at `rate`.
    pub fn from_frames(frames: i64, rate: RationalRate) -> Result<Self> {
        let base = i64::from(Self::base(rate)?);
        if frames < 0 {
            return Err(TimebaseError::OutOfRange(format!(
                "negative frame count {frames}"
            )));
        }
        let total_seconds = frames / base;
        if total_seconds >= SECONDS_PER_DAY {
            return Err(TimebaseError::OutOfRange(format!(
                "frame {frames} is past 24 hours at {rate}"
            )));
        }
        // All narrowing casts below are bounded by the checks above.
        Ok(Self {
            hours: (total_seconds / 3600) as u8,
            minutes: (total_seconds / 60 % 60) as u8,
            seconds: (total_seconds % 60) as u8,
            frames: (frames % base) as u32,
        })
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds, self.frames
        )
    }
}

impl FromStr for Timecode {
    type Err = TimebaseError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TimebaseError::InvalidTimecode(format!("expected HH:MM:SS:FF, got {s:?}"));

        let fields: Vec<&str> = s.split(':').collect();
        if fields.len() != 4 {
            return Err(invalid());
        }
        let mut values = [0u8; 4];
        for (value, field) in values.iter_mut().zip(&fields) {
            if field.len() != 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *value = field.parse().map_err(|_| invalid())?;
        }

        let tc = Self::new(values[0], values[1], values[2], u32::from(values[3]));
        tc.check_clock()?;
        Ok(tc)
    }
}
