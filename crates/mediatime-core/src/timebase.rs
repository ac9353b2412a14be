//! Frame-rate normalization and frame/second/tick conversions.
//!
//! A frame rate is held as an exact `rate / scale` fraction. Every
//! rate-dependent factor (seconds per frame, ticks per frame) is computed with
//! rational arithmetic; only the final value is rounded or turned into `f64`.
//!
//! Ticks are a fixed-resolution clock of [`TICKS_PER_SECOND`] units per second.

use num_rational::Ratio;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::TimebaseConfig;
use crate::error::{Result, TimebaseError};
use crate::timecode::Timecode;

/// Ticks per second of the high-resolution tick clock.
///
/// Divisible by the frame duration of every supported rate, so whole frames
/// map to whole ticks.
pub const TICKS_PER_SECOND: i64 = 254_016_000_000;

/// Exact intermediate arithmetic. `i128` leaves headroom for
/// `ticks * 1000 * frames` products on 64-bit inputs.
type Fraction = Ratio<i128>;

// ── Rates ───────────────────────────────────────────────────────

/// Frame rate as an exact fraction (e.g. 24000/1001 for 23.976 fps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RationalRate {
    /// Numerator (e.g. 24000)
    pub rate: u32,
    /// Denominator (e.g. 1001)
    pub scale: u32,
}

impl RationalRate {
    /// Create a new rational rate.
    #[inline]
    pub const fn new(rate: u32, scale: u32) -> Self {
        Self { rate, scale }
    }

    /// Frames per second as f64.
    #[inline]
    pub fn fps(self) -> f64 {
        self.rate as f64 / self.scale as f64
    }

    /// True if either component is zero, which makes every conversion undefined.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.rate == 0 || self.scale == 0
    }

    fn checked(self) -> Result<Self> {
        if self.is_degenerate() {
            return Err(TimebaseError::DegenerateRate {
                rate: self.rate,
                scale: self.scale,
            });
        }
        Ok(self)
    }

    /// Supported rates
    pub const FPS_23_976: Self = Self::new(24000, 1001);
    pub const FPS_24: Self = Self::new(24000, 1000);
    pub const FPS_25: Self = Self::new(25000, 1000);
    pub const FPS_29_97: Self = Self::new(30000, 1001);
    pub const FPS_30: Self = Self::new(30000, 1000);
    pub const FPS_59_94: Self = Self::new(60000, 1001);
    pub const FPS_60: Self = Self::new(60000, 1000);
}

impl fmt::Display for RationalRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.rate, self.scale)
    }
}

/// Nominal decimal rates and the fractions they expand to. Lookup is exact.
const NOMINAL_RATES: [(f64, RationalRate); 8] = [
    (23.976, RationalRate::FPS_23_976),
    (23.98, RationalRate::FPS_23_976),
    (24.0, RationalRate::FPS_24),
    (25.0, RationalRate::FPS_25),
    (29.97, RationalRate::FPS_29_97),
    (30.0, RationalRate::FPS_30),
    (59.94, RationalRate::FPS_59_94),
    (60.0, RationalRate::FPS_60),
];

/// A frame rate as supplied by a caller.
///
/// Deserializes from either a bare number (`23.976`) or an object with
/// `rate` and `scale` fields (`{"rate": 24000, "scale": 1001}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RateSpec {
    /// Already-rational rate, used as given.
    Explicit(RationalRate),
    /// Commonly cited decimal rate such as 29.97.
    Nominal(f64),
}

impl From<f64> for RateSpec {
    fn from(fps: f64) -> Self {
        Self::Nominal(fps)
    }
}

impl From<RationalRate> for RateSpec {
    fn from(rate: RationalRate) -> Self {
        Self::Explicit(rate)
    }
}

impl fmt::Display for RateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(rate) => write!(f, "{rate}"),
            Self::Nominal(fps) => write!(f, "{fps} fps"),
        }
    }
}

/// Normalize a rate spec into an exact fraction.
///
/// Explicit rates pass through untouched. Nominal rates must match one of the
/// supported values exactly (23.976, 23.98, 24, 25, 29.97, 30, 59.94, 60).
pub fn normalize(spec: impl Into<Option<RateSpec>>) -> Result<RationalRate> {
    let spec: Option<RateSpec> = spec.into();
    match spec {
        None => Err(TimebaseError::MissingRate),
        Some(RateSpec::Explicit(rate)) => Ok(rate),
        Some(RateSpec::Nominal(fps)) => NOMINAL_RATES
            .iter()
            .find(|(nominal, _)| *nominal == fps)
            .map(|(_, rate)| *rate)
            .ok_or(TimebaseError::UnsupportedRate(fps)),
    }
}

impl TryFrom<RateSpec> for RationalRate {
    type Error = TimebaseError;

    fn try_from(spec: RateSpec) -> Result<Self> {
        normalize(spec)
    }
}

// ── Conversion formulas ─────────────────────────────────────────

/// Which set of formulas the converter applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionMode {
    /// Formulas compatible with existing panel data:
    /// seconds = frames × rate/scale, ticks per frame =
    /// (TICKS_PER_SECOND × 1000 / rate) / scale, and tick→second results
    /// rounded to whole seconds.
    #[default]
    Legacy,
    /// Conventional formulas: seconds = frames × scale/rate, ticks per frame =
    /// TICKS_PER_SECOND × scale / rate, tick→second results unrounded.
    Exact,
}

impl ConversionMode {
    fn seconds_per_frame(self, rate: RationalRate) -> Fraction {
        let (r, s) = (i128::from(rate.rate), i128::from(rate.scale));
        match self {
            Self::Legacy => Fraction::new(r, s),
            Self::Exact => Fraction::new(s, r),
        }
    }

    fn ticks_per_frame(self, rate: RationalRate) -> Fraction {
        let tps = i128::from(TICKS_PER_SECOND);
        let (r, s) = (i128::from(rate.rate), i128::from(rate.scale));
        match self {
            // The ×1000 is carried through before the final division.
            Self::Legacy => Fraction::new(tps * 1000, r * s),
            Self::Exact => Fraction::new(tps * s, r),
        }
    }
}

#[inline]
fn fraction_to_f64(value: Fraction) -> f64 {
    *value.numer() as f64 / *value.denom() as f64
}

fn finite_seconds(seconds: f64) -> Result<f64> {
    if seconds.is_finite() {
        Ok(seconds)
    } else {
        Err(TimebaseError::NonFiniteSeconds(seconds))
    }
}

/// Round half away from zero and narrow to i64.
fn round_to_i64(value: f64, what: &str) -> Result<i64> {
    let rounded = value.round();
    // i64::MAX as f64 is 2^63, one past the largest representable value.
    if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return Err(TimebaseError::OutOfRange(format!("{what} {value} does not fit in i64")));
    }
    Ok(rounded as i64)
}

/// `factor × by`, failing instead of overflowing i128.
fn checked_scale(factor: Fraction, by: i128, what: &str) -> Result<Fraction> {
    factor
        .numer()
        .checked_mul(by)
        .map(|numer| Fraction::new(numer, *factor.denom()))
        .ok_or_else(|| TimebaseError::OutOfRange(format!("{what} overflows at {by}")))
}

/// Nearest integer, halves away from zero. Denominators are always positive.
fn round_half_away(value: Fraction) -> i128 {
    let (numer, denom) = (*value.numer(), *value.denom());
    let (quot, rem) = (numer / denom, numer % denom);
    if rem.abs() >= denom - rem.abs() {
        quot + rem.signum()
    } else {
        quot
    }
}

fn narrow(value: i128, what: &str) -> Result<i64> {
    i64::try_from(value)
        .map_err(|_| TimebaseError::OutOfRange(format!("{what} {value} does not fit in i64")))
}

// ── Converter ───────────────────────────────────────────────────

/// Converts between frame counts, seconds, and ticks.
///
/// Holds an optional default rate used when a call passes `None`, and the
/// [`ConversionMode`]. Immutable and freely shareable across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimebaseConverter {
    default_rate: Option<RateSpec>,
    mode: ConversionMode,
}

impl TimebaseConverter {
    /// Create a converter from a configuration.
    pub fn new(config: TimebaseConfig) -> Self {
        Self {
            default_rate: config.default_rate,
            mode: config.mode,
        }
    }

    /// Use `rate` whenever a call does not name one.
    pub fn with_default_rate(mut self, rate: impl Into<RateSpec>) -> Self {
        self.default_rate = Some(rate.into());
        self
    }

    pub fn with_mode(mut self, mode: ConversionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn default_rate(&self) -> Option<RateSpec> {
        self.default_rate
    }

    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    /// Configuration that reproduces this converter.
    pub fn config(&self) -> TimebaseConfig {
        TimebaseConfig {
            default_rate: self.default_rate,
            mode: self.mode,
        }
    }

    /// Normalize `spec`, falling back to the default rate when it is `None`.
    pub fn resolve(&self, spec: impl Into<Option<RateSpec>>) -> Result<RationalRate> {
        let spec: Option<RateSpec> = spec.into();
        normalize(spec.or(self.default_rate))
    }

    fn usable(&self, spec: impl Into<Option<RateSpec>>) -> Result<RationalRate> {
        self.resolve(spec)?.checked()
    }

    /// Offset in seconds of frame `frames`. Not rounded.
    pub fn frames_to_seconds(&self, frames: i64, spec: impl Into<Option<RateSpec>>) -> Result<f64> {
        let rate = self.usable(spec)?;
        let per_frame = self.mode.seconds_per_frame(rate);
        let seconds = checked_scale(per_frame, i128::from(frames), "seconds")?;
        Ok(fraction_to_f64(seconds))
    }

    /// Frame number at `seconds`, rounded half away from zero.
    pub fn seconds_to_frames(&self, seconds: f64, spec: impl Into<Option<RateSpec>>) -> Result<i64> {
        let rate = self.usable(spec)?;
        let seconds = finite_seconds(seconds)?;
        let ticks_per_frame = self.mode.ticks_per_frame(rate);
        let frames = seconds * TICKS_PER_SECOND as f64 * *ticks_per_frame.denom() as f64
            / *ticks_per_frame.numer() as f64;
        round_to_i64(frames, "frame count")
    }

    /// Tick offset of frame `frames`, rounded to the nearest tick.
    pub fn frames_to_ticks(&self, frames: i64, spec: impl Into<Option<RateSpec>>) -> Result<i64> {
        let rate = self.usable(spec)?;
        let per_frame = self.mode.ticks_per_frame(rate);
        let ticks = checked_scale(per_frame, i128::from(frames), "tick count")?;
        narrow(round_half_away(ticks), "tick count")
    }

    /// Frame number at tick `ticks`, rounded half away from zero.
    pub fn ticks_to_frames(&self, ticks: i64, spec: impl Into<Option<RateSpec>>) -> Result<i64> {
        let rate = self.usable(spec)?;
        let frames_per_tick = self.mode.ticks_per_frame(rate).recip();
        let frames = checked_scale(frames_per_tick, i128::from(ticks), "frame count")?;
        narrow(round_half_away(frames), "frame count")
    }

    /// Seconds at tick `ticks`. The rate is validated but does not affect the
    /// result; in [`ConversionMode::Legacy`] the result is whole seconds.
    pub fn ticks_to_seconds(&self, ticks: i64, spec: impl Into<Option<RateSpec>>) -> Result<f64> {
        self.usable(spec)?;
        let seconds = Fraction::new(i128::from(ticks), i128::from(TICKS_PER_SECOND));
        Ok(match self.mode {
            ConversionMode::Legacy => round_half_away(seconds) as f64,
            ConversionMode::Exact => fraction_to_f64(seconds),
        })
    }

    /// Tick offset at `seconds`, rounded to the nearest tick.
    pub fn seconds_to_ticks(&self, seconds: f64, spec: impl Into<Option<RateSpec>>) -> Result<i64> {
        self.usable(spec)?;
        let seconds = finite_seconds(seconds)?;
        round_to_i64(seconds * TICKS_PER_SECOND as f64, "tick count")
    }

    /// Frame count of an `HH:MM:SS:FF` timecode string.
    pub fn timecode_to_frames(
        &self,
        timecode: &str,
        spec: impl Into<Option<RateSpec>>,
    ) -> Result<i64> {
        let rate = self.usable(spec)?;
        timecode.parse::<Timecode>()?.to_frames(rate)
    }

    /// `HH:MM:SS:FF` timecode string for frame `frames`.
    pub fn frames_to_timecode(
        &self,
        frames: i64,
        spec: impl Into<Option<RateSpec>>,
    ) -> Result<String> {
        let rate = self.usable(spec)?;
        Ok(Timecode::from_frames(frames, rate)?.to_string())
    }
}

impl From<TimebaseConfig> for TimebaseConverter {
    fn from(config: TimebaseConfig) -> Self {
        Self::new(config)
    }
}

// ── Free functions (default converter: legacy formulas, no default rate) ──

/// See [`TimebaseConverter::frames_to_seconds`].
pub fn frames_to_seconds(frames: i64, spec: impl Into<Option<RateSpec>>) -> Result<f64> {
    TimebaseConverter::default().frames_to_seconds(frames, spec)
}

/// See [`TimebaseConverter::seconds_to_frames`].
pub fn seconds_to_frames(seconds: f64, spec: impl Into<Option<RateSpec>>) -> Result<i64> {
    TimebaseConverter::default().seconds_to_frames(seconds, spec)
}

/// See [`TimebaseConverter::frames_to_ticks`].
pub fn frames_to_ticks(frames: i64, spec: impl Into<Option<RateSpec>>) -> Result<i64> {
    TimebaseConverter::default().frames_to_ticks(frames, spec)
}

/// See [`TimebaseConverter::ticks_to_frames`].
pub fn ticks_to_frames(ticks: i64, spec: impl Into<Option<RateSpec>>) -> Result<i64> {
    TimebaseConverter::default().ticks_to_frames(ticks, spec)
}

/// See [`TimebaseConverter::ticks_to_seconds`].
pub fn ticks_to_seconds(ticks: i64, spec: impl Into<Option<RateSpec>>) -> Result<f64> {
    TimebaseConverter::default().ticks_to_seconds(ticks, spec)
}

/// See [`TimebaseConverter::seconds_to_ticks`].
pub fn seconds_to_ticks(seconds: f64, spec: impl Into<Option<RateSpec>>) -> Result<i64> {
    TimebaseConverter::default().seconds_to_ticks(seconds, spec)
}
