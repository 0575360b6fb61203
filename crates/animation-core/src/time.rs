//! Time domains.
//!
//! Produced keyframes are stamped with [`TimeSpan`], a fixed resolution tick
//! count. Source curves are keyed in [`SourceTime`], the native resolution of
//! the asset format. Conversions go through 128-bit intermediates.

use std::ops::{Add, AddAssign, Sub};

use ordered_float::OrderedFloat;

use crate::error::{AwsmAnimationCoreError, Result};

/// Output time, in ticks of 100ns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSpan(pub i64);

impl TimeSpan {
    pub const TICKS_PER_SECOND: i64 = 10_000_000;
    pub const ZERO: Self = Self(0);

    pub fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    pub fn ticks(self) -> i64 {
        self.0
    }

    pub fn from_seconds(seconds: f64) -> Self {
        Self((seconds * Self::TICKS_PER_SECOND as f64).round() as i64)
    }

    pub fn as_seconds(self) -> f64 {
        self.0 as f64 / Self::TICKS_PER_SECOND as f64
    }

    pub fn to_source(self) -> SourceTime {
        SourceTime(
            (self.0 as i128 * SourceTime::TICKS_PER_SECOND as i128 / Self::TICKS_PER_SECOND as i128)
                as i64,
        )
    }
}

/// Native source time, in the asset format's ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceTime(pub i64);

impl SourceTime {
    pub const TICKS_PER_SECOND: i64 = 46_186_158_000;
    pub const ZERO: Self = Self(0);

    pub fn from_seconds(seconds: f64) -> Self {
        Self((seconds * Self::TICKS_PER_SECOND as f64).round() as i64)
    }

    pub fn as_seconds(self) -> f64 {
        self.0 as f64 / Self::TICKS_PER_SECOND as f64
    }

    /// Truncates toward zero, like the source SDK's own conversion.
    pub fn to_time_span(self) -> TimeSpan {
        TimeSpan(
            (self.0 as i128 * TimeSpan::TICKS_PER_SECOND as i128 / Self::TICKS_PER_SECOND as i128)
                as i64,
        )
    }
}

impl Add for SourceTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for SourceTime {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for SourceTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl From<SourceTime> for TimeSpan {
    fn from(time: SourceTime) -> Self {
        time.to_time_span()
    }
}

/// Global frame-rate setting of the source scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeMode {
    Frames120,
    Frames100,
    Frames60,
    Frames50,
    Frames48,
    #[default]
    Frames30,
    Frames30Drop,
    NtscDropFrame,
    NtscFullFrame,
    Pal,
    Frames24,
    Frames1000,
    FilmFullFrame,
    Frames96,
    Frames72,
    Frames59Dot94,
    Frames119Dot88,
    Custom(OrderedFloat<f64>),
}

impl TimeMode {
    /// A custom rate must be finite and positive.
    pub fn custom(frames_per_second: f64) -> Result<Self> {
        if frames_per_second.is_finite() && frames_per_second > 0.0 {
            Ok(Self::Custom(OrderedFloat(frames_per_second)))
        } else {
            Err(AwsmAnimationCoreError::InvalidFrameRate(frames_per_second))
        }
    }

    pub fn frame_rate(self) -> f64 {
        match self {
            Self::Frames120 => 120.0,
            Self::Frames100 => 100.0,
            Self::Frames60 => 60.0,
            Self::Frames50 => 50.0,
            Self::Frames48 => 48.0,
            Self::Frames30 | Self::Frames30Drop => 30.0,
            Self::NtscDropFrame | Self::NtscFullFrame => 29.970_026_2,
            Self::Pal => 25.0,
            Self::Frames24 => 24.0,
            Self::Frames1000 => 1000.0,
            Self::FilmFullFrame => 23.976,
            Self::Frames96 => 96.0,
            Self::Frames72 => 72.0,
            Self::Frames59Dot94 => 59.94,
            Self::Frames119Dot88 => 119.88,
            Self::Custom(rate) => rate.0,
        }
    }

    /// Duration of one frame, never shorter than one tick.
    pub fn one_frame(self) -> SourceTime {
        let ticks = (SourceTime::TICKS_PER_SECOND as f64 / self.frame_rate()).round() as i64;
        SourceTime(ticks.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_rates_divide_a_second_exactly() {
        for mode in [
            TimeMode::Frames24,
            TimeMode::Frames30,
            TimeMode::Frames60,
            TimeMode::Pal,
            TimeMode::Frames120,
        ] {
            let frames = mode.frame_rate() as i64;
            assert_eq!(mode.one_frame().0 * frames, SourceTime::TICKS_PER_SECOND);
        }
    }

    #[test]
    fn one_second_converts_exactly() {
        let one = SourceTime(SourceTime::TICKS_PER_SECOND);
        assert_eq!(one.to_time_span(), TimeSpan(TimeSpan::TICKS_PER_SECOND));
        assert_eq!(one.to_time_span().to_source(), one);
    }

    #[test]
    fn frame_conversion_truncates() {
        let frame = TimeMode::Frames30.one_frame();
        assert_eq!(frame.to_time_span(), TimeSpan(333_333));
    }

    #[test]
    fn custom_rate_is_validated() {
        assert!(TimeMode::custom(12.0).is_ok());
        assert_eq!(
            TimeMode::custom(0.0),
            Err(AwsmAnimationCoreError::InvalidFrameRate(0.0))
        );
        assert!(TimeMode::custom(f64::NAN).is_err());
    }
}
