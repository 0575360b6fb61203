//! Native per-axis source curves, as exposed by the asset's scene graph.

use crate::{
    error::{AwsmAnimationCoreError, Result},
    interpolate::{interpolate_cubic_spline_f32, interpolate_linear_f32},
    time::SourceTime,
};

/// Interpolation of the segment that starts at a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyInterpolation {
    /// Step: the value holds until the next key.
    Constant,
    #[default]
    Linear,
    Cubic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceKey {
    pub time: SourceTime,
    pub value: f32,
    pub interpolation: KeyInterpolation,
    /// Incoming slope in value per second, only read for cubic segments.
    pub left_slope: f32,
    /// Outgoing slope in value per second, only read for cubic segments.
    pub right_slope: f32,
}

impl SourceKey {
    pub fn new(time: SourceTime, value: f32, interpolation: KeyInterpolation) -> Self {
        Self {
            time,
            value,
            interpolation,
            left_slope: 0.0,
            right_slope: 0.0,
        }
    }

    pub fn constant(time: SourceTime, value: f32) -> Self {
        Self::new(time, value, KeyInterpolation::Constant)
    }

    pub fn linear(time: SourceTime, value: f32) -> Self {
        Self::new(time, value, KeyInterpolation::Linear)
    }

    pub fn cubic(time: SourceTime, value: f32, left_slope: f32, right_slope: f32) -> Self {
        Self {
            time,
            value,
            interpolation: KeyInterpolation::Cubic,
            left_slope,
            right_slope,
        }
    }

    pub fn is_constant(&self) -> bool {
        self.interpolation == KeyInterpolation::Constant
    }
}

/// Keys ordered by non-decreasing time.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceCurve {
    keys: Vec<SourceKey>,
}

impl SourceCurve {
    pub fn new(keys: Vec<SourceKey>) -> Result<Self> {
        for (index, pair) in keys.windows(2).enumerate() {
            if pair[1].time < pair[0].time {
                return Err(AwsmAnimationCoreError::UnorderedKeys {
                    index: index + 1,
                    time: pair[1].time,
                });
            }
        }
        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[SourceKey] {
        &self.keys
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// First and last key times, if there are any keys.
    pub fn time_interval(&self) -> Option<(SourceTime, SourceTime)> {
        Some((self.keys.first()?.time, self.keys.last()?.time))
    }

    /// Evaluates the curve at `time`.
    ///
    /// `hint` caches the active key index between calls so that forward
    /// sampling is amortized constant time. Any value is accepted.
    pub fn evaluate(&self, time: SourceTime, hint: &mut usize) -> f32 {
        let Some(first) = self.keys.first() else {
            return 0.0;
        };
        if time < first.time {
            *hint = 0;
            return first.value;
        }

        let index = self.active_key(time, *hint);
        *hint = index;

        let key = &self.keys[index];
        let Some(next) = self.keys.get(index + 1) else {
            return key.value;
        };

        let span = next.time.0 - key.time.0;
        if span <= 0 {
            return key.value;
        }
        let interpolation_time = (time.0 - key.time.0) as f64 / span as f64;

        match key.interpolation {
            KeyInterpolation::Constant => key.value,
            KeyInterpolation::Linear => {
                interpolate_linear_f32(key.value, next.value, interpolation_time)
            }
            KeyInterpolation::Cubic => interpolate_cubic_spline_f32(
                key.value,
                key.right_slope,
                next.value,
                next.left_slope,
                (next.time - key.time).as_seconds(),
                interpolation_time,
            ),
        }
    }

    // greatest index whose key time is <= time, assumes time >= first key
    fn active_key(&self, time: SourceTime, hint: usize) -> usize {
        if hint < self.keys.len() && self.keys[hint].time <= time {
            let mut index = hint;
            while index + 1 < self.keys.len() && self.keys[index + 1].time <= time {
                index += 1;
            }
            index
        } else {
            self.keys
                .partition_point(|key| key.time <= time)
                .saturating_sub(1)
        }
    }
}
