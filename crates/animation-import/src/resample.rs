//! Merging per-axis source curves into one fixed rate track.
//!
//! Every channel is sampled at the same frame times, from the earliest first
//! key to the latest last key of the group. The last step is clamped so the
//! track ends exactly on the last key.
//!
//! Stepped keys need care: sampling alone would smear a step over one frame.
//! When a channel leaves a constant segment the merged keyframe is emitted
//! twice at the same time, first holding the values before the step, then
//! with the new values.

use awsm_animation_core::{AnimationCurve, Keyframe, SourceCurve, SourceTime, TimeMode, TimeSpan};
use glam::{Vec3, Vec4};

use crate::{
    config::IncompleteChannelPolicy,
    discovery::{SourceCurveSet, MAX_CHANNELS},
    error::Result,
};

/// A value assembled from up to [`MAX_CHANNELS`] resampled channels.
pub trait SampledValue: Copy {
    const CHANNELS: usize;

    fn from_channels(values: [f32; MAX_CHANNELS]) -> Self;
}

impl SampledValue for f32 {
    const CHANNELS: usize = 1;

    fn from_channels(values: [f32; MAX_CHANNELS]) -> Self {
        values[0]
    }
}

impl SampledValue for Vec3 {
    const CHANNELS: usize = 3;

    fn from_channels(values: [f32; MAX_CHANNELS]) -> Self {
        Vec3::new(values[0], values[1], values[2])
    }
}

impl SampledValue for Vec4 {
    const CHANNELS: usize = 4;

    fn from_channels(values: [f32; MAX_CHANNELS]) -> Self {
        Vec4::from_array(values)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ChannelState {
    /// Greatest key at or before the current sample.
    key: Option<usize>,
    /// The segment starting at `key` is constant.
    constant: bool,
    hint: usize,
    value: f32,
}

impl ChannelState {
    /// Moves past every key reached by `time`, returns whether one of them
    /// ended a constant segment.
    fn advance(&mut self, curve: &SourceCurve, time: SourceTime) -> bool {
        let keys = curve.keys();
        let mut left_constant = false;
        loop {
            let next = self.key.map_or(0, |key| key + 1);
            match keys.get(next) {
                Some(key) if key.time <= time => {
                    left_constant |= self.constant;
                    self.constant = key.is_constant();
                    self.key = Some(next);
                }
                _ => return left_constant,
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Resampler {
    one_frame: SourceTime,
    policy: IncompleteChannelPolicy,
}

impl Resampler {
    pub fn new(time_mode: TimeMode, policy: IncompleteChannelPolicy) -> Self {
        Self {
            one_frame: time_mode.one_frame(),
            policy,
        }
    }

    pub fn one_frame(&self) -> SourceTime {
        self.one_frame
    }

    /// Samples the channel group into a single track.
    ///
    /// `None` when no channel has keys, or when the group is incomplete and
    /// the policy says to skip it.
    pub fn resample<T: SampledValue>(
        &self,
        curves: &SourceCurveSet,
    ) -> Result<Option<AnimationCurve<T>>> {
        let mut channels: [Option<&SourceCurve>; MAX_CHANNELS] = [None; MAX_CHANNELS];
        for (index, channel) in channels.iter_mut().enumerate().take(T::CHANNELS) {
            *channel = curves.get(index);
        }
        let channels = &channels[..T::CHANNELS.min(MAX_CHANNELS)];

        let present = channels.iter().flatten().count();
        if present == 0 {
            return Ok(None);
        }
        if present < channels.len() {
            match self.policy {
                IncompleteChannelPolicy::Skip => {
                    tracing::warn!(
                        "{} has {present} of {} channels, skipping",
                        curves.property,
                        channels.len()
                    );
                    return Ok(None);
                }
                IncompleteChannelPolicy::ZeroFill => {
                    tracing::debug!(
                        "{} has {present} of {} channels, filling with zero",
                        curves.property,
                        channels.len()
                    );
                }
            }
        }

        let Some((start, end)) = channels
            .iter()
            .flatten()
            .filter_map(|curve| curve.time_interval())
            .reduce(|(start, end), (first, last)| (start.min(first), end.max(last)))
        else {
            return Ok(None);
        };

        let mut states = [ChannelState::default(); MAX_CHANNELS];
        let mut track: AnimationCurve<T> = AnimationCurve::default();
        let mut time = start;
        // output stamp of the previous sample and whether it was a step
        let mut previous: Option<(TimeSpan, bool)> = None;

        loop {
            let last = time >= end;
            if last {
                time = end;
            }
            let stamp = time.to_time_span();

            // a clamped end closer than one output tick replaces the previous
            // sample, keeping its hold keyframe if it had one
            let mut held = false;
            if let Some((previous_stamp, previous_step)) = previous {
                if previous_stamp == stamp {
                    track.pop();
                    held = previous_step;
                }
            }

            let mut crossed = [false; MAX_CHANNELS];
            for (index, curve) in channels.iter().enumerate() {
                let state = &mut states[index];
                match curve {
                    Some(curve) => {
                        crossed[index] = state.advance(curve, time);
                        if !crossed[index] {
                            state.value = curve.evaluate(time, &mut state.hint);
                        }
                    }
                    None => state.value = 0.0,
                }
            }

            let step = crossed.contains(&true);
            if step {
                if !held {
                    track.push(Keyframe::new(stamp, Self::merge::<T>(&states)))?;
                }
                for (index, curve) in channels.iter().enumerate() {
                    if let (true, Some(curve)) = (crossed[index], curve) {
                        let state = &mut states[index];
                        state.value = curve.evaluate(time, &mut state.hint);
                    }
                }
            }
            track.push(Keyframe::new(stamp, Self::merge::<T>(&states)))?;
            previous = Some((stamp, step || held));

            if last {
                break;
            }
            time += self.one_frame;
        }

        Ok(Some(track))
    }

    fn merge<T: SampledValue>(states: &[ChannelState; MAX_CHANNELS]) -> T {
        T::from_channels(states.map(|state| state.value))
    }
}

#[cfg(test)]
mod tests;
