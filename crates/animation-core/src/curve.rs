use glam::{Quat, Vec3};

use crate::{
    error::{AwsmAnimationCoreError, Result},
    time::TimeSpan,
};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframe<T> {
    pub time: TimeSpan,
    pub value: T,
}

impl<T> Keyframe<T> {
    pub fn new(time: TimeSpan, value: T) -> Self {
        Self { time, value }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Keyframe<U> {
        Keyframe {
            time: self.time,
            value: f(self.value),
        }
    }
}

/// How the runtime interpolates between produced keyframes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveInterpolation {
    #[default]
    Linear,
    /// Implicit tangents derived from neighbouring keys.
    Cubic,
}

/// Keyframes with non-decreasing times.
///
/// Two consecutive keyframes sharing a time mark an instantaneous step:
/// the first closes the previous segment, the second opens the next one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationCurve<T> {
    pub interpolation: CurveInterpolation,
    keyframes: Vec<Keyframe<T>>,
}

impl<T> Default for AnimationCurve<T> {
    fn default() -> Self {
        Self {
            interpolation: CurveInterpolation::default(),
            keyframes: Vec::new(),
        }
    }
}

impl<T> AnimationCurve<T> {
    pub fn new(interpolation: CurveInterpolation) -> Self {
        Self {
            interpolation,
            keyframes: Vec::new(),
        }
    }

    pub fn from_keyframes(
        interpolation: CurveInterpolation,
        keyframes: Vec<Keyframe<T>>,
    ) -> Result<Self> {
        let mut curve = Self::new(interpolation);
        curve.keyframes.reserve(keyframes.len());
        for keyframe in keyframes {
            curve.push(keyframe)?;
        }
        Ok(curve)
    }

    pub fn with_interpolation(mut self, interpolation: CurveInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn push(&mut self, keyframe: Keyframe<T>) -> Result<()> {
        if let Some(last) = self.keyframes.last() {
            if keyframe.time < last.time {
                return Err(AwsmAnimationCoreError::UnorderedKeyframe {
                    time: keyframe.time,
                    last: last.time,
                });
            }
        }
        self.keyframes.push(keyframe);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Keyframe<T>> {
        self.keyframes.pop()
    }

    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn start_time(&self) -> Option<TimeSpan> {
        self.keyframes.first().map(|keyframe| keyframe.time)
    }

    pub fn end_time(&self) -> Option<TimeSpan> {
        self.keyframes.last().map(|keyframe| keyframe.time)
    }

    /// Transforms every value in place, times are untouched.
    pub fn map_values(&mut self, mut f: impl FnMut(&mut T)) {
        for keyframe in &mut self.keyframes {
            f(&mut keyframe.value);
        }
    }

    /// Converts to another value type, keeping times 1:1.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> AnimationCurve<U> {
        AnimationCurve {
            interpolation: self.interpolation,
            keyframes: self
                .keyframes
                .into_iter()
                .map(|keyframe| keyframe.map(&mut f))
                .collect(),
        }
    }
}

/// A produced curve of any supported value type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClipCurve {
    Float(AnimationCurve<f32>),
    Vec3(AnimationCurve<Vec3>),
    Quat(AnimationCurve<Quat>),
}

impl ClipCurve {
    pub fn len(&self) -> usize {
        match self {
            Self::Float(curve) => curve.len(),
            Self::Vec3(curve) => curve.len(),
            Self::Quat(curve) => curve.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn end_time(&self) -> Option<TimeSpan> {
        match self {
            Self::Float(curve) => curve.end_time(),
            Self::Vec3(curve) => curve.end_time(),
            Self::Quat(curve) => curve.end_time(),
        }
    }

    pub fn as_float(&self) -> Option<&AnimationCurve<f32>> {
        match self {
            Self::Float(curve) => Some(curve),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<&AnimationCurve<Vec3>> {
        match self {
            Self::Vec3(curve) => Some(curve),
            _ => None,
        }
    }

    pub fn as_quat(&self) -> Option<&AnimationCurve<Quat>> {
        match self {
            Self::Quat(curve) => Some(curve),
            _ => None,
        }
    }
}

impl From<AnimationCurve<f32>> for ClipCurve {
    fn from(curve: AnimationCurve<f32>) -> Self {
        Self::Float(curve)
    }
}

impl From<AnimationCurve<Vec3>> for ClipCurve {
    fn from(curve: AnimationCurve<Vec3>) -> Self {
        Self::Vec3(curve)
    }
}

impl From<AnimationCurve<Quat>> for ClipCurve {
    fn from(curve: AnimationCurve<Quat>) -> Self {
        Self::Quat(curve)
    }
}
