//! Data model shared by the animation import pipeline: time domains, native
//! source curves, produced keyframe curves and clips.

pub mod clip;
pub mod curve;
pub mod error;
pub mod interpolate;
pub mod slot;
pub mod source;
pub mod time;

pub use clip::AnimationClip;
pub use curve::{AnimationCurve, ClipCurve, CurveInterpolation, Keyframe};
pub use error::AwsmAnimationCoreError;
pub use slot::{CurveProperty, CurveSlot, LayerKey, NodeKey};
pub use source::{KeyInterpolation, SourceCurve, SourceKey};
pub use time::{SourceTime, TimeMode, TimeSpan};
