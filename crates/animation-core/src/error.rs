//! Core animation error types and results.

use thiserror::Error;

use crate::time::{SourceTime, TimeSpan};

/// Core animation result type.
pub type Result<T> = std::result::Result<T, AwsmAnimationCoreError>;

/// Errors raised while building curves, clips and time values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AwsmAnimationCoreError {
    #[error("[animation] source keys must be ordered by time, key {index} at {time:?} comes before its predecessor")]
    UnorderedKeys { index: usize, time: SourceTime },

    #[error("[animation] keyframe at {time:?} is earlier than the last keyframe at {last:?}")]
    UnorderedKeyframe { time: TimeSpan, last: TimeSpan },

    #[error("[animation] invalid frame rate {0}")]
    InvalidFrameRate(f64),
}
