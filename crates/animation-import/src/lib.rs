//! Resamples keyed scene animation into engine ready clips.
//!
//! The scene provides per-axis curves with mixed interpolation. The
//! converter bakes pivots, merges the axes of each property into fixed rate
//! tracks that keep stepped keys sharp, converts rotations to quaternions in
//! the engine's coordinate space and collects the tracks into clips.

pub mod assemble;
pub mod config;
pub mod converter;
pub mod discovery;
pub mod error;
pub mod mapping;
pub mod node_table;
pub mod pivot;
pub mod resample;
pub mod scene;
pub mod transform;

pub use awsm_animation_core as core;

pub use config::{AngleUnit, ConversionConfig, IncompleteChannelPolicy, ScaleConversion};
pub use converter::{AnimationConverter, AnimationConverterBuilder};
pub use error::{AnimationImportError, Result};
pub use mapping::{CoordinateAdjust, SceneMapping, UniformSceneMapping};
pub use scene::{MemoryScene, SceneSource};
