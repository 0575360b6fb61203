//! Import error types and results.

use awsm_animation_core::{AwsmAnimationCoreError, NodeKey};
use thiserror::Error;

/// Import result type.
pub type Result<T> = std::result::Result<T, AnimationImportError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationImportError {
    #[error("[animation-import] {0}")]
    Core(#[from] AwsmAnimationCoreError),

    #[error("[animation-import] a scene mapping is required to convert animation")]
    MissingSceneMapping,

    #[error("[animation-import] unknown node {0:?}")]
    UnknownNode(NodeKey),

    #[error("[animation-import] node {0:?} is reachable twice, the hierarchy is not a tree")]
    CyclicHierarchy(NodeKey),

    #[error("[animation-import] no animation stack at index {0}")]
    MissingStack(usize),
}
