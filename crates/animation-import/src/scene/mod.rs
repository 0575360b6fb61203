//! The scene graph seam.
//!
//! Parsing an asset is someone else's job. The converter only needs the
//! hierarchy, node attributes, per-axis source curves and the pivot
//! configuration, which [`SceneSource`] exposes. [`MemoryScene`] is an arena
//! backed implementation for already decoded data.

pub mod memory;

use awsm_animation_core::{LayerKey, NodeKey, SourceCurve, TimeMode};
use glam::Vec3;

pub use memory::MemoryScene;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Source property that carries one or more per-axis curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelProperty {
    Translation,
    /// Euler angles in degrees.
    Rotation,
    Scaling,
    /// Vertical field of view in degrees.
    FieldOfView,
    FocalLength,
    NearPlane,
    FarPlane,
}

impl ChannelProperty {
    pub const TRANSFORM: [Self; 3] = [Self::Translation, Self::Rotation, Self::Scaling];

    /// The channels of this property, in resampler order.
    pub fn channels(self) -> &'static [Channel] {
        match self {
            Self::Translation => &TRANSLATION_CHANNELS,
            Self::Rotation => &ROTATION_CHANNELS,
            Self::Scaling => &SCALING_CHANNELS,
            Self::FieldOfView => &FIELD_OF_VIEW_CHANNELS,
            Self::FocalLength => &FOCAL_LENGTH_CHANNELS,
            Self::NearPlane => &NEAR_PLANE_CHANNELS,
            Self::FarPlane => &FAR_PLANE_CHANNELS,
        }
    }
}

static TRANSLATION_CHANNELS: [Channel; 3] = Channel::xyz(ChannelProperty::Translation);
static ROTATION_CHANNELS: [Channel; 3] = Channel::xyz(ChannelProperty::Rotation);
static SCALING_CHANNELS: [Channel; 3] = Channel::xyz(ChannelProperty::Scaling);
static FIELD_OF_VIEW_CHANNELS: [Channel; 1] = [Channel::scalar(ChannelProperty::FieldOfView)];
static FOCAL_LENGTH_CHANNELS: [Channel; 1] = [Channel::scalar(ChannelProperty::FocalLength)];
static NEAR_PLANE_CHANNELS: [Channel; 1] = [Channel::scalar(ChannelProperty::NearPlane)];
static FAR_PLANE_CHANNELS: [Channel; 1] = [Channel::scalar(ChannelProperty::FarPlane)];

/// One animatable scalar of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    pub property: ChannelProperty,
    pub axis: Option<Axis>,
}

impl Channel {
    pub const fn axis(property: ChannelProperty, axis: Axis) -> Self {
        Self {
            property,
            axis: Some(axis),
        }
    }

    pub const fn scalar(property: ChannelProperty) -> Self {
        Self {
            property,
            axis: None,
        }
    }

    const fn xyz(property: ChannelProperty) -> [Self; 3] {
        [
            Self::axis(property, Axis::X),
            Self::axis(property, Axis::Y),
            Self::axis(property, Axis::Z),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkerKind {
    Standard,
    Optical,
    EffectorFk,
    EffectorIk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LightKind {
    Point,
    Directional,
    Spot,
    Area,
    Volume,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraAttribute {
    /// Aperture height, in the same unit as the focal length.
    pub film_height: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeAttribute {
    #[default]
    Null,
    Mesh,
    Skeleton,
    Marker(MarkerKind),
    Camera(CameraAttribute),
    Light(LightKind),
}

impl NodeAttribute {
    /// Joints and IK/FK effectors keep their pre-rotation and lose their pivots.
    pub fn is_joint_like(&self) -> bool {
        matches!(
            self,
            Self::Skeleton | Self::Marker(MarkerKind::EffectorFk | MarkerKind::EffectorIk)
        )
    }

    pub fn camera(&self) -> Option<&CameraAttribute> {
        match self {
            Self::Camera(camera) => Some(camera),
            _ => None,
        }
    }
}

/// Each node carries two pivot configurations: the authored one and the one
/// animation gets baked into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PivotSet {
    Source,
    Destination,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PivotState {
    Active,
    #[default]
    Reference,
}

/// Euler order, named by the order the rotations are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationOrder {
    #[default]
    EulerXyz,
    EulerXzy,
    EulerYzx,
    EulerYxz,
    EulerZxy,
    EulerZyx,
}

/// Pivot, offset and extra rotation configuration of one pivot set.
///
/// Rotations are Euler angles in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PivotConfig {
    pub state: PivotState,
    pub rotation_order: RotationOrder,
    pub pre_rotation: Vec3,
    pub post_rotation: Vec3,
    pub rotation_pivot: Vec3,
    pub scaling_pivot: Vec3,
    pub rotation_offset: Vec3,
    pub scaling_offset: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationStack {
    pub name: String,
    pub layers: Vec<LayerKey>,
}

impl AnimationStack {
    pub fn first_layer(&self) -> Option<LayerKey> {
        self.layers.first().copied()
    }
}

/// Read access to a decoded scene, plus the pivot mutators the converter
/// brackets around sampling.
///
/// Accessors given a node the scene does not know return the neutral value
/// (no children, no attribute, no curve, default pivot).
pub trait SceneSource {
    fn root(&self) -> NodeKey;

    /// `None` when the node is unknown.
    fn children(&self, node: NodeKey) -> Option<&[NodeKey]>;

    fn attribute(&self, node: NodeKey) -> NodeAttribute;

    /// Whether the node orients itself toward a look-at target.
    fn has_target(&self, node: NodeKey) -> bool;

    fn curve(&self, node: NodeKey, layer: LayerKey, channel: Channel) -> Option<&SourceCurve>;

    fn animation_stacks(&self) -> &[AnimationStack];

    fn time_mode(&self) -> TimeMode;

    /// Name of the application that authored the document.
    fn application_name(&self) -> Option<&str> {
        None
    }

    fn pivot(&self, node: NodeKey, set: PivotSet) -> PivotConfig;

    fn set_pivot_config(&mut self, node: NodeKey, set: PivotSet, config: PivotConfig);

    fn rotation_active(&self, node: NodeKey) -> bool;

    fn set_rotation_active(&mut self, node: NodeKey, active: bool);

    /// Re-expresses the animation of the given stack against the destination
    /// pivots, sampled at `frame_rate`.
    fn bake_pivot_animation(&mut self, stack: usize, frame_rate: f64);

    /// Undoes the last [`SceneSource::bake_pivot_animation`].
    fn revert_pivot_animation(&mut self);
}
