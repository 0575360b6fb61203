//! Locating the per-axis source curves of a node's properties.

use awsm_animation_core::{LayerKey, NodeKey, SourceCurve};

use crate::{
    config::IncompleteChannelPolicy,
    scene::{ChannelProperty, SceneSource},
};

/// The most channels a single property can have.
pub const MAX_CHANNELS: usize = 4;

/// Source curves of one property, one entry per channel, absent axes as `None`.
#[derive(Debug, Clone, Copy)]
pub struct SourceCurveSet<'a> {
    pub property: ChannelProperty,
    curves: [Option<&'a SourceCurve>; MAX_CHANNELS],
    len: usize,
}

impl<'a> SourceCurveSet<'a> {
    /// Channels past [`MAX_CHANNELS`] are ignored.
    pub fn new(property: ChannelProperty, channels: &[Option<&'a SourceCurve>]) -> Self {
        let len = channels.len().min(MAX_CHANNELS);
        let mut curves = [None; MAX_CHANNELS];
        curves[..len].copy_from_slice(&channels[..len]);
        Self {
            property,
            curves,
            len,
        }
    }

    pub fn curves(&self) -> &[Option<&'a SourceCurve>] {
        &self.curves[..self.len]
    }

    pub fn get(&self, channel: usize) -> Option<&'a SourceCurve> {
        self.curves().get(channel).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn present_count(&self) -> usize {
        self.curves().iter().filter(|curve| curve.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.len > 0 && self.present_count() == self.len
    }

    /// No channel has a curve.
    pub fn is_absent(&self) -> bool {
        self.present_count() == 0
    }
}

pub fn discover<'a, S: SceneSource + ?Sized>(
    scene: &'a S,
    node: NodeKey,
    layer: LayerKey,
    property: ChannelProperty,
) -> SourceCurveSet<'a> {
    let mut curves = [None; MAX_CHANNELS];
    let channels = property.channels();
    for (slot, channel) in curves.iter_mut().zip(channels) {
        *slot = scene.curve(node, layer, *channel);
    }
    SourceCurveSet::new(property, &curves[..channels.len().min(MAX_CHANNELS)])
}

/// Any single axis of translation, rotation or scale has a curve.
pub fn has_animation<S: SceneSource + ?Sized>(scene: &S, node: NodeKey, layer: LayerKey) -> bool {
    ChannelProperty::TRANSFORM
        .into_iter()
        .any(|property| !discover(scene, node, layer, property).is_absent())
}

/// Translation, rotation or scale has all three axes.
pub fn has_complete_transform<S: SceneSource + ?Sized>(
    scene: &S,
    node: NodeKey,
    layer: LayerKey,
) -> bool {
    ChannelProperty::TRANSFORM
        .into_iter()
        .any(|property| discover(scene, node, layer, property).is_complete())
}

/// A camera with a field of view or focal length curve.
pub fn has_camera_animation<S: SceneSource + ?Sized>(
    scene: &S,
    node: NodeKey,
    layer: LayerKey,
) -> bool {
    scene.attribute(node).camera().is_some()
        && [ChannelProperty::FieldOfView, ChannelProperty::FocalLength]
            .into_iter()
            .any(|property| !discover(scene, node, layer, property).is_absent())
}

/// The node would contribute to an animation data check.
pub fn has_animation_data<S: SceneSource + ?Sized>(
    scene: &S,
    node: NodeKey,
    layer: LayerKey,
) -> bool {
    has_complete_transform(scene, node, layer) || has_camera_animation(scene, node, layer)
}

/// The node would produce transform or camera curves under `policy`.
pub fn is_animated<S: SceneSource + ?Sized>(
    scene: &S,
    node: NodeKey,
    layer: LayerKey,
    policy: IncompleteChannelPolicy,
) -> bool {
    let transform = match policy {
        IncompleteChannelPolicy::Skip => has_complete_transform(scene, node, layer),
        IncompleteChannelPolicy::ZeroFill => has_animation(scene, node, layer),
    };
    transform || has_camera_animation(scene, node, layer)
}
