use awsm_animation_core::{AnimationClip, AnimationCurve, CurveProperty, CurveSlot, NodeKey};
use glam::{Quat, Vec3};

/// The converted tracks of one node, before they land in a clip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeCurves {
    pub translation: Option<AnimationCurve<Vec3>>,
    pub rotation: Option<AnimationCurve<Quat>>,
    pub scale: Option<AnimationCurve<Vec3>>,
    pub field_of_view: Option<AnimationCurve<f32>>,
    /// Field of view derived from the focal length, wins over `field_of_view`.
    pub focal_length_fov: Option<AnimationCurve<f32>>,
    pub near_plane: Option<AnimationCurve<f32>>,
    pub far_plane: Option<AnimationCurve<f32>>,
}

impl NodeCurves {
    pub fn is_empty(&self) -> bool {
        self.translation.is_none()
            && self.rotation.is_none()
            && self.scale.is_none()
            && self.field_of_view.is_none()
            && self.focal_length_fov.is_none()
            && self.near_plane.is_none()
            && self.far_plane.is_none()
    }

    /// Adds every non-empty track to `clip` and returns how many were added.
    ///
    /// Slots carry `node` when given, for clips that hold several nodes.
    pub fn add_to_clip(self, clip: &mut AnimationClip, node: Option<NodeKey>) -> usize {
        let slot = |property| CurveSlot { property, node };
        let mut added = 0;

        if let Some(curve) = self.translation {
            added += usize::from(clip.add_curve(slot(CurveProperty::Translation), curve));
        }
        if let Some(curve) = self.rotation {
            added += usize::from(clip.add_curve(slot(CurveProperty::Rotation), curve));
        }
        if let Some(curve) = self.scale {
            added += usize::from(clip.add_curve(slot(CurveProperty::Scale), curve));
        }
        if let Some(curve) = self.field_of_view {
            added += usize::from(clip.add_curve(slot(CurveProperty::VerticalFieldOfView), curve));
        }
        if let Some(curve) = self.focal_length_fov {
            added += usize::from(clip.add_curve(slot(CurveProperty::VerticalFieldOfView), curve));
        }
        if let Some(curve) = self.near_plane {
            added += usize::from(clip.add_curve(slot(CurveProperty::NearClipPlane), curve));
        }
        if let Some(curve) = self.far_plane {
            added += usize::from(clip.add_curve(slot(CurveProperty::FarClipPlane), curve));
        }

        added
    }
}
