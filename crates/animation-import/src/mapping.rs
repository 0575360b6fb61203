//! Node naming and coordinate space adjustment.

use awsm_animation_core::NodeKey;
use glam::{Mat3, Mat4, Vec3};
use slotmap::SecondaryMap;

/// Supplies the display name and the coordinate adjust of every node.
pub trait SceneMapping {
    /// Stable name used to key per-node clips and curve display names.
    fn node_name(&self, node: NodeKey) -> String;

    /// Matrix taking values from the source coordinate space to the engine's.
    fn coordinate_adjust(&self, node: NodeKey) -> Mat4;
}

/// One adjust matrix for every node and names from a lookup table.
#[derive(Debug, Clone, Default)]
pub struct UniformSceneMapping {
    names: SecondaryMap<NodeKey, String>,
    adjust: Mat4,
}

impl UniformSceneMapping {
    pub fn new(adjust: Mat4) -> Self {
        Self {
            names: SecondaryMap::new(),
            adjust,
        }
    }

    pub fn with_name(mut self, node: NodeKey, name: impl Into<String>) -> Self {
        self.names.insert(node, name.into());
        self
    }
}

impl SceneMapping for UniformSceneMapping {
    fn node_name(&self, node: NodeKey) -> String {
        match self.names.get(node) {
            Some(name) => name.clone(),
            None => format!("{node:?}"),
        }
    }

    fn coordinate_adjust(&self, _node: NodeKey) -> Mat4 {
        self.adjust
    }
}

/// A coordinate adjust split into the full matrix and its rotational part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateAdjust {
    pub matrix: Mat4,
    /// Upper 3x3 with unit length columns. Reflections are kept.
    pub rotation: Mat3,
}

impl Default for CoordinateAdjust {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CoordinateAdjust {
    pub const IDENTITY: Self = Self {
        matrix: Mat4::IDENTITY,
        rotation: Mat3::IDENTITY,
    };

    pub fn from_matrix(matrix: Mat4) -> Self {
        let rotation = Mat3::from_mat4(matrix);
        Self {
            matrix,
            rotation: Mat3::from_cols(
                rotation.x_axis.normalize_or_zero(),
                rotation.y_axis.normalize_or_zero(),
                rotation.z_axis.normalize_or_zero(),
            ),
        }
    }

    /// Negates Z, switching handedness.
    pub fn flip_z() -> Self {
        Self::from_matrix(Mat4::from_scale(Vec3::new(1.0, 1.0, -1.0)))
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn names_fall_back_to_the_key() {
        let mut nodes: SlotMap<NodeKey, ()> = SlotMap::with_key();
        let named = nodes.insert(());
        let unnamed = nodes.insert(());
        let mapping = UniformSceneMapping::default().with_name(named, "Hips");
        assert_eq!(mapping.node_name(named), "Hips");
        assert_eq!(mapping.node_name(unnamed), format!("{unnamed:?}"));
    }

    #[test]
    fn rotation_part_drops_scale_and_translation() {
        let matrix = Mat4::from_scale_rotation_translation(
            Vec3::splat(100.0),
            glam::Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let adjust = CoordinateAdjust::from_matrix(matrix);
        let expected = Mat3::from_rotation_y(std::f32::consts::FRAC_PI_2);
        assert!(adjust.rotation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn flip_keeps_reflection() {
        let adjust = CoordinateAdjust::flip_z();
        assert_eq!(adjust.rotation.z_axis, Vec3::new(0.0, 0.0, -1.0));
        assert!(adjust.rotation.determinant() < 0.0);
    }
}
