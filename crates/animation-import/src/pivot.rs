//! Folding pivots, offsets and extra rotations into the sampled animation.
//!
//! Before sampling, every node gets a destination pivot set that keeps only
//! what the runtime transform can express. The scene then bakes its animation
//! against that set. [`PivotBake`] holds the scene for as long as the bake is
//! applied and puts everything back when dropped.

use std::ops::Deref;

use awsm_animation_core::NodeKey;
use glam::{EulerRot, Quat, Vec3};

use crate::{
    node_table::NodeTable,
    scene::{LightKind, NodeAttribute, PivotConfig, PivotSet, PivotState, SceneSource},
};

/// Cameras look down X in the source space, this turns them to look down -Z.
pub const CAMERA_POST_ROTATION: Vec3 = Vec3::new(0.0, 90.0, 0.0);
/// Lights point down X in the source space, this turns them to point down -Y.
pub const LIGHT_POST_ROTATION: Vec3 = Vec3::new(90.0, 0.0, 0.0);

/// XYZ Euler angles in degrees, X applied first.
pub fn euler_degrees_to_quat(degrees: Vec3) -> Quat {
    let radians = degrees * (std::f32::consts::PI / 180.0);
    Quat::from_euler(EulerRot::ZYX, radians.z, radians.y, radians.x)
}

pub fn quat_to_euler_degrees(rotation: Quat) -> Vec3 {
    let (z, y, x) = rotation.to_euler(EulerRot::ZYX);
    Vec3::new(x, y, z) * (180.0 / std::f32::consts::PI)
}

/// Both pivot sets and the rotation flag a node should have while baking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotPlan {
    pub source: PivotConfig,
    pub destination: PivotConfig,
    pub rotation_active: bool,
}

pub fn plan_pivots(
    attribute: NodeAttribute,
    has_target: bool,
    rotation_active: bool,
    mut source: PivotConfig,
) -> PivotPlan {
    let mut rotation_active = rotation_active;
    source.state = PivotState::Active;

    let mut destination = PivotConfig {
        state: PivotState::Active,
        rotation_order: source.rotation_order,
        ..PivotConfig::default()
    };

    let compensation = match attribute {
        NodeAttribute::Camera(_) if !has_target => Some(CAMERA_POST_ROTATION),
        NodeAttribute::Light(_) if !has_target => Some(LIGHT_POST_ROTATION),
        _ => None,
    };
    if let Some(compensation) = compensation {
        let post_rotation =
            euler_degrees_to_quat(source.post_rotation) * euler_degrees_to_quat(compensation);
        source.post_rotation = quat_to_euler_degrees(post_rotation);
        rotation_active = true;
    }

    // point lights have no direction, with or without a target
    if attribute == NodeAttribute::Light(LightKind::Point) {
        source.post_rotation = Vec3::ZERO;
    }

    if attribute.is_joint_like() {
        if rotation_active {
            destination.pre_rotation = source.pre_rotation;
        }
    } else {
        destination.rotation_pivot = source.rotation_pivot;
        destination.scaling_pivot = source.scaling_pivot;
        destination.rotation_offset = source.rotation_offset;
        destination.scaling_offset = source.scaling_offset;
    }

    PivotPlan {
        source,
        destination,
        rotation_active,
    }
}

#[derive(Debug, Clone, Copy)]
struct SavedPivot {
    node: NodeKey,
    source: PivotConfig,
    destination: PivotConfig,
    rotation_active: bool,
}

/// Exclusive hold on a scene whose animation is baked into destination pivots.
///
/// Dropping the guard reverts the bake and restores every pivot set it touched,
/// on early returns and unwinding alike.
pub struct PivotBake<'a, S: SceneSource + ?Sized> {
    scene: &'a mut S,
    saved: Vec<SavedPivot>,
}

impl<'a, S: SceneSource + ?Sized> PivotBake<'a, S> {
    pub fn begin(scene: &'a mut S, nodes: &NodeTable, stack: usize, frame_rate: f64) -> Self {
        let mut saved = Vec::with_capacity(nodes.len());

        for node in nodes.keys() {
            let source = scene.pivot(node, PivotSet::Source);
            let rotation_active = scene.rotation_active(node);
            saved.push(SavedPivot {
                node,
                source,
                destination: scene.pivot(node, PivotSet::Destination),
                rotation_active,
            });

            let plan = plan_pivots(
                scene.attribute(node),
                scene.has_target(node),
                rotation_active,
                source,
            );
            scene.set_pivot_config(node, PivotSet::Source, plan.source);
            scene.set_pivot_config(node, PivotSet::Destination, plan.destination);
            scene.set_rotation_active(node, plan.rotation_active);
        }

        scene.bake_pivot_animation(stack, frame_rate);
        tracing::debug!("baked pivots of {} nodes at {frame_rate} fps", saved.len());

        Self { scene, saved }
    }
}

impl<S: SceneSource + ?Sized> Deref for PivotBake<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.scene
    }
}

impl<S: SceneSource + ?Sized> Drop for PivotBake<'_, S> {
    fn drop(&mut self) {
        self.scene.revert_pivot_animation();
        for saved in self.saved.iter().rev() {
            self.scene
                .set_pivot_config(saved.node, PivotSet::Source, saved.source);
            self.scene
                .set_pivot_config(saved.node, PivotSet::Destination, saved.destination);
            self.scene
                .set_rotation_active(saved.node, saved.rotation_active);
        }
        tracing::debug!("reverted pivot bake");
    }
}
