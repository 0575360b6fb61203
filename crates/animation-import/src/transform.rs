//! Unit and coordinate space conversion of resampled tracks.

use std::ops::MulAssign;

use awsm_animation_core::AnimationCurve;
use glam::{EulerRot, Mat3, Quat, Vec3};

use crate::{
    config::{AngleUnit, ScaleConversion},
    mapping::CoordinateAdjust,
};

pub fn degrees_to_radians<T: Copy + MulAssign<f32>>(curve: &mut AnimationCurve<T>) {
    curve.map_values(|value| *value *= std::f32::consts::PI / 180.0);
}

/// XYZ Euler angles in radians, X applied first, re-expressed in the adjusted
/// space as `A * R * A^T`.
pub fn euler_to_quat(euler: Vec3, adjust: &CoordinateAdjust) -> Quat {
    let rotation = Mat3::from_euler(EulerRot::ZYX, euler.z, euler.y, euler.x);
    let adjusted = adjust.rotation * rotation * adjust.rotation.transpose();
    Quat::from_mat3(&adjusted).normalize()
}

/// Times and interpolation are kept, one quaternion per Euler sample.
pub fn rotation_to_quat(curve: AnimationCurve<Vec3>, adjust: &CoordinateAdjust) -> AnimationCurve<Quat> {
    curve.map(|euler| euler_to_quat(euler, adjust))
}

pub fn convert_translation(curve: &mut AnimationCurve<Vec3>, adjust: &CoordinateAdjust) {
    curve.map_values(|position| *position = adjust.matrix.transform_point3(*position));
}

pub fn convert_scale(
    curve: &mut AnimationCurve<Vec3>,
    adjust: &CoordinateAdjust,
    conversion: ScaleConversion,
) {
    match conversion {
        ScaleConversion::RotationOnly => {
            curve.map_values(|scale| *scale = adjust.rotation * *scale);
        }
        ScaleConversion::None => {}
    }
}

/// Vertical field of view, in radians, of a lens over a film of the given height.
pub fn vertical_fov(film_height: f32, focal_length: f32) -> f32 {
    2.0 * (film_height / (2.0 * focal_length)).atan()
}

pub fn focal_length_to_fov(curve: &mut AnimationCurve<f32>, film_height: f32, unit: AngleUnit) {
    curve.map_values(|value| {
        let fov = vertical_fov(film_height, *value);
        *value = match unit {
            AngleUnit::Radians => fov,
            AngleUnit::Degrees => fov.to_degrees(),
        };
    });
}
