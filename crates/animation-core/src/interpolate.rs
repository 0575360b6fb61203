//! Scalar interpolation between two source keys.

/// Blends in f64 so long segments keep their precision.
pub fn interpolate_linear_f32(from: f32, to: f32, interpolation_time: f64) -> f32 {
    let (from, to) = (f64::from(from), f64::from(to));
    (from + (to - from) * interpolation_time) as f32
}

/// Hermite segment between two keys.
/// Tangents are slopes (value per second), `delta_time` is the segment length in seconds.
pub fn interpolate_cubic_spline_f32(
    first_value: f32,
    first_tangent: f32,
    second_value: f32,
    second_tangent: f32,
    delta_time: f64,
    interpolation_time: f64,
) -> f32 {
    let delta_time = delta_time as f32;
    let interpolation_time = interpolation_time as f32;

    let t2 = interpolation_time * interpolation_time;
    let t3 = t2 * interpolation_time;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + interpolation_time;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    (h00 * first_value)
        + (h10 * first_tangent * delta_time)
        + (h01 * second_value)
        + (h11 * second_tangent * delta_time)
}
