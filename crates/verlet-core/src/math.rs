use glam::{Quat, Vec3};
use rand::Rng;

/// Reflect `v` about the plane whose normal is `n`: `v - 2 * dot(v, n) * n`.
///
/// `n` is expected to be unit length; no normalization is performed here.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - n * (2.0 * v.dot(n))
}

/// Normalize `v`, falling back to `+Y` when the result would not be finite
/// (zero-length or already non-finite input).
#[inline]
pub fn direction_or_up(v: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(Vec3::Y)
}

/// Uniform interpolation between `min` and `max` along a single random scalar.
///
/// All three axes share the same `t`, so the result lies on the segment
/// between the two corners rather than anywhere in the box.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: Vec3, max: Vec3) -> Vec3 {
    let t: f32 = rng.gen();
    min + (max - min) * t
}

/// Uniform random point inside the axis-aligned box `[min, max]`, sampled per axis.
pub fn random_in_box<R: Rng + ?Sized>(rng: &mut R, min: Vec3, max: Vec3) -> Vec3 {
    Vec3::new(
        lerp(min.x, max.x, rng.gen()),
        lerp(min.y, max.y, rng.gen()),
        lerp(min.z, max.z, rng.gen()),
    )
}

/// Random scalar in `[min, max)`; returns `min` when the range is empty.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Rotate `point` around the axis through `pivot` by `angle` radians.
///
/// A zero-length axis leaves the point unchanged.
pub fn rotate_about(point: Vec3, pivot: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    match axis.try_normalize() {
        Some(axis) => pivot + Quat::from_axis_angle(axis, angle) * (point - pivot),
        None => point,
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
