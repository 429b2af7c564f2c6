//! Interpolation helpers:
//! - lerp_f64 / lerp_vec3 (component-wise)
//! - slerp_quat with shortest-arc correction
//! - lerp_time (integer quantized)
//! - threshold_flag / hold_flag for layer visibility

use nalgebra::{UnitQuaternion, Vector3};

/// Quaternions closer than this are treated as identical by [`slerp_quat`].
const SLERP_EPSILON: f64 = 1e-12;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Each coordinate is interpolated independently.
#[inline]
pub fn lerp_vec3(a: &Vector3<f64>, b: &Vector3<f64>, t: f64) -> Vector3<f64> {
    Vector3::new(
        lerp_f64(a.x, b.x, t),
        lerp_f64(a.y, b.y, t),
        lerp_f64(a.z, b.z, t),
    )
}

/// Spherical interpolation along the shortest arc.
/// Falls back to `a` when both orientations are numerically identical.
#[inline]
pub fn slerp_quat(a: &UnitQuaternion<f64>, b: &UnitQuaternion<f64>, t: f64) -> UnitQuaternion<f64> {
    a.try_slerp(b, t, SLERP_EPSILON).unwrap_or(*a)
}

/// Linear interpolation of an integer time index at step `k` of `n`,
/// truncated toward zero. Computed from an exact integer numerator so the
/// endpoints (`k == 0`, `k == n`) reproduce `a` and `b` exactly.
///
/// The numerator is widened to `i128`; the quotient always lies between `a`
/// and `b`, so narrowing back is lossless.
#[inline]
pub fn lerp_time(a: i64, b: i64, k: usize, n: usize) -> i64 {
    if n == 0 {
        return a;
    }
    let (k, n) = (k as i128, n as i128);
    ((i128::from(a) * (n - k) + i128::from(b) * k) / n) as i64
}

#[inline]
fn flag_value(v: bool) -> f64 {
    if v {
        1.0
    } else {
        0.0
    }
}

/// Resample a boolean as a 0/1 ramp and report whether the ramp, centred on
/// zero, is still positive. The flip lands at the segment midpoint; an exact
/// midpoint sample reads as hidden.
///
/// The `- 0.5` is intentional: the ramp is shifted so the `> 0` test crosses
/// at the midpoint. Without it every sample short of the right key would
/// read as visible.
#[inline]
pub fn threshold_flag(a: bool, b: bool, t: f64) -> bool {
    lerp_f64(flag_value(a), flag_value(b), t) - 0.5 > 0.0
}

/// Step semantics: keep the left flag.
#[inline]
pub fn hold_flag(a: bool, _b: bool, _t: f64) -> bool {
    a
}
