//! Viewer-facing value types: camera pose, full viewer state and rotation helpers.

use nalgebra::{Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Camera orientation, zoom and center as the viewer reports them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Camera {
    /// Quaternion, serialized as (x, y, z, w).
    pub rotation: UnitQuaternion<f64>,
    /// Multiplicative zoom (scale factor).
    pub zoom: f64,
    /// Camera center.
    pub translation: Vector3<f64>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
            zoom: 1.0,
            translation: Vector3::zeros(),
        }
    }
}

/// A fully specified viewer state: camera, per-layer visibility and, when the
/// viewer exposes a time axis, the current time index.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ViewerState {
    pub camera: Camera,
    pub visibility: Vec<bool>,
    #[serde(default)]
    pub time: Option<i64>,
}

/// The single read of the live viewer that seeds frame 0 of a script.
pub type ViewerSnapshot = ViewerState;

impl ViewerState {
    #[inline]
    pub fn layer_count(&self) -> usize {
        self.visibility.len()
    }

    #[inline]
    pub fn has_time_axis(&self) -> bool {
        self.time.is_some()
    }
}

/// Unit quaternion for a rotation of `angle_deg` degrees around `axis`.
///
/// The axis is normalized; `None` when it has zero length.
pub fn rotation_from_axis_angle(angle_deg: f64, axis: [f64; 3]) -> Option<UnitQuaternion<f64>> {
    let axis = Unit::try_new(Vector3::from(axis), f64::EPSILON)?;
    Some(UnitQuaternion::from_axis_angle(&axis, angle_deg.to_radians()))
}
