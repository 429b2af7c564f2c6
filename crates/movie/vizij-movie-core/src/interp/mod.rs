//! Interpolation helpers shared by the track baker.
//!
//! Orientation uses spherical interpolation, zoom and translation linear
//! interpolation, visibility a thresholded or held 0/1 ramp and time a
//! truncated linear ramp.

pub mod functions;

pub use functions::{hold_flag, lerp_f64, lerp_time, lerp_vec3, slerp_quat, threshold_flag};
