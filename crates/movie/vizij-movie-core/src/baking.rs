//! Baking API: expand a keyframe list into a dense, one-entry-per-frame track.

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{MovieConfig, VisibilityMode};
use crate::data::{Channel, KeyFrame};
use crate::error::{MovieError, Result};
use crate::interp::functions::{
    hold_flag, lerp_f64, lerp_time, lerp_vec3, slerp_quat, threshold_flag,
};
use crate::sampling::{ChannelKeys, Segment};
use crate::value::{Camera, ViewerState};

/// Number of intermediate frames inserted between consecutive keyframes.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", content = "steps", rename_all = "snake_case")]
pub enum SegmentSteps {
    /// `next.frame - frame - 1`: one output entry per integer script frame.
    FromFrames,
    /// The same constant for every segment.
    Fixed(usize),
}

impl SegmentSteps {
    /// Intermediate steps for the segment between two keyframe frame indices.
    pub fn steps(&self, left_frame: usize, right_frame: usize) -> usize {
        match *self {
            SegmentSteps::FromFrames => right_frame.saturating_sub(left_frame + 1),
            SegmentSteps::Fixed(n) => n,
        }
    }

    /// Output position of every keyframe. Both segment endpoints appear
    /// exactly once, so position `i+1` is `position i + steps + 1`.
    pub fn layout(&self, keyframes: &[KeyFrame]) -> Vec<usize> {
        let mut positions = Vec::with_capacity(keyframes.len());
        let mut pos = 0usize;
        for (i, kf) in keyframes.iter().enumerate() {
            if i > 0 {
                pos += self.steps(keyframes[i - 1].frame, kf.frame) + 1;
            }
            positions.push(pos);
        }
        positions
    }
}

/// Fully resolved per-frame animation data. Every vector has one entry per
/// output frame; `time` is `None` when no keyframe carries a time index.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DenseTrack {
    pub rotation: Vec<UnitQuaternion<f64>>,
    pub translation: Vec<Vector3<f64>>,
    pub zoom: Vec<f64>,
    pub visibility: Vec<Vec<bool>>,
    pub time: Option<Vec<i64>>,
}

impl DenseTrack {
    pub fn len(&self) -> usize {
        self.zoom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zoom.is_empty()
    }

    /// The resolved viewer state at output frame `index`.
    pub fn frame(&self, index: usize) -> Option<ViewerState> {
        if index >= self.len() {
            return None;
        }
        Some(ViewerState {
            camera: Camera {
                rotation: self.rotation[index],
                zoom: self.zoom[index],
                translation: self.translation[index],
            },
            visibility: self.visibility[index].clone(),
            time: self.time.as_ref().map(|t| t[index]),
        })
    }
}

/// Bake keyframes using the step policy and visibility mode of `cfg`.
pub fn bake_with_config(keyframes: &[KeyFrame], cfg: &MovieConfig) -> Result<DenseTrack> {
    bake_track(keyframes, cfg.segment_steps(), cfg.visibility_mode)
}

/// Expand `keyframes` into a dense track.
///
/// Keyframe frame indices must be strictly increasing. A channel missing from
/// some keyframes is interpolated between the keyframes that do author it.
pub fn bake_track(
    keyframes: &[KeyFrame],
    steps: SegmentSteps,
    visibility_mode: VisibilityMode,
) -> Result<DenseTrack> {
    if keyframes.len() < 2 {
        return Err(MovieError::InsufficientKeyframes {
            found: keyframes.len(),
        });
    }
    for pair in keyframes.windows(2) {
        if pair[1].frame <= pair[0].frame {
            return Err(MovieError::UnorderedKeyframes {
                previous: pair[0].frame,
                frame: pair[1].frame,
            });
        }
    }

    let positions = steps.layout(keyframes);
    let frame_count = positions.last().map_or(0, |p| p + 1);

    let mut rotation = ChannelKeys::new();
    let mut translation = ChannelKeys::new();
    let mut zoom = ChannelKeys::new();
    let mut visibility = ChannelKeys::new();
    let mut time = ChannelKeys::new();
    let mut layers: Option<usize> = None;

    for (kf, &pos) in keyframes.iter().zip(&positions) {
        if let Some(q) = kf.rotation {
            rotation.push(pos, q);
        }
        if let Some(t) = kf.translation {
            translation.push(pos, t);
        }
        if let Some(z) = kf.zoom {
            zoom.push(pos, z);
        }
        if let Some(v) = &kf.visibility {
            match layers {
                Some(expected) if expected != v.len() => {
                    return Err(MovieError::LayerCountMismatch {
                        expected,
                        found: v.len(),
                    })
                }
                _ => layers = Some(v.len()),
            }
            visibility.push(pos, v.clone());
        }
        if let Some(t) = kf.time {
            time.push(pos, t);
        }
    }

    for (keys_empty, channel) in [
        (rotation.is_empty(), Channel::Rotation),
        (translation.is_empty(), Channel::Translation),
        (zoom.is_empty(), Channel::Zoom),
        (visibility.is_empty(), Channel::Visibility),
    ] {
        if keys_empty {
            return Err(MovieError::MissingChannel {
                channel: channel.name(),
            });
        }
    }

    let flag: fn(bool, bool, f64) -> bool = match visibility_mode {
        VisibilityMode::Threshold => threshold_flag,
        VisibilityMode::Hold => hold_flag,
    };

    let mut track = DenseTrack {
        rotation: Vec::with_capacity(frame_count),
        translation: Vec::with_capacity(frame_count),
        zoom: Vec::with_capacity(frame_count),
        visibility: Vec::with_capacity(frame_count),
        time: (!time.is_empty()).then(|| Vec::with_capacity(frame_count)),
    };

    for pos in 0..frame_count {
        track.rotation.push(rotation.sample(
            pos,
            |q| *q,
            |a, b, seg| slerp_quat(a, b, seg.fraction()),
        ));
        track.translation.push(translation.sample(
            pos,
            |v| *v,
            |a, b, seg| lerp_vec3(a, b, seg.fraction()),
        ));
        track
            .zoom
            .push(zoom.sample(pos, |z| *z, |a, b, seg| lerp_f64(*a, *b, seg.fraction())));
        track.visibility.push(visibility.sample(
            pos,
            |v| v.clone(),
            |a, b, seg| {
                let t = seg.fraction();
                a.iter().zip(b).map(|(&x, &y)| flag(x, y, t)).collect()
            },
        ));
        if let Some(out) = track.time.as_mut() {
            out.push(time.sample(
                pos,
                |t| *t,
                |a, b, seg| match seg {
                    Segment::Between { step, width, .. } => lerp_time(*a, *b, step, width),
                    Segment::Key(_) => *a,
                },
            ));
        }
    }

    debug!(
        keyframes = keyframes.len(),
        frames = track.len(),
        timed = track.time.is_some(),
        "baked dense track"
    );
    Ok(track)
}

/// Export a track as serde_json::Value: one object per output frame.
pub fn export_track_json(track: &DenseTrack) -> serde_json::Value {
    let frames: Vec<serde_json::Value> = (0..track.len())
        .map(|i| {
            let q = track.rotation[i].coords;
            let t = track.translation[i];
            serde_json::json!({
                "frame": i,
                "rotation": [q.x, q.y, q.z, q.w],
                "zoom": track.zoom[i],
                "translation": [t.x, t.y, t.z],
                "visibility": track.visibility[i],
                "time": track.time.as_ref().map(|times| times[i]),
            })
        })
        .collect();
    serde_json::Value::Array(frames)
}
