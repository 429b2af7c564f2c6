//! Script and keyframe data model.
//! Viewer-facing values live in value.rs.

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::value::ViewerState;

/// One relative camera/viewer change. Immutable once compiled.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Operation {
    /// Right-composed onto the running orientation.
    Rotate(UnitQuaternion<f64>),
    /// Multiplied onto the running zoom.
    Zoom(f64),
    /// Added to the running camera center.
    Translate(Vector3<f64>),
    /// Sets one layer's visibility flag.
    Visibility { layer: usize, visible: bool },
    /// Added to the running time index.
    TimeShift(i64),
}

impl Operation {
    pub fn channel(&self) -> Channel {
        match self {
            Operation::Rotate(_) => Channel::Rotation,
            Operation::Zoom(_) => Channel::Zoom,
            Operation::Translate(_) => Channel::Translation,
            Operation::Visibility { .. } => Channel::Visibility,
            Operation::TimeShift(_) => Channel::Time,
        }
    }
}

/// The independently interpolated attributes of a viewer state.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Rotation,
    Translation,
    Zoom,
    Visibility,
    Time,
}

impl Channel {
    pub fn name(self) -> &'static str {
        match self {
            Channel::Rotation => "rotation",
            Channel::Translation => "translation",
            Channel::Zoom => "zoom",
            Channel::Visibility => "visibility",
            Channel::Time => "time",
        }
    }
}

/// An operation anchored to an inclusive frame range.
///
/// `start_frame <= end_frame` always holds; `At frame N` statements have
/// both equal to N.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompiledCommand {
    pub start_frame: usize,
    pub end_frame: usize,
    pub operation: Operation,
    /// 1-based script line the operation came from.
    pub line: usize,
}

/// Authored state at one frame. `None` means "interpolate me".
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StateFrame {
    pub frame: usize,
    #[serde(default)]
    pub rotation: Option<UnitQuaternion<f64>>,
    #[serde(default)]
    pub translation: Option<Vector3<f64>>,
    #[serde(default)]
    pub zoom: Option<f64>,
    #[serde(default)]
    pub visibility: Option<Vec<bool>>,
    #[serde(default)]
    pub time: Option<i64>,
}

/// A state frame known to carry at least one authored attribute.
pub type KeyFrame = StateFrame;

impl StateFrame {
    /// A frame with nothing authored.
    pub fn empty(frame: usize) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    /// A frame with every attribute taken from `state`. `time` stays empty
    /// when the viewer has no time axis.
    pub fn from_state(frame: usize, state: &ViewerState) -> Self {
        Self {
            frame,
            rotation: Some(state.camera.rotation),
            translation: Some(state.camera.translation),
            zoom: Some(state.camera.zoom),
            visibility: Some(state.visibility.clone()),
            time: state.time,
        }
    }

    /// True when any attribute is authored.
    pub fn is_key(&self) -> bool {
        self.rotation.is_some()
            || self.translation.is_some()
            || self.zoom.is_some()
            || self.visibility.is_some()
            || self.time.is_some()
    }
}
