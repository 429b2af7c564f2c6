//! Configuration for track baking.

use serde::{Deserialize, Serialize};

use crate::baking::SegmentSteps;

/// How many intermediate frames separate consecutive keyframes.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepPolicy {
    /// Use the gap between keyframe frame indices (script path).
    #[default]
    FromFrames,
    /// Every segment gets `MovieConfig::inter_steps` frames (interactive capture).
    Fixed,
}

/// How boolean layer visibility is resolved between keyframes.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityMode {
    /// Resample 0/1 linearly and flip where the centred ramp crosses zero.
    #[default]
    Threshold,
    /// Hold the left keyframe's flags until the next keyframe.
    Hold,
}

/// Baking configuration. Missing fields fall back to their defaults when
/// deserialized.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MovieConfig {
    /// Intermediate frames per segment under [`StepPolicy::Fixed`].
    pub inter_steps: usize,
    pub step_policy: StepPolicy,
    pub visibility_mode: VisibilityMode,
}

impl Default for MovieConfig {
    fn default() -> Self {
        Self {
            inter_steps: 15,
            step_policy: StepPolicy::FromFrames,
            visibility_mode: VisibilityMode::Threshold,
        }
    }
}

impl MovieConfig {
    pub fn segment_steps(&self) -> SegmentSteps {
        match self.step_policy {
            StepPolicy::FromFrames => SegmentSteps::FromFrames,
            StepPolicy::Fixed => SegmentSteps::Fixed(self.inter_steps),
        }
    }
}
