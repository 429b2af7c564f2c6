//! Keyframe extraction from a sparse state table.

use crate::data::{KeyFrame, StateFrame};

/// Keep the frames that author at least one attribute, in order.
pub fn extract_keyframes(states: &[StateFrame]) -> Vec<KeyFrame> {
    states.iter().filter(|s| s.is_key()).cloned().collect()
}

/// Intermediate frame count between consecutive keyframes
/// (`next.frame - frame - 1`).
pub fn segment_gaps(keyframes: &[KeyFrame]) -> Vec<usize> {
    keyframes
        .windows(2)
        .map(|w| w[1].frame.saturating_sub(w[0].frame + 1))
        .collect()
}
