//! Interactive keyframe capture.
//!
//! Hosts bind their own keys to these operations; the session only keeps the
//! ordered keyframe list and a cursor.

use serde::{Deserialize, Serialize};

use crate::baking::{bake_track, DenseTrack, SegmentSteps};
use crate::config::MovieConfig;
use crate::data::{KeyFrame, StateFrame};
use crate::error::{MovieError, Result};
use crate::value::ViewerSnapshot;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct KeyframeCapture {
    keyframes: Vec<KeyFrame>,
    /// `None` before anything has been captured.
    cursor: Option<usize>,
}

impl KeyframeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyframes(&self) -> &[KeyFrame] {
        &self.keyframes
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Insert a keyframe right after the cursor and select it.
    pub fn capture(&mut self, snapshot: &ViewerSnapshot) -> usize {
        let at = self.cursor.map_or(0, |c| c + 1);
        self.keyframes.insert(at, StateFrame::from_state(at, snapshot));
        self.cursor = Some(at);
        self.renumber();
        at
    }

    /// Overwrite the selected keyframe.
    pub fn replace(&mut self, snapshot: &ViewerSnapshot) -> Result<usize> {
        let at = self.selected()?;
        self.keyframes[at] = StateFrame::from_state(at, snapshot);
        Ok(at)
    }

    /// Remove the selected keyframe; the cursor steps back, wrapping to the end.
    /// Returns the keyframe now selected, if any remain.
    pub fn delete(&mut self) -> Result<Option<&KeyFrame>> {
        let at = self.selected()?;
        self.keyframes.remove(at);
        self.renumber();
        if self.keyframes.is_empty() {
            self.cursor = None;
            return Ok(None);
        }
        let n = self.keyframes.len();
        let next = (at + n - 1) % n;
        self.cursor = Some(next);
        Ok(Some(&self.keyframes[next]))
    }

    /// Select the next keyframe, wrapping around.
    pub fn advance(&mut self) -> Result<&KeyFrame> {
        self.step(1)
    }

    /// Select the previous keyframe, wrapping around.
    pub fn back(&mut self) -> Result<&KeyFrame> {
        let n = self.keyframes.len();
        self.step(n.saturating_sub(1))
    }

    /// Interpolate the captured keyframes with `cfg.inter_steps` frames per segment.
    pub fn track(&self, cfg: &MovieConfig) -> Result<DenseTrack> {
        bake_track(
            &self.keyframes,
            SegmentSteps::Fixed(cfg.inter_steps),
            cfg.visibility_mode,
        )
    }

    fn step(&mut self, offset: usize) -> Result<&KeyFrame> {
        let n = self.keyframes.len();
        if n == 0 {
            return Err(MovieError::EmptyCapture);
        }
        let next = self.cursor.map_or(0, |c| (c + offset) % n);
        self.cursor = Some(next);
        Ok(&self.keyframes[next])
    }

    fn selected(&self) -> Result<usize> {
        self.cursor.ok_or(MovieError::EmptyCapture)
    }

    fn renumber(&mut self) {
        for (i, kf) in self.keyframes.iter_mut().enumerate() {
            kf.frame = i;
        }
    }
}
