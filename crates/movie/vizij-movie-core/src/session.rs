//! Script pipeline facade: parse → compile → compound → extract → bake.

use tracing::debug;

use crate::baking::{bake_with_config, DenseTrack};
use crate::compound::compound;
use crate::config::MovieConfig;
use crate::data::{CompiledCommand, KeyFrame, StateFrame};
use crate::error::Result;
use crate::keyframes::{extract_keyframes, segment_gaps};
use crate::script::{compile_script, parse_script};
use crate::value::ViewerSnapshot;

/// A compiled camera script, ready to be applied to a viewer snapshot.
///
/// Parsing and compiling happen once in [`ScriptSession::from_text`]; every
/// later call is a pure function of the stored commands and the snapshot it
/// is given, so a session can be replayed against different viewers.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptSession {
    commands: Vec<CompiledCommand>,
    end_frame: usize,
}

impl ScriptSession {
    pub fn from_text(text: &str) -> Result<Self> {
        let parsed = parse_script(text)?;
        let commands = compile_script(&parsed)?;
        Ok(Self {
            commands,
            end_frame: parsed.end_frame,
        })
    }

    /// Last frame of the movie.
    pub fn end_frame(&self) -> usize {
        self.end_frame
    }

    /// Compiled commands, sorted by start frame.
    pub fn commands(&self) -> &[CompiledCommand] {
        &self.commands
    }

    /// The full sparse state table for frames `0..=end_frame`.
    pub fn states(&self, snapshot: &ViewerSnapshot) -> Result<Vec<StateFrame>> {
        compound(&self.commands, self.end_frame, snapshot)
    }

    pub fn keyframes(&self, snapshot: &ViewerSnapshot) -> Result<Vec<KeyFrame>> {
        let keyframes = extract_keyframes(&self.states(snapshot)?);
        debug!(keyframes = keyframes.len(), "extracted keyframes");
        Ok(keyframes)
    }

    /// Intermediate frame count of every keyframe segment.
    pub fn segment_steps(&self, snapshot: &ViewerSnapshot) -> Result<Vec<usize>> {
        Ok(segment_gaps(&self.keyframes(snapshot)?))
    }

    /// Run the whole pipeline.
    pub fn track(&self, snapshot: &ViewerSnapshot, cfg: &MovieConfig) -> Result<DenseTrack> {
        bake_with_config(&self.keyframes(snapshot)?, cfg)
    }
}
