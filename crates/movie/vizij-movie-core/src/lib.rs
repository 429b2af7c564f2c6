//! Vizij Movie Core (viewer-agnostic)
//!
//! Turns a camera script, or a list of interactively captured keyframes, into a
//! dense per-frame track of viewer states (orientation, zoom, center, layer
//! visibility and time index) that a host applies to its viewer frame by
//! frame while capturing images.
//!
//! Script path: [`parse_script`] → [`compile_script`] → [`compound()`] →
//! [`extract_keyframes`] → [`bake_track`]. [`ScriptSession`] wraps the chain.

pub mod baking;
pub mod capture;
pub mod compound;
pub mod config;
pub mod data;
pub mod error;
pub mod interp;
pub mod keyframes;
pub mod sampling;
pub mod script;
pub mod session;
pub mod value;
pub mod viewer;

// Re-exports for consumers (hosts and the CLI)
pub use baking::{bake_track, bake_with_config, export_track_json, DenseTrack, SegmentSteps};
pub use capture::KeyframeCapture;
pub use compound::{apply_command, compound};
pub use config::{MovieConfig, StepPolicy, VisibilityMode};
pub use data::{Channel, CompiledCommand, KeyFrame, Operation, StateFrame};
pub use error::{MovieError, Result};
pub use keyframes::{extract_keyframes, segment_gaps};
pub use script::{compile_script, parse_script, ParsedScript, StatementGroup, MAX_FRAME};
pub use session::ScriptSession;
pub use value::{rotation_from_axis_angle, Camera, ViewerSnapshot, ViewerState};
pub use viewer::{apply_keyframe, apply_state, apply_track_frame, collect_frames, Viewer};
