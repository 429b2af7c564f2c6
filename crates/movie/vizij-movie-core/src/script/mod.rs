//! Camera-script front end.
//!
//! Scripts are line oriented:
//!
//! ```text
//! # comment
//! At frame 0 zoom by a factor of 1.5
//! From frame 0 to frame 60
//! - rotate by 90 around (0,1,0)
//! - make layer 1 invisible
//! ```
//!
//! [`parse_script`] groups lines into statement blocks and finds the frame
//! horizon; [`compile_script`] turns every statement into typed
//! [`CompiledCommand`](crate::data::CompiledCommand)s sorted by start frame.

pub mod compiler;
pub mod parser;
mod patterns;

pub use compiler::{compile_group, compile_script, frame_range};
pub use parser::{parse_script, ParsedScript, ScriptLine, StatementGroup};

/// Largest frame index a script may reference. The state table holds one
/// entry per frame up to the horizon.
pub const MAX_FRAME: usize = 1_000_000;

/// Marker that starts a comment line.
pub const COMMENT_MARKER: char = '#';
/// Marker that starts a continuation line inside a `From ... to ...` block.
pub const CONTINUATION_MARKER: char = '-';
