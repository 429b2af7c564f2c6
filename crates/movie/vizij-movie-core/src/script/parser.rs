//! Grouping of raw script lines into statement blocks.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::patterns::{FRAME_REFERENCE, RANGE_HEADER};
use super::{COMMENT_MARKER, CONTINUATION_MARKER, MAX_FRAME};
use crate::error::{MovieError, Result};

/// A script line together with its 1-based position in the source text.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptLine {
    pub number: usize,
    pub text: String,
}

impl ScriptLine {
    fn new(number: usize, text: &str) -> Self {
        Self {
            number,
            text: text.to_string(),
        }
    }
}

/// A header line and the statements it governs.
///
/// For a `From frame A to frame B` header the body is the run of continuation
/// lines that follows it (possibly empty). Any other line is a one-statement
/// group whose body is the header line itself.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatementGroup {
    pub header: ScriptLine,
    pub body: Vec<ScriptLine>,
}

/// Output of [`parse_script`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedScript {
    pub groups: Vec<StatementGroup>,
    /// Largest frame referenced by any `At frame N` / `to frame N` clause.
    pub end_frame: usize,
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with(COMMENT_MARKER)
}

fn is_continuation(line: &str) -> bool {
    line.trim_start().starts_with(CONTINUATION_MARKER)
}

/// Split script text into statement groups and find the frame horizon.
///
/// Comment and blank lines are skipped. Fails with
/// [`MovieError::MalformedScript`] when no line references a frame or a
/// reference lies beyond [`MAX_FRAME`](super::MAX_FRAME).
pub fn parse_script(text: &str) -> Result<ParsedScript> {
    let lines: Vec<&str> = text.lines().collect();
    let mut groups = Vec::new();
    let mut end_frame: Option<usize> = None;

    let mut idx = 0;
    while idx < lines.len() {
        let raw = lines[idx];
        let number = idx + 1;
        idx += 1;

        if is_comment(raw) {
            continue;
        }
        if raw.trim().is_empty() {
            trace!(line = number, "skipping blank script line");
            continue;
        }
        if let Some(frame) = frame_reference(raw, number)? {
            end_frame = Some(end_frame.map_or(frame, |e| e.max(frame)));
        }

        let header = ScriptLine::new(number, raw);
        if RANGE_HEADER.is_match(raw) {
            let mut body = Vec::new();
            while idx < lines.len() && is_continuation(lines[idx]) {
                body.push(ScriptLine::new(idx + 1, lines[idx]));
                idx += 1;
            }
            if body.is_empty() {
                debug!(line = number, "range header without continuation lines");
            }
            groups.push(StatementGroup { header, body });
        } else {
            groups.push(StatementGroup {
                body: vec![header.clone()],
                header,
            });
        }
    }

    let end_frame = end_frame
        .ok_or_else(|| MovieError::malformed(0, "script references no frame, horizon is undefined"))?;
    debug!(groups = groups.len(), end_frame, "parsed script");
    Ok(ParsedScript { groups, end_frame })
}

fn frame_reference(line: &str, number: usize) -> Result<Option<usize>> {
    match FRAME_REFERENCE.captures(line) {
        Some(caps) => {
            let frame = caps[1]
                .parse::<usize>()
                .map_err(|e| MovieError::malformed(number, format!("frame number: {e}")))?;
            if frame > MAX_FRAME {
                return Err(MovieError::malformed(
                    number,
                    format!("frame {frame} exceeds the maximum of {MAX_FRAME}"),
                ));
            }
            Ok(Some(frame))
        }
        None => Ok(None),
    }
}
