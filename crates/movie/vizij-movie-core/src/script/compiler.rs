//! Statement compilation: typed operations anchored to frame ranges.

use std::str::FromStr;

use nalgebra::Vector3;
use regex::{Captures, Regex};
use tracing::debug;

use super::parser::{ParsedScript, ScriptLine, StatementGroup};
use super::patterns::{
    AT_FRAME, FROM_FRAME, KEYWORD, MAKE_LAYER, ROTATE_ANGLE, ROTATE_AXIS, TIME_BY, TO_FRAME,
    TRANSLATE_BY, ZOOM_FACTOR,
};
use crate::data::{CompiledCommand, Operation};
use crate::error::{MovieError, Result};
use crate::value::rotation_from_axis_angle;

/// Rotations of at least this many degrees are split into sub-steps.
pub const LARGE_ROTATION_DEG: f64 = 180.0;
/// Number of equal sub-rotations a large rotation is split into.
pub const LARGE_ROTATION_PARTS: usize = 3;

/// Compile every group of a parsed script, stably sorted by start frame.
pub fn compile_script(parsed: &ParsedScript) -> Result<Vec<CompiledCommand>> {
    let mut commands = Vec::new();
    for group in &parsed.groups {
        commands.extend(compile_group(group)?);
    }
    commands.sort_by_key(|c| c.start_frame);
    debug!(commands = commands.len(), "compiled script");
    Ok(commands)
}

/// Compile one statement group into commands spanning its frame range.
pub fn compile_group(group: &StatementGroup) -> Result<Vec<CompiledCommand>> {
    let (start, end) = frame_range(&group.header)?;
    let mut out = Vec::with_capacity(group.body.len());
    for statement in &group.body {
        match parse_statement(statement)? {
            Parsed::Single(operation) => out.push(CompiledCommand {
                start_frame: start,
                end_frame: end,
                operation,
                line: statement.number,
            }),
            Parsed::Split(parts) => {
                let bounds = split_bounds(start, end, parts.len());
                for (operation, window) in parts.into_iter().zip(bounds.windows(2)) {
                    out.push(CompiledCommand {
                        start_frame: window[0],
                        end_frame: window[1],
                        operation,
                        line: statement.number,
                    });
                }
            }
        }
    }
    Ok(out)
}

/// `(start, end)` of a header: `From frame A to frame B` gives `(A, B)`,
/// `At frame A` gives `(A, A)`.
///
/// A zero-length `From frame N to frame N` range is accepted and behaves like
/// `At frame N`; a reversed range is rejected.
pub fn frame_range(header: &ScriptLine) -> Result<(usize, usize)> {
    let line = header.number;
    let text = header.text.as_str();
    if text.split_whitespace().next() == Some("From") {
        let start = capture_num(&FROM_FRAME, text, 1).ok_or_else(|| {
            MovieError::malformed(line, "expected 'From frame <start> to frame <end>'")
        })?;
        let end = capture_num(&TO_FRAME, text, 1).ok_or_else(|| {
            MovieError::malformed(line, "expected 'From frame <start> to frame <end>'")
        })?;
        if start > end {
            return Err(MovieError::malformed(
                line,
                format!("range ends at frame {end} before it starts at frame {start}"),
            ));
        }
        Ok((start, end))
    } else {
        let at = capture_num(&AT_FRAME, text, 1)
            .ok_or_else(|| MovieError::malformed(line, "expected 'At frame <n>' or 'From frame'"))?;
        Ok((at, at))
    }
}

enum Parsed {
    Single(Operation),
    Split(Vec<Operation>),
}

fn parse_statement(statement: &ScriptLine) -> Result<Parsed> {
    let line = statement.number;
    let text = statement.text.as_str();
    let keyword = KEYWORD
        .find(text)
        .ok_or_else(|| MovieError::UnknownOperation {
            line,
            statement: text.trim().to_string(),
        })?
        .as_str();

    let missing = |what: &str| MovieError::malformed(line, format!("{keyword}: missing {what}"));

    let parsed = match keyword {
        "rotate" => {
            let angle: u32 =
                capture_num(&ROTATE_ANGLE, text, 1).ok_or_else(|| missing("'rotate by <angle>'"))?;
            let axis = capture_triplet::<i64>(&ROTATE_AXIS, text)
                .ok_or_else(|| missing("'around (<x>,<y>,<z>)'"))?;
            let axis = axis.map(|c| c as f64);
            let angle = f64::from(angle);
            if angle >= LARGE_ROTATION_DEG {
                let part = rotation_from_axis_angle(angle / LARGE_ROTATION_PARTS as f64, axis)
                    .ok_or_else(|| MovieError::malformed(line, "rotation axis has zero length"))?;
                Parsed::Split(vec![Operation::Rotate(part); LARGE_ROTATION_PARTS])
            } else {
                let q = rotation_from_axis_angle(angle, axis)
                    .ok_or_else(|| MovieError::malformed(line, "rotation axis has zero length"))?;
                Parsed::Single(Operation::Rotate(q))
            }
        }
        "zoom" => {
            let factor: f64 =
                capture_num(&ZOOM_FACTOR, text, 1).ok_or_else(|| missing("'factor of <x>'"))?;
            Parsed::Single(Operation::Zoom(factor))
        }
        "translate" => {
            let [dx, dy, dz] = capture_triplet::<i64>(&TRANSLATE_BY, text)
                .ok_or_else(|| missing("'by (<dx>,<dy>,<dz>)'"))?;
            Parsed::Single(Operation::Translate(Vector3::new(
                dx as f64, dy as f64, dz as f64,
            )))
        }
        "make" => {
            let layer: usize =
                capture_num(&MAKE_LAYER, text, 1).ok_or_else(|| missing("'make layer <n>'"))?;
            let visible = match text.split_whitespace().last() {
                Some("visible") => true,
                Some("invisible") => false,
                _ => return Err(missing("trailing 'visible' or 'invisible'")),
            };
            Parsed::Single(Operation::Visibility { layer, visible })
        }
        "time" => {
            let shift: i64 = capture_num(&TIME_BY, text, 1).ok_or_else(|| missing("'by <n>'"))?;
            Parsed::Single(Operation::TimeShift(shift))
        }
        _ => {
            return Err(MovieError::UnknownOperation {
                line,
                statement: text.trim().to_string(),
            })
        }
    };
    Ok(parsed)
}

/// Evenly spaced integer boundaries over `[start, end]`, both endpoints
/// included, truncated toward zero.
fn split_bounds(start: usize, end: usize, parts: usize) -> Vec<usize> {
    let span = end - start;
    (0..=parts).map(|k| start + span * k / parts).collect()
}

fn capture_num<T: FromStr>(re: &Regex, text: &str, group: usize) -> Option<T> {
    re.captures(text)
        .and_then(|caps| caps.get(group))
        .and_then(|m| m.as_str().parse().ok())
}

fn capture_triplet<T: FromStr + Copy>(re: &Regex, text: &str) -> Option<[T; 3]> {
    let caps: Captures<'_> = re.captures(text)?;
    let get = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<T>().ok());
    Some([get(1)?, get(2)?, get(3)?])
}
