//! Textual patterns recognised by the parser and compiler.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in script pattern should compile")
}

/// A `From frame A to frame B` header with nothing after the range.
pub(crate) static RANGE_HEADER: Lazy<Regex> = Lazy::new(|| compile(r"to frame \d+\s*$"));
/// First frame reference on a line, used to find the script horizon.
pub(crate) static FRAME_REFERENCE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?:At frame |to frame )(\d+)"));

pub(crate) static FROM_FRAME: Lazy<Regex> = Lazy::new(|| compile(r"From frame (\d+) to"));
pub(crate) static TO_FRAME: Lazy<Regex> = Lazy::new(|| compile(r"to frame (\d+)"));
pub(crate) static AT_FRAME: Lazy<Regex> = Lazy::new(|| compile(r"At frame (\d+)"));

/// Operation keywords; the leftmost one in a statement decides its kind.
pub(crate) static KEYWORD: Lazy<Regex> =
    Lazy::new(|| compile(r"rotate|translate|zoom|make|time"));

pub(crate) static ROTATE_ANGLE: Lazy<Regex> = Lazy::new(|| compile(r"rotate by (\d+)"));
pub(crate) static ROTATE_AXIS: Lazy<Regex> =
    Lazy::new(|| compile(r"around \((-?\d+),\s*(-?\d+),\s*(-?\d+)\)"));
pub(crate) static ZOOM_FACTOR: Lazy<Regex> = Lazy::new(|| compile(r"factor of (\d*\.?\d+)"));
pub(crate) static TRANSLATE_BY: Lazy<Regex> =
    Lazy::new(|| compile(r"by \((-?\d+),\s*(-?\d+),\s*(-?\d+)\)"));
pub(crate) static MAKE_LAYER: Lazy<Regex> = Lazy::new(|| compile(r"make layer (\d+)"));
pub(crate) static TIME_BY: Lazy<Regex> = Lazy::new(|| compile(r"by (-?\d+)"));
