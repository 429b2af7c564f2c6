//! Per-channel keyframe sampling on the output-frame axis.
//!
//! Model:
//! - Every keyframe sits at an integer output position (see `baking::SegmentSteps`).
//! - Each channel only sees the keyframes that author it; positions between
//!   them are interpolated, positions outside them hold the nearest value.
//! - A position that coincides with a key returns that key's value verbatim.

/// The authored keys of one channel, ordered by strictly increasing position.
#[derive(Clone, Debug)]
pub struct ChannelKeys<T> {
    positions: Vec<usize>,
    values: Vec<T>,
}

/// Where a position falls relative to a channel's keys.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Segment {
    /// Exactly on (or clamped to) key `index`.
    Key(usize),
    /// Between keys `left` and `left + 1`.
    Between {
        left: usize,
        /// Step within the segment, `0 < step < width`.
        step: usize,
        width: usize,
    },
}

impl Segment {
    /// Normalized fraction in (0, 1) for `Between`, 0 for `Key`.
    pub fn fraction(&self) -> f64 {
        match *self {
            Segment::Key(_) => 0.0,
            Segment::Between { step, width, .. } => step as f64 / width as f64,
        }
    }
}

impl<T> ChannelKeys<T> {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Append a key; callers push in increasing position order.
    pub fn push(&mut self, position: usize, value: T) {
        debug_assert!(self.positions.last().map_or(true, |&p| p < position));
        self.positions.push(position);
        self.values.push(value);
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Locate `position` among the keys. Requires at least one key.
    pub fn find_segment(&self, position: usize) -> Segment {
        match self.positions.binary_search(&position) {
            Ok(i) => Segment::Key(i),
            Err(0) => Segment::Key(0),
            Err(i) if i == self.positions.len() => Segment::Key(i - 1),
            Err(i) => {
                let left = i - 1;
                Segment::Between {
                    left,
                    step: position - self.positions[left],
                    width: self.positions[i] - self.positions[left],
                }
            }
        }
    }

    /// Sample with `blend(left, right, segment)` between keys.
    pub fn sample<R>(
        &self,
        position: usize,
        on_key: impl Fn(&T) -> R,
        blend: impl Fn(&T, &T, Segment) -> R,
    ) -> R {
        match self.find_segment(position) {
            Segment::Key(i) => on_key(&self.values[i]),
            seg @ Segment::Between { left, .. } => {
                blend(&self.values[left], &self.values[left + 1], seg)
            }
        }
    }
}

impl<T> Default for ChannelKeys<T> {
    fn default() -> Self {
        Self::new()
    }
}
