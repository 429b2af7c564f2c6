//! Compounding of relative script commands into a sparse per-frame state table.
//!
//! The running baseline is an explicit fold over the sorted commands:
//! `(baseline, command) -> baseline'`. Each channel evolves independently, so
//! commands on different channels never interact while commands on the same
//! channel chain in start-frame order, whatever their end frames.

use tracing::{debug, trace};

use crate::data::{Channel, CompiledCommand, Operation, StateFrame};
use crate::error::{MovieError, Result};
use crate::script::MAX_FRAME;
use crate::value::{ViewerSnapshot, ViewerState};

/// Apply one command to the baseline, returning the new baseline.
pub fn apply_command(baseline: &ViewerState, command: &CompiledCommand) -> Result<ViewerState> {
    let mut next = baseline.clone();
    match &command.operation {
        Operation::Rotate(delta) => next.camera.rotation = baseline.camera.rotation * delta,
        Operation::Zoom(factor) => next.camera.zoom = baseline.camera.zoom * factor,
        Operation::Translate(delta) => {
            next.camera.translation = baseline.camera.translation + delta
        }
        Operation::Visibility { layer, visible } => {
            let layers = baseline.layer_count();
            let flag = next
                .visibility
                .get_mut(*layer)
                .ok_or(MovieError::LayerOutOfRange {
                    layer: *layer,
                    layers,
                })?;
            *flag = *visible;
        }
        Operation::TimeShift(delta) => {
            let time = baseline
                .time
                .ok_or(MovieError::MissingTimeAxis { line: command.line })?;
            let shifted = time.checked_add(*delta).ok_or_else(|| {
                MovieError::malformed(
                    command.line,
                    format!("time shift by {delta} overflows time index {time}"),
                )
            })?;
            next.time = Some(shifted);
        }
    }
    Ok(next)
}

/// Copy one channel of `state` into `frame`.
fn pin(frame: &mut StateFrame, channel: Channel, state: &ViewerState) {
    match channel {
        Channel::Rotation => frame.rotation = Some(state.camera.rotation),
        Channel::Translation => frame.translation = Some(state.camera.translation),
        Channel::Zoom => frame.zoom = Some(state.camera.zoom),
        Channel::Visibility => frame.visibility = Some(state.visibility.clone()),
        Channel::Time => frame.time = state.time,
    }
}

/// Build the sparse state table for frames `0..=end_frame`.
///
/// Frame 0 is seeded from `snapshot`. For every command the channel it
/// touches is pinned to the baseline at `start_frame` and to the compounded
/// value at `end_frame`. The last frame always carries the full final
/// baseline. `end_frame` may not exceed [`MAX_FRAME`].
pub fn compound(
    commands: &[CompiledCommand],
    end_frame: usize,
    snapshot: &ViewerSnapshot,
) -> Result<Vec<StateFrame>> {
    if end_frame > MAX_FRAME {
        return Err(MovieError::malformed(
            0,
            format!("horizon {end_frame} exceeds the maximum of {MAX_FRAME}"),
        ));
    }
    let mut states: Vec<StateFrame> = (0..=end_frame).map(StateFrame::empty).collect();
    states[0] = StateFrame::from_state(0, snapshot);

    let mut baseline = snapshot.clone();
    for command in commands {
        if command.end_frame > end_frame || command.start_frame > command.end_frame {
            return Err(MovieError::malformed(
                command.line,
                format!(
                    "frames {}..{} fall outside 0..{end_frame}",
                    command.start_frame, command.end_frame
                ),
            ));
        }
        let channel = command.operation.channel();
        let next = apply_command(&baseline, command)?;
        pin(&mut states[command.start_frame], channel, &baseline);
        pin(&mut states[command.end_frame], channel, &next);
        trace!(
            line = command.line,
            channel = channel.name(),
            start = command.start_frame,
            end = command.end_frame,
            "compounded command"
        );
        baseline = next;
    }

    states[end_frame] = StateFrame::from_state(end_frame, &baseline);
    debug!(frames = states.len(), "compounded state table");
    Ok(states)
}
