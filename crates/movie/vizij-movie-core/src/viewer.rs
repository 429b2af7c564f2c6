//! Contract with the live 3-D viewer and the helpers that drive it.
//!
//! The pipeline itself never touches a viewer: it reads one
//! [`ViewerSnapshot`] up front and produces a [`DenseTrack`]. The functions
//! here are the boundary that pushes keyframes and track entries back.

use tracing::debug;

use crate::baking::DenseTrack;
use crate::data::StateFrame;
use crate::value::{Camera, ViewerSnapshot, ViewerState};

/// What the movie pipeline needs from a viewer.
pub trait Viewer {
    /// Image produced by [`Viewer::screenshot`].
    type Image;

    fn camera(&self) -> Camera;
    fn set_camera(&mut self, camera: Camera);

    /// One visibility flag per layer, in layer order.
    fn layer_visibility(&self) -> Vec<bool>;
    fn set_layer_visible(&mut self, layer: usize, visible: bool);

    /// Current time index, `None` when the data has no time axis.
    fn time(&self) -> Option<i64>;
    /// Ignored by viewers without a time axis.
    fn set_time(&mut self, time: i64);

    /// Render the current state. Blocking.
    fn screenshot(&mut self) -> Self::Image;
}

impl ViewerState {
    /// Read camera, layers and time from the viewer in one go.
    pub fn capture<V: Viewer + ?Sized>(viewer: &V) -> ViewerSnapshot {
        ViewerState {
            camera: viewer.camera(),
            visibility: viewer.layer_visibility(),
            time: viewer.time(),
        }
    }
}

/// Apply the authored attributes of a keyframe; empty attributes keep the
/// viewer's current value.
pub fn apply_keyframe<V: Viewer + ?Sized>(viewer: &mut V, keyframe: &StateFrame) {
    let mut camera = viewer.camera();
    if let Some(rotation) = keyframe.rotation {
        camera.rotation = rotation;
    }
    if let Some(translation) = keyframe.translation {
        camera.translation = translation;
    }
    if let Some(zoom) = keyframe.zoom {
        camera.zoom = zoom;
    }
    if viewer.time().is_some() {
        if let Some(time) = keyframe.time {
            viewer.set_time(time);
        }
    }
    if let Some(flags) = &keyframe.visibility {
        for (layer, &visible) in flags.iter().enumerate() {
            viewer.set_layer_visible(layer, visible);
        }
    }
    viewer.set_camera(camera);
}

/// Apply a fully resolved state.
pub fn apply_state<V: Viewer + ?Sized>(viewer: &mut V, state: &ViewerState) {
    if viewer.time().is_some() {
        if let Some(time) = state.time {
            viewer.set_time(time);
        }
    }
    for (layer, &visible) in state.visibility.iter().enumerate() {
        viewer.set_layer_visible(layer, visible);
    }
    viewer.set_camera(state.camera.clone());
}

/// Apply output frame `index` of `track`. Returns false when out of range.
pub fn apply_track_frame<V: Viewer + ?Sized>(
    viewer: &mut V,
    track: &DenseTrack,
    index: usize,
) -> bool {
    match track.frame(index) {
        Some(state) => {
            apply_state(viewer, &state);
            true
        }
        None => false,
    }
}

/// Apply every frame of `track` in order and capture one image per frame.
pub fn collect_frames<V: Viewer + ?Sized>(viewer: &mut V, track: &DenseTrack) -> Vec<V::Image> {
    let mut images = Vec::with_capacity(track.len());
    for index in 0..track.len() {
        apply_track_frame(viewer, track, index);
        images.push(viewer.screenshot());
    }
    debug!(frames = images.len(), "collected frames");
    images
}
