use nalgebra::Vector3;
use vizij_movie_core::{
    apply_keyframe, collect_frames, rotation_from_axis_angle, Camera, KeyframeCapture,
    MovieConfig, MovieError, StateFrame, Viewer, ViewerState,
};

/// In-memory viewer that records what the pipeline pushes into it.
#[derive(Debug, Default)]
struct FakeViewer {
    camera: Camera,
    layers: Vec<bool>,
    time: Option<i64>,
    shots: usize,
}

impl FakeViewer {
    fn new(layers: usize, time: Option<i64>) -> Self {
        Self {
            layers: vec![true; layers],
            time,
            ..Self::default()
        }
    }
}

impl Viewer for FakeViewer {
    type Image = (usize, f64, Vec<bool>, Option<i64>);

    fn camera(&self) -> Camera {
        self.camera.clone()
    }

    fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    fn layer_visibility(&self) -> Vec<bool> {
        self.layers.clone()
    }

    fn set_layer_visible(&mut self, layer: usize, visible: bool) {
        self.layers[layer] = visible;
    }

    fn time(&self) -> Option<i64> {
        self.time
    }

    fn set_time(&mut self, time: i64) {
        if self.time.is_some() {
            self.time = Some(time);
        }
    }

    fn screenshot(&mut self) -> Self::Image {
        self.shots += 1;
        (self.shots, self.camera.zoom, self.layers.clone(), self.time)
    }
}

#[test]
fn navigation_without_keyframes_fails() {
    let mut capture = KeyframeCapture::new();
    assert_eq!(capture.advance().unwrap_err(), MovieError::EmptyCapture);
    assert_eq!(capture.back().unwrap_err(), MovieError::EmptyCapture);
    assert_eq!(capture.delete().unwrap_err(), MovieError::EmptyCapture);
    assert_eq!(
        capture.replace(&ViewerState::default()).unwrap_err(),
        MovieError::EmptyCapture
    );
}

#[test]
fn capture_inserts_after_cursor_and_renumbers() {
    let mut viewer = FakeViewer::new(1, None);
    let mut capture = KeyframeCapture::new();

    viewer.camera.zoom = 1.0;
    capture.capture(&ViewerState::capture(&viewer));
    viewer.camera.zoom = 3.0;
    capture.capture(&ViewerState::capture(&viewer));
    // Step back to the first keyframe and insert between the two.
    capture.back().unwrap();
    viewer.camera.zoom = 2.0;
    assert_eq!(capture.capture(&ViewerState::capture(&viewer)), 1);

    let zooms: Vec<Option<f64>> = capture.keyframes().iter().map(|k| k.zoom).collect();
    assert_eq!(zooms, vec![Some(1.0), Some(2.0), Some(3.0)]);
    let frames: Vec<usize> = capture.keyframes().iter().map(|k| k.frame).collect();
    assert_eq!(frames, vec![0, 1, 2]);
    assert_eq!(capture.cursor(), Some(1));
}

#[test]
fn replace_delete_and_wrapping_navigation() {
    let mut capture = KeyframeCapture::new();
    for zoom in [1.0, 2.0, 3.0] {
        capture.capture(&ViewerState {
            camera: Camera {
                zoom,
                ..Camera::default()
            },
            visibility: vec![true],
            time: None,
        });
    }
    assert_eq!(capture.advance().unwrap().zoom, Some(1.0));
    assert_eq!(capture.back().unwrap().zoom, Some(3.0));

    capture
        .replace(&ViewerState {
            camera: Camera {
                zoom: 9.0,
                ..Camera::default()
            },
            visibility: vec![false],
            time: None,
        })
        .unwrap();
    assert_eq!(capture.keyframes()[2].zoom, Some(9.0));
    assert_eq!(capture.keyframes()[2].frame, 2);

    let selected = capture.delete().unwrap().cloned();
    assert_eq!(selected.and_then(|k| k.zoom), Some(2.0));
    assert_eq!(capture.len(), 2);

    // Deleting the first keyframe wraps the cursor to the end.
    capture.back().unwrap();
    let selected = capture.delete().unwrap().cloned();
    assert_eq!(selected.map(|k| k.frame), Some(0));
    assert_eq!(capture.len(), 1);
    assert!(capture.delete().unwrap().is_none());
    assert!(capture.is_empty());
}

#[test]
fn captured_track_uses_fixed_inter_steps() {
    let mut capture = KeyframeCapture::new();
    for zoom in [1.0, 2.0, 4.0] {
        capture.capture(&ViewerState {
            camera: Camera {
                zoom,
                ..Camera::default()
            },
            visibility: vec![true, false],
            time: None,
        });
    }
    let cfg = MovieConfig {
        inter_steps: 3,
        ..MovieConfig::default()
    };
    let track = capture.track(&cfg).unwrap();
    assert_eq!(track.len(), 9);
    assert_eq!(track.zoom[0], 1.0);
    assert_eq!(track.zoom[4], 2.0);
    assert_eq!(track.zoom[6], 3.0);
    assert_eq!(track.zoom[8], 4.0);
}

#[test]
fn applying_a_keyframe_only_touches_authored_attributes() {
    let mut viewer = FakeViewer::new(2, Some(3));
    viewer.camera.translation = Vector3::new(1.0, 1.0, 1.0);

    let mut key = StateFrame::empty(0);
    key.zoom = Some(5.0);
    key.visibility = Some(vec![false, true]);
    key.time = Some(8);
    apply_keyframe(&mut viewer, &key);

    assert_eq!(viewer.camera.zoom, 5.0);
    assert_eq!(viewer.camera.translation, Vector3::new(1.0, 1.0, 1.0));
    assert_eq!(viewer.layers, vec![false, true]);
    assert_eq!(viewer.time, Some(8));
}

#[test]
fn collect_frames_renders_every_track_entry() {
    let mut viewer = FakeViewer::new(1, Some(0));
    let mut capture = KeyframeCapture::new();
    capture.capture(&ViewerState::capture(&viewer));
    viewer.camera.zoom = 3.0;
    viewer.camera.rotation = rotation_from_axis_angle(90.0, [0.0, 1.0, 0.0]).unwrap();
    viewer.layers = vec![false];
    viewer.time = Some(4);
    capture.capture(&ViewerState::capture(&viewer));

    let cfg = MovieConfig {
        inter_steps: 1,
        ..MovieConfig::default()
    };
    let track = capture.track(&cfg).unwrap();
    let images = collect_frames(&mut viewer, &track);

    assert_eq!(images.len(), 3);
    assert_eq!(images[0], (1, 1.0, vec![true], Some(0)));
    assert_eq!(images[1], (2, 2.0, vec![false], Some(2)));
    assert_eq!(images[2], (3, 3.0, vec![false], Some(4)));
    assert_eq!(Some(viewer.camera.rotation), track.frame(2).map(|s| s.camera.rotation));
}
