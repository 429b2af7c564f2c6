use approx::assert_relative_eq;
use nalgebra::Vector3;
use vizij_movie_core::{
    bake_track, export_track_json, rotation_from_axis_angle, Camera, KeyFrame, MovieError,
    SegmentSteps, StateFrame, ViewerState, VisibilityMode,
};

fn key(frame: usize, zoom: f64, visible: bool) -> KeyFrame {
    StateFrame::from_state(
        frame,
        &ViewerState {
            camera: Camera {
                zoom,
                ..Camera::default()
            },
            visibility: vec![visible],
            time: None,
        },
    )
}

#[test]
fn fewer_than_two_keyframes_is_rejected() {
    for keys in [vec![], vec![key(0, 1.0, true)]] {
        let found = keys.len();
        assert_eq!(
            bake_track(&keys, SegmentSteps::FromFrames, VisibilityMode::Threshold).unwrap_err(),
            MovieError::InsufficientKeyframes { found }
        );
    }
}

#[test]
fn fixed_steps_track_length_and_exact_endpoints() {
    let mut k0 = key(0, 1.0, true);
    let mut k1 = key(10, 3.7, true);
    k0.rotation = rotation_from_axis_angle(10.0, [0.0, 1.0, 0.0]);
    k1.rotation = rotation_from_axis_angle(80.0, [0.0, 1.0, 0.0]);
    k0.translation = Some(Vector3::new(0.1, 0.2, 0.3));
    k1.translation = Some(Vector3::new(-7.0, 3.3, 1.0 / 3.0));

    let track = bake_track(
        &[k0.clone(), k1.clone()],
        SegmentSteps::Fixed(8),
        VisibilityMode::Threshold,
    )
    .unwrap();
    assert_eq!(track.len(), 10);
    assert_eq!(track.zoom[0], 1.0);
    assert_eq!(track.zoom[9], 3.7);
    assert_eq!(Some(track.rotation[0]), k0.rotation);
    assert_eq!(Some(track.rotation[9]), k1.rotation);
    assert_eq!(Some(track.translation[0]), k0.translation);
    assert_eq!(Some(track.translation[9]), k1.translation);
}

#[test]
fn gaps_from_frames_give_one_entry_per_frame() {
    let track = bake_track(
        &[key(0, 1.0, true), key(4, 2.0, true), key(10, 5.0, true)],
        SegmentSteps::FromFrames,
        VisibilityMode::Threshold,
    )
    .unwrap();
    assert_eq!(track.len(), 11);
    assert_relative_eq!(track.zoom[2], 1.5, epsilon = 1e-12);
    assert_eq!(track.zoom[4], 2.0);
    assert_relative_eq!(track.zoom[7], 3.5, epsilon = 1e-12);
    assert!(track.time.is_none());
}

#[test]
fn rotation_follows_the_great_circle() {
    let mut k0 = key(0, 1.0, true);
    let mut k1 = key(4, 1.0, true);
    k0.rotation = rotation_from_axis_angle(0.0, [0.0, 0.0, 1.0]);
    k1.rotation = rotation_from_axis_angle(120.0, [0.0, 0.0, 1.0]);
    let track = bake_track(&[k0, k1], SegmentSteps::FromFrames, VisibilityMode::Threshold).unwrap();
    for (i, q) in track.rotation.iter().enumerate() {
        let expected = rotation_from_axis_angle(30.0 * i as f64, [0.0, 0.0, 1.0]).unwrap();
        assert!(q.angle_to(&expected) < 1e-9, "frame {i}");
    }
}

#[test]
fn visibility_flips_at_segment_midpoint() {
    let track = bake_track(
        &[key(0, 1.0, true), key(10, 1.0, false)],
        SegmentSteps::FromFrames,
        VisibilityMode::Threshold,
    )
    .unwrap();
    let flags: Vec<bool> = track.visibility.iter().map(|v| v[0]).collect();
    assert!(flags[..5].iter().all(|&v| v));
    assert!(flags[5..].iter().all(|&v| !v));

    let rising = bake_track(
        &[key(0, 1.0, false), key(10, 1.0, true)],
        SegmentSteps::FromFrames,
        VisibilityMode::Threshold,
    )
    .unwrap();
    let flags: Vec<bool> = rising.visibility.iter().map(|v| v[0]).collect();
    assert!(flags[..6].iter().all(|&v| !v));
    assert!(flags[6..].iter().all(|&v| v));
}

#[test]
fn hold_mode_keeps_left_flag_until_next_key() {
    let track = bake_track(
        &[key(0, 1.0, true), key(10, 1.0, false)],
        SegmentSteps::FromFrames,
        VisibilityMode::Hold,
    )
    .unwrap();
    let flags: Vec<bool> = track.visibility.iter().map(|v| v[0]).collect();
    assert!(flags[..10].iter().all(|&v| v));
    assert!(!flags[10]);
}

#[test]
fn time_is_truncated_linear_ramp() {
    let mut k0 = key(0, 1.0, true);
    let mut k1 = key(9, 1.0, true);
    k0.time = Some(0);
    k1.time = Some(3);
    let track = bake_track(&[k0, k1], SegmentSteps::FromFrames, VisibilityMode::Threshold).unwrap();
    assert_eq!(
        track.time,
        Some(vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 3])
    );
}

#[test]
fn sparse_channels_interpolate_across_keyframes() {
    let k0 = key(0, 1.0, true);
    let mut mid = StateFrame::empty(5);
    mid.translation = Some(Vector3::new(5.0, 0.0, 0.0));
    let k2 = key(10, 3.0, true);
    let track = bake_track(&[k0, mid, k2], SegmentSteps::FromFrames, VisibilityMode::Threshold)
        .unwrap();
    assert_relative_eq!(track.zoom[5], 2.0, epsilon = 1e-12);
    assert_eq!(track.translation[5], Vector3::new(5.0, 0.0, 0.0));
    assert_relative_eq!(track.translation[8].x, 2.0, epsilon = 1e-12);
}

#[test]
fn inconsistent_inputs_are_rejected() {
    let mut wide = key(5, 1.0, true);
    wide.visibility = Some(vec![true, false]);
    assert_eq!(
        bake_track(
            &[key(0, 1.0, true), wide],
            SegmentSteps::FromFrames,
            VisibilityMode::Threshold
        )
        .unwrap_err(),
        MovieError::LayerCountMismatch {
            expected: 1,
            found: 2
        }
    );

    assert_eq!(
        bake_track(
            &[key(5, 1.0, true), key(5, 1.0, true)],
            SegmentSteps::FromFrames,
            VisibilityMode::Threshold
        )
        .unwrap_err(),
        MovieError::UnorderedKeyframes {
            previous: 5,
            frame: 5
        }
    );

    let mut bare0 = StateFrame::empty(0);
    bare0.zoom = Some(1.0);
    let mut bare1 = StateFrame::empty(3);
    bare1.zoom = Some(2.0);
    assert_eq!(
        bake_track(&[bare0, bare1], SegmentSteps::FromFrames, VisibilityMode::Threshold)
            .unwrap_err(),
        MovieError::MissingChannel {
            channel: "rotation"
        }
    );
}

#[test]
fn exported_json_has_one_object_per_frame() {
    let track = bake_track(
        &[key(0, 1.0, true), key(2, 2.0, false)],
        SegmentSteps::FromFrames,
        VisibilityMode::Threshold,
    )
    .unwrap();
    let json = export_track_json(&track);
    let frames = json.as_array().expect("array");
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[1]["frame"], 1);
    assert_eq!(frames[1]["zoom"], 1.5);
    assert_eq!(frames[2]["visibility"], serde_json::json!([false]));
    assert_eq!(frames[0]["rotation"], serde_json::json!([0.0, 0.0, 0.0, 1.0]));
    assert!(frames[0]["time"].is_null());
}

#[test]
fn time_ramp_survives_extreme_indices() {
    let base = 4_000_000_000_000_000_000;
    let mut k0 = key(0, 1.0, true);
    let mut k1 = key(10, 1.0, true);
    k0.time = Some(base);
    k1.time = Some(base + 10);
    let track = bake_track(&[k0, k1], SegmentSteps::FromFrames, VisibilityMode::Threshold).unwrap();
    let expected: Vec<i64> = (0..=10).map(|i| base + i).collect();
    assert_eq!(track.time, Some(expected));
}
