//! Playback Controller Tests
//!
//! Tests for:
//! - Stopped → Playing → Stopped transitions and clock advance
//! - Loop wrap (clock modulo duration) vs. one-shot completion
//! - Exactly-once completion reporting
//! - Tolerance of mid-playback keyframe edits, including unplayable tracks
//! - Camera segment traversal, advance and finish

use glam::Vec3;

use kinema::{
    AnimationTrack, CameraKeyframe, ObjectKeyframe, ObjectPose, PlaybackController,
    PlaybackState, PoseSample, TrackData,
};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn pose_at(position: Vec3) -> ObjectPose {
    ObjectPose {
        position,
        ..ObjectPose::default()
    }
}

fn object_track(duration: f32, loop_enabled: bool, times: &[(f32, Vec3)]) -> AnimationTrack {
    let mut track = AnimationTrack::object("obj-1", "test");
    track.set_duration(duration);
    track.set_loop(loop_enabled);
    if let TrackData::Object { keys, .. } = &mut track.data {
        for &(time, position) in times {
            keys.add(ObjectKeyframe::new(time, pose_at(position)));
        }
    }
    track
}

fn camera_track(keys_in: &[(Vec3, f32)]) -> AnimationTrack {
    let mut track = AnimationTrack::camera("fly");
    if let TrackData::Camera { keys } = &mut track.data {
        for (i, &(position, duration)) in keys_in.iter().enumerate() {
            keys.push(CameraKeyframe::new(
                format!("kf{i}"),
                position,
                Vec3::ZERO,
                duration,
            ));
        }
    }
    track
}

fn object_position(tick: kinema::Tick) -> Vec3 {
    match tick.pose {
        Some(PoseSample::Object(pose)) => pose.position,
        other => panic!("expected an object pose, got {other:?}"),
    }
}

// ============================================================================
// State machine basics
// ============================================================================

#[test]
fn initial_state_is_stopped() {
    let track = object_track(2.0, false, &[(0.0, Vec3::ZERO), (2.0, Vec3::X)]);
    let controller = PlaybackController::new(track.id);
    assert_eq!(controller.state(), PlaybackState::Stopped);
}

#[test]
fn play_requires_minimum_keyframes() {
    let empty = object_track(2.0, false, &[]);
    let mut controller = PlaybackController::new(empty.id);
    assert!(!controller.play(&empty));
    assert!(!controller.is_playing());

    let single_camera = camera_track(&[(Vec3::ZERO, 1.0)]);
    let mut controller = PlaybackController::new(single_camera.id);
    assert!(!controller.play(&single_camera), "camera needs two keyframes");
    assert!(!controller.is_playing());
}

#[test]
fn tick_while_stopped_emits_nothing() {
    let track = object_track(2.0, false, &[(0.0, Vec3::ZERO), (2.0, Vec3::X)]);
    let mut controller = PlaybackController::new(track.id);
    let tick = controller.tick(&track, 0.5);
    assert!(tick.pose.is_none());
    assert!(!tick.completed);
}

#[test]
fn stop_is_idempotent_and_resets_clock() {
    let track = object_track(2.0, false, &[(0.0, Vec3::ZERO), (2.0, Vec3::X)]);
    let mut controller = PlaybackController::new(track.id);
    controller.play(&track);
    controller.tick(&track, 1.0);
    controller.stop();
    controller.stop();
    assert_eq!(controller.state(), PlaybackState::Stopped);
    assert!(approx(controller.clock(), 0.0));
}

// ============================================================================
// Loop wrap
// ============================================================================

#[test]
fn loop_wraps_clock_modulo_duration() {
    let track = object_track(
        2.0,
        true,
        &[(0.0, Vec3::ZERO), (2.0, Vec3::new(10.0, 0.0, 0.0))],
    );
    let mut controller = PlaybackController::new(track.id);
    controller.play(&track);

    let mut clocks = Vec::new();
    for _ in 0..4 {
        controller.tick(&track, 0.5);
        clocks.push(controller.clock());
    }
    assert!(approx(clocks[0], 0.5));
    assert!(approx(clocks[1], 1.0));
    assert!(approx(clocks[2], 1.5));
    assert!(approx(clocks[3], 0.0), "clock should wrap, got {}", clocks[3]);
    assert!(controller.is_playing(), "looping track keeps playing after wrap");
}

#[test]
fn loop_never_reports_completion() {
    let track = object_track(1.0, true, &[(0.0, Vec3::ZERO), (1.0, Vec3::X)]);
    let mut controller = PlaybackController::new(track.id);
    controller.play(&track);
    for _ in 0..20 {
        assert!(!controller.tick(&track, 0.3).completed);
    }
}

// ============================================================================
// One-shot completion
// ============================================================================

#[test]
fn non_loop_completes_exactly_once() {
    let track = object_track(2.0, false, &[(0.0, Vec3::ZERO), (2.0, Vec3::X)]);
    let mut controller = PlaybackController::new(track.id);
    controller.play(&track);

    let tick = controller.tick(&track, 2.5);
    assert!(tick.completed, "tick past duration completes");
    assert!(
        approx(object_position(tick).x, 1.0),
        "final tick emits the end pose"
    );
    assert_eq!(controller.state(), PlaybackState::Stopped);

    // Subsequent ticks are inert: no pose, no second completion
    for _ in 0..3 {
        let tick = controller.tick(&track, 0.5);
        assert!(tick.pose.is_none());
        assert!(!tick.completed);
    }
}

#[test]
fn single_keyframe_object_plays_static_pose() {
    let track = object_track(2.0, false, &[(0.5, Vec3::new(3.0, 2.0, 1.0))]);
    let mut controller = PlaybackController::new(track.id);
    assert!(controller.play(&track));

    let tick = controller.tick(&track, 0.2);
    assert_eq!(object_position(tick), Vec3::new(3.0, 2.0, 1.0));
    let tick = controller.tick(&track, 0.2);
    assert_eq!(object_position(tick), Vec3::new(3.0, 2.0, 1.0));
}

// ============================================================================
// Mid-playback mutation
// ============================================================================

#[test]
fn deleting_bracketing_keyframe_recovers() {
    let mut track = object_track(
        2.0,
        false,
        &[
            (0.0, Vec3::ZERO),
            (1.0, Vec3::new(100.0, 0.0, 0.0)),
            (2.0, Vec3::new(10.0, 0.0, 0.0)),
        ],
    );
    let mut controller = PlaybackController::new(track.id);
    controller.play(&track);
    controller.tick(&track, 0.9);

    // Remove the keyframe at t=1.0, which brackets the playhead
    let middle = if let TrackData::Object { keys, .. } = &track.data {
        keys.sorted()[1].id
    } else {
        unreachable!()
    };
    track.remove_keyframe(middle);

    // Next tick re-derives the bracketing pair from what remains
    let tick = controller.tick(&track, 0.1);
    assert!(
        approx(object_position(tick).x, 5.0),
        "clock=1.0 across [0,2] should resolve to x=5"
    );
    assert!(controller.is_playing());
}

#[test]
fn track_emptied_mid_playback_stops_as_completed() {
    let mut track = object_track(2.0, false, &[(0.0, Vec3::ZERO), (2.0, Vec3::X)]);
    let mut controller = PlaybackController::new(track.id);
    controller.play(&track);
    controller.tick(&track, 0.5);

    let ids: Vec<_> = if let TrackData::Object { keys, .. } = &track.data {
        keys.sorted().iter().map(|k| k.id).collect()
    } else {
        unreachable!()
    };
    for id in ids {
        track.remove_keyframe(id);
    }

    let tick = controller.tick(&track, 0.5);
    assert!(tick.completed, "unplayable track finishes as a natural end");
    assert!(tick.pose.is_none());
    assert_eq!(controller.state(), PlaybackState::Stopped);
}

// ============================================================================
// Camera traversal
// ============================================================================

#[test]
fn camera_traverses_segments_sequentially() {
    // Segment lengths come from the arriving keyframe: a→b takes 2 s,
    // b→c takes 1 s.
    let track = camera_track(&[
        (Vec3::ZERO, 0.0),
        (Vec3::new(4.0, 0.0, 0.0), 2.0),
        (Vec3::new(4.0, 4.0, 0.0), 1.0),
    ]);
    let mut controller = PlaybackController::new(track.id);
    controller.play(&track);

    let tick = controller.tick(&track, 1.0);
    let pose = match tick.pose {
        Some(PoseSample::Camera(pose)) => pose,
        other => panic!("expected camera pose, got {other:?}"),
    };
    assert!(approx(pose.position.x, 2.0), "halfway through segment 0");

    // 1.5 s more: finishes segment 0 and carries 0.5 s into segment 1
    let tick = controller.tick(&track, 1.5);
    let pose = match tick.pose {
        Some(PoseSample::Camera(pose)) => pose,
        other => panic!("expected camera pose, got {other:?}"),
    };
    assert!(approx(pose.position.x, 4.0));
    assert!(approx(pose.position.y, 2.0), "halfway through segment 1");
    assert!(!tick.completed);

    // Finish the last segment
    let tick = controller.tick(&track, 0.5);
    let pose = match tick.pose {
        Some(PoseSample::Camera(pose)) => pose,
        other => panic!("expected camera pose, got {other:?}"),
    };
    assert!(approx(pose.position.y, 4.0), "rests at the final waypoint");
    assert!(tick.completed);
    assert_eq!(controller.state(), PlaybackState::Stopped);
}

#[test]
fn camera_waypoint_deleted_mid_flight() {
    let mut track = camera_track(&[
        (Vec3::ZERO, 0.0),
        (Vec3::new(2.0, 0.0, 0.0), 1.0),
        (Vec3::new(4.0, 0.0, 0.0), 1.0),
    ]);
    let mut controller = PlaybackController::new(track.id);
    controller.play(&track);
    controller.tick(&track, 1.5); // into segment 1

    let last = if let TrackData::Camera { keys } = &track.data {
        keys[2].id
    } else {
        unreachable!()
    };
    track.remove_keyframe(last);

    // Cursor is clamped back into the surviving range; the tick must not
    // panic and keeps traversing the remaining segment
    let tick = controller.tick(&track, 0.1);
    assert!(!tick.completed);
    let pose = match tick.pose {
        Some(PoseSample::Camera(pose)) => pose,
        other => panic!("expected camera pose, got {other:?}"),
    };
    assert!(pose.position.x <= 2.0 + EPSILON);
    assert!(controller.is_playing());

    // Running out the remaining segment finishes playback
    let tick = controller.tick(&track, 1.0);
    assert!(tick.completed);
}
