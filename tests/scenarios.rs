//! End-to-end camera scenarios driven through the public API with a
//! manual clock.

use std::time::Duration;

use glam::{DQuat, DVec2, DVec3};
use orbitcam::animation::{Animation, DampedAction, InterpolationManager};
use orbitcam::camera::{CameraState, MouseButton, OrbitCamera, RotationMode};
use orbitcam::math::{axis_rotation, slerp, Axis};
use orbitcam::util::ManualClock;
use orbitcam::Options;

fn camera(distance: f64) -> (OrbitCamera, ManualClock) {
    let clock = ManualClock::new(0.0);
    let mut options = Options::default();
    options.camera.distance = distance;
    (OrbitCamera::with_clock(&options, Box::new(clock.clone())), clock)
}

fn run_frames(camera: &mut OrbitCamera, clock: &ManualClock, frames: usize) {
    for _ in 0..frames {
        clock.advance(16.0);
        camera.tick();
    }
}

#[test]
fn test_immediate_distance() {
    let (mut camera, _) = camera(100.0);
    camera.set_distance(50.0, Duration::ZERO);
    assert_eq!(camera.state().distance(), 50.0);
    assert!(!camera.is_moving());
}

#[test]
fn test_animated_distance_hits_midpoint_then_snaps() {
    let (mut camera, clock) = camera(100.0);
    camera.set_distance(50.0, Duration::from_millis(300));

    clock.set(150.0);
    camera.tick();
    assert!((camera.state().distance() - 75.0).abs() < 1e-9);
    assert!(camera.is_moving());

    clock.set(297.5);
    camera.tick();
    assert_eq!(camera.state().distance(), 50.0);
    assert!(!camera.is_moving());
}

#[test]
fn test_reset_after_free_motion() {
    let (mut camera, clock) = camera(100.0);
    camera.mouse_drag(MouseButton::Left, 35.0, -20.0, DVec2::new(500.0, 150.0), false);
    camera.mouse_drag(MouseButton::Middle, -12.0, 30.0, DVec2::ZERO, false);
    camera.mouse_wheel(2.0);
    run_frames(&mut camera, &clock, 20);
    assert!(camera.look_at_point() != DVec3::ZERO);

    // reset mid-coast: inertia on every axis is cut
    camera.reset(Duration::from_millis(300));
    run_frames(&mut camera, &clock, 25);

    let state = camera.state();
    assert!(!camera.is_moving());
    assert!(state.rotation().abs_diff_eq(DQuat::IDENTITY, 1e-12));
    assert_eq!(state.center(), DVec3::ZERO);
    assert_eq!(state.distance(), 100.0);
}

#[test]
fn test_second_transition_wins() {
    let mut manager = InterpolationManager::new("distance");
    manager.start_interpolation(Animation::new(100.0, 0.0, Duration::from_millis(300)), 0.0);
    let _ = manager.tick(50.0);
    manager.start_interpolation(Animation::new(100.0, 500.0, Duration::from_millis(300)), 60.0);

    let mut last = None;
    let mut now = 60.0;
    while let Some(value) = manager.tick(now) {
        assert!(value >= 100.0, "A's samples must not reappear");
        last = Some(value);
        now += 10.0;
    }
    assert_eq!(last, Some(500.0));
}

#[test]
fn test_impulses_accumulate_before_decay() {
    let mut action = DampedAction::default();
    action.impulse(0.5);
    action.impulse(0.5);
    assert_eq!(action.velocity(), 1.0);
    assert!((action.tick().unwrap() - 0.84).abs() < 1e-12);
}

#[test]
fn test_slerp_endpoints_and_norm() {
    let a = axis_rotation(Axis::X, 0.4) * axis_rotation(Axis::Z, -1.1);
    let b = axis_rotation(Axis::Y, 2.3);
    assert!(slerp(a, b, 0.0).abs_diff_eq(a, 1e-6));
    assert!(slerp(a, b, 1.0).abs_diff_eq(b, 1e-6));
    for i in 0..=10 {
        let q = slerp(a, b, f64::from(i) / 10.0);
        assert!((q.length() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_pitch_locked_drag_never_yaws() {
    let (mut camera, clock) = camera(100.0);
    camera.set_rotation_mode(RotationMode::Pitch);
    camera.mouse_drag(MouseButton::Left, 50.0, 25.0, DVec2::new(400.0, 300.0), false);
    run_frames(&mut camera, &clock, 80);
    let eye = camera.position();
    assert!(eye.x.abs() < 1e-9);
    assert!(eye.y.abs() > 1.0);
}

#[test]
fn test_shift_drag_locks_first_direction() {
    let (mut camera, clock) = camera(100.0);
    // mostly horizontal first move locks to yaw for the rest of the drag
    camera.mouse_drag(MouseButton::Left, 20.0, 1.0, DVec2::new(400.0, 300.0), true);
    camera.mouse_drag(MouseButton::Left, 0.0, 40.0, DVec2::new(400.0, 300.0), true);
    run_frames(&mut camera, &clock, 80);
    assert!(camera.position().y.abs() < 1e-9);
    camera.mouse_released();

    // a fresh drag without shift is free again
    camera.mouse_drag(MouseButton::Left, 0.0, 40.0, DVec2::new(400.0, 300.0), false);
    run_frames(&mut camera, &clock, 80);
    assert!(camera.position().y.abs() > 1.0);
}

#[test]
fn test_look_at_then_immediate_state() {
    let (mut camera, clock) = camera(100.0);
    camera.look_at(DVec3::new(10.0, 0.0, 0.0), Some(20.0), Duration::from_millis(200));
    run_frames(&mut camera, &clock, 14);
    assert_eq!(camera.look_at_point(), DVec3::new(10.0, 0.0, 0.0));
    assert_eq!(camera.distance(), 20.0);

    let pose = CameraState::new(axis_rotation(Axis::Y, 1.0), DVec3::ONE, 30.0);
    camera.set_state(&pose, Duration::ZERO);
    let view = camera.view();
    assert!(((view.eye - view.center).length() - 30.0).abs() < 1e-9);
    assert_eq!(view.center, DVec3::ONE);
}
