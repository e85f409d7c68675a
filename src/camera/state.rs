//! The authoritative camera pose and its published view.

use glam::{DQuat, DVec3};

use super::core::CameraView;
use crate::math::apply_to;

/// Direction from the look-at point to the eye in the camera's frame.
pub const LOOK: DVec3 = DVec3::Z;
/// Up direction in the camera's frame.
pub const UP: DVec3 = DVec3::Y;

/// Snapshot of a pose: rotation, look-at point, and distance.
///
/// Used both as a transition target and as a copy of the current pose.
/// The rotation is normalized on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    rotation: DQuat,
    center: DVec3,
    distance: f64,
}

impl CameraState {
    /// Pose from its three components.
    #[must_use]
    pub fn new(rotation: DQuat, center: DVec3, distance: f64) -> Self {
        Self {
            rotation: rotation.normalize(),
            center,
            distance,
        }
    }

    /// Orientation of the camera.
    #[must_use]
    pub fn rotation(&self) -> DQuat {
        self.rotation
    }

    /// Look-at point.
    #[must_use]
    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Distance from the look-at point to the eye.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Eye position, look-at point, and up vector for this pose.
    #[must_use]
    pub fn view(&self) -> CameraView {
        CameraView {
            eye: self.center + apply_to(self.rotation, LOOK) * self.distance,
            center: self.center,
            up: apply_to(self.rotation, UP),
        }
    }
}

/// Closed range the camera distance is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceLimits {
    /// Closest allowed distance.
    pub minimum: f64,
    /// Farthest allowed distance.
    pub maximum: f64,
}

impl DistanceLimits {
    /// Clamp `distance` into `[minimum, maximum]`.
    #[must_use]
    pub fn clamp(&self, distance: f64) -> f64 {
        distance.max(self.minimum).min(self.maximum)
    }
}

impl Default for DistanceLimits {
    fn default() -> Self {
        Self {
            minimum: 1.0,
            maximum: f64::MAX,
        }
    }
}

/// Callback receiving every published view.
pub type ViewListener = Box<dyn FnMut(&CameraView) + Send>;

/// Mutable pose plus its derived view.
///
/// Mutators only stage changes; [`publish`](Self::publish) recomputes the
/// view, bumps the revision, and notifies the listener.
pub(crate) struct PoseState {
    rotation: DQuat,
    center: DVec3,
    distance: f64,
    limits: DistanceLimits,
    view: CameraView,
    revision: u64,
    listener: Option<ViewListener>,
}

impl PoseState {
    pub(crate) fn new(center: DVec3, distance: f64, limits: DistanceLimits) -> Self {
        let distance = limits.clamp(distance);
        Self {
            rotation: DQuat::IDENTITY,
            center,
            distance,
            limits,
            view: CameraState::new(DQuat::IDENTITY, center, distance).view(),
            revision: 0,
            listener: None,
        }
    }

    pub(crate) fn snapshot(&self) -> CameraState {
        CameraState {
            rotation: self.rotation,
            center: self.center,
            distance: self.distance,
        }
    }

    pub(crate) fn rotation(&self) -> DQuat {
        self.rotation
    }

    pub(crate) fn center(&self) -> DVec3 {
        self.center
    }

    pub(crate) fn distance(&self) -> f64 {
        self.distance
    }

    pub(crate) fn limits(&self) -> DistanceLimits {
        self.limits
    }

    pub(crate) fn view(&self) -> &CameraView {
        &self.view
    }

    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn set_rotation(&mut self, rotation: DQuat) {
        self.rotation = rotation;
    }

    pub(crate) fn set_center(&mut self, center: DVec3) {
        self.center = center;
    }

    /// Set the distance, clamped into the current limits.
    pub(crate) fn set_distance(&mut self, distance: f64) {
        self.distance = self.limits.clamp(distance);
    }

    /// Replace the limits and re-clamp the current distance.
    pub(crate) fn set_limits(&mut self, limits: DistanceLimits) {
        self.limits = limits;
        self.set_distance(self.distance);
    }

    /// Replace all three components; distance is clamped.
    pub(crate) fn apply(&mut self, state: &CameraState) {
        self.rotation = state.rotation;
        self.center = state.center;
        self.set_distance(state.distance);
    }

    pub(crate) fn set_listener(&mut self, listener: Option<ViewListener>) {
        self.listener = listener;
    }

    /// Recompute the view from the pose and hand it to the listener.
    pub(crate) fn publish(&mut self) {
        self.view = self.snapshot().view();
        self.revision += 1;
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.view);
        }
    }
}

impl std::fmt::Debug for PoseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoseState")
            .field("rotation", &self.rotation)
            .field("center", &self.center)
            .field("distance", &self.distance)
            .field("limits", &self.limits)
            .field("revision", &self.revision)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::math::{axis_rotation, Axis};

    #[test]
    fn test_identity_view_looks_down_negative_z() {
        let state = CameraState::new(DQuat::IDENTITY, DVec3::new(1.0, 2.0, 3.0), 10.0);
        let view = state.view();
        assert_eq!(view.eye, DVec3::new(1.0, 2.0, 13.0));
        assert_eq!(view.center, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(view.up, DVec3::Y);
    }

    #[test]
    fn test_rotated_view_orbits_center() {
        let state = CameraState::new(axis_rotation(Axis::Y, FRAC_PI_2), DVec3::ZERO, 5.0);
        let view = state.view();
        assert!(view.eye.abs_diff_eq(DVec3::new(5.0, 0.0, 0.0), 1e-12));
        assert!(view.up.abs_diff_eq(DVec3::Y, 1e-12));
        assert!(((view.eye - view.center).length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_state_normalizes_rotation() {
        let state = CameraState::new(DQuat::from_xyzw(0.0, 0.0, 0.0, 2.0), DVec3::ZERO, 1.0);
        assert_eq!(state.rotation(), DQuat::IDENTITY);
    }

    #[test]
    fn test_limits_clamp() {
        let limits = DistanceLimits {
            minimum: 10.0,
            maximum: 20.0,
        };
        assert_eq!(limits.clamp(5.0), 10.0);
        assert_eq!(limits.clamp(15.0), 15.0);
        assert_eq!(limits.clamp(25.0), 20.0);
    }

    #[test]
    fn test_pose_clamps_distance() {
        let mut pose = PoseState::new(DVec3::ZERO, 0.5, DistanceLimits::default());
        assert_eq!(pose.distance(), 1.0);
        pose.set_limits(DistanceLimits {
            minimum: 2.0,
            maximum: 3.0,
        });
        assert_eq!(pose.distance(), 2.0);
        pose.apply(&CameraState::new(DQuat::IDENTITY, DVec3::X, 99.0));
        assert_eq!(pose.snapshot().distance(), 3.0);
        assert_eq!(pose.center(), DVec3::X);
    }

    #[test]
    fn test_publish_updates_view_and_notifies() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut pose = PoseState::new(DVec3::ZERO, 10.0, DistanceLimits::default());
        pose.set_listener(Some(Box::new(move |view: &CameraView| {
            sink.lock().unwrap().push(view.eye);
        })));

        pose.set_center(DVec3::new(0.0, 1.0, 0.0));
        // staged, not yet published
        assert_eq!(pose.view().center, DVec3::ZERO);
        assert_eq!(pose.revision(), 0);

        pose.publish();
        assert_eq!(pose.view().eye, DVec3::new(0.0, 1.0, 10.0));
        assert_eq!(pose.revision(), 1);
        assert_eq!(*seen.lock().unwrap(), vec![DVec3::new(0.0, 1.0, 10.0)]);
    }
}
