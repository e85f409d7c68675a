use std::time::Duration;

use glam::{DQuat, DVec2, DVec3};

use super::core::CameraView;
use super::input::{
    pan_impulses, pan_scale, rotate_impulses, zoom_drag_impulse, zoom_impulse, DragAction,
    DragBindings, DragLock, MouseButton, RotationMode, Viewport,
};
use super::state::{CameraState, DistanceLimits, PoseState, ViewListener};
use crate::animation::{
    Animation, DampedAxes, DampedAxis, InterpolationManager,
};
use crate::math::{
    apply_to, axis_rotation, compose, from_euler, rotations_as_euler, Axis,
    EulerOrder,
};
use crate::options::Options;
use crate::util::clock::{Clock, SystemClock};

/// Orbit camera: a pose driven by immediate moves, damped inertial axes,
/// and timed transitions.
///
/// Every change funnels through one publish step that recomputes the
/// [`CameraView`]. Call [`tick`](Self::tick) once per frame.
pub struct OrbitCamera {
    pose: PoseState,
    start_center: DVec3,
    start_distance: f64,

    axes: DampedAxes,
    rotation_interps: InterpolationManager<DQuat>,
    center_interps: InterpolationManager<DVec3>,
    distance_interps: InterpolationManager<f64>,

    clock: Box<dyn Clock>,
    /// Timestamp of the last [`OrbitCamera::tick_at`], while the host
    /// drives time itself.
    host_now: Option<f64>,
    default_duration: Duration,

    active: bool,
    reset_on_double_click: bool,
    wheel_scale: f64,
    rotation_mode: RotationMode,
    drag_bindings: DragBindings,
    drag_lock: DragLock,
    viewport: Viewport,
}

impl OrbitCamera {
    /// Transition length used when none is given.
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

    /// Camera looking at the origin from `distance`.
    #[must_use]
    pub fn new(distance: f64) -> Self {
        Self::looking_at(DVec3::ZERO, distance)
    }

    /// Camera looking at `center` from `distance`, with default options.
    #[must_use]
    pub fn looking_at(center: DVec3, distance: f64) -> Self {
        let mut options = Options::default();
        options.camera.center = center.to_array();
        options.camera.distance = distance;
        Self::from_options(&options)
    }

    /// Camera configured from `options`, timed by the system clock.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self::with_clock(options, Box::new(SystemClock::new()))
    }

    /// Camera configured from `options`, timed by `clock`.
    #[must_use]
    pub fn with_clock(options: &Options, clock: Box<dyn Clock>) -> Self {
        let options = options.sanitized();
        let camera = &options.camera;
        let limits = DistanceLimits {
            minimum: camera.minimum_distance,
            maximum: camera.maximum_distance,
        };
        let center = DVec3::from_array(camera.center);
        let pose = PoseState::new(center, camera.distance, limits);
        let start_distance = pose.distance();

        let mut this = Self {
            pose,
            start_center: center,
            start_distance,
            axes: DampedAxes::new(camera.friction),
            rotation_interps: InterpolationManager::new("rotation"),
            center_interps: InterpolationManager::new("center"),
            distance_interps: InterpolationManager::new("distance"),
            clock,
            host_now: None,
            default_duration: Duration::from_millis(camera.default_duration_ms),
            active: true,
            reset_on_double_click: options.input.reset_on_double_click,
            wheel_scale: options.input.wheel_scale,
            rotation_mode: options.input.rotation_mode,
            drag_bindings: options.input.drag_bindings,
            drag_lock: DragLock::default(),
            viewport: Viewport::default(),
        };
        this.feed();
        this
    }

    /// Recompute the view and publish it.
    pub fn feed(&mut self) {
        self.pose.publish();
    }

    /// Advance damped axes and transitions to the clock's current time.
    pub fn tick(&mut self) {
        let now = self.clock.now_millis();
        if let Some(host_now) = self.host_now.take() {
            self.rebase_transitions(now - host_now);
        }
        self.advance(now);
    }

    /// Advance damped axes and transitions to `now_ms` on the host's own
    /// millisecond timeline.
    ///
    /// From the first call on, transitions start at the latest host
    /// timestamp and [`time_remaining`](Self::time_remaining) is measured
    /// against it. Transitions already running are shifted onto the host
    /// timeline with their elapsed time preserved.
    pub fn tick_at(&mut self, now_ms: f64) {
        if self.host_now.is_none() {
            let offset = now_ms - self.clock.now_millis();
            self.rebase_transitions(offset);
        }
        self.host_now = Some(now_ms);
        self.advance(now_ms);
    }

    /// Current time on whichever timeline drives the camera.
    fn now_millis(&self) -> f64 {
        self.host_now.unwrap_or_else(|| self.clock.now_millis())
    }

    fn rebase_transitions(&mut self, offset_ms: f64) {
        self.rotation_interps.rebase(offset_ms);
        self.center_interps.rebase(offset_ms);
        self.distance_interps.rebase(offset_ms);
    }

    /// Step everything to `now_ms`; publishes once if anything moved.
    fn advance(&mut self, now_ms: f64) {
        let deltas: Vec<(DampedAxis, f64)> = self.axes.tick().collect();
        let mut changed = !deltas.is_empty();
        for (axis, velocity) in deltas {
            self.apply_damped(axis, velocity);
        }

        if let Some(rotation) = self.rotation_interps.tick(now_ms) {
            self.pose.set_rotation(rotation);
            changed = true;
        }
        if let Some(center) = self.center_interps.tick(now_ms) {
            self.pose.set_center(center);
            changed = true;
        }
        if let Some(distance) = self.distance_interps.tick(now_ms) {
            self.pose.set_distance(distance);
            changed = true;
        }

        if changed {
            self.feed();
        }
    }

    fn apply_damped(&mut self, axis: DampedAxis, velocity: f64) {
        match axis {
            DampedAxis::RotateX => self.compose_rotation(Axis::X, velocity),
            DampedAxis::RotateY => self.compose_rotation(Axis::Y, velocity),
            DampedAxis::RotateZ => self.compose_rotation(Axis::Z, velocity),
            DampedAxis::Zoom => self.pose.set_distance(self.pose.distance() + velocity),
            DampedAxis::PanX => {
                let scale = pan_scale(self.pose.distance());
                self.translate(-velocity * scale, 0.0);
            }
            DampedAxis::PanY => {
                let scale = pan_scale(self.pose.distance());
                self.translate(0.0, -velocity * scale);
            }
        }
    }

    fn compose_rotation(&mut self, axis: Axis, angle: f64) {
        self.pose
            .set_rotation(compose(self.pose.rotation(), axis_rotation(axis, angle)));
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let offset = apply_to(self.pose.rotation(), DVec3::new(dx, dy, 0.0));
        self.pose.set_center(self.pose.center() + offset);
    }

    // -- Immediate moves --------------------------------------------------

    /// Move the look-at point by `(dx, dy)` in the camera's view plane.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.translate(dx, dy);
        self.feed();
    }

    /// Rotate about the camera's local X axis.
    pub fn rotate_x(&mut self, angle: f64) {
        self.compose_rotation(Axis::X, angle);
        self.feed();
    }

    /// Rotate about the camera's local Y axis.
    pub fn rotate_y(&mut self, angle: f64) {
        self.compose_rotation(Axis::Y, angle);
        self.feed();
    }

    /// Rotate about the camera's local Z axis.
    pub fn rotate_z(&mut self, angle: f64) {
        self.compose_rotation(Axis::Z, angle);
        self.feed();
    }

    /// Replace the rotation with `Rx(pitch) * Ry(yaw) * Rz(roll)`,
    /// cancelling any rotation transition.
    pub fn set_rotations(&mut self, pitch: f64, yaw: f64, roll: f64) {
        self.rotation_interps.cancel_interpolation();
        self.pose
            .set_rotation(from_euler(EulerOrder::Xyz, [pitch, yaw, roll]));
        self.feed();
    }

    /// Add an impulse to one damped axis.
    pub fn impulse(&mut self, axis: DampedAxis, amount: f64) {
        self.axes[axis].impulse(amount);
    }

    // -- Transitions ------------------------------------------------------

    /// Move to `distance` (clamped) over `duration`; zero is immediate.
    pub fn set_distance(&mut self, distance: f64, duration: Duration) {
        if duration.is_zero() {
            self.distance_interps.cancel_interpolation();
            self.pose.set_distance(distance);
            self.feed();
            return;
        }
        let end = self.pose.limits().clamp(distance);
        self.start_distance_transition(end, duration);
    }

    /// Look at `(x, y, z)`, optionally from a new distance, keeping the
    /// current rotation.
    pub fn look_at(&mut self, center: DVec3, distance: Option<f64>, duration: Duration) {
        let distance = distance.unwrap_or_else(|| self.pose.distance());
        let target = CameraState::new(self.pose.rotation(), center, distance);
        self.set_state(&target, duration);
    }

    /// Move to `state` over `duration`; zero is immediate.
    ///
    /// Rotation, center, and distance each run in their own slot, launched
    /// together with the same duration.
    pub fn set_state(&mut self, state: &CameraState, duration: Duration) {
        if duration.is_zero() {
            self.rotation_interps.cancel_interpolation();
            self.center_interps.cancel_interpolation();
            self.distance_interps.cancel_interpolation();
            self.pose.apply(state);
        } else {
            let now = self.now_millis();
            self.axes.stop(&DampedAxis::ROTATION);
            self.rotation_interps.start_interpolation(
                Animation::new(self.pose.rotation(), state.rotation(), duration),
                now,
            );
            self.axes.stop(&[DampedAxis::PanX, DampedAxis::PanY]);
            self.center_interps.start_interpolation(
                Animation::new(self.pose.center(), state.center(), duration),
                now,
            );
            let end = self.pose.limits().clamp(state.distance());
            self.start_distance_transition(end, duration);
        }
        self.feed();
    }

    fn start_distance_transition(&mut self, end: f64, duration: Duration) {
        self.axes[DampedAxis::Zoom].stop();
        let now = self.now_millis();
        self.distance_interps
            .start_interpolation(Animation::new(self.pose.distance(), end, duration), now);
    }

    /// Return to the starting pose: identity rotation, initial center and
    /// distance.
    pub fn reset(&mut self, duration: Duration) {
        let home = CameraState::new(DQuat::IDENTITY, self.start_center, self.start_distance);
        self.set_state(&home, duration);
    }

    // -- Mouse-driven behaviors -------------------------------------------

    /// Respond to a drag of `(dx, dy)` pixels with `button` held and the
    /// cursor at `cursor` (host pixels).
    ///
    /// Ignored while inactive.
    pub fn mouse_drag(
        &mut self,
        button: MouseButton,
        dx: f64,
        dy: f64,
        cursor: DVec2,
        shift: bool,
    ) {
        if !self.active {
            return;
        }
        let lock = self.drag_lock.update(dx, dy, shift);
        match self.drag_bindings.action(button) {
            DragAction::Rotate => {
                let mode = lock.unwrap_or(self.rotation_mode);
                let cursor = self.viewport.normalize(cursor);
                for (axis, amount) in
                    rotate_impulses(dx, dy, cursor, self.pose.distance(), mode)
                {
                    self.axes[axis].impulse(amount);
                }
            }
            DragAction::Pan => {
                for (axis, amount) in pan_impulses(dx, dy, lock) {
                    self.axes[axis].impulse(amount);
                }
            }
            DragAction::Zoom => {
                let amount = zoom_drag_impulse(dy, self.pose.distance());
                self.axes[DampedAxis::Zoom].impulse(amount);
            }
            DragAction::None => {}
        }
    }

    /// Respond to `ticks` wheel notches (positive moves away).
    ///
    /// Ignored while inactive.
    pub fn mouse_wheel(&mut self, ticks: f64) {
        if !self.active {
            return;
        }
        let amount = zoom_impulse(self.wheel_scale * ticks, self.pose.distance());
        self.axes[DampedAxis::Zoom].impulse(amount);
    }

    /// A mouse button or shift was released; drop any shift-drag lock.
    pub fn mouse_released(&mut self) {
        self.drag_lock.release();
    }

    /// A double click was detected by the host; resets over the default
    /// duration when enabled.
    pub fn double_click(&mut self) {
        if self.active && self.reset_on_double_click {
            self.reset(self.default_duration);
        }
    }

    // -- Queries ----------------------------------------------------------

    /// Copy of the current pose.
    #[must_use]
    pub fn state(&self) -> CameraState {
        self.pose.snapshot()
    }

    /// Latest published view.
    #[must_use]
    pub fn view(&self) -> &CameraView {
        self.pose.view()
    }

    /// Number of publishes so far; changes whenever the view may have.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.pose.revision()
    }

    /// Eye position in world space.
    #[must_use]
    pub fn position(&self) -> DVec3 {
        self.pose.view().eye
    }

    /// Current look-at point.
    #[must_use]
    pub fn look_at_point(&self) -> DVec3 {
        self.pose.center()
    }

    /// Current distance from the look-at point.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.pose.distance()
    }

    /// The rotation as per-axis `[x, y, z]` angles.
    ///
    /// Falls back through alternate Euler orders near gimbal lock, and to
    /// zeros if none works.
    #[must_use]
    pub fn rotations(&self) -> [f64; 3] {
        rotations_as_euler(self.pose.rotation())
    }

    /// Longest remaining transition time in milliseconds.
    #[must_use]
    pub fn time_remaining(&self) -> f64 {
        let now = self.now_millis();
        self.rotation_interps
            .time_remaining(now)
            .max(self.center_interps.time_remaining(now))
            .max(self.distance_interps.time_remaining(now))
    }

    /// Whether any damped axis or transition is still in motion.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.axes.any_moving() || self.time_remaining() > 0.0
    }

    // -- Configuration ----------------------------------------------------

    /// Set the closest allowed distance, re-clamping now.
    pub fn set_minimum_distance(&mut self, minimum: f64) {
        let limits = DistanceLimits {
            minimum,
            ..self.pose.limits()
        };
        self.pose.set_limits(limits);
        self.feed();
    }

    /// Set the farthest allowed distance, re-clamping now.
    pub fn set_maximum_distance(&mut self, maximum: f64) {
        let limits = DistanceLimits {
            maximum,
            ..self.pose.limits()
        };
        self.pose.set_limits(limits);
        self.feed();
    }

    /// Current distance limits.
    #[must_use]
    pub fn distance_limits(&self) -> DistanceLimits {
        self.pose.limits()
    }

    /// Transition length used by [`double_click`](Self::double_click) and
    /// available to hosts.
    #[must_use]
    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    /// Replace the default transition length.
    pub fn set_default_duration(&mut self, duration: Duration) {
        self.default_duration = duration;
    }

    /// Friction of every damped axis. NaN keeps the default; other values
    /// are clamped so every axis still decays.
    pub fn set_friction(&mut self, friction: f64) {
        self.axes.set_friction(friction);
    }

    /// Enable or disable mouse-driven behaviors.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.drag_lock.release();
        }
    }

    /// Whether mouse-driven behaviors are enabled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable reset on double click.
    pub fn set_reset_on_double_click(&mut self, reset_on_double_click: bool) {
        self.reset_on_double_click = reset_on_double_click;
    }

    /// Whether a double click resets the camera.
    #[must_use]
    pub fn resets_on_double_click(&self) -> bool {
        self.reset_on_double_click
    }

    /// Multiplier for wheel zoom.
    pub fn set_wheel_scale(&mut self, wheel_scale: f64) {
        self.wheel_scale = wheel_scale;
    }

    /// Multiplier for wheel zoom.
    #[must_use]
    pub fn wheel_scale(&self) -> f64 {
        self.wheel_scale
    }

    /// Restrict which axes rotation drags may drive.
    pub fn set_rotation_mode(&mut self, mode: RotationMode) {
        self.rotation_mode = mode;
    }

    /// Current rotation restriction.
    #[must_use]
    pub fn rotation_mode(&self) -> RotationMode {
        self.rotation_mode
    }

    /// Bind `action` to drags with `button`.
    pub fn set_drag_action(&mut self, button: MouseButton, action: DragAction) {
        self.drag_bindings.set(button, action);
    }

    /// Current button bindings.
    #[must_use]
    pub fn drag_bindings(&self) -> DragBindings {
        self.drag_bindings
    }

    /// Region used to normalize cursor positions for rotation drags.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Region used to normalize cursor positions for rotation drags.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Receive every published view; `None` removes the listener.
    pub fn set_view_listener(&mut self, listener: Option<ViewListener>) {
        self.pose.set_listener(listener);
    }
}

impl std::fmt::Debug for OrbitCamera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbitCamera")
            .field("pose", &self.pose)
            .field("start_center", &self.start_center)
            .field("start_distance", &self.start_distance)
            .field("active", &self.active)
            .field("rotation_mode", &self.rotation_mode)
            .finish_non_exhaustive()
    }
}
