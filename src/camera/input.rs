//! Mouse response curves for the orbit camera.
//!
//! The host turns device events into pixel deltas and cursor positions;
//! this module maps those onto damped-axis impulses. Which button drives
//! which gesture, and which rotation axes a drag may touch, are
//! configurable.

use glam::DVec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::DampedAxis;

/// Drag impulse divisor for the pan axes.
const PAN_DRAG_DIVISOR: f64 = 8.0;
/// Drag impulse divisor for the zoom axis.
const ZOOM_DRAG_DIVISOR: f64 = 10.0;
/// Base rotation gain per pixel.
const ROTATE_GAIN: f64 = 0.00125;
/// Scale inside the pan-speed square root.
const PAN_DISTANCE_SCALE: f64 = 0.0001;

/// Platform-agnostic mouse button identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Middle mouse button (wheel click).
    Middle,
    /// Secondary (right) mouse button.
    Right,
}

/// Gesture a mouse drag performs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DragAction {
    /// Trackball-style rotation about the look-at point.
    Rotate,
    /// Move the look-at point in the view plane.
    Pan,
    /// Move toward or away from the look-at point.
    Zoom,
    /// Ignore drags with this button.
    None,
}

/// Which [`DragAction`] each mouse button performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DragBindings {
    /// Action for the left button.
    pub left: DragAction,
    /// Action for the middle button.
    pub middle: DragAction,
    /// Action for the right button.
    pub right: DragAction,
}

impl DragBindings {
    /// Action bound to `button`.
    #[must_use]
    pub fn action(&self, button: MouseButton) -> DragAction {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
        }
    }

    /// Rebind `button`.
    pub fn set(&mut self, button: MouseButton, action: DragAction) {
        match button {
            MouseButton::Left => self.left = action,
            MouseButton::Middle => self.middle = action,
            MouseButton::Right => self.right = action,
        }
    }
}

impl Default for DragBindings {
    fn default() -> Self {
        Self {
            left: DragAction::Rotate,
            middle: DragAction::Pan,
            right: DragAction::Zoom,
        }
    }
}

/// Which rotation axes a drag may drive.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    /// Yaw, pitch, and roll.
    #[default]
    Free,
    /// Only rotation about the camera's Y axis.
    Yaw,
    /// Only rotation about the camera's X axis.
    Pitch,
    /// Only rotation about the camera's Z axis.
    Roll,
    /// Yaw and pitch, never roll.
    SuppressRoll,
}

impl RotationMode {
    /// Whether horizontal drags may yaw.
    #[must_use]
    pub fn allows_yaw(self) -> bool {
        matches!(self, Self::Free | Self::Yaw | Self::SuppressRoll)
    }

    /// Whether vertical drags may pitch.
    #[must_use]
    pub fn allows_pitch(self) -> bool {
        matches!(self, Self::Free | Self::Pitch | Self::SuppressRoll)
    }

    /// Whether drags may roll.
    #[must_use]
    pub fn allows_roll(self) -> bool {
        matches!(self, Self::Free | Self::Roll)
    }
}

/// Screen region the camera draws into, in host pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Viewport {
    /// Cursor position mapped onto `[-1, 1]²`, clamped to the viewport.
    #[must_use]
    pub fn normalize(&self, cursor: DVec2) -> DVec2 {
        let axis = |pos: f64, origin: f64, extent: f64| {
            if extent <= 0.0 {
                return 0.0;
            }
            ((pos - origin) / extent).clamp(0.0, 1.0) * 2.0 - 1.0
        };
        DVec2::new(
            axis(cursor.x, self.x, self.width),
            axis(cursor.y, self.y, self.height),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Axis lock chosen by a shift-drag.
///
/// Decided once per drag from the first clearly horizontal or vertical
/// motion, and dropped when shift or the button is released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragLock {
    locked: Option<RotationMode>,
}

impl DragLock {
    /// Feed one drag delta; returns the lock in effect, if any.
    pub fn update(&mut self, dx: f64, dy: f64, shift: bool) -> Option<RotationMode> {
        if !shift {
            self.locked = None;
        } else if self.locked.is_none() && (dx - dy).abs() > 1.0 {
            self.locked = Some(if dx.abs() > dy.abs() {
                RotationMode::Yaw
            } else {
                RotationMode::Pitch
            });
        }
        self.locked
    }

    /// Forget the lock.
    pub fn release(&mut self) {
        self.locked = None;
    }

    /// The lock in effect, if any.
    #[must_use]
    pub fn current(&self) -> Option<RotationMode> {
        self.locked
    }
}

/// Impulses for a rotation drag of `(dx, dy)` pixels.
///
/// The cursor position (normalized by [`Viewport::normalize`]) spreads the
/// drag across yaw, pitch, and roll: near the center a drag yaws and
/// pitches, near the edges it increasingly rolls, like dragging a
/// trackball. Gain grows slowly with distance.
#[must_use]
pub fn rotate_impulses(
    dx: f64,
    dy: f64,
    cursor: DVec2,
    distance: f64,
    mode: RotationMode,
) -> Vec<(DampedAxis, f64)> {
    let mult = -(1.0 + distance).log10().sqrt() * ROTATE_GAIN;
    let dmx = dx * mult;
    let dmy = dy * mult;

    let mut impulses = Vec::with_capacity(4);
    if mode.allows_yaw() {
        impulses.push((DampedAxis::RotateY, dmx * (1.0 - cursor.y * cursor.y)));
    }
    if mode.allows_pitch() {
        impulses.push((DampedAxis::RotateX, -dmy * (1.0 - cursor.x * cursor.x)));
    }
    if mode.allows_roll() {
        impulses.push((DampedAxis::RotateZ, -dmx * cursor.y));
        impulses.push((DampedAxis::RotateZ, dmy * cursor.x));
    }
    impulses
}

/// Impulses for a pan drag; a shift lock keeps only its axis.
#[must_use]
pub fn pan_impulses(dx: f64, dy: f64, lock: Option<RotationMode>) -> [(DampedAxis, f64); 2] {
    let dx = if lock == Some(RotationMode::Pitch) { 0.0 } else { dx };
    let dy = if lock == Some(RotationMode::Yaw) { 0.0 } else { dy };
    [
        (DampedAxis::PanX, dx / PAN_DRAG_DIVISOR),
        (DampedAxis::PanY, dy / PAN_DRAG_DIVISOR),
    ]
}

/// World units panned per unit of pan velocity at `distance`.
#[must_use]
pub fn pan_scale(distance: f64) -> f64 {
    (distance * PAN_DISTANCE_SCALE).sqrt()
}

/// Zoom impulse for `amount` (drag pixels or scaled wheel ticks).
///
/// Proportional to `ln(1 + distance)`, so zoom speed follows how far out
/// the camera already is.
#[must_use]
pub fn zoom_impulse(amount: f64, distance: f64) -> f64 {
    amount * distance.max(0.0).ln_1p()
}

/// Zoom impulse for a vertical drag of `dy` pixels.
#[must_use]
pub fn zoom_drag_impulse(dy: f64, distance: f64) -> f64 {
    zoom_impulse(dy / ZOOM_DRAG_DIVISOR, distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(impulses: &[(DampedAxis, f64)], axis: DampedAxis) -> f64 {
        impulses
            .iter()
            .filter(|(a, _)| *a == axis)
            .map(|(_, v)| v)
            .sum()
    }

    #[test]
    fn test_default_bindings() {
        let bindings = DragBindings::default();
        assert_eq!(bindings.action(MouseButton::Left), DragAction::Rotate);
        assert_eq!(bindings.action(MouseButton::Middle), DragAction::Pan);
        assert_eq!(bindings.action(MouseButton::Right), DragAction::Zoom);
    }

    #[test]
    fn test_rebind() {
        let mut bindings = DragBindings::default();
        bindings.set(MouseButton::Right, DragAction::None);
        assert_eq!(bindings.action(MouseButton::Right), DragAction::None);
    }

    #[test]
    fn test_viewport_normalize() {
        let vp = Viewport {
            x: 100.0,
            y: 0.0,
            width: 200.0,
            height: 100.0,
        };
        assert_eq!(vp.normalize(DVec2::new(200.0, 50.0)), DVec2::ZERO);
        assert_eq!(vp.normalize(DVec2::new(100.0, 0.0)), DVec2::new(-1.0, -1.0));
        // clamped outside the viewport
        assert_eq!(vp.normalize(DVec2::new(900.0, -40.0)), DVec2::new(1.0, -1.0));

        let empty = Viewport {
            width: 0.0,
            ..vp
        };
        assert_eq!(empty.normalize(DVec2::new(5.0, 50.0)).x, 0.0);
    }

    #[test]
    fn test_center_drag_has_no_roll() {
        let impulses = rotate_impulses(10.0, 5.0, DVec2::ZERO, 100.0, RotationMode::Free);
        assert!(total(&impulses, DampedAxis::RotateY) != 0.0);
        assert!(total(&impulses, DampedAxis::RotateX) != 0.0);
        assert_eq!(total(&impulses, DampedAxis::RotateZ), 0.0);
    }

    #[test]
    fn test_edge_drag_rolls() {
        // vertical drag at the right edge: all roll, no pitch
        let impulses =
            rotate_impulses(0.0, 10.0, DVec2::new(1.0, 0.0), 100.0, RotationMode::Free);
        assert_eq!(total(&impulses, DampedAxis::RotateX), 0.0);
        assert!(total(&impulses, DampedAxis::RotateZ) != 0.0);
    }

    #[test]
    fn test_rotation_gain_grows_with_distance() {
        let near = rotate_impulses(10.0, 0.0, DVec2::ZERO, 10.0, RotationMode::Free);
        let far = rotate_impulses(10.0, 0.0, DVec2::ZERO, 1000.0, RotationMode::Free);
        assert!(
            total(&far, DampedAxis::RotateY).abs() > total(&near, DampedAxis::RotateY).abs()
        );
    }

    #[test]
    fn test_rotation_modes_gate_axes() {
        let cursor = DVec2::new(0.5, 0.5);
        let yaw = rotate_impulses(10.0, 10.0, cursor, 100.0, RotationMode::Yaw);
        assert!(yaw.iter().all(|(a, _)| *a == DampedAxis::RotateY));

        let pitch = rotate_impulses(10.0, 10.0, cursor, 100.0, RotationMode::Pitch);
        assert!(pitch.iter().all(|(a, _)| *a == DampedAxis::RotateX));

        let roll = rotate_impulses(10.0, 10.0, cursor, 100.0, RotationMode::Roll);
        assert!(roll.iter().all(|(a, _)| *a == DampedAxis::RotateZ));

        let no_roll = rotate_impulses(10.0, 10.0, cursor, 100.0, RotationMode::SuppressRoll);
        assert!(no_roll.iter().all(|(a, _)| *a != DampedAxis::RotateZ));
        assert_eq!(no_roll.len(), 2);
    }

    #[test]
    fn test_drag_lock_decides_once() {
        let mut lock = DragLock::default();
        assert_eq!(lock.update(5.0, 1.0, false), None);
        // |dx - dy| <= 1 is too ambiguous to decide
        assert_eq!(lock.update(1.0, 0.5, true), None);
        assert_eq!(lock.update(6.0, 1.0, true), Some(RotationMode::Yaw));
        // later vertical motion keeps the first decision
        assert_eq!(lock.update(0.0, 9.0, true), Some(RotationMode::Yaw));
        lock.release();
        assert_eq!(lock.current(), None);
        assert_eq!(lock.update(0.0, 9.0, true), Some(RotationMode::Pitch));
        assert_eq!(lock.update(0.0, 9.0, false), None);
    }

    #[test]
    fn test_pan_lock_keeps_one_axis() {
        assert_eq!(
            pan_impulses(8.0, 16.0, None),
            [(DampedAxis::PanX, 1.0), (DampedAxis::PanY, 2.0)]
        );
        assert_eq!(
            pan_impulses(8.0, 16.0, Some(RotationMode::Yaw)),
            [(DampedAxis::PanX, 1.0), (DampedAxis::PanY, 0.0)]
        );
        assert_eq!(
            pan_impulses(8.0, 16.0, Some(RotationMode::Pitch)),
            [(DampedAxis::PanX, 0.0), (DampedAxis::PanY, 2.0)]
        );
    }

    #[test]
    fn test_zoom_and_pan_scale_with_distance() {
        assert!(zoom_impulse(1.0, 1000.0) > zoom_impulse(1.0, 10.0));
        assert_eq!(zoom_impulse(1.0, 0.0), 0.0);
        assert!((zoom_drag_impulse(10.0, 100.0) - 101.0_f64.ln()).abs() < 1e-12);
        assert!((pan_scale(100.0) - 0.1).abs() < 1e-12);
    }
}
