//! Damped impulse integration for inertial drag, zoom, and rotation.
//!
//! An impulse adds to a running velocity; each frame the velocity decays by
//! a constant factor and is handed back to the owner as that frame's delta.
//! Motion ends exactly at zero once the velocity falls below
//! [`DampedAction::REST_THRESHOLD`].

use std::ops::{Index, IndexMut};

/// The scalar quantity a [`DampedAction`] drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DampedAxis {
    /// Incremental rotation about the camera's local X axis.
    RotateX,
    /// Incremental rotation about the camera's local Y axis.
    RotateY,
    /// Incremental rotation about the camera's local Z axis.
    RotateZ,
    /// Change in distance from the look-at point.
    Zoom,
    /// Horizontal pan in camera space.
    PanX,
    /// Vertical pan in camera space.
    PanY,
}

impl DampedAxis {
    /// Every axis, in per-frame update order.
    pub const ALL: [Self; 6] = [
        Self::RotateX,
        Self::RotateY,
        Self::RotateZ,
        Self::Zoom,
        Self::PanX,
        Self::PanY,
    ];

    /// The three rotation axes.
    pub const ROTATION: [Self; 3] = [Self::RotateX, Self::RotateY, Self::RotateZ];

    const fn slot(self) -> usize {
        self as usize
    }
}

/// Velocity that decays geometrically once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedAction {
    velocity: f64,
    dampening: f64,
}

impl DampedAction {
    /// Friction applied when none is configured.
    pub const DEFAULT_FRICTION: f64 = 0.16;

    /// Velocities below this magnitude snap to zero.
    pub const REST_THRESHOLD: f64 = 0.001;

    /// Lowest accepted friction; any lower would never come to rest.
    pub const MIN_FRICTION: f64 = Self::REST_THRESHOLD;

    /// Highest accepted friction.
    pub const MAX_FRICTION: f64 = 1.0 - Self::REST_THRESHOLD;

    /// At rest, with the given friction (`dampening = 1 - friction`).
    ///
    /// Friction is sanitized as in [`set_friction`](Self::set_friction).
    #[must_use]
    pub fn new(friction: f64) -> Self {
        Self {
            velocity: 0.0,
            dampening: dampening_for(friction),
        }
    }

    /// Add `amount` to the current velocity.
    ///
    /// Several impulses before the next tick accumulate.
    pub fn impulse(&mut self, amount: f64) {
        self.velocity += amount;
    }

    /// Advance one frame.
    ///
    /// Returns the decayed velocity to apply this frame, or `None` when the
    /// axis is (or just came to) rest.
    pub fn tick(&mut self) -> Option<f64> {
        if self.velocity == 0.0 {
            return None;
        }
        self.velocity *= self.dampening;
        if self.velocity.abs() < Self::REST_THRESHOLD {
            log::trace!("damped velocity {:.5} settled", self.velocity);
            self.velocity = 0.0;
            return None;
        }
        Some(self.velocity)
    }

    /// Drop to rest immediately.
    pub fn stop(&mut self) {
        self.velocity = 0.0;
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Whether any velocity remains.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.velocity != 0.0
    }

    /// Replace the friction, keeping the current velocity.
    ///
    /// NaN falls back to [`DEFAULT_FRICTION`](Self::DEFAULT_FRICTION);
    /// anything else is clamped to
    /// `[MIN_FRICTION, MAX_FRICTION]` so motion always decays.
    pub fn set_friction(&mut self, friction: f64) {
        self.dampening = dampening_for(friction);
    }

    /// `1 - dampening`.
    #[must_use]
    pub fn friction(&self) -> f64 {
        1.0 - self.dampening
    }
}

fn dampening_for(friction: f64) -> f64 {
    let friction = if friction.is_nan() {
        log::warn!("friction is NaN, using {}", DampedAction::DEFAULT_FRICTION);
        DampedAction::DEFAULT_FRICTION
    } else {
        friction.clamp(DampedAction::MIN_FRICTION, DampedAction::MAX_FRICTION)
    };
    1.0 - friction
}

impl Default for DampedAction {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FRICTION)
    }
}

/// One [`DampedAction`] per [`DampedAxis`].
#[derive(Debug, Clone, Default)]
pub struct DampedAxes {
    actions: [DampedAction; 6],
}

impl DampedAxes {
    /// All axes at rest with the given friction.
    #[must_use]
    pub fn new(friction: f64) -> Self {
        Self {
            actions: [DampedAction::new(friction); 6],
        }
    }

    /// Advance every axis one frame, yielding `(axis, delta)` for each axis
    /// still in motion.
    pub fn tick(&mut self) -> impl Iterator<Item = (DampedAxis, f64)> + '_ {
        DampedAxis::ALL
            .into_iter()
            .zip(self.actions.iter_mut())
            .filter_map(|(axis, action)| action.tick().map(|v| (axis, v)))
    }

    /// Stop the given axes.
    pub fn stop(&mut self, axes: &[DampedAxis]) {
        for &axis in axes {
            self[axis].stop();
        }
    }

    /// Whether any axis has velocity.
    #[must_use]
    pub fn any_moving(&self) -> bool {
        self.actions.iter().any(DampedAction::is_moving)
    }

    /// Apply the same friction to every axis.
    pub fn set_friction(&mut self, friction: f64) {
        for action in &mut self.actions {
            action.set_friction(friction);
        }
    }
}

impl Index<DampedAxis> for DampedAxes {
    type Output = DampedAction;

    fn index(&self, axis: DampedAxis) -> &DampedAction {
        &self.actions[axis.slot()]
    }
}

impl IndexMut<DampedAxis> for DampedAxes {
    fn index_mut(&mut self, axis: DampedAxis) -> &mut DampedAction {
        &mut self.actions[axis.slot()]
    }
}
