use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::DampedAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Initial pose, distance limits, and motion tuning.
pub struct CameraOptions {
    /// Starting distance from the look-at point; also the reset distance.
    #[schemars(title = "Distance", range(min = 0.0))]
    pub distance: f64,
    /// Starting look-at point; also the reset center.
    #[schemars(skip)]
    pub center: [f64; 3],
    /// Closest allowed distance.
    #[schemars(title = "Minimum Distance", range(min = 0.0))]
    pub minimum_distance: f64,
    /// Farthest allowed distance.
    #[schemars(title = "Maximum Distance", range(min = 0.0))]
    pub maximum_distance: f64,
    /// Default transition length in milliseconds.
    #[schemars(title = "Transition (ms)", range(min = 0, max = 5000), extend("step" = 10))]
    pub default_duration_ms: u64,
    /// Fraction of velocity lost per frame by damped motion.
    #[schemars(title = "Friction", range(min = 0.001, max = 0.999), extend("step" = 0.01))]
    pub friction: f64,
}

impl CameraOptions {
    pub(super) fn sanitize(&mut self) {
        let defaults = Self::default();
        if !(self.minimum_distance.is_finite() && self.minimum_distance >= 0.0) {
            log::warn!(
                "minimum_distance {} invalid, using {}",
                self.minimum_distance,
                defaults.minimum_distance
            );
            self.minimum_distance = defaults.minimum_distance;
        }
        if self.maximum_distance.is_nan()
            || self.maximum_distance < self.minimum_distance
        {
            log::warn!(
                "maximum_distance {} below minimum, using {}",
                self.maximum_distance,
                defaults.maximum_distance
            );
            self.maximum_distance = defaults.maximum_distance;
        }
        if !(self.distance.is_finite() && self.distance > 0.0) {
            log::warn!(
                "distance {} invalid, using {}",
                self.distance,
                defaults.distance
            );
            self.distance = defaults.distance;
        }
        if !self.center.iter().all(|c| c.is_finite()) {
            log::warn!("center {:?} not finite, using origin", self.center);
            self.center = defaults.center;
        }
        let range = DampedAction::MIN_FRICTION..=DampedAction::MAX_FRICTION;
        if !range.contains(&self.friction) {
            log::warn!("friction {} out of range, clamping", self.friction);
            self.friction = if self.friction.is_nan() {
                defaults.friction
            } else {
                self.friction.clamp(*range.start(), *range.end())
            };
        }
    }
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            distance: 100.0,
            center: [0.0; 3],
            minimum_distance: 1.0,
            maximum_distance: f64::MAX,
            default_duration_ms: 300,
            friction: DampedAction::DEFAULT_FRICTION,
        }
    }
}
