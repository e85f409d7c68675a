//! Motion primitives for the camera.
//!
//! Two kinds of motion drive the pose: inertial [`DampedAction`]s fed by
//! mouse impulses, and timed [`Animation`]s held one per pose component by
//! an [`InterpolationManager`].

pub mod damped;
pub mod easing;
pub mod interpolation;

pub use damped::{DampedAction, DampedAxes, DampedAxis};
pub use easing::{Blend, EasingFunction};
pub use interpolation::{
    Animation, AnimationPhase, InterpolationManager, Step, Tween,
};
