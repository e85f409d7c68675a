//! Orbit camera: pose, published view, mouse response, and the controller
//! tying them together.

/// Orbit camera controller driving damped motion and timed transitions.
pub mod controller;
/// Published view basis.
pub mod core;
/// Mouse response curves and bindings.
pub mod input;
/// Camera pose state and distance limits.
pub mod state;

pub use controller::OrbitCamera;
pub use self::core::CameraView;
pub use input::{
    DragAction, DragBindings, DragLock, MouseButton, RotationMode, Viewport,
};
pub use state::{CameraState, DistanceLimits, ViewListener};
