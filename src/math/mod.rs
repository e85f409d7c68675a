//! Vector and rotation math shared by the damped axes and transitions.

/// Quaternion composition, slerp, and Euler decomposition.
pub mod rotation;

pub use rotation::{
    angle_between, apply_to, axis_rotation, compose, euler_angles, from_euler,
    rotations_as_euler, slerp, Axis, EulerOrder, EulerSingularity,
};
