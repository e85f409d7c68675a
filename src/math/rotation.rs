//! Unit-quaternion rotation helpers built on `glam`'s double-precision
//! types.
//!
//! Rotations compose right-to-left like `glam` quaternions do: in
//! `compose(a, b)` the incremental rotation `b` is applied in `a`'s local
//! frame, which is how camera deltas accumulate.

use std::fmt;

use glam::{DMat3, DQuat, DVec3};

/// Below this `sin(theta)` slerp falls back to linear weights.
const SLERP_SIN_EPSILON: f64 = 0.001;

/// Blends shorter than this come from opposite-sign endpoints cancelling.
const SLERP_CANCEL_EPSILON: f64 = 1e-6;

/// `|sin(middle angle)|` above this is treated as gimbal lock.
const EULER_SINGULARITY_THRESHOLD: f64 = 0.999_999_999_9;

/// A principal rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The +X axis (pitch).
    X,
    /// The +Y axis (yaw).
    Y,
    /// The +Z axis (roll).
    Z,
}

impl Axis {
    /// Unit vector along this axis.
    #[must_use]
    pub fn unit(self) -> DVec3 {
        match self {
            Self::X => DVec3::X,
            Self::Y => DVec3::Y,
            Self::Z => DVec3::Z,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Rotation by `angle` radians about a principal axis.
#[inline]
#[must_use]
pub fn axis_rotation(axis: Axis, angle: f64) -> DQuat {
    DQuat::from_axis_angle(axis.unit(), angle)
}

/// Quaternion product `a * b`: apply `b` first, then `a`.
#[inline]
#[must_use]
pub fn compose(a: DQuat, b: DQuat) -> DQuat {
    a * b
}

/// Rotate `v` by the unit quaternion `rotation`.
#[inline]
#[must_use]
pub fn apply_to(rotation: DQuat, v: DVec3) -> DVec3 {
    rotation * v
}

/// Unsigned angle between two vectors in radians.
///
/// The normalized dot product is clamped to `[-1, 1]` before `acos`, so
/// round-off never produces NaN. Returns 0 if either vector is zero.
#[must_use]
pub fn angle_between(u: DVec3, v: DVec3) -> f64 {
    let norms = u.length() * v.length();
    if norms == 0.0 {
        return 0.0;
    }
    (u.dot(v) / norms).clamp(-1.0, 1.0).acos()
}

/// Spherical linear interpolation between two unit quaternions.
///
/// Near-parallel inputs (`sin(theta) <= 0.001`) blend with linear weights
/// instead of dividing by a vanishing sine. The result is renormalized.
/// No shortest-path sign flip is applied.
#[must_use]
pub fn slerp(a: DQuat, b: DQuat, t: f64) -> DQuat {
    let cos_theta = a.dot(b).clamp(-1.0, 1.0);
    let theta = cos_theta.acos();
    let sin_theta = theta.sin();

    let (w1, w2) = if sin_theta > SLERP_SIN_EPSILON {
        (((1.0 - t) * theta).sin() / sin_theta, (t * theta).sin() / sin_theta)
    } else {
        (1.0 - t, t)
    };

    let blended = a * w1 + b * w2;
    let len = blended.length();
    if len < SLERP_CANCEL_EPSILON {
        // a == -b: both endpoints are the same rotation.
        return if t < 0.5 { a } else { b };
    }
    blended / len
}

/// Ordered triple of axes for a Cardan (Tait-Bryan) decomposition.
///
/// `Xyz` means `rotation = Rx(a) * Ry(b) * Rz(c)`, which is what a
/// renderer's `rotateX(a); rotateY(b); rotateZ(c)` matrix stack builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EulerOrder {
    /// X, then Y, then Z.
    Xyz,
    /// Y, then X, then Z.
    Yxz,
    /// Z, then X, then Y.
    Zxy,
}

impl EulerOrder {
    /// Orders tried, in sequence, when expressing a rotation as X/Y/Z angles.
    pub const FALLBACK_CHAIN: [Self; 3] = [Self::Xyz, Self::Yxz, Self::Zxy];

    /// The three axes in application order.
    #[must_use]
    pub fn axes(self) -> [Axis; 3] {
        match self {
            Self::Xyz => [Axis::X, Axis::Y, Axis::Z],
            Self::Yxz => [Axis::Y, Axis::X, Axis::Z],
            Self::Zxy => [Axis::Z, Axis::X, Axis::Y],
        }
    }

    fn is_cyclic(self) -> bool {
        let [i, j, _] = self.axes().map(Axis::index);
        (j + 3 - i) % 3 == 1
    }
}

/// The middle axis of an Euler decomposition sits at ±90°, so the outer
/// two angles are not uniquely defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EulerSingularity {
    /// The order that could not represent the rotation.
    pub order: EulerOrder,
}

impl fmt::Display for EulerSingularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gimbal lock in {:?} decomposition", self.order)
    }
}

impl std::error::Error for EulerSingularity {}

/// Build a rotation from three angles applied in `order`.
#[must_use]
pub fn from_euler(order: EulerOrder, angles: [f64; 3]) -> DQuat {
    let [i, j, k] = order.axes();
    (axis_rotation(i, angles[0]) * axis_rotation(j, angles[1]) * axis_rotation(k, angles[2]))
        .normalize()
}

/// Decompose `rotation` into three angles in `order`'s axis sequence.
///
/// # Errors
///
/// Returns [`EulerSingularity`] when the middle axis is at ±90°.
pub fn euler_angles(rotation: DQuat, order: EulerOrder) -> Result<[f64; 3], EulerSingularity> {
    let m = DMat3::from_quat(rotation);
    // row-major view of the column-major matrix
    let at = |r: usize, c: usize| m.col(c)[r];

    let [i, j, k] = order.axes().map(Axis::index);
    let s = if order.is_cyclic() { 1.0 } else { -1.0 };

    let sin_middle = s * at(i, k);
    if sin_middle.abs() > EULER_SINGULARITY_THRESHOLD {
        return Err(EulerSingularity { order });
    }

    let first = (-s * at(j, k)).atan2(at(k, k));
    let middle = sin_middle.asin();
    let last = (-s * at(i, j)).atan2(at(i, i));
    Ok([first, middle, last])
}

/// Express `rotation` as per-axis `[x, y, z]` angles.
///
/// Tries [`EulerOrder::FALLBACK_CHAIN`] and uses the first order that is
/// not singular, remapping its angles onto their axes. Orders other than
/// `Xyz` only approximate an X-then-Y-then-Z replay. If every order is
/// singular, returns `[0, 0, 0]`.
#[must_use]
pub fn rotations_as_euler(rotation: DQuat) -> [f64; 3] {
    first_regular_decomposition(rotation, &EulerOrder::FALLBACK_CHAIN)
}

fn first_regular_decomposition(rotation: DQuat, orders: &[EulerOrder]) -> [f64; 3] {
    for &order in orders {
        match euler_angles(rotation, order) {
            Ok(angles) => {
                let mut per_axis = [0.0; 3];
                for (axis, angle) in order.axes().into_iter().zip(angles) {
                    per_axis[axis.index()] = angle;
                }
                return per_axis;
            }
            Err(e) => log::trace!("{e}; trying next order"),
        }
    }
    log::warn!("rotation is singular in every Euler order; reporting zero angles");
    [0.0; 3]
}
