//! Easing functions for camera transitions.
//!
//! Scalar curves live on [`EasingFunction`]; [`Blend`] lifts them onto
//! scalars and vectors component-wise.

use glam::DVec3;

/// Easing function variants for transition curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Cubic smoothstep `t²(3 - 2t)`: zero velocity at both endpoints.
    #[default]
    Smooth,
}

impl EasingFunction {
    /// Map progress `t` through the curve.
    ///
    /// `t` is not clamped; callers drive it within `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Smooth => t * t * (3.0 - 2.0 * t),
        }
    }

    /// Blend `a` toward `b` at progress `t` along this curve.
    #[inline]
    #[must_use]
    pub fn blend<T: Blend>(self, a: T, b: T, t: f64) -> T {
        T::blend(a, b, self.evaluate(t))
    }
}

/// Values that can be mixed by a weight in `[0, 1]`.
pub trait Blend: Copy {
    /// `b * s + a * (1 - s)`.
    fn blend(a: Self, b: Self, s: f64) -> Self;
}

impl Blend for f64 {
    #[inline]
    fn blend(a: Self, b: Self, s: f64) -> Self {
        b * s + a * (1.0 - s)
    }
}

impl Blend for DVec3 {
    #[inline]
    fn blend(a: Self, b: Self, s: f64) -> Self {
        Self::new(
            f64::blend(a.x, b.x, s),
            f64::blend(a.y, b.y, s),
            f64::blend(a.z, b.z, s),
        )
    }
}

/// `a + (b - a) * t`.
#[inline]
#[must_use]
pub fn linear<T: Blend>(a: T, b: T, t: f64) -> T {
    EasingFunction::Linear.blend(a, b, t)
}

/// Smoothstep blend from `a` to `b`.
#[inline]
#[must_use]
pub fn smooth<T: Blend>(a: T, b: T, t: f64) -> T {
    EasingFunction::Smooth.blend(a, b, t)
}
