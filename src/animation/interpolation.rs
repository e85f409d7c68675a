//! Timed transitions and the single-slot manager that owns them.
//!
//! An [`Animation`] moves one pose component from a start value to an end
//! value over a fixed wall-clock duration. An [`InterpolationManager`]
//! holds at most one of them; starting another cancels the first.

use std::time::Duration;

use glam::{DQuat, DVec3};

use super::easing::EasingFunction;
use crate::math::slerp;

/// Progress past which an animation snaps to its exact end value.
pub const COMPLETION_THRESHOLD: f64 = 0.99;

/// Pose components that can be animated.
pub trait Tween: Copy + std::fmt::Debug {
    /// Value at progress `t` between `start` and `end`.
    fn tween(start: Self, end: Self, t: f64) -> Self;
}

impl Tween for f64 {
    fn tween(start: Self, end: Self, t: f64) -> Self {
        EasingFunction::Smooth.blend(start, end, t)
    }
}

impl Tween for DVec3 {
    fn tween(start: Self, end: Self, t: f64) -> Self {
        EasingFunction::Smooth.blend(start, end, t)
    }
}

impl Tween for DQuat {
    fn tween(start: Self, end: Self, t: f64) -> Self {
        slerp(start, end, t)
    }
}

/// Lifecycle of an [`Animation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    /// Built but not yet started.
    Created,
    /// Started and sampled every tick.
    Running,
    /// Reached its end value.
    Completed,
}

/// Result of advancing an animation one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step<T> {
    /// Still in flight; the eased value for this tick.
    Running(T),
    /// Finished; the exact end value.
    Completed(T),
}

impl<T> Step<T> {
    /// The value to apply, whichever way the step went.
    #[must_use]
    pub fn value(self) -> T {
        match self {
            Self::Running(v) | Self::Completed(v) => v,
        }
    }
}

/// A time-bounded transition of one value.
#[derive(Debug, Clone)]
pub struct Animation<T: Tween> {
    start_value: T,
    end_value: T,
    duration_ms: f64,
    start_time: Option<f64>,
    phase: AnimationPhase,
}

impl<T: Tween> Animation<T> {
    /// A transition from `start_value` to `end_value`, not yet started.
    #[must_use]
    pub fn new(start_value: T, end_value: T, duration: Duration) -> Self {
        Self {
            start_value,
            end_value,
            duration_ms: duration.as_secs_f64() * 1000.0,
            start_time: None,
            phase: AnimationPhase::Created,
        }
    }

    /// Record `now_ms` as the start time and begin running.
    pub fn start(&mut self, now_ms: f64) {
        self.start_time = Some(now_ms);
        self.phase = AnimationPhase::Running;
    }

    /// Raw progress at `now_ms`: elapsed over duration, unclamped.
    ///
    /// Zero before [`start`](Self::start); a zero-length animation is
    /// always complete.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        let Some(start) = self.start_time else {
            return 0.0;
        };
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (now_ms - start) / self.duration_ms
    }

    /// Advance to `now_ms`.
    ///
    /// Past [`COMPLETION_THRESHOLD`] the animation completes and yields its
    /// exact end value rather than the eased value. Returns `None` unless
    /// running.
    pub fn advance(&mut self, now_ms: f64) -> Option<Step<T>> {
        if self.phase != AnimationPhase::Running {
            return None;
        }
        let t = self.progress(now_ms);
        if t > COMPLETION_THRESHOLD {
            self.phase = AnimationPhase::Completed;
            Some(Step::Completed(self.end_value))
        } else {
            Some(Step::Running(T::tween(
                self.start_value,
                self.end_value,
                t.max(0.0),
            )))
        }
    }

    /// Shift the start time by `offset_ms`, moving a running animation
    /// onto another timeline without changing its elapsed time.
    pub fn rebase(&mut self, offset_ms: f64) {
        if let Some(start) = self.start_time.as_mut() {
            *start += offset_ms;
        }
    }

    /// `max(0, duration - elapsed)` in milliseconds.
    #[must_use]
    pub fn time_remaining(&self, now_ms: f64) -> f64 {
        match (self.phase, self.start_time) {
            (AnimationPhase::Running, Some(start)) => {
                (self.duration_ms - (now_ms - start)).max(0.0)
            }
            (AnimationPhase::Created, _) => self.duration_ms,
            _ => 0.0,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Value the animation started from.
    #[must_use]
    pub fn start_value(&self) -> T {
        self.start_value
    }

    /// Value the animation ends on.
    #[must_use]
    pub fn end_value(&self) -> T {
        self.end_value
    }
}

/// Single-slot owner of the running transition for one pose component.
///
/// Starting an animation cancels whatever the slot held; two animations
/// never drive the same component at once.
#[derive(Debug, Clone)]
pub struct InterpolationManager<T: Tween> {
    name: &'static str,
    current: Option<Animation<T>>,
}

impl<T: Tween> InterpolationManager<T> {
    /// An empty slot; `name` labels log output.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            current: None,
        }
    }

    /// Cancel the held animation, then install and start `animation`.
    pub fn start_interpolation(&mut self, mut animation: Animation<T>, now_ms: f64) {
        if let Some(previous) = self.current.take() {
            log::debug!(
                "{} transition to {:?} superseded with {:.0}ms left",
                self.name,
                previous.end_value,
                previous.time_remaining(now_ms),
            );
        }
        log::debug!(
            "{} transition to {:?} over {:.0}ms",
            self.name,
            animation.end_value,
            animation.duration_ms,
        );
        animation.start(now_ms);
        self.current = Some(animation);
    }

    /// Clear the slot without a replacement.
    pub fn cancel_interpolation(&mut self) {
        if self.current.take().is_some() {
            log::debug!("{} transition cancelled", self.name);
        }
    }

    /// Advance the held animation to `now_ms`.
    ///
    /// Returns the value to apply this tick, if any. A completed animation
    /// is dropped from the slot after yielding its end value.
    pub fn tick(&mut self, now_ms: f64) -> Option<T> {
        let step = self.current.as_mut()?.advance(now_ms)?;
        if let Step::Completed(end) = step {
            log::debug!("{} transition reached {:?}", self.name, end);
            self.current = None;
        }
        Some(step.value())
    }

    /// Move the held animation onto a timeline `offset_ms` ahead.
    pub fn rebase(&mut self, offset_ms: f64) {
        if let Some(animation) = self.current.as_mut() {
            animation.rebase(offset_ms);
        }
    }

    /// Milliseconds left on the held animation, or 0 if none.
    #[must_use]
    pub fn time_remaining(&self, now_ms: f64) -> f64 {
        self.current
            .as_ref()
            .map_or(0.0, |a| a.time_remaining(now_ms))
    }

    /// Whether an animation occupies the slot.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// The held animation, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Animation<T>> {
        self.current.as_ref()
    }
}
