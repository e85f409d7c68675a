//! Monotonic millisecond time sources.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use web_time::Instant;

/// A monotonic clock reporting milliseconds.
///
/// Transitions measure elapsed wall-clock time, not frames, so they keep
/// their duration under a variable frame rate.
pub trait Clock: Send {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_millis(&self) -> f64;
}

/// Wall clock, measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose origin is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock advanced by hand.
///
/// Clones share the same time, so a host (or test) keeps one handle while
/// the camera owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    /// Clock reading `start_ms`.
    #[must_use]
    pub fn new(start_ms: f64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(start_ms.to_bits())),
        }
    }

    /// Jump to `now_ms`.
    pub fn set(&self, now_ms: f64) {
        self.millis.store(now_ms.to_bits(), Ordering::Release);
    }

    /// Move forward by `delta_ms`.
    pub fn advance(&self, delta_ms: f64) {
        self.set(self.now_millis() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> f64 {
        f64::from_bits(self.millis.load(Ordering::Acquire))
    }
}
