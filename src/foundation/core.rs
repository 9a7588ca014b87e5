use std::{cell::Cell, rc::Rc, time::Instant};

/// Monotonic time source, in milliseconds.
///
/// All timing in the engine (leg start, progress, deferred checks) is derived from a single
/// clock so that every observer reaches the same conclusion about completion.
pub trait Clock {
    /// Current timestamp in milliseconds. Only differences between readings are meaningful.
    fn now_ms(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

/// Wall clock backed by [`Instant`], zeroed at construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
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
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to.
///
/// Share it through an `Rc` between the engine and whatever drives time (tests, offline
/// rendering).
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Frame interval for a cadence in frames per second.
pub fn frame_interval_ms(fps: u32) -> f64 {
    1000.0 / f64::from(fps.max(1))
}
