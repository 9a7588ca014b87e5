use crate::{
    animation::lerp::Lerp,
    foundation::{
        core::Clock,
        error::{MotionError, MotionResult, ShapeError},
    },
    path::codec::{PathCommand, PathPattern},
};

/// Completion callback. It receives the engine so it can start the next leg.
pub type FinishedCallback<C> = Box<dyn FnMut(&mut InterpolationEngine<C>)>;

/// Identifies one scheduled completion check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Clone, Copy, Debug)]
struct DeferredCheck {
    handle: TimerHandle,
    due_ms: f64,
}

/// Timing and endpoints of the running leg.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationState {
    pub current: PathPattern,
    pub next: Option<PathPattern>, // None until the first leg starts
    pub start_ms: Option<f64>,
    pub duration_ms: f64,
}

/// Interpolates between a current and a next pattern over a fixed duration.
///
/// The engine is Idle until the first [`start_new_path`](Self::start_new_path) and Animating
/// afterwards. Each leg schedules one deferred completion check; starting another leg cancels
/// the outstanding one, so a check never fires against a leg it was not scheduled for.
pub struct InterpolationEngine<C> {
    clock: C,
    state: AnimationState,
    deferred: Option<DeferredCheck>,
    next_handle: u64,
    on_path_finished: Option<FinishedCallback<C>>,
}

impl<C: Clock> InterpolationEngine<C> {
    pub fn new(current: PathPattern, duration_ms: f64, clock: C) -> MotionResult<Self> {
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return Err(MotionError::validation(format!(
                "leg duration must be finite and > 0 (got {duration_ms})"
            )));
        }
        Ok(Self {
            clock,
            state: AnimationState {
                current,
                next: None,
                start_ms: None,
                duration_ms,
            },
            deferred: None,
            next_handle: 0,
            on_path_finished: None,
        })
    }

    /// Begin a new leg toward `next`.
    ///
    /// A previous target, if any, becomes the new baseline even when its leg has not
    /// finished yet (the animation then jumps to that target).
    #[tracing::instrument(level = "debug", skip(self, next), fields(commands = next.len()))]
    pub fn start_new_path(&mut self, next: PathPattern) -> TimerHandle {
        let now = self.clock.now_ms();
        self.state.start_ms = Some(now);
        if let Some(reached) = self.state.next.take() {
            self.state.current = reached;
        }
        self.state.next = Some(next);

        if let Some(stale) = self.deferred.take() {
            tracing::debug!(handle = ?stale.handle, "cancelled pending completion check");
        }
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let due_ms = now + self.state.duration_ms;
        self.deferred = Some(DeferredCheck { handle, due_ms });
        tracing::debug!(?handle, start_ms = now, due_ms, "leg started");
        handle
    }

    /// Elapsed fraction of the leg, unclamped. Zero while Idle.
    pub fn progress(&self) -> f64 {
        match self.state.start_ms {
            Some(start) => (self.clock.now_ms() - start) / self.state.duration_ms,
            None => 0.0,
        }
    }

    /// Progress restricted to `[0, 1]`; exactly 1 once the leg's end time is reached.
    pub fn clamped_progress(&self) -> f64 {
        let Some(start) = self.state.start_ms else {
            return 0.0;
        };
        let now = self.clock.now_ms();
        if now >= start + self.state.duration_ms {
            return 1.0;
        }
        ((now - start) / self.state.duration_ms).clamp(0.0, 1.0)
    }

    /// The blended pattern for the current instant.
    ///
    /// While Idle this is the current pattern unchanged.
    pub fn actual_path(&self) -> Result<PathPattern, ShapeError> {
        let current = &self.state.current;
        let Some(next) = &self.state.next else {
            return Ok(current.clone());
        };
        if current.len() != next.len() {
            return Err(ShapeError::LengthMismatch {
                current: current.len(),
                next: next.len(),
            });
        }

        let t = self.clamped_progress();
        Ok(current
            .iter()
            .zip(next.iter())
            .map(|(a, b)| PathCommand::lerp(a, b, t))
            .collect())
    }

    /// Register the completion callback, replacing any previous one.
    pub fn on_path_finished<F>(&mut self, callback: F)
    where
        F: FnMut(&mut Self) + 'static,
    {
        self.on_path_finished = Some(Box::new(callback));
    }

    /// Run the deferred completion check if it is due.
    ///
    /// Returns `true` when the completion callback was dispatched.
    pub fn poll_deferred(&mut self) -> bool {
        let Some(check) = self.deferred else {
            return false;
        };
        if self.clock.now_ms() < check.due_ms {
            return false;
        }
        self.deferred = None;

        if self.clamped_progress() < 1.0 {
            return false;
        }
        tracing::debug!(handle = ?check.handle, "leg finished");
        self.dispatch_finished();
        true
    }

    /// Drop the outstanding completion check, if any.
    pub fn cancel_deferred(&mut self) -> Option<TimerHandle> {
        let cancelled = self.deferred.take().map(|c| c.handle);
        if let Some(handle) = cancelled {
            tracing::debug!(?handle, "cancelled pending completion check");
        }
        cancelled
    }

    pub fn pending_check(&self) -> Option<TimerHandle> {
        self.deferred.map(|c| c.handle)
    }

    pub fn is_animating(&self) -> bool {
        self.state.next.is_some() && self.clamped_progress() < 1.0
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn current_pattern(&self) -> &PathPattern {
        &self.state.current
    }

    pub fn next_pattern(&self) -> Option<&PathPattern> {
        self.state.next.as_ref()
    }

    pub fn duration_ms(&self) -> f64 {
        self.state.duration_ms
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn dispatch_finished(&mut self) {
        let Some(mut callback) = self.on_path_finished.take() else {
            return;
        };
        callback(self);
        // The callback may have registered a replacement.
        if self.on_path_finished.is_none() {
            self.on_path_finished = Some(callback);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/engine.rs"]
mod tests;
