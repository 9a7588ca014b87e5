use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

use crate::{
    animation::engine::InterpolationEngine,
    foundation::{
        core::{Clock, ManualClock, frame_interval_ms},
        error::MotionResult,
    },
    path::codec::PathCodec,
    sink::PathSink,
};

/// Paces the frame loop.
pub trait FrameScheduler {
    /// Wait until the next frame is due. Returning `false` ends the loop.
    fn wait_for_frame(&mut self) -> bool;
}

/// Real-time cadence: sleeps out the remainder of each frame interval.
#[derive(Clone, Debug)]
pub struct FixedRateScheduler {
    interval: Duration,
    last: Option<Instant>,
    remaining: Option<u64>,
}

impl FixedRateScheduler {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs_f64(frame_interval_ms(fps) / 1000.0),
            last: None,
            remaining: None,
        }
    }

    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn wait_for_frame(&mut self) -> bool {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return false;
            }
            *remaining -= 1;
        }
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                std::thread::sleep(self.interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
        true
    }
}

/// Simulated cadence for offline rendering: moves a [`ManualClock`] one frame per call.
///
/// The first frame is rendered at the clock's current time.
#[derive(Debug)]
pub struct OfflineScheduler {
    clock: Rc<ManualClock>,
    interval_ms: f64,
    remaining: u64,
    started: bool,
}

impl OfflineScheduler {
    pub fn new(clock: Rc<ManualClock>, fps: u32, frames: u64) -> Self {
        Self {
            clock,
            interval_ms: frame_interval_ms(fps),
            remaining: frames,
            started: false,
        }
    }
}

impl FrameScheduler for OfflineScheduler {
    fn wait_for_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.started {
            self.clock.advance(self.interval_ms);
        }
        self.started = true;
        true
    }
}

/// Shared flag that ends [`Animator::run`] before its next frame.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.0.get()
    }

    fn set_running(&self, running: bool) {
        self.0.set(running);
    }
}

/// Per-frame loop: blend, serialize, write.
pub struct Animator<S, C> {
    engine: InterpolationEngine<C>,
    sink: S,
    running: StopHandle,
    frames: u64,
}

impl<S: PathSink, C: Clock> Animator<S, C> {
    pub fn new(engine: InterpolationEngine<C>, sink: S) -> Self {
        Self {
            engine,
            sink,
            running: StopHandle::default(),
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        self.running.set_running(true);
    }

    /// Stop looping and drop the pending completion check.
    pub fn stop(&mut self) {
        self.running.stop();
        self.engine.cancel_deferred();
    }

    pub fn is_running(&self) -> bool {
        self.running.is_running()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.running.clone()
    }

    /// Render one frame to the sink.
    ///
    /// A fault leaves the sink holding the previous frame.
    pub fn tick(&mut self) -> MotionResult<()> {
        self.engine.poll_deferred();
        let path = self.engine.actual_path()?;
        let d = PathCodec::stringify(&path);
        self.sink.write_path(&d)?;
        self.frames += 1;
        tracing::trace!(
            frame = self.frames,
            progress = self.engine.clamped_progress(),
            "frame written"
        );
        Ok(())
    }

    /// Tick once per scheduled frame until stopped, the scheduler ends, or a frame fails.
    ///
    /// Returns the number of frames rendered by this call. A failed frame halts the loop.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) -> MotionResult<u64> {
        let first = self.frames;
        while self.is_running() && scheduler.wait_for_frame() {
            if let Err(err) = self.tick() {
                tracing::error!(error = %err, frame = self.frames, "frame failed; animation halted");
                self.running.stop();
                return Err(err);
            }
        }
        Ok(self.frames - first)
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn engine(&self) -> &InterpolationEngine<C> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut InterpolationEngine<C> {
        &mut self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animator.rs"]
mod tests;
