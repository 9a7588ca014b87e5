use crate::{
    animation::{
        animator::{Animator, FrameScheduler, StopHandle},
        engine::InterpolationEngine,
    },
    config::MotionConfig,
    foundation::{core::Clock, error::MotionResult},
    path::{
        codec::PathCodec,
        sampler::{AnnotatedPattern, PathSampler},
    },
    sink::PathSink,
};

/// Composition root: one sink, one engine, one sampler, one loop.
///
/// Construction reads and parses the sink's path and wires the completion callback; nothing
/// moves until [`start`](Self::start).
pub struct PathMotion<S, C> {
    animator: Animator<S, C>,
    base: AnnotatedPattern,
}

impl<S: PathSink, C: Clock> PathMotion<S, C> {
    #[tracing::instrument(level = "debug", skip_all, fields(duration_ms = config.duration_ms))]
    pub fn new(sink: S, clock: C, config: &MotionConfig) -> MotionResult<Self> {
        config.validate()?;

        let raw = sink.read_path()?;
        let parsed = PathCodec::parse(&raw);
        if !parsed.is_complete() {
            tracing::warn!(
                skipped = ?parsed.unrecognized,
                "path fragments without exactly two arguments are not animated"
            );
        }
        let pattern = if config.rules.is_empty() {
            parsed.into_pattern()
        } else {
            parsed.require_commands()?
        };
        let base = AnnotatedPattern::new(pattern, &config.rules)?;

        let mut engine = InterpolationEngine::new(base.base().clone(), config.duration_ms, clock)?;
        let mut sampler = PathSampler::from_seed(config.seed);
        let template = base.clone();
        engine.on_path_finished(move |engine| {
            let next = sampler.generate(&template);
            engine.start_new_path(next);
        });

        tracing::debug!(
            commands = base.base().len(),
            rules = config.rules.len(),
            "path motion ready"
        );
        Ok(Self {
            animator: Animator::new(engine, sink),
            base,
        })
    }

    /// Begin with a zero-motion warm-up leg (base to base) and mark the loop running.
    ///
    /// Calling it again while running does nothing.
    pub fn start(&mut self) {
        if self.animator.is_running() {
            return;
        }
        self.animator
            .engine_mut()
            .start_new_path(self.base.base().clone());
        self.animator.start();
        tracing::info!(commands = self.base.base().len(), "path motion started");
    }

    pub fn stop(&mut self) {
        self.animator.stop();
        tracing::info!(
            frames = self.animator.frames_rendered(),
            "path motion stopped"
        );
    }

    pub fn is_running(&self) -> bool {
        self.animator.is_running()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.animator.stop_handle()
    }

    pub fn tick(&mut self) -> MotionResult<()> {
        self.animator.tick()
    }

    pub fn run<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) -> MotionResult<u64> {
        self.animator.run(scheduler)
    }

    pub fn base(&self) -> &AnnotatedPattern {
        &self.base
    }

    pub fn engine(&self) -> &InterpolationEngine<C> {
        self.animator.engine()
    }

    pub fn animator(&self) -> &Animator<S, C> {
        &self.animator
    }

    pub fn sink(&self) -> &S {
        self.animator.sink()
    }

    pub fn into_sink(self) -> S {
        self.animator.into_sink()
    }
}
