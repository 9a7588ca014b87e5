//! pathmotion animates an SVG path by blending it toward randomly perturbed variants of itself.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: raw `d` string `->` [`PathPattern`] via [`PathCodec::parse`]
//! 2. **Annotate**: base pattern + per-index [`PerturbationRule`]s `->` [`AnnotatedPattern`]
//! 3. **Sample**: [`PathSampler::generate`] draws the next target pattern
//! 4. **Blend**: [`InterpolationEngine`] interpolates current `->` next by elapsed time
//! 5. **Write**: [`Animator`] stringifies the blend and writes it to a [`PathSink`] every frame
//!
//! When a leg finishes, the engine's completion callback samples a new target and the finished
//! target becomes the next leg's baseline, so motion is continuous.
//!
//! The design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded**: one control flow owns all state; time comes from a [`Clock`].
//! - **Host-agnostic**: frame pacing is a [`FrameScheduler`], output is a [`PathSink`].
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod foundation;
pub mod path;
pub mod raster;
pub mod sink;
pub mod system;

pub use animation::animator::{
    Animator, FixedRateScheduler, FrameScheduler, OfflineScheduler, StopHandle,
};
pub use animation::engine::{AnimationState, FinishedCallback, InterpolationEngine, TimerHandle};
pub use animation::lerp::Lerp;
pub use config::MotionConfig;
pub use foundation::core::{Clock, ManualClock, SystemClock, frame_interval_ms};
pub use foundation::error::{MotionError, MotionResult, ShapeError};
pub use path::codec::{ParseResult, PathCodec, PathCommand, PathPattern};
pub use path::sampler::{AnnotatedPattern, PathSampler, PerturbationRule};
pub use raster::{RgbaFrame, rasterize_svg, write_png};
pub use sink::PathSink;
pub use sink::memory::MemorySink;
pub use sink::svg_doc::{DEFAULT_MARKER_ATTRIBUTE, SvgDocumentSink};
pub use system::PathMotion;
