use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pathmotion::FrameScheduler as _;

#[derive(Parser, Debug)]
#[command(name = "pathmotion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the animatable commands of the marked path as JSON.
    Inspect(InspectArgs),
    /// Render a fixed number of frames to a directory.
    Frames(FramesArgs),
    /// Animate in real time, rewriting an output SVG every frame.
    Watch(WatchArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input SVG document.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Attribute that marks the animated element.
    #[arg(long, default_value = pathmotion::DEFAULT_MARKER_ATTRIBUTE)]
    marker: String,
}

#[derive(Parser, Debug)]
struct MotionArgs {
    /// Input SVG document.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Motion config JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible targets.
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    motion: MotionArgs,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Number of frames to render.
    #[arg(long)]
    frames: u64,

    /// Also rasterize each frame to PNG.
    #[arg(long)]
    png: bool,
}

#[derive(Parser, Debug)]
struct WatchArgs {
    #[command(flatten)]
    motion: MotionArgs,

    /// Output SVG path, rewritten every frame.
    #[arg(long)]
    out: PathBuf,

    /// Stop after this many seconds (runs until killed when omitted).
    #[arg(long)]
    seconds: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Watch(args) => cmd_watch(args),
    }
}

fn load_config(args: &MotionArgs) -> anyhow::Result<pathmotion::MotionConfig> {
    let mut cfg = match &args.config {
        Some(path) => pathmotion::MotionConfig::load(path)?,
        None => pathmotion::MotionConfig::default(),
    };
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if let Some(fps) = args.fps {
        cfg.fps = fps;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    use pathmotion::PathSink as _;

    let sink = pathmotion::SvgDocumentSink::load(&args.in_path, &args.marker)?;
    let parsed = pathmotion::PathCodec::parse(&sink.read_path()?);
    let report = serde_json::json!({
        "commands": parsed.pattern,
        "unrecognized": parsed.unrecognized,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize inspection report")?
    );
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.motion)?;
    let sink = pathmotion::SvgDocumentSink::load(&args.motion.in_path, &cfg.marker_attribute)?;

    let clock = Rc::new(pathmotion::ManualClock::new(0.0));
    let mut motion = pathmotion::PathMotion::new(sink, Rc::clone(&clock), &cfg)?;
    motion.start();

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let mut scheduler = pathmotion::OfflineScheduler::new(clock, cfg.fps, args.frames);
    let mut index = 0u64;
    while scheduler.wait_for_frame() {
        motion.tick()?;
        write_frame(&args.out, index, motion.sink().document(), args.png)?;
        index += 1;
    }
    motion.stop();

    eprintln!("wrote {index} frames to {}", args.out.display());
    Ok(())
}

fn write_frame(dir: &Path, index: u64, document: &str, png: bool) -> anyhow::Result<()> {
    let svg_path = dir.join(format!("frame_{index:05}.svg"));
    std::fs::write(&svg_path, document)
        .with_context(|| format!("write frame '{}'", svg_path.display()))?;
    if png {
        let frame = pathmotion::rasterize_svg(document)?;
        pathmotion::write_png(&frame, &svg_path.with_extension("png"))?;
    }
    Ok(())
}

fn cmd_watch(args: WatchArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.motion)?;
    let sink = pathmotion::SvgDocumentSink::load(&args.motion.in_path, &cfg.marker_attribute)?
        .mirror_to(&args.out);

    let mut motion = pathmotion::PathMotion::new(sink, pathmotion::SystemClock::new(), &cfg)?;
    let mut scheduler = pathmotion::FixedRateScheduler::new(cfg.fps);
    if let Some(seconds) = args.seconds {
        anyhow::ensure!(
            seconds.is_finite() && seconds >= 0.0,
            "--seconds must be finite and >= 0"
        );
        scheduler = scheduler.with_frame_limit((seconds * f64::from(cfg.fps)).ceil() as u64);
    }

    motion.start();
    let frames = motion.run(&mut scheduler)?;
    motion.stop();

    eprintln!("rendered {frames} frames into {}", args.out.display());
    Ok(())
}
