use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "slitscan", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a range of frames as numbered PNGs.
    Frames(FramesArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// First frame to write.
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// One past the last frame to write (defaults to the scene's frame count).
    #[arg(long)]
    end: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load(in_path: &Path) -> anyhow::Result<slitscan::SceneRenderer> {
    let def = slitscan::SceneDef::from_path(in_path)?;
    let assets_root = in_path.parent().unwrap_or_else(|| Path::new("."));
    let renderer = slitscan::SceneRenderer::new(&def, assets_root)
        .with_context(|| format!("prepare scene '{}'", in_path.display()))?;
    Ok(renderer)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut renderer = load(&args.in_path)?;

    // The scan buffer is history-dependent: replay every earlier frame so the requested one
    // matches a sequential render.
    let mut last = None;
    for f in 0..=args.frame {
        last = Some(renderer.render_frame(slitscan::FrameIndex(f))?);
    }
    let frame = last.context("no frame rendered")?;
    frame.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut renderer = load(&args.in_path)?;
    let end = args.end.unwrap_or(renderer.frame_count());
    let range =
        slitscan::FrameRange::new(slitscan::FrameIndex(args.start), slitscan::FrameIndex(end))?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for f in 0..range.end.0 {
        let frame = renderer.render_frame(slitscan::FrameIndex(f))?;
        if range.contains(slitscan::FrameIndex(f)) {
            let out = args.out_dir.join(format!("frame_{f:05}.png"));
            frame.save_png(&out)?;
            tracing::debug!(path = %out.display(), "wrote frame");
        }
    }

    eprintln!(
        "wrote {} frames to {}",
        range.len_frames(),
        args.out_dir.display()
    );
    Ok(())
}
