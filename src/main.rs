use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fractal_explorer::{
    AnimationEncoderPort, ColourMode, Complex, DEFAULT_SETTINGS_PATH, ExplorerSession, ExportController,
    FfmpegEncoder, FractalKind, FrameSink, InteractiveController, JsonBookmarkStore, Palette, PngFilePresenter,
    PngSequenceEncoder, RenderParams, Resolution, Settings, StillRequest, SweepMode, TerminalInput,
    TerminalPresenter, ViewportState,
};

#[derive(Parser)]
#[command(version, about = "Explore and render Mandelbrot and Julia sets in the terminal")]
struct Cli {
    /// Settings file (TOML); missing files fall back to defaults
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,

    /// Write animations as numbered PNG frames instead of piping them to ffmpeg
    #[arg(long, global = true)]
    png_frames: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal explorer (the default)
    Explore,
    /// Render a still image
    Image(ImageArgs),
    /// Render a zoom from the overview onto a point
    Zoom(ZoomArgs),
    /// Render an iteration sweep over a fixed view
    Sweep(SweepArgs),
    /// Render a Julia set morphing between two constants
    Pan(PanArgs),
}

#[derive(Args)]
struct ViewArgs {
    #[arg(long, allow_negative_numbers = true, default_value_t = -0.5)]
    cx: f64,

    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    cy: f64,

    /// Iteration cap (1..=65535)
    #[arg(long, default_value_t = 100)]
    iterations: u32,

    /// Output size as WxH
    #[arg(long, default_value = "1920x1080")]
    resolution: Resolution,

    /// grayscale, gradient or noise
    #[arg(long, default_value = "gradient")]
    colour_mode: ColourMode,
}

#[derive(Args)]
struct ImageArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Width of the view in the complex plane
    #[arg(long, default_value_t = 4.5)]
    width: f64,

    /// Supersampling factor per axis
    #[arg(long, default_value_t = 1)]
    aa: u32,

    /// Render the Julia set of this constant, given as X,Y
    #[arg(long, allow_hyphen_values = true)]
    julia: Option<Complex>,
}

#[derive(Args)]
struct ZoomArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Width of the last frame
    #[arg(long)]
    end_width: f64,

    #[arg(long, default_value_t = 600)]
    frames: usize,
}

#[derive(Args)]
struct SweepArgs {
    #[command(flatten)]
    view: ViewArgs,

    #[arg(long, default_value_t = 4.5)]
    width: f64,

    /// add or single
    #[arg(long, default_value = "add")]
    mode: SweepMode,
}

#[derive(Args)]
struct PanArgs {
    /// First Julia constant, given as X,Y
    #[arg(long, allow_hyphen_values = true)]
    from: Complex,

    /// Last Julia constant, given as X,Y
    #[arg(long, allow_hyphen_values = true)]
    to: Complex,

    #[arg(long, default_value_t = 600)]
    frames: usize,

    #[arg(long, default_value = "1920x1080")]
    resolution: Resolution,

    #[arg(long, default_value = "gradient")]
    colour_mode: ColourMode,
}

/// Picks the animation writer at runtime.
enum Encoder {
    Ffmpeg(FfmpegEncoder),
    PngFrames(PngSequenceEncoder),
}

impl AnimationEncoderPort for Encoder {
    fn open(&self, filepath: &Path, resolution: Resolution, fps: u32) -> anyhow::Result<Box<dyn FrameSink>> {
        match self {
            Self::Ffmpeg(encoder) => encoder.open(filepath, resolution, fps),
            Self::PngFrames(encoder) => encoder.open(filepath, resolution, fps),
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            Self::Ffmpeg(encoder) => encoder.extension(),
            Self::PngFrames(encoder) => encoder.extension(),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The explorer owns the terminal, so its logs go to a file.
fn init_file_logging(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .init();
}

fn params(fractal: FractalKind, view: &ViewArgs, width: f64) -> RenderParams {
    RenderParams {
        fractal,
        center: Complex::new(view.cx, view.cy),
        width,
        max_iterations: view.iterations,
    }
}

fn explore(settings: &Settings, export: ExportController<PngFilePresenter, Encoder>) -> anyhow::Result<()> {
    let input = TerminalInput::new().context("failed to prepare the terminal")?;
    let presenter = Arc::new(TerminalPresenter::new(io::stdout()));
    let renderer = InteractiveController::new(presenter);
    let bookmarks = JsonBookmarkStore::new(&settings.bookmarks_path);
    let state = ViewportState::new(Palette::default());

    let mut session = ExplorerSession::new(input, bookmarks, export, renderer, state, settings.status_digits);
    session.run()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?;
    let command = cli.command.unwrap_or(Command::Explore);

    match command {
        Command::Explore => init_file_logging(&settings.log_file)?,
        _ => init_stderr_logging(),
    }

    let encoder = if cli.png_frames {
        Encoder::PngFrames(PngSequenceEncoder)
    } else {
        Encoder::Ffmpeg(FfmpegEncoder::new(&settings.ffmpeg_path))
    };
    let export = ExportController::new(PngFilePresenter::new(), encoder, settings.export_options());

    let path = match command {
        Command::Explore => return explore(&settings, export),
        Command::Image(args) => {
            let fractal = match args.julia {
                Some(constant) => FractalKind::Julia { constant },
                None => FractalKind::Mandelbrot,
            };
            let request = StillRequest {
                output: args.view.resolution,
                antialiasing: args.aa,
            };

            export.export_still(
                params(fractal, &args.view, args.width),
                &Palette::with_random_offsets(args.view.colour_mode),
                request,
            )?
        }
        Command::Zoom(args) => export.export_zoom(
            params(FractalKind::Mandelbrot, &args.view, args.end_width),
            &Palette::with_random_offsets(args.view.colour_mode),
            args.view.resolution,
            args.frames,
        )?,
        Command::Sweep(args) => {
            let (path, frames) = export.export_sweep(
                params(FractalKind::Mandelbrot, &args.view, args.width),
                &Palette::with_random_offsets(args.view.colour_mode),
                args.view.resolution,
                args.mode,
            )?;
            info!(frames, "sweep finished");
            path
        }
        Command::Pan(args) => export.export_pan(
            args.from,
            args.to,
            &Palette::with_random_offsets(args.colour_mode),
            args.resolution,
            args.frames,
        )?,
    };

    println!("{}", path.display());
    Ok(())
}
