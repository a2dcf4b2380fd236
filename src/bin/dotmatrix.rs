use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

use dotmatrix::{
    CpuSurface, DisplayConfig, DotMatrixDisplay, DotMatrixEngine, FrameRGBA, Host, Theme, Viewport,
    Vocabulary,
};

/// Host refresh rate the display is stepped at; the display throttles itself.
const HOST_FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "dotmatrix", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the display at one point in time as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence.
    Frames(FramesArgs),
    /// Print one generation cycle of word placements as JSON.
    Placements(PlacementArgs),
}

#[derive(Args, Debug)]
struct DisplayArgs {
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    #[arg(long, value_enum, default_value_t = ThemeChoice::Dark)]
    theme: ThemeChoice,

    /// Display config JSON; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Comma-separated word list replacing the built-in vocabulary.
    #[arg(long, value_delimiter = ',')]
    words: Vec<String>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    display: DisplayArgs,

    /// Time since mount, in milliseconds.
    #[arg(long, default_value_t = 3000.0)]
    at_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Leave the background transparent instead of filling it.
    #[arg(long)]
    transparent: bool,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    display: DisplayArgs,

    /// Length of the sequence, in milliseconds since mount.
    #[arg(long, default_value_t = 3000.0)]
    duration_ms: f64,

    /// Write every n-th host frame.
    #[arg(long, default_value_t = 2)]
    every: u32,

    /// Output directory for `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long)]
    transparent: bool,
}

#[derive(Args, Debug)]
struct PlacementArgs {
    #[command(flatten)]
    display: DisplayArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeChoice {
    Dark,
    Light,
}

impl From<ThemeChoice> for Theme {
    fn from(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Placements(args) => cmd_placements(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &DisplayArgs) -> anyhow::Result<DisplayConfig> {
    let mut cfg = match &args.config {
        Some(path) => DisplayConfig::from_json_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => DisplayConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg = cfg.with_seed(seed);
    }
    Ok(cfg)
}

fn load_vocabulary(args: &DisplayArgs) -> anyhow::Result<Vocabulary> {
    if args.words.is_empty() {
        return Ok(Vocabulary::default());
    }
    Ok(Vocabulary::new(&args.words).context("parse --words")?)
}

fn mount_cpu(
    args: &DisplayArgs,
    transparent: bool,
) -> anyhow::Result<(Host, DotMatrixDisplay<CpuSurface>)> {
    let cfg = load_config(args)?;
    let vocab = load_vocabulary(args)?;
    let theme = Theme::from(args.theme);
    let viewport = Viewport::new(args.width, args.height);

    let host = Host::new(viewport).with_theme_attribute(Some(theme.as_str()));
    let background = (!transparent).then_some(theme.palette().background);
    let surface = CpuSurface::new(viewport)
        .context("create cpu surface")?
        .with_background(background);
    let display =
        DotMatrixDisplay::mount(&host, cfg, vocab, Some(surface)).context("mount display")?;
    Ok((host, display))
}

fn rasterize(display: &DotMatrixDisplay<CpuSurface>) -> anyhow::Result<FrameRGBA> {
    display.inspect(|_, surface| {
        let surface = surface.context("display has no surface")?;
        Ok(surface.rasterize()?)
    })
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (host, display) = mount_cpu(&args.display, args.transparent)?;
    while host.now_ms() < args.at_ms {
        host.step(HOST_FRAME_MS);
    }
    let frame = rasterize(&display)?;
    write_png(&args.out, &frame)?;

    let (progress, placed) = display.inspect(|e, _| (e.progress(), e.placements().len()));
    tracing::info!(progress, placed, "frame rendered");
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.every > 0, "--every must be > 0");
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let (host, display) = mount_cpu(&args.display, args.transparent)?;
    let mut tick: u64 = 0;
    let mut written: u64 = 0;
    while host.now_ms() < args.duration_ms {
        host.step(HOST_FRAME_MS);
        tick += 1;
        if tick % u64::from(args.every) != 0 {
            continue;
        }
        let frame = rasterize(&display)?;
        let path = args.out_dir.join(format!("frame_{written:05}.png"));
        write_png(&path, &frame)?;
        written += 1;
    }

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_placements(args: PlacementArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.display)?;
    let vocab = load_vocabulary(&args.display)?;
    let viewport = Viewport::new(args.display.width, args.display.height);
    let mut engine = DotMatrixEngine::new(cfg, vocab, args.display.theme.into(), viewport)?;
    engine.regenerate();

    let json = serde_json::to_string_pretty(engine.placements())
        .context("serialize placements")?;
    println!("{json}");
    Ok(())
}
