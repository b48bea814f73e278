//! perceptual - gamut inspection and diagram export
//!
//! Thin command-line front end over the perceptual color picker core.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use perceptual_core::GenericColor;
use perceptual_icc::StandardProfile;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "perceptual")]
#[command(author, version, about = "Perceptual color picker core: gamut queries and diagrams")]
#[command(long_about = "
Inspects RGB color spaces in CIELab/CIELCh-D50 and Oklab/Oklch, and renders
the gamut diagrams a perceptual color picker shows.

Examples:
  perceptual info                              # built-in sRGB
  perceptual info --profile display.icc -v     # with max-chroma table
  perceptual gamut 60 90 150                   # CIELCh-D50 in gamut?
  perceptual gamut 0.7 0.3 30 --oklch --standard display-p3
  perceptual chroma-hue -o plane.png --size 512 --lightness 70
  perceptual chroma-lightness -o slice.png --width 300 --height 200 --hue 250
  perceptual wheel -o wheel.png --size 400 --thickness 40
  perceptual gradient -o slider.png --from 50,60,350 --to 50,60,10,0
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of render threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Write log output to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show profile metadata and gamut statistics
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Test a color against the gamut and reduce its chroma
    #[command(visible_alias = "g", allow_negative_numbers = true)]
    Gamut(GamutArgs),

    /// Render the a/b plane at one lightness
    #[command(name = "chroma-hue", visible_alias = "ch")]
    ChromaHue(ChromaHueArgs),

    /// Render chroma against lightness at one hue
    #[command(name = "chroma-lightness", visible_alias = "cl", allow_negative_numbers = true)]
    ChromaLightness(ChromaLightnessArgs),

    /// Render the hue wheel
    #[command(visible_alias = "w")]
    Wheel(WheelArgs),

    /// Render a slider gradient between two colors
    #[command(visible_alias = "gr")]
    Gradient(GradientArgs),
}

/// Which RGB color space to work in.
#[derive(Args, Clone)]
struct ProfileArgs {
    /// ICC profile file
    #[arg(short, long, conflicts_with = "standard")]
    profile: Option<PathBuf>,

    /// Built-in color space: srgb, adobe-rgb, display-p3, rec2020, wide-gamut
    #[arg(short, long, default_value_t = StandardProfile::Srgb)]
    standard: StandardProfile,
}

#[derive(Args)]
struct InfoArgs {
    #[command(flatten)]
    space: ProfileArgs,

    /// Hue step of the max-chroma table, in degrees
    #[arg(long, default_value = "30")]
    hue_step: f64,
}

#[derive(Args)]
struct GamutArgs {
    /// Lightness (0-100 for CIELCh-D50, 0-1 for Oklch)
    lightness: f64,

    /// Chroma
    chroma: f64,

    /// Hue in degrees
    hue: f64,

    /// Interpret the color as Oklch instead of CIELCh-D50
    #[arg(long)]
    oklch: bool,

    #[command(flatten)]
    space: ProfileArgs,
}

#[derive(Args)]
struct ChromaHueArgs {
    /// Output PNG file
    #[arg(short, long)]
    output: PathBuf,

    /// Width and height in pixels
    #[arg(long, default_value = "256")]
    size: u32,

    /// Transparent margin around the disc, in pixels
    #[arg(long, default_value = "0")]
    border: f64,

    /// CIELab lightness of the plane
    #[arg(short, long, default_value = "50")]
    lightness: f64,

    #[command(flatten)]
    space: ProfileArgs,
}

#[derive(Args)]
struct ChromaLightnessArgs {
    /// Output PNG file
    #[arg(short, long)]
    output: PathBuf,

    /// Width in pixels
    #[arg(short = 'W', long, default_value = "256")]
    width: u32,

    /// Height in pixels
    #[arg(short = 'H', long, default_value = "256")]
    height: u32,

    /// CIELCh-D50 hue in degrees
    #[arg(long, default_value = "0")]
    hue: f64,

    #[command(flatten)]
    space: ProfileArgs,
}

#[derive(Args)]
struct WheelArgs {
    /// Output PNG file
    #[arg(short, long)]
    output: PathBuf,

    /// Width and height in pixels
    #[arg(long, default_value = "256")]
    size: u32,

    /// Ring thickness in pixels
    #[arg(short, long, default_value = "32")]
    thickness: f64,

    /// Transparent margin around the ring, in pixels
    #[arg(long, default_value = "0")]
    border: f64,

    #[command(flatten)]
    space: ProfileArgs,
}

#[derive(Args)]
struct GradientArgs {
    /// Output PNG file
    #[arg(short, long)]
    output: PathBuf,

    /// First color as CIELCh-D50 `L,C,h` with optional `,alpha`
    #[arg(long, value_parser = parse_lcha, allow_hyphen_values = true)]
    from: GenericColor,

    /// Second color as CIELCh-D50 `L,C,h` with optional `,alpha`
    #[arg(long, value_parser = parse_lcha, allow_hyphen_values = true)]
    to: GenericColor,

    /// Length in pixels
    #[arg(short, long, default_value = "256")]
    length: u32,

    /// Thickness in pixels
    #[arg(short, long, default_value = "20")]
    thickness: u32,

    #[command(flatten)]
    space: ProfileArgs,
}

/// Parses `L,C,h` or `L,C,h,alpha`; alpha defaults to 1.
fn parse_lcha(text: &str) -> std::result::Result<GenericColor, String> {
    let values = text
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in '{text}': {e}"))?;
    match values[..] {
        [l, c, h] => Ok(GenericColor::with_fourth(l, c, h, 1.0)),
        [l, c, h, alpha] => Ok(GenericColor::with_fourth(l, c, h, alpha)),
        _ => Err(format!("expected L,C,h or L,C,h,alpha, got '{text}'")),
    }
}

/// Installs the log subscriber. `RUST_LOG` overrides the verbosity flag.
///
/// The returned guard flushes the log file when dropped.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Gamut(args) => commands::gamut::run(args),
        Commands::ChromaHue(args) => commands::render::run_chroma_hue(args, cli.threads),
        Commands::ChromaLightness(args) => {
            commands::render::run_chroma_lightness(args, cli.threads)
        }
        Commands::Wheel(args) => commands::render::run_wheel(args, cli.threads),
        Commands::Gradient(args) => commands::render::run_gradient(args, cli.threads),
    }
}
