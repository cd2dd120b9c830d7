mod document;
mod present;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use loupe_engine::coords::{PixelSize, Viewport};
use loupe_engine::logging::{LoggingConfig, init_logging};
use loupe_engine::{Viewer, ViewerConfig};

use document::ImageDocument;
use present::LogListener;
use session::Player;

/// Size of generated pages: A4 at 72 dpi.
const SYNTHETIC_PAGE: PixelSize = PixelSize::new(595, 842);

#[derive(Parser, Debug)]
#[command(name = "loupe-studio", about = "Replay a pan/zoom session over a paginated document")]
#[command(version)]
struct Args {
    /// Page images, in page order. Synthetic pages are used when omitted
    pages: Vec<PathBuf>,

    /// Number of synthetic pages to generate
    #[arg(long, default_value_t = 3)]
    synthetic: usize,

    /// Display width in logical pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Display height in logical pixels
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Frames per second of the replay
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Directory receiving tile snapshots
    #[arg(short, long, default_value = "loupe-out")]
    out: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::from_verbosity(args.verbose));

    ensure!(args.fps > 0, "--fps must be positive");

    let document = if args.pages.is_empty() {
        ensure!(args.synthetic > 0, "no page images given and --synthetic is 0");
        log::info!("generating {} synthetic page(s)", args.synthetic);
        ImageDocument::synthetic(args.synthetic, SYNTHETIC_PAGE)
    } else {
        ImageDocument::open(&args.pages)?
    };

    let display = Viewport::new(args.width, args.height);
    let config = ViewerConfig::default().with_display(display);
    let mut viewer = Viewer::new(document, config).context("failed to open document")?;
    viewer.subscribe(Box::new(LogListener));

    let steps = session::builtin(display);
    let mut written = Vec::new();
    let summary = Player::new(args.fps).play(&mut viewer, &steps, |viewer, label| {
        written.extend(present::write_tiles(viewer, &args.out, label)?);
        Ok(())
    })?;

    let stats = viewer.stats();
    log::info!(
        "{} frames, {} notifications, {} detail renders ({} in place), {} base loads, \
         {} releases, {} skipped, {} clamped, {} failed",
        summary.frames,
        summary.notifications,
        summary.detail_renders,
        stats.partial_in_place,
        stats.full_renders + stats.full_in_place,
        stats.releases,
        stats.skipped,
        stats.clamped,
        stats.failures,
    );
    log::info!("{} snapshot file(s) in {}", written.len(), args.out.display());

    Ok(())
}
