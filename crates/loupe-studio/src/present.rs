//! Stand-in presentation: logs what a display would do and dumps the tile
//! buffers as PNG files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use loupe_engine::coords::PixelSize;
use loupe_engine::events::MovementListener;
use loupe_engine::scene::TileKind;
use loupe_engine::tiles::TileSnapshot;
use loupe_engine::{DocumentSource, PixelBuffer, Viewer};

/// Logs every notification at `info`, tile updates at `debug`.
#[derive(Debug, Default)]
pub struct LogListener;

impl MovementListener for LogListener {
    fn on_translation_complete(&mut self) {
        log::info!("pan complete");
    }

    fn on_zoom_started(&mut self) {
        log::info!("zoom started");
    }

    fn on_zoom_level_changed(&mut self, zoom: f32) {
        log::info!("zoom level {zoom:.2}");
    }

    fn on_zoom_complete(&mut self) {
        log::info!("zoom complete");
    }

    fn on_footprint_changed(&mut self, size: PixelSize) {
        log::info!("detail footprint {size}");
    }

    fn on_page_changed(&mut self, index: usize) {
        log::info!("page {}", index + 1);
    }

    fn on_tiles_updated(&mut self, tiles: &TileSnapshot) {
        match tiles.detail {
            Some(detail) => {
                log::debug!("tiles: detail at {:?} size {:?}", detail.center, detail.size)
            }
            None => log::debug!("tiles: base only"),
        }
    }
}

/// Writes `<label>-base.png` and, when present, `<label>-detail.png`.
///
/// Returns the paths written.
pub fn write_tiles<D: DocumentSource>(
    viewer: &Viewer<D>,
    dir: &Path,
    label: &str,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let mut written = Vec::new();
    for (kind, suffix) in [(TileKind::Base, "base"), (TileKind::Detail, "detail")] {
        let Some(buffer) = viewer.tile_buffer(kind) else {
            continue;
        };

        let path = dir.join(format!("{label}-{suffix}.png"));
        save_png(buffer, &path)?;
        log::info!("wrote {} ({})", path.display(), buffer.size());
        written.push(path);
    }
    Ok(written)
}

fn save_png(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let size = buffer.size();
    let image = RgbaImage::from_raw(size.width, size.height, buffer.pixels().to_vec())
        .context("pixel buffer does not match its size")?;
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))
}
