use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use loupe_engine::coords::PixelSize;
use loupe_engine::tiles::RelativeRect;
use loupe_engine::{DocumentSource, Page, PixelBuffer, RenderError};

/// Side of one checkerboard cell on synthetic pages, in page pixels.
const CELL: u32 = 40;

/// A document whose pages are decoded images held in memory.
///
/// Renders crop the requested part of the page and resample it to the
/// buffer's size.
pub struct ImageDocument {
    pages: Vec<RgbaImage>,
}

impl ImageDocument {
    /// Decodes every file as one page, in order.
    pub fn open<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let pages = paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                image::open(path)
                    .with_context(|| format!("failed to decode page image {}", path.display()))
                    .map(|img| img.to_rgba8())
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!("opened {} page(s)", pages.len());
        Ok(Self { pages })
    }

    /// Numbered checkerboard pages, each tinted differently.
    pub fn synthetic(count: usize, size: PixelSize) -> Self {
        let pages = (0..count).map(|index| checkerboard(index, size)).collect();
        Self { pages }
    }

    fn image(&self, page: &Page) -> Result<&RgbaImage, RenderError> {
        self.pages.get(page.index).ok_or(RenderError::PageOutOfRange {
            index: page.index,
            count: self.pages.len(),
        })
    }

    fn render_region(
        &self,
        page: &Page,
        buffer: &mut PixelBuffer,
        rect: RelativeRect,
    ) -> Result<(), RenderError> {
        if !rect.is_valid() || !rect.is_in_range() {
            return Err(RenderError::InvalidRect(format!("{rect:?}")));
        }

        let image = self.image(page)?;
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(RenderError::Backend(format!("page {} is empty", page.index)));
        }
        let region = rect.to_page_pixels(PixelSize::new(width, height));

        let x0 = (region.min().x.floor() as u32).min(width - 1);
        let y0 = (region.min().y.floor() as u32).min(height - 1);
        let x1 = (region.max().x.ceil() as u32).clamp(x0 + 1, width);
        let y1 = (region.max().y.ceil() as u32).clamp(y0 + 1, height);

        let target = buffer.size();
        let cropped = imageops::crop_imm(image, x0, y0, x1 - x0, y1 - y0).to_image();
        let scaled = imageops::resize(&cropped, target.width, target.height, FilterType::Triangle);

        let pixels = buffer.pixels_mut();
        if pixels.len() != scaled.as_raw().len() {
            return Err(RenderError::BufferFootprintMismatch {
                expected: PixelSize::new(scaled.width(), scaled.height()),
                actual: target,
            });
        }
        pixels.copy_from_slice(scaled.as_raw());
        Ok(())
    }
}

impl DocumentSource for ImageDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&mut self, index: usize) -> Result<Page, RenderError> {
        let image = self.pages.get(index).ok_or(RenderError::PageOutOfRange {
            index,
            count: self.pages.len(),
        })?;
        Ok(Page::new(index, PixelSize::new(image.width(), image.height())))
    }

    fn render_full_into(
        &mut self,
        page: &Page,
        buffer: &mut PixelBuffer,
    ) -> Result<(), RenderError> {
        self.render_region(page, buffer, RelativeRect::FULL)
    }

    fn render_partial_into(
        &mut self,
        page: &Page,
        buffer: &mut PixelBuffer,
        rect: RelativeRect,
    ) -> Result<(), RenderError> {
        self.render_region(page, buffer, rect)
    }
}

fn checkerboard(index: usize, size: PixelSize) -> RgbaImage {
    let tint = [
        [214, 80, 64],
        [64, 150, 214],
        [90, 190, 96],
        [220, 180, 60],
    ][index % 4];

    RgbaImage::from_fn(size.width, size.height, |x, y| {
        let border = x < 4 || y < 4 || x + 4 >= size.width || y + 4 >= size.height;
        // One dark band per page number along the top, so pages are told apart.
        let band = y / CELL == 1 && (x / CELL) % 2 == 1 && (x / CELL) / 2 <= index as u32;

        if border || band {
            Rgba([20, 20, 20, 255])
        } else if (x / CELL + y / CELL) % 2 == 0 {
            Rgba([tint[0], tint[1], tint[2], 255])
        } else {
            Rgba([245, 245, 240, 255])
        }
    })
}
