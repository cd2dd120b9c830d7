//! Contract with the external document rasterizer.
//!
//! The engine never decodes documents and never inspects pixels; it only asks
//! for a page's intrinsic size and for renders of a page (or a relative
//! rectangle of it) at a given pixel size.

mod buffer;
mod page;

pub use buffer::PixelBuffer;
pub use page::Page;

use crate::coords::PixelSize;
use crate::error::RenderError;
use crate::tiles::RelativeRect;

/// A paginated raster document plus its renderer.
///
/// The `*_into` variants write into an existing buffer at that buffer's size;
/// implementations must reject a buffer they cannot fill completely with
/// [`RenderError::BufferFootprintMismatch`] rather than writing part of it.
pub trait DocumentSource {
    fn page_count(&self) -> usize;

    /// Page metadata; `index` must be below [`page_count`](Self::page_count).
    fn page(&mut self, index: usize) -> Result<Page, RenderError>;

    /// Renders the whole page at the buffer's size.
    fn render_full_into(
        &mut self,
        page: &Page,
        buffer: &mut PixelBuffer,
    ) -> Result<(), RenderError>;

    /// Renders `rect` of the page, stretched over the whole buffer.
    fn render_partial_into(
        &mut self,
        page: &Page,
        buffer: &mut PixelBuffer,
        rect: RelativeRect,
    ) -> Result<(), RenderError>;

    /// Renders the whole page into a freshly allocated buffer.
    fn render_full(&mut self, page: &Page, size: PixelSize) -> Result<PixelBuffer, RenderError> {
        let mut buffer = PixelBuffer::new(size);
        self.render_full_into(page, &mut buffer)?;
        Ok(buffer)
    }

    /// Renders `rect` of the page into a freshly allocated buffer.
    fn render_partial(
        &mut self,
        page: &Page,
        size: PixelSize,
        rect: RelativeRect,
    ) -> Result<PixelBuffer, RenderError> {
        let mut buffer = PixelBuffer::new(size);
        self.render_partial_into(page, &mut buffer, rect)?;
        Ok(buffer)
    }
}
