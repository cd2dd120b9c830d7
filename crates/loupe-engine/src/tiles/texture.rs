use crate::coords::PixelSize;
use crate::document::PixelBuffer;

/// Sampling mode used when presenting a tile.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum FilterMode {
    /// Pixel-exact sampling; used once the view has settled.
    #[default]
    Nearest,
    /// Smoothed sampling; used while a zoom is in flight.
    Smooth,
}

/// A tile's backing buffer plus the page it was rendered from.
///
/// The buffer is created on first use and released explicitly before being
/// replaced. A replacement is only swapped in once it has been rendered.
#[derive(Debug, Default)]
pub struct TileTexture {
    buffer: Option<PixelBuffer>,
    page: Option<usize>,
    filter: FilterMode,
}

impl TileTexture {
    pub fn new(filter: FilterMode) -> Self {
        Self { buffer: None, page: None, filter }
    }

    #[inline]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    #[inline]
    pub fn size(&self) -> Option<PixelSize> {
        self.buffer.as_ref().map(PixelBuffer::size)
    }

    /// Page the current contents belong to.
    #[inline]
    pub fn page(&self) -> Option<usize> {
        self.page
    }

    #[inline]
    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    #[inline]
    pub fn set_filter(&mut self, filter: FilterMode) {
        self.filter = filter;
    }

    /// True when a live buffer of exactly `size` exists for `page`, so an
    /// in-place render is safe.
    pub fn is_current(&self, page: usize, size: PixelSize) -> bool {
        self.page == Some(page) && self.size() == Some(size)
    }

    /// Buffer for an in-place render, if one is allocated.
    #[inline]
    pub fn buffer_mut(&mut self) -> Option<&mut PixelBuffer> {
        self.buffer.as_mut()
    }

    /// Stores a newly rendered buffer. Any previous buffer is released first.
    pub fn assign(&mut self, buffer: PixelBuffer, page: usize) {
        self.release();
        self.buffer = Some(buffer);
        self.page = Some(page);
    }

    /// Marks in-place rendered contents as belonging to `page`.
    pub fn mark_page(&mut self, page: usize) {
        if self.buffer.is_some() {
            self.page = Some(page);
        }
    }

    /// Drops the buffer. Returns whether one was held.
    pub fn release(&mut self) -> bool {
        self.page = None;
        self.buffer.take().is_some()
    }
}
