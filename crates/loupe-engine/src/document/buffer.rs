use crate::coords::PixelSize;

/// Bytes per RGBA8 pixel.
const BYTES_PER_PIXEL: usize = 4;

/// Tightly packed RGBA8 pixel storage backing a tile.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: PixelSize,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Allocates a zeroed (transparent) buffer.
    pub fn new(size: PixelSize) -> Self {
        Self {
            size,
            pixels: vec![0; Self::byte_len(size)],
        }
    }

    /// Wraps existing RGBA8 data; `None` when the length does not match `size`.
    pub fn from_rgba(size: PixelSize, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == Self::byte_len(size)).then_some(Self { size, pixels })
    }

    #[inline]
    pub fn size(&self) -> PixelSize {
        self.size
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.size.width as usize * BYTES_PER_PIXEL
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    fn byte_len(size: PixelSize) -> usize {
        size.width as usize * size.height as usize * BYTES_PER_PIXEL
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("size", &self.size)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}
