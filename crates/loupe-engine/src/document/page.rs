use crate::coords::PixelSize;

/// One page of the document, as reported by the document source.
///
/// Immutable once fetched; navigation replaces it wholesale.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Page {
    pub index: usize,
    /// Intrinsic size in pixels.
    pub size: PixelSize,
}

impl Page {
    pub const fn new(index: usize, size: PixelSize) -> Self {
        Self { index, size }
    }
}
