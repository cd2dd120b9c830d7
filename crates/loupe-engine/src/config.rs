use crate::coords::Viewport;
use crate::scene::ZIndex;

/// Tuning knobs for a [`Viewer`](crate::Viewer).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Display size in logical pixels.
    pub display: Viewport,
    /// Orthographic half-height at zoom level 1, in world units.
    pub base_half_height: f32,
    /// Zoom level change per scroll notch.
    pub zoom_step: f32,
    /// Seconds without scroll input before a zoom counts as complete.
    pub zoom_idle: f64,
    /// Seconds between pan "ongoing" notifications.
    pub pan_slice: f32,
    /// Fraction of the display a page fills at zoom level 1.
    pub page_margin: f32,
    /// Layer of whichever tile is shown on top.
    pub top_layer: ZIndex,
    pub bottom_layer: ZIndex,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            display: Viewport::new(1280.0, 720.0),
            base_half_height: 1.0,
            zoom_step: 0.1,
            zoom_idle: 0.1,
            pan_slice: 0.2,
            page_margin: 0.95,
            top_layer: ZIndex::TOP,
            bottom_layer: ZIndex::BOTTOM,
        }
    }
}

impl ViewerConfig {
    pub fn with_display(mut self, display: Viewport) -> Self {
        self.display = display;
        self
    }

    pub fn with_base_half_height(mut self, half_height: f32) -> Self {
        self.base_half_height = half_height;
        self
    }

    pub fn with_zoom_step(mut self, step: f32) -> Self {
        self.zoom_step = step;
        self
    }

    pub fn with_zoom_idle(mut self, seconds: f64) -> Self {
        self.zoom_idle = seconds;
        self
    }

    pub fn with_pan_slice(mut self, seconds: f32) -> Self {
        self.pan_slice = seconds;
        self
    }

    pub fn with_page_margin(mut self, margin: f32) -> Self {
        self.page_margin = margin;
        self
    }

    pub fn with_layers(mut self, top: ZIndex, bottom: ZIndex) -> Self {
        self.top_layer = top;
        self.bottom_layer = bottom;
        self
    }
}
