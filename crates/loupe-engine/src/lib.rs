//! Loupe engine crate.
//!
//! Pan and zoom over a paginated raster document with a two-tier tile scheme:
//! a cheap base tile for the whole page and a sharp detail tile that tracks
//! the visible region. Decoding, input capture and presentation belong to the
//! host; this crate decides what to render and where.

pub mod camera;
pub mod config;
pub mod controls;
pub mod coordinator;
pub mod coords;
pub mod document;
pub mod error;
pub mod events;
pub mod input;
pub mod logging;
pub mod scene;
pub mod tiles;
pub mod time;
pub mod viewer;

pub use config::ViewerConfig;
pub use coordinator::{RenderReason, RenderStats};
pub use document::{DocumentSource, Page, PixelBuffer};
pub use error::{RenderError, Result, ViewerError};
pub use viewer::{FrameReport, Viewer};
