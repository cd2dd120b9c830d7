//! Input-driven camera controllers.
//!
//! Both controllers mutate [`ViewportState`](crate::camera::ViewportState)
//! directly and buffer their notifications for the viewer to route.

mod pan;
mod zoom;

pub use pan::PanController;
pub use zoom::ZoomController;
