//! Software rasterization of entity snapshots into RGB frames.

mod canvas;
mod frame;
mod scene;

pub use canvas::{Canvas, surface_size};
pub use frame::Frame;
pub use scene::{RenderError, Viewport, rasterize};
