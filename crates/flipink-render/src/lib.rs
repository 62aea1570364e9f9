//! Flipink Render Library
//!
//! Draws editor frames onto raster surfaces and turns the timeline into video.
//! The bundled surface is a CPU pixmap that reads back as PNG.

pub mod export;
mod pixmap;
mod renderer;
mod surface;

pub use export::{capture_frames, encode_video, export_video, prepare_export};
pub use pixmap::PixmapSurface;
pub use renderer::{RenderError, RenderResult, Renderer};
pub use surface::{LineStyle, Shadow, Surface, to_color};
