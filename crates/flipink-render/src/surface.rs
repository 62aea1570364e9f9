//! Draw-primitive contract for raster backends.

use crate::renderer::RenderResult;
use flipink_core::Rgb;
use kurbo::{Cap, Join, Point, Rect, Size};
use peniko::Color;

/// Soft drop shadow drawn beneath a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    /// Blur radius in pixels.
    pub blur: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Color::from_rgba8(0, 0, 0, 77),
            blur: 10.0,
        }
    }
}

/// How a polyline is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    pub cap: Cap,
    pub join: Join,
    /// Extra alpha multiplier in `0.0..=1.0`.
    pub opacity: f32,
    pub shadow: Option<Shadow>,
}

impl LineStyle {
    /// Opaque line with round caps and joins.
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            cap: Cap::Round,
            join: Join::Round,
            opacity: 1.0,
            shadow: None,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn with_cap(mut self, cap: Cap) -> Self {
        self.cap = cap;
        self
    }
}

/// Convert an editor color to a paint color.
pub fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba8(rgb.r, rgb.g, rgb.b, 255)
}

/// A raster target the renderer draws into.
pub trait Surface {
    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Reset every pixel to fully transparent.
    fn clear(&mut self);

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke an open polyline through `points`.
    fn stroke_polyline(&mut self, points: &[Point], style: &LineStyle);

    /// Read the surface back as a PNG image.
    fn encode_png(&self) -> RenderResult<Vec<u8>>;

    /// Rectangle covering the whole surface.
    fn bounds(&self) -> Rect {
        self.size().to_rect()
    }
}
