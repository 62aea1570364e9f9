//! CPU raster surface backed by a tiny-skia pixmap.

use crate::renderer::{RenderError, RenderResult};
use crate::surface::{LineStyle, Surface};
use kurbo::{Cap, Join, Point, Rect, Size};
use peniko::Color;
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Rings used to fake a blurred shadow.
const SHADOW_STEPS: u32 = 8;

/// Software surface. Reads back as PNG.
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// A transparent surface. Fails for a zero or oversized dimension.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::Size { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA of the pixel at `(x, y)`, if inside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    fn stroke_path(&mut self, path: &tiny_skia::Path, color: tiny_skia::Color, stroke: &Stroke) {
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        self.pixmap
            .stroke_path(path, &paint, stroke, Transform::identity(), None);
    }
}

fn paint_color(color: Color, opacity: f32) -> tiny_skia::Color {
    let rgba = color.to_rgba8();
    let mut out = tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
    out.apply_opacity(opacity);
    out
}

fn line_cap(cap: Cap) -> LineCap {
    match cap {
        Cap::Butt => LineCap::Butt,
        Cap::Square => LineCap::Square,
        Cap::Round => LineCap::Round,
    }
}

fn line_join(join: Join) -> LineJoin {
    match join {
        Join::Bevel => LineJoin::Bevel,
        Join::Miter => LineJoin::Miter,
        Join::Round => LineJoin::Round,
    }
}

fn polyline_path(points: &[Point]) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    if rest.is_empty() {
        // A lone point still gets its caps
        pb.line_to(first.x as f32, first.y as f32);
    }
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    pb.finish()
}

impl Surface for PixmapSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.width()), f64::from(self.height()))
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(rect) = tiny_skia::Rect::from_ltrb(
            rect.x0 as f32,
            rect.y0 as f32,
            rect.x1 as f32,
            rect.y1 as f32,
        ) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(paint_color(color, 1.0));
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &LineStyle) {
        if style.width <= 0.0 || style.opacity <= 0.0 {
            return;
        }
        let Some(path) = polyline_path(points) else {
            return;
        };
        let mut stroke = Stroke {
            width: style.width as f32,
            line_cap: line_cap(style.cap),
            line_join: line_join(style.join),
            ..Stroke::default()
        };

        if let Some(shadow) = style.shadow.filter(|s| s.blur > 0.0) {
            // Widest ring first; overlapping rings darken toward the line.
            let reach = shadow.blur * 1.5;
            let ring_opacity = style.opacity / SHADOW_STEPS as f32;
            let color = paint_color(shadow.color, ring_opacity);
            for step in (1..=SHADOW_STEPS).rev() {
                let extra = reach * f64::from(step) / f64::from(SHADOW_STEPS);
                stroke.width = (style.width + 2.0 * extra) as f32;
                self.stroke_path(&path, color, &stroke);
            }
            stroke.width = style.width as f32;
        }

        self.stroke_path(&path, paint_color(style.color, style.opacity), &stroke);
    }

    fn encode_png(&self) -> RenderResult<Vec<u8>> {
        Ok(self.pixmap.encode_png()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Shadow;

    fn white_surface(w: u32, h: u32) -> PixmapSurface {
        let mut surface = PixmapSurface::new(w, h).unwrap();
        let bounds = surface.bounds();
        surface.fill_rect(bounds, Color::from_rgba8(255, 255, 255, 255));
        surface
    }

    fn black(width: f64) -> LineStyle {
        LineStyle::new(Color::from_rgba8(0, 0, 0, 255), width)
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(matches!(
            PixmapSurface::new(0, 10),
            Err(RenderError::Size { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_clear_and_fill() {
        let mut surface = white_surface(4, 4);
        assert_eq!(surface.pixel(0, 0), Some([255, 255, 255, 255]));
        surface.clear();
        assert_eq!(surface.pixel(3, 3), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(4, 0), None);
    }

    #[test]
    fn test_stroke_covers_line() {
        let mut surface = white_surface(40, 20);
        surface.stroke_polyline(&[Point::new(5.0, 10.0), Point::new(35.0, 10.0)], &black(3.0));

        assert_eq!(surface.pixel(20, 9), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(20, 2), Some([255, 255, 255, 255]));
        // Round cap reaches past the end point
        assert!(surface.pixel(35, 9).is_some_and(|p| p[0] < 128));
    }

    #[test]
    fn test_butt_cap_stops_at_end() {
        let mut surface = white_surface(40, 20);
        let style = black(6.0).with_cap(Cap::Butt);
        surface.stroke_polyline(&[Point::new(5.0, 10.0), Point::new(30.0, 10.0)], &style);
        assert_eq!(surface.pixel(31, 9), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(29, 9), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_join_style_is_honored() {
        // Right angle at (20, 20); the outer corner of the join is near (23, 17).
        let points = [Point::new(5.0, 20.0), Point::new(20.0, 20.0), Point::new(20.0, 35.0)];
        let mut miter = white_surface(40, 40);
        let mut bevel = white_surface(40, 40);
        let mut style = black(8.0).with_cap(Cap::Butt);
        style.join = Join::Miter;
        miter.stroke_polyline(&points, &style);
        style.join = Join::Bevel;
        bevel.stroke_polyline(&points, &style);

        assert_eq!(miter.pixel(23, 16), Some([0, 0, 0, 255]));
        assert_eq!(bevel.pixel(23, 16), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_opacity_blends_with_background() {
        let mut surface = white_surface(20, 20);
        let style = black(4.0).with_opacity(0.2);
        surface.stroke_polyline(&[Point::new(2.0, 10.0), Point::new(18.0, 10.0)], &style);
        let p = surface.pixel(10, 9).unwrap_or_default();
        assert_eq!(p[3], 255);
        assert!((200..=208).contains(&p[0]), "got {p:?}");
    }

    #[test]
    fn test_shadow_spreads_beyond_line() {
        let mut plain = white_surface(40, 40);
        let mut shadowed = white_surface(40, 40);
        let points = [Point::new(5.0, 20.0), Point::new(35.0, 20.0)];
        plain.stroke_polyline(&points, &black(3.0));
        shadowed.stroke_polyline(&points, &black(3.0).with_shadow(Shadow::default()));

        assert_eq!(plain.pixel(20, 25), Some([255, 255, 255, 255]));
        assert!(shadowed.pixel(20, 25).is_some_and(|p| p[0] < 255));
        // The line itself stays solid on top of its shadow
        assert_eq!(shadowed.pixel(20, 19), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_encode_png_signature() {
        let surface = white_surface(3, 2);
        let png = surface.encode_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(1, 1).0, [255, 255, 255, 255]);
    }
}
