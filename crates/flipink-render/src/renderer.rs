//! Projects editor state onto a surface.

use crate::surface::{LineStyle, Shadow, Surface, to_color};
use flipink_core::{EditorConfig, EditorSession, FrameView, Redraw, Segment, Stroke};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
    #[error("Invalid surface size {width}x{height}")]
    Size { width: u32, height: u32 },
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Draws frames, onion skins and selection highlights.
#[derive(Debug, Clone)]
pub struct Renderer {
    background: Color,
    onion_opacity: f32,
    selection_boost: f64,
    selection_shadow: Shadow,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Renderer {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            background: to_color(config.background),
            onion_opacity: config.onion_skin_opacity,
            selection_boost: config.selection_width_boost,
            selection_shadow: Shadow::default(),
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Repaint the whole view: background, onion underlay, then the frame.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, view: &FrameView<'_>) {
        self.paint_background(surface);
        if let Some(underlay) = view.underlay {
            self.draw_strokes(surface, underlay, None, self.onion_opacity);
        }
        self.draw_strokes(surface, view.strokes, view.selected, 1.0);
    }

    /// Repaint a bare frame with no underlay or highlight.
    pub fn render_frame<S: Surface + ?Sized>(&self, surface: &mut S, strokes: &[Stroke]) {
        self.paint_background(surface);
        self.draw_strokes(surface, strokes, None, 1.0);
    }

    /// Paint only the newest segment of an in-progress stroke.
    pub fn render_segment<S: Surface + ?Sized>(&self, surface: &mut S, segment: &Segment) {
        let style = LineStyle::new(to_color(segment.color), segment.width);
        surface.stroke_polyline(&[segment.from, segment.to], &style);
    }

    /// Apply the repaint an editor operation asked for.
    pub fn apply<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        session: &EditorSession,
        redraw: Redraw,
    ) {
        match redraw {
            Redraw::None => {}
            Redraw::Segment(segment) => self.render_segment(surface, &segment),
            Redraw::Full => self.render(surface, &session.view()),
        }
    }

    fn paint_background<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        let bounds = surface.bounds();
        surface.fill_rect(bounds, self.background);
    }

    fn draw_strokes<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        strokes: &[Stroke],
        selected: Option<usize>,
        opacity: f32,
    ) {
        for (index, stroke) in strokes.iter().enumerate() {
            if !stroke.is_visible() {
                continue;
            }
            let mut style =
                LineStyle::new(to_color(stroke.color), stroke.width).with_opacity(opacity);
            if selected == Some(index) {
                style.width += self.selection_boost;
                style = style.with_shadow(self.selection_shadow);
            }
            surface.stroke_polyline(&stroke.points, &style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipink_core::{Point, Rgb, ToolMode};
    use kurbo::{Rect, Size};

    /// Records draw calls instead of rasterizing.
    #[derive(Default)]
    struct RecordingSurface {
        cleared: usize,
        fills: Vec<Color>,
        lines: Vec<(Vec<Point>, LineStyle)>,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Size {
            Size::new(100.0, 100.0)
        }

        fn clear(&mut self) {
            self.cleared += 1;
            self.fills.clear();
            self.lines.clear();
        }

        fn fill_rect(&mut self, _rect: Rect, color: Color) {
            self.fills.push(color);
        }

        fn stroke_polyline(&mut self, points: &[Point], style: &LineStyle) {
            self.lines.push((points.to_vec(), *style));
        }

        fn encode_png(&self) -> RenderResult<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    fn line(y: f64, color: Rgb) -> Stroke {
        Stroke::new(vec![Point::new(0.0, y), Point::new(10.0, y)], color, 3.0)
    }

    #[test]
    fn test_skips_single_point_strokes() {
        let renderer = Renderer::default();
        let mut surface = RecordingSurface::default();
        let strokes = vec![
            Stroke::new(vec![Point::new(1.0, 1.0)], Rgb::BLACK, 3.0),
            line(5.0, Rgb::BLACK),
        ];
        renderer.render_frame(&mut surface, &strokes);
        assert_eq!(surface.cleared, 1);
        assert_eq!(surface.fills, vec![to_color(Rgb::WHITE)]);
        assert_eq!(surface.lines.len(), 1);
    }

    #[test]
    fn test_underlay_then_frame() {
        let renderer = Renderer::default();
        let mut surface = RecordingSurface::default();
        let under = vec![line(1.0, Rgb::new(255, 0, 0))];
        let over = vec![line(2.0, Rgb::BLACK)];
        let view = FrameView {
            strokes: &over,
            underlay: Some(&under),
            selected: None,
        };
        renderer.render(&mut surface, &view);

        assert_eq!(surface.lines.len(), 2);
        assert_eq!(surface.lines[0].1.opacity, 0.2);
        assert_eq!(surface.lines[0].1.color, to_color(Rgb::new(255, 0, 0)));
        assert_eq!(surface.lines[1].1.opacity, 1.0);
    }

    #[test]
    fn test_selected_stroke_is_highlighted_in_place() {
        let renderer = Renderer::default();
        let mut surface = RecordingSurface::default();
        let strokes = vec![line(1.0, Rgb::BLACK), line(2.0, Rgb::BLACK), line(3.0, Rgb::BLACK)];
        let view = FrameView {
            strokes: &strokes,
            underlay: None,
            selected: Some(1),
        };
        renderer.render(&mut surface, &view);

        let styles: Vec<_> = surface.lines.iter().map(|(_, s)| *s).collect();
        assert_eq!(styles[0].width, 3.0);
        assert!(styles[0].shadow.is_none());
        assert_eq!(styles[1].width, 7.0);
        assert_eq!(styles[1].shadow, Some(Shadow::default()));
        assert_eq!(surface.lines[1].0[0], Point::new(0.0, 2.0));
    }

    #[test]
    fn test_apply_redraw() {
        let renderer = Renderer::default();
        let mut surface = RecordingSurface::default();
        let mut session = EditorSession::default();

        let redraw = session.pointer_down(Point::new(0.0, 0.0));
        renderer.apply(&mut surface, &session, redraw);
        assert!(surface.lines.is_empty());

        let redraw = session.pointer_move(Point::new(5.0, 5.0));
        renderer.apply(&mut surface, &session, redraw);
        assert_eq!(surface.cleared, 0);
        assert_eq!(surface.lines.len(), 1);
        assert_eq!(surface.lines[0].1.width, 3.0);

        let redraw = session.pointer_up();
        renderer.apply(&mut surface, &session, redraw);
        assert_eq!(surface.cleared, 1);
        assert_eq!(surface.lines.len(), 1);
    }

    #[test]
    fn test_area_eraser_segment_uses_background() {
        let renderer = Renderer::default();
        let mut surface = RecordingSurface::default();
        let mut session = EditorSession::default();
        let _ = session.select_tool(ToolMode::EraseArea);
        let _ = session.pointer_down(Point::new(0.0, 0.0));
        let redraw = session.pointer_move(Point::new(3.0, 0.0));
        renderer.apply(&mut surface, &session, redraw);

        let style = surface.lines[0].1;
        assert_eq!(style.color, renderer.background());
        assert_eq!(style.width, 20.0);
    }
}
