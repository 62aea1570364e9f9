//! Tool system for the editor.

use crate::config::EditorConfig;
use crate::stroke::Rgb;
use serde::{Deserialize, Serialize};

/// Behavior of the eraser tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EraserKind {
    /// Delete the whole stroke under the pointer.
    #[default]
    Stroke,
    /// Paint over strokes with the background color.
    Area,
}

/// Available editing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolMode {
    #[default]
    Draw,
    Move,
    Rotate,
    EraseStroke,
    EraseArea,
}

impl ToolMode {
    /// The eraser mode for a given eraser sub-option.
    pub fn eraser(kind: EraserKind) -> Self {
        match kind {
            EraserKind::Stroke => ToolMode::EraseStroke,
            EraserKind::Area => ToolMode::EraseArea,
        }
    }

    pub fn is_eraser(self) -> bool {
        matches!(self, ToolMode::EraseStroke | ToolMode::EraseArea)
    }

    /// Modes in which a pointer-down selects a stroke.
    pub fn selects_strokes(self) -> bool {
        matches!(self, ToolMode::Move | ToolMode::Rotate)
    }

    /// Modes in which a gesture lays down a new stroke.
    pub fn lays_strokes(self) -> bool {
        matches!(self, ToolMode::Draw | ToolMode::EraseArea)
    }

    /// Display name for this mode.
    pub fn name(self) -> &'static str {
        match self {
            ToolMode::Draw => "Draw",
            ToolMode::Move => "Move",
            ToolMode::Rotate => "Rotate",
            ToolMode::EraseStroke => "Erase Stroke",
            ToolMode::EraseArea => "Erase Area",
        }
    }
}

/// Tracks the active mode, the pen style and the selected stroke.
#[derive(Debug, Clone)]
pub struct ToolController {
    mode: ToolMode,
    eraser_kind: EraserKind,
    /// Color chosen by the user; restored when entering Draw.
    user_color: Rgb,
    /// Color given to the next stroke laid down.
    active_color: Rgb,
    /// Width given to the next stroke laid down.
    active_width: f64,
    base_width: f64,
    eraser_width: f64,
    background: Rgb,
    /// Index of the selected stroke in the current frame.
    selection: Option<usize>,
}

impl Default for ToolController {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl ToolController {
    /// Create a controller in Draw mode.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            mode: ToolMode::Draw,
            eraser_kind: EraserKind::default(),
            user_color: config.default_color,
            active_color: config.default_color,
            active_width: config.base_width,
            base_width: config.base_width,
            eraser_width: config.eraser_width,
            background: config.background,
            selection: None,
        }
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn eraser_kind(&self) -> EraserKind {
        self.eraser_kind
    }

    /// Switch to `mode`. Always clears the selection, even if the mode is unchanged.
    pub fn select(&mut self, mode: ToolMode) {
        log::debug!("tool: {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.selection = None;

        match mode {
            ToolMode::Draw => {
                self.active_color = self.user_color;
                self.active_width = self.base_width;
            }
            ToolMode::EraseArea => {
                self.eraser_kind = EraserKind::Area;
                self.active_color = self.background;
                self.active_width = self.eraser_width;
            }
            ToolMode::EraseStroke => {
                self.eraser_kind = EraserKind::Stroke;
            }
            ToolMode::Move | ToolMode::Rotate => {}
        }
    }

    /// Pick the eraser sub-option. Returns true if this switched the active mode.
    pub fn select_eraser_kind(&mut self, kind: EraserKind) -> bool {
        self.eraser_kind = kind;
        let mode = ToolMode::eraser(kind);
        if self.mode.is_eraser() && self.mode != mode {
            self.select(mode);
            return true;
        }
        false
    }

    pub fn user_color(&self) -> Rgb {
        self.user_color
    }

    /// Record the user's color choice. The pen picks it up immediately in Draw mode.
    pub fn set_user_color(&mut self, color: Rgb) {
        self.user_color = color;
        if self.mode == ToolMode::Draw {
            self.active_color = color;
        }
    }

    pub fn active_color(&self) -> Rgb {
        self.active_color
    }

    pub fn active_width(&self) -> f64 {
        self.active_width
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Mark a stroke as selected. Ignored outside Move and Rotate.
    pub fn select_stroke(&mut self, index: usize) {
        if self.mode.selects_strokes() {
            self.selection = Some(index);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_in_draw() {
        let tools = ToolController::default();
        assert_eq!(tools.mode(), ToolMode::Draw);
        assert_eq!(tools.active_color(), Rgb::BLACK);
        assert_eq!(tools.active_width(), 3.0);
    }

    #[test]
    fn test_area_eraser_forces_background_style() {
        let mut tools = ToolController::default();
        tools.set_user_color(Rgb::new(255, 0, 0));
        tools.select(ToolMode::EraseArea);
        assert_eq!(tools.active_color(), Rgb::WHITE);
        assert_eq!(tools.active_width(), 20.0);

        tools.select(ToolMode::Draw);
        assert_eq!(tools.active_color(), Rgb::new(255, 0, 0));
        assert_eq!(tools.active_width(), 3.0);
    }

    #[test]
    fn test_mode_change_clears_selection() {
        let mut tools = ToolController::default();
        tools.select(ToolMode::Move);
        tools.select_stroke(2);
        assert_eq!(tools.selection(), Some(2));

        tools.select(ToolMode::Rotate);
        assert_eq!(tools.selection(), None);
    }

    #[test]
    fn test_selection_ignored_outside_move_rotate() {
        let mut tools = ToolController::default();
        tools.select_stroke(0);
        assert_eq!(tools.selection(), None);
        tools.select(ToolMode::EraseStroke);
        tools.select_stroke(0);
        assert_eq!(tools.selection(), None);
    }

    #[test]
    fn test_eraser_kind_switches_active_eraser() {
        let mut tools = ToolController::default();
        assert!(!tools.select_eraser_kind(EraserKind::Area));
        assert_eq!(tools.mode(), ToolMode::Draw);

        tools.select(ToolMode::eraser(tools.eraser_kind()));
        assert_eq!(tools.mode(), ToolMode::EraseArea);
        assert!(tools.select_eraser_kind(EraserKind::Stroke));
        assert_eq!(tools.mode(), ToolMode::EraseStroke);
    }

    #[test]
    fn test_color_pick_outside_draw_keeps_pen() {
        let mut tools = ToolController::default();
        tools.select(ToolMode::EraseArea);
        tools.set_user_color(Rgb::new(0, 0, 255));
        assert_eq!(tools.active_color(), Rgb::WHITE);
        assert_eq!(tools.user_color(), Rgb::new(0, 0, 255));
    }
}
