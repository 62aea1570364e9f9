//! The editing session: one document, its history and the interaction state.

use crate::config::EditorConfig;
use crate::history::HistoryManager;
use crate::input::{EditTarget, GestureHandler, PointerEvent, Redraw};
use crate::playback::{AnimationPlayer, Instant};
use crate::stroke::{Rgb, Stroke};
use crate::timeline::Timeline;
use crate::tools::{EraserKind, ToolController, ToolMode};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Discrete commands the host can issue (toolbar buttons, color picker, shortcuts).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EditorCommand {
    SelectTool(ToolMode),
    SelectEraser(EraserKind),
    SetColor(Rgb),
    Undo,
    Redo,
    InsertFrame,
    DuplicateFrame,
    PrevFrame,
    NextFrame,
    ToggleOnionSkin,
}

/// What the renderer should draw for the current state.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    /// Strokes of the displayed frame, back to front.
    pub strokes: &'a [Stroke],
    /// Previous frame shown translucently underneath (onion skin).
    pub underlay: Option<&'a [Stroke]>,
    /// Stroke to highlight.
    pub selected: Option<usize>,
}

/// All mutable editor state, owned by the host for the lifetime of the app.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    timeline: Timeline,
    history: HistoryManager,
    tools: ToolController,
    gesture: GestureHandler,
    player: AnimationPlayer,
    onion_skin: bool,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    /// Create a session with one empty frame in Draw mode.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            timeline: Timeline::new(),
            history: HistoryManager::new(config.max_history),
            tools: ToolController::new(&config),
            gesture: GestureHandler::new(),
            player: AnimationPlayer::new(config.playback_interval()),
            onion_skin: true,
            config,
        }
    }

    /// Create a session over existing frames.
    pub fn with_timeline(config: EditorConfig, timeline: Timeline) -> Self {
        Self {
            timeline,
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn tools(&self) -> &ToolController {
        &self.tools
    }

    pub fn gesture(&self) -> &GestureHandler {
        &self.gesture
    }

    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    pub fn mode(&self) -> ToolMode {
        self.tools.mode()
    }

    pub fn selection(&self) -> Option<usize> {
        self.tools.selection()
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    pub fn onion_skin_enabled(&self) -> bool {
        self.onion_skin
    }

    /// The strokes to draw right now.
    ///
    /// Onion skin and the selection highlight are suppressed while playing.
    pub fn view(&self) -> FrameView<'_> {
        let playing = self.is_playing();
        let underlay = if self.onion_skin && !playing {
            self.timeline.previous_frame().map(|f| f.as_slice())
        } else {
            None
        };
        FrameView {
            strokes: self.timeline.strokes(),
            underlay,
            selected: if playing { None } else { self.tools.selection() },
        }
    }

    /// Borrow the gesture handler alongside the state it edits.
    fn gesture_and_target(&mut self) -> (&mut GestureHandler, EditTarget<'_>) {
        let target = EditTarget {
            timeline: &mut self.timeline,
            history: &mut self.history,
            tools: &mut self.tools,
            hit_tolerance: self.config.hit_tolerance,
        };
        (&mut self.gesture, target)
    }

    /// Current frame changed or was restructured: history and selection do not carry over.
    fn frame_changed(&mut self) -> Redraw {
        log::debug!("showing frame {}", self.timeline.frame_label());
        self.history.clear();
        self.tools.clear_selection();
        self.gesture.cancel();
        Redraw::Full
    }

    // --- Commands ---

    /// Apply a host command.
    pub fn apply(&mut self, command: EditorCommand) -> Redraw {
        match command {
            EditorCommand::SelectTool(mode) => self.select_tool(mode),
            EditorCommand::SelectEraser(kind) => self.select_eraser_kind(kind),
            EditorCommand::SetColor(color) => self.set_color(color),
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
            EditorCommand::InsertFrame => self.insert_frame(),
            EditorCommand::DuplicateFrame => self.duplicate_frame(),
            EditorCommand::PrevFrame => self.prev_frame(),
            EditorCommand::NextFrame => self.next_frame(),
            EditorCommand::ToggleOnionSkin => self.toggle_onion_skin(),
        }
    }

    /// Switch tool. Clears the selection and repaints.
    pub fn select_tool(&mut self, mode: ToolMode) -> Redraw {
        self.gesture.cancel();
        self.tools.select(mode);
        Redraw::Full
    }

    /// Choose the eraser behavior; switches mode if the eraser is active.
    pub fn select_eraser_kind(&mut self, kind: EraserKind) -> Redraw {
        if self.tools.select_eraser_kind(kind) {
            self.gesture.cancel();
            return Redraw::Full;
        }
        Redraw::None
    }

    /// Color picked by the user. Recolors the selected stroke in Move/Rotate.
    pub fn set_color(&mut self, color: Rgb) -> Redraw {
        self.tools.set_user_color(color);
        let Some(index) = self.tools.selection() else {
            return Redraw::None;
        };
        if self.timeline.stroke(index).is_none() {
            return Redraw::None;
        }
        self.history.record(self.timeline.strokes());
        if let Some(stroke) = self.timeline.stroke_mut(index) {
            stroke.color = color;
        }
        Redraw::Full
    }

    pub fn undo(&mut self) -> Redraw {
        if !self.history.undo(&mut self.timeline) {
            return Redraw::None;
        }
        self.tools.clear_selection();
        self.gesture.cancel();
        Redraw::Full
    }

    pub fn redo(&mut self) -> Redraw {
        if !self.history.redo(&mut self.timeline) {
            return Redraw::None;
        }
        self.tools.clear_selection();
        self.gesture.cancel();
        Redraw::Full
    }

    // --- Timeline ---

    /// Add an empty frame after the current one and show it.
    pub fn insert_frame(&mut self) -> Redraw {
        self.timeline.insert_after_current();
        self.frame_changed()
    }

    /// Copy the current frame into a new frame after it and show the copy.
    pub fn duplicate_frame(&mut self) -> Redraw {
        self.timeline.duplicate_current();
        self.frame_changed()
    }

    pub fn prev_frame(&mut self) -> Redraw {
        if self.timeline.prev() {
            self.frame_changed()
        } else {
            Redraw::None
        }
    }

    pub fn next_frame(&mut self) -> Redraw {
        if self.timeline.next() {
            self.frame_changed()
        } else {
            Redraw::None
        }
    }

    /// Show the frame at `index`. Out-of-range indices are ignored.
    pub fn go_to_frame(&mut self, index: usize) -> Redraw {
        if self.timeline.go_to(index) {
            self.frame_changed()
        } else {
            Redraw::None
        }
    }

    pub fn toggle_onion_skin(&mut self) -> Redraw {
        self.onion_skin = !self.onion_skin;
        Redraw::Full
    }

    // --- Playback ---

    /// Start previewing. Gestures are ignored until playback stops.
    pub fn start_playback(&mut self, now: Instant) -> Redraw {
        if self.is_playing() {
            return Redraw::None;
        }
        log::debug!("playback started on frame {}", self.timeline.frame_label());
        self.gesture.cancel();
        self.player.start(now);
        Redraw::Full
    }

    /// Stop previewing and settle on the frame that was showing.
    pub fn stop_playback(&mut self) -> Redraw {
        if !self.is_playing() {
            return Redraw::None;
        }
        self.player.stop();
        self.frame_changed()
    }

    /// Play/stop toggle.
    pub fn toggle_playback(&mut self, now: Instant) -> Redraw {
        if self.is_playing() {
            self.stop_playback()
        } else {
            self.start_playback(now)
        }
    }

    /// Advance playback if a tick is due at `now`.
    pub fn tick(&mut self, now: Instant) -> Redraw {
        if !self.player.poll(now) {
            return Redraw::None;
        }
        self.timeline.advance_wrapping();
        Redraw::Full
    }

    // --- Pointer input ---

    pub fn pointer_down(&mut self, point: Point) -> Redraw {
        if self.is_playing() {
            return Redraw::None;
        }
        let (gesture, target) = self.gesture_and_target();
        gesture.begin(point, target)
    }

    pub fn pointer_move(&mut self, point: Point) -> Redraw {
        if self.is_playing() {
            return Redraw::None;
        }
        let (gesture, target) = self.gesture_and_target();
        gesture.update(point, target)
    }

    pub fn pointer_up(&mut self) -> Redraw {
        if self.is_playing() {
            return Redraw::None;
        }
        let (gesture, target) = self.gesture_and_target();
        gesture.end(target)
    }

    /// Dispatch a raw pointer event from the host.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Redraw {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { .. } => self.pointer_up(),
        }
    }
}
