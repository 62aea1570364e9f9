//! Flipink Core Library
//!
//! Platform-agnostic data model and editing logic for the Flipink frame animation editor.

pub mod config;
pub mod export;
pub mod geometry;
pub mod history;
pub mod input;
pub mod playback;
pub mod session;
pub mod shortcuts;
pub mod stroke;
pub mod timeline;
pub mod tools;

pub use config::EditorConfig;
pub use export::{EncodeRequest, ExportError, ExportResult, VideoEncoder};
pub use history::HistoryManager;
pub use input::{GestureHandler, GestureState, PointerEvent, Redraw, Segment};
pub use playback::{AnimationPlayer, Instant, PlaybackState};
pub use session::{EditorCommand, EditorSession, FrameView};
pub use shortcuts::{Modifiers, Shortcut, ShortcutRegistry};
pub use stroke::{ColorParseError, Frame, Rgb, Stroke};
pub use timeline::Timeline;
pub use tools::{EraserKind, ToolController, ToolMode};

#[cfg(not(target_arch = "wasm32"))]
pub use export::HttpVideoEncoder;

pub use kurbo::{Point, Vec2};
