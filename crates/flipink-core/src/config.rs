//! Editor configuration.

use crate::stroke::Rgb;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable constants for an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Width of strokes drawn with the pen.
    pub base_width: f64,
    /// Width of area-eraser strokes.
    pub eraser_width: f64,
    /// Canvas background. The area eraser paints with this color.
    pub background: Rgb,
    /// Pen color at startup.
    pub default_color: Rgb,
    /// Extra hit radius in pixels on top of half the stroke width.
    pub hit_tolerance: f64,
    /// Width added to a selected stroke when it is highlighted.
    pub selection_width_boost: f64,
    /// Opacity of the previous frame when onion skin is shown.
    pub onion_skin_opacity: f32,
    /// Playback tick in milliseconds.
    pub playback_interval_ms: u64,
    /// Frame rate requested from the video encoder.
    pub export_fps: u32,
    /// Base URL of the video render service.
    pub export_endpoint: String,
    /// Maximum number of undo snapshots kept per frame.
    pub max_history: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            base_width: 3.0,
            eraser_width: 20.0,
            background: Rgb::WHITE,
            default_color: Rgb::BLACK,
            hit_tolerance: crate::geometry::HIT_TOLERANCE,
            selection_width_boost: 4.0,
            onion_skin_opacity: 0.2,
            playback_interval_ms: 100,
            export_fps: 10,
            export_endpoint: "http://localhost:3000".to_string(),
            max_history: 50,
        }
    }
}

impl EditorConfig {
    /// Playback tick as a duration.
    pub fn playback_interval(&self) -> Duration {
        Duration::from_millis(self.playback_interval_ms)
    }

    /// Parse a configuration from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
