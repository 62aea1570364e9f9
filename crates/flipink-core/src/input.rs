//! Pointer gestures and the edits they drive.

use crate::geometry;
use crate::history::HistoryManager;
use crate::stroke::{Rgb, Stroke};
use crate::timeline::Timeline;
use crate::tools::{ToolController, ToolMode};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event from the host, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

/// A single line segment of an in-progress stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub color: Rgb,
    pub width: f64,
}

/// What the host has to repaint after an editor operation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[must_use]
pub enum Redraw {
    /// Nothing changed on screen.
    #[default]
    None,
    /// Only the newest segment of the stroke being drawn needs painting.
    Segment(Segment),
    /// Repaint the whole view.
    Full,
}

impl Redraw {
    pub fn is_none(&self) -> bool {
        matches!(self, Redraw::None)
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Redraw::Full)
    }
}

/// State of the gesture in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    /// No pointer is down, or the pointer-down did nothing.
    #[default]
    Idle,
    /// Laying down a new stroke (Draw or area eraser).
    Drawing { points: Vec<Point> },
    /// Dragging the selected stroke; `last` is the previous pointer position.
    Moving { last: Point },
    /// Rotating the selected stroke about `pivot`; `angle` is the last pointer angle.
    Rotating { pivot: Point, angle: f64 },
}

/// The parts of the session a gesture edits.
pub(crate) struct EditTarget<'a> {
    pub timeline: &'a mut Timeline,
    pub history: &'a mut HistoryManager,
    pub tools: &'a mut ToolController,
    pub hit_tolerance: f64,
}

/// Turns pointer-down/move/up into edits according to the active tool.
#[derive(Debug, Clone, Default)]
pub struct GestureHandler {
    state: GestureState,
}

impl GestureHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    /// Points of the stroke being drawn, if any.
    pub fn pending_points(&self) -> &[Point] {
        match &self.state {
            GestureState::Drawing { points } => points,
            _ => &[],
        }
    }

    /// Drop the gesture in progress without applying it.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }

    pub(crate) fn begin(&mut self, point: Point, target: EditTarget<'_>) -> Redraw {
        let EditTarget { timeline, history, tools, hit_tolerance } = target;
        let mode = tools.mode();
        self.state = GestureState::Idle;

        match mode {
            ToolMode::Draw | ToolMode::EraseArea => {
                history.record(timeline.strokes());
                self.state = GestureState::Drawing { points: vec![point] };
                Redraw::None
            }
            ToolMode::EraseStroke => {
                match geometry::hit_test_with_tolerance(point, timeline.strokes(), hit_tolerance) {
                    Some(index) => {
                        history.record(timeline.strokes());
                        timeline.remove_at(index);
                        log::debug!("erased stroke {index}");
                        Redraw::Full
                    }
                    None => Redraw::None,
                }
            }
            ToolMode::Move | ToolMode::Rotate => {
                let Some(index) =
                    geometry::hit_test_with_tolerance(point, timeline.strokes(), hit_tolerance)
                else {
                    tools.clear_selection();
                    return Redraw::Full;
                };
                history.record(timeline.strokes());
                tools.select_stroke(index);

                let stroke = &timeline.strokes()[index];
                tools.set_user_color(stroke.color);

                self.state = if mode == ToolMode::Rotate {
                    // A hit stroke always has at least one point
                    let pivot = geometry::centroid(&stroke.points).unwrap_or(point);
                    GestureState::Rotating {
                        pivot,
                        angle: geometry::angle_from(pivot, point),
                    }
                } else {
                    GestureState::Moving { last: point }
                };
                Redraw::Full
            }
        }
    }

    pub(crate) fn update(&mut self, point: Point, target: EditTarget<'_>) -> Redraw {
        let EditTarget { timeline, tools, .. } = target;

        match &mut self.state {
            GestureState::Idle => Redraw::None,
            GestureState::Drawing { points } => {
                let from = points.last().copied().unwrap_or(point);
                points.push(point);
                Redraw::Segment(Segment {
                    from,
                    to: point,
                    color: tools.active_color(),
                    width: tools.active_width(),
                })
            }
            GestureState::Moving { last } => {
                let Some(stroke) = tools.selection().and_then(|i| timeline.stroke_mut(i)) else {
                    return Redraw::None;
                };
                geometry::translate(&mut stroke.points, point - *last);
                *last = point;
                Redraw::Full
            }
            GestureState::Rotating { pivot, angle } => {
                let Some(stroke) = tools.selection().and_then(|i| timeline.stroke_mut(i)) else {
                    return Redraw::None;
                };
                let new_angle = geometry::angle_from(*pivot, point);
                geometry::rotate(&mut stroke.points, *pivot, new_angle - *angle);
                *angle = new_angle;
                Redraw::Full
            }
        }
    }

    pub(crate) fn end(&mut self, target: EditTarget<'_>) -> Redraw {
        let EditTarget { timeline, tools, .. } = target;

        match std::mem::take(&mut self.state) {
            GestureState::Drawing { points } => {
                log::debug!("finished stroke with {} points", points.len());
                timeline.append(Stroke::new(points, tools.active_color(), tools.active_width()));
                Redraw::Full
            }
            GestureState::Idle | GestureState::Moving { .. } | GestureState::Rotating { .. } => {
                Redraw::None
            }
        }
    }
}
