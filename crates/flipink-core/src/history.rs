//! Undo/redo snapshots for the displayed frame.

use crate::stroke::{Frame, Stroke};
use crate::timeline::Timeline;

/// Default number of undo states to keep.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Undo and redo stacks of whole-frame snapshots.
///
/// The stacks only describe the frame that was current when they were filled; the
/// session empties them whenever the current frame changes.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    undo_stack: Vec<Frame>,
    redo_stack: Vec<Frame>,
    max_len: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl HistoryManager {
    pub fn new(max_len: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_len: max_len.max(1),
        }
    }

    /// Push a copy of `strokes` to the undo stack (call before making changes).
    pub fn record(&mut self, strokes: &[Stroke]) {
        self.undo_stack.push(strokes.to_vec());
        self.redo_stack.clear();

        if self.undo_stack.len() > self.max_len {
            self.undo_stack.remove(0);
        }
    }

    /// Restore the last recorded snapshot into the current frame.
    /// Returns false if there is nothing to undo.
    pub fn undo(&mut self, timeline: &mut Timeline) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(timeline.strokes().to_vec());
        timeline.replace_all(snapshot);
        true
    }

    /// Re-apply the last undone snapshot.
    /// Returns false if there is nothing to redo.
    pub fn redo(&mut self, timeline: &mut Timeline) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(timeline.strokes().to_vec());
        timeline.replace_all(snapshot);
        true
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::Rgb;
    use kurbo::Point;

    fn line(x: f64) -> Stroke {
        Stroke::new(vec![Point::new(x, 0.0), Point::new(x, 10.0)], Rgb::BLACK, 3.0)
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut history = HistoryManager::default();
        let mut timeline = Timeline::new();
        timeline.append(line(1.0));
        assert!(!history.undo(&mut timeline));
        assert!(!history.redo(&mut timeline));
        assert_eq!(timeline.strokes().len(), 1);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = HistoryManager::default();
        let mut timeline = Timeline::new();

        for x in [1.0, 2.0, 3.0] {
            history.record(timeline.strokes());
            timeline.append(line(x));
        }
        history.record(timeline.strokes());
        timeline.stroke_mut(1).unwrap().points[0].x = 50.0;
        history.record(timeline.strokes());
        timeline.remove_at(0);

        let before_undo = timeline.strokes().to_vec();
        assert!(history.undo(&mut timeline));
        assert_ne!(timeline.strokes(), before_undo.as_slice());
        assert!(history.redo(&mut timeline));
        assert_eq!(timeline.strokes(), before_undo.as_slice());
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = HistoryManager::default();
        let mut timeline = Timeline::new();
        history.record(timeline.strokes());
        timeline.append(line(1.0));
        assert!(history.undo(&mut timeline));
        assert!(history.can_redo());

        history.record(timeline.strokes());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_snapshots_are_independent() {
        let mut history = HistoryManager::default();
        let mut timeline = Timeline::new();
        timeline.append(line(1.0));
        history.record(timeline.strokes());
        timeline.stroke_mut(0).unwrap().points[0].x = 42.0;

        assert!(history.undo(&mut timeline));
        assert_eq!(timeline.strokes()[0], line(1.0));
    }

    #[test]
    fn test_history_is_capped() {
        let mut history = HistoryManager::new(3);
        let mut timeline = Timeline::new();
        for x in 0..5 {
            history.record(timeline.strokes());
            timeline.append(line(x as f64));
        }
        assert_eq!(history.undo_len(), 3);
        while history.undo(&mut timeline) {}
        assert_eq!(timeline.strokes().len(), 2);
    }
}
