//! Ordered frames and the currently displayed frame.

use crate::stroke::{Frame, Stroke};
use serde::{Deserialize, Serialize};

/// The animation's frames plus the index being edited.
///
/// There is always at least one frame and `current` always points at one of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    frames: Vec<Frame>,
    current: usize,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// A timeline holding one empty frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new()],
            current: 0,
        }
    }

    /// Build a timeline from existing frames. Returns `None` if `frames` is empty.
    pub fn from_frames(frames: Vec<Frame>) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        Some(Self { frames, current: 0 })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// The frame before the current one, if any.
    pub fn previous_frame(&self) -> Option<&Frame> {
        self.current.checked_sub(1).and_then(|i| self.frames.get(i))
    }

    /// "current / total", 1-based.
    pub fn frame_label(&self) -> String {
        format!("{} / {}", self.current + 1, self.frames.len())
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.frames.len()
    }

    // --- Store operations on the current frame ---

    /// Strokes of the current frame, back to front.
    pub fn strokes(&self) -> &[Stroke] {
        &self.frames[self.current]
    }

    pub fn strokes_mut(&mut self) -> &mut Frame {
        &mut self.frames[self.current]
    }

    pub fn stroke(&self, index: usize) -> Option<&Stroke> {
        self.strokes().get(index)
    }

    pub fn stroke_mut(&mut self, index: usize) -> Option<&mut Stroke> {
        self.strokes_mut().get_mut(index)
    }

    /// Add a stroke on top of the current frame.
    pub fn append(&mut self, stroke: Stroke) {
        self.strokes_mut().push(stroke);
    }

    /// Remove a stroke from the current frame. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<Stroke> {
        let strokes = self.strokes_mut();
        (index < strokes.len()).then(|| strokes.remove(index))
    }

    /// Swap in a whole stroke sequence for the current frame, returning the old one.
    pub fn replace_all(&mut self, strokes: Frame) -> Frame {
        std::mem::replace(self.strokes_mut(), strokes)
    }

    // --- Frame structure and navigation ---

    /// Insert an empty frame after the current one and show it.
    pub fn insert_after_current(&mut self) {
        self.frames.insert(self.current + 1, Frame::new());
        self.current += 1;
    }

    /// Insert a deep copy of the current frame after it and show the copy.
    pub fn duplicate_current(&mut self) {
        let copy = self.frames[self.current].clone();
        self.frames.insert(self.current + 1, copy);
        self.current += 1;
    }

    /// Step back one frame. Returns false at the first frame.
    pub fn prev(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Step forward one frame. Returns false at the last frame.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Step forward one frame, wrapping to the first after the last.
    pub fn advance_wrapping(&mut self) {
        self.current = (self.current + 1) % self.frames.len();
    }

    /// Jump to `index`. Returns false if it is out of range or already current.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.frames.len() || index == self.current {
            return false;
        }
        self.current = index;
        true
    }
}
