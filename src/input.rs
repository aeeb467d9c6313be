//! Pointer and scroll input for the animation engine.
//!
//! `InputState` is the single-writer cell every per-frame computation reads.
//! The window event loop is the only writer; the deformer, particle field,
//! and parameter interpolator read an immutable [`InputSnapshot`] taken once
//! per frame, so all components observe identical values within a frame.
//!
//! Scrolling is modeled as a virtual document: the state tracks a content
//! height and a scroll offset moved by wheel events, and exposes the
//! normalized progress `offset / (content - viewport)` clamped to [0, 1].
//!
//! # Usage
//!
//! ```ignore
//! let mut input = InputState::new(4000.0);
//!
//! // In the event handler:
//! input.handle_event(&window_event);
//!
//! // In the frame callback:
//! let snapshot = input.snapshot();
//! mesh.deform(elapsed, snapshot);
//! ```

use glam::Vec2;
use winit::event::{MouseScrollDelta, WindowEvent};

/// Pixels one wheel "line" scrolls the virtual document.
const LINE_HEIGHT: f32 = 40.0;

/// Default virtual document height in pixels.
pub const DEFAULT_CONTENT_HEIGHT: f32 = 4000.0;

/// Immutable per-frame view of the input state.
///
/// Taken once at the start of a frame and passed to every component, so a
/// pointer event arriving mid-frame cannot tear the frame's inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    /// Pointer position in signed unit range, origin at viewport center,
    /// y increasing upward.
    pub pointer: Vec2,
    /// Scroll progress through the virtual document, in [0, 1].
    pub scroll: f32,
}

/// Latest normalized device input.
///
/// Single writer (the event loop), many readers (the frame components).
/// Sampling never mutates: two reads with no intervening event return the
/// same value.
#[derive(Debug)]
pub struct InputState {
    pointer_ndc: Vec2,
    scroll_offset: f32,
    scroll_progress: f32,
    content_height: f32,
    viewport: (u32, u32),
}

impl InputState {
    /// Create input state for a virtual document of the given height.
    ///
    /// Progress is computed eagerly so the first frame never reads a stale
    /// or undefined value.
    pub fn new(content_height: f32) -> Self {
        let mut state = Self {
            pointer_ndc: Vec2::ZERO,
            scroll_offset: 0.0,
            scroll_progress: 0.0,
            content_height,
            viewport: (800, 600),
        };
        state.recompute_progress();
        state
    }

    /// Current pointer position in signed unit range (-1 to 1 per axis).
    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer_ndc
    }

    /// Current scroll progress in [0, 1].
    ///
    /// A document that is not scrollable (content no taller than the
    /// viewport) reads as 0 rather than dividing by zero.
    #[inline]
    pub fn scroll_progress(&self) -> f32 {
        self.scroll_progress
    }

    /// Take the per-frame snapshot.
    #[inline]
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            pointer: self.pointer_ndc,
            scroll: self.scroll_progress,
        }
    }

    /// Set the pointer directly in signed unit coordinates.
    ///
    /// For hosts that do their own pointer normalization (element-local
    /// coordinates, headless drivers, tests). Values are clamped.
    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer_ndc = pointer.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    /// Resize the viewport used for pointer normalization and scroll range.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.recompute_progress();
    }

    /// Change the virtual document height.
    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height.max(0.0);
        self.recompute_progress();
    }

    /// Move the scroll offset by `delta` pixels (positive scrolls down).
    pub fn scroll_by(&mut self, delta: f32) {
        if delta.is_finite() {
            self.scroll_offset = (self.scroll_offset + delta).clamp(0.0, self.max_offset());
        }
        self.recompute_progress();
    }

    /// Translate a raw window event into input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let (w, h) = self.viewport;
                if w > 0 && h > 0 {
                    self.pointer_ndc = Vec2::new(
                        (position.x as f32 / w as f32) * 2.0 - 1.0,
                        1.0 - (position.y as f32 / h as f32) * 2.0, // Y flipped
                    );
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y * LINE_HEIGHT,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                // Wheel up moves toward the top of the document.
                self.scroll_by(-dy);
            }
            WindowEvent::Resized(size) => {
                self.set_viewport(size.width, size.height);
            }
            _ => {}
        }
    }

    fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport.1 as f32).max(0.0)
    }

    fn recompute_progress(&mut self) {
        let max = self.max_offset();
        self.scroll_offset = self.scroll_offset.clamp(0.0, max);
        self.scroll_progress = if max > 0.0 {
            (self.scroll_offset / max).clamp(0.0, 1.0)
        } else {
            0.0
        };
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_HEIGHT)
    }
}
