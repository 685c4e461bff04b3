//! Host contract for the element being translated
//!
//! A surface is the container whose children are the slides. The engine only
//! reads geometry and writes two things back: the transform string carrying
//! the horizontal offset and the mode marker.

use std::fmt;

/// Horizontal extent of a laid-out box, in pixels relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub width: f64,
}

impl Rect {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// A child of the container handed to start/end callbacks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slide {
    pub index: usize,
    pub rect: Rect,
}

/// Single-value marker attribute on the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Idle,
    /// A drag or its snap-back is in progress
    Dragging,
    /// A step slide is in progress
    Sliding,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Idle => "",
            Mode::Dragging => "dragging",
            Mode::Sliding => "sliding",
        }
    }

    /// Parse a marker value; anything unknown reads as idle
    pub fn from_marker(value: &str) -> Self {
        match value.trim() {
            "dragging" => Mode::Dragging,
            "sliding" => Mode::Sliding,
            _ => Mode::Idle,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The container element as seen by the controllers
///
/// Rects are reported as rendered, i.e. already shifted by the current
/// transform. The engine never caches the offset; it re-parses `transform()`
/// on every read.
pub trait Surface {
    /// Bounding rect of the container itself
    fn bounding_rect(&self) -> Rect;

    /// Number of slide children
    fn child_count(&self) -> usize;

    /// Bounding rect of the child at `index`, `None` when out of range
    fn child_rect(&self, index: usize) -> Option<Rect>;

    /// Rendered transform value, e.g. `translateX(-120px)`
    fn transform(&self) -> &str;

    /// Replace the rendered transform value
    fn set_transform(&mut self, value: String);

    /// Current mode marker
    fn mode(&self) -> Mode;

    /// Replace the mode marker
    fn set_mode(&mut self, mode: Mode);

    /// Rendering hint toggled for the duration of a drag
    fn set_will_change(&mut self, _active: bool) {}

    /// Child at `index` packaged for callbacks
    fn slide(&self, index: usize) -> Option<Slide> {
        self.child_rect(index).map(|rect| Slide { index, rect })
    }
}
