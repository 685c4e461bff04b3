//! In-memory surface: a row of slides laid out left to right
//!
//! Used by the terminal host and the headless trace, and as the fixture for
//! controller tests.

use crate::geometry::parse_offset;
use crate::surface::{Mode, Rect, Surface};

#[derive(Debug, Clone)]
pub struct SlideStrip {
    /// Untranslated left edge of the container
    origin: f64,
    widths: Vec<f64>,
    gap: f64,
    transform: String,
    mode: Mode,
    will_change: bool,
    /// Number of transform writes so far
    writes: usize,
}

impl SlideStrip {
    /// Slides with the given widths separated by `gap`
    pub fn new(widths: Vec<f64>, gap: f64) -> Self {
        Self {
            origin: 0.0,
            widths,
            gap,
            transform: String::new(),
            mode: Mode::Idle,
            will_change: false,
            writes: 0,
        }
    }

    /// `count` slides of equal `width`
    pub fn uniform(count: usize, width: f64, gap: f64) -> Self {
        Self::new(vec![width; count], gap)
    }

    /// Place the container at `origin` in viewport coordinates
    pub fn with_origin(mut self, origin: f64) -> Self {
        self.origin = origin;
        self
    }

    /// Move the container's untranslated left edge, e.g. after a resize
    pub fn set_origin(&mut self, origin: f64) {
        self.origin = origin;
    }

    pub fn origin(&self) -> f64 {
        self.origin
    }

    /// Current offset as parsed from the transform
    pub fn offset(&self) -> f64 {
        parse_offset(&self.transform)
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn will_change(&self) -> bool {
        self.will_change
    }

    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    /// Untranslated left edge of child `index` inside the container
    pub fn layout_left(&self, index: usize) -> f64 {
        self.widths.iter().take(index).map(|w| w + self.gap).sum()
    }

    fn content_width(&self) -> f64 {
        let slides: f64 = self.widths.iter().sum();
        slides + self.gap * self.widths.len().saturating_sub(1) as f64
    }
}

impl Surface for SlideStrip {
    fn bounding_rect(&self) -> Rect {
        Rect::new(self.origin + self.offset(), self.content_width())
    }

    fn child_count(&self) -> usize {
        self.widths.len()
    }

    fn child_rect(&self, index: usize) -> Option<Rect> {
        let width = *self.widths.get(index)?;
        Some(Rect::new(
            self.origin + self.offset() + self.layout_left(index),
            width,
        ))
    }

    fn transform(&self) -> &str {
        &self.transform
    }

    fn set_transform(&mut self, value: String) {
        self.transform = value;
        self.writes += 1;
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn set_will_change(&mut self, active: bool) {
        self.will_change = active;
    }
}
