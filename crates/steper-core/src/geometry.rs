//! Offset and nearest-slide lookups on a [`Surface`]
//!
//! The offset lives only in the surface's transform string; every function
//! here re-reads it instead of trusting a cached value.

use crate::surface::{Mode, Surface};

/// Result of [`nearest_item`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestItem {
    /// Index of the closest child
    pub index: usize,
    /// Offset that aligns that child with the container's left edge
    pub target_offset: f64,
    /// Offset read from the transform
    pub current_offset: f64,
}

/// Parse the pixel value out of a `translateX(<x>px)` transform
///
/// Empty or malformed values read as 0.
pub fn parse_offset(transform: &str) -> f64 {
    let value = transform.trim();
    let value = value.strip_prefix("translateX(").unwrap_or(value);
    let value = value.trim_end_matches(')').trim_end_matches("px").trim();
    match value.parse::<f64>() {
        Ok(x) if x.is_finite() => x,
        _ => 0.0,
    }
}

/// Render an offset as a transform value
pub fn format_transform(x: f64) -> String {
    format!("translateX({x}px)")
}

/// Current horizontal offset of the container
pub fn current_offset<S: Surface + ?Sized>(surface: &S) -> f64 {
    parse_offset(surface.transform())
}

/// Move the container so its visual offset is `x` pixels
pub fn set_offset<S: Surface + ?Sized>(surface: &mut S, x: f64) {
    surface.set_transform(format_transform(x));
}

/// Offset that aligns child `index` with the container's left edge, 0 when out of range
pub fn offset_for_index<S: Surface + ?Sized>(surface: &S, index: usize) -> f64 {
    let container = surface.bounding_rect();
    surface
        .child_rect(index)
        .map(|child| container.left - child.left)
        .unwrap_or(0.0)
}

/// Jump straight to child `index` without animating
pub fn set_offset_by_index<S: Surface + ?Sized>(surface: &mut S, index: usize) {
    let x = offset_for_index(surface, index);
    set_offset(surface, x);
}

/// Child whose aligned offset is closest to the current offset
///
/// Ties go to the lowest index. A surface without children yields index 0
/// and target 0.
pub fn nearest_item<S: Surface + ?Sized>(surface: &S) -> NearestItem {
    let current_offset = current_offset(surface);
    let container = surface.bounding_rect();

    let mut best = NearestItem {
        index: 0,
        target_offset: 0.0,
        current_offset,
    };
    let mut best_distance = f64::INFINITY;

    for index in 0..surface.child_count() {
        let Some(child) = surface.child_rect(index) else {
            continue;
        };
        let relative_left = container.left - child.left;
        let distance = (relative_left - current_offset).abs();
        if distance < best_distance {
            best_distance = distance;
            best.index = index;
            best.target_offset = relative_left;
        }
    }

    best
}

/// Replace the container's mode marker
pub fn set_mode<S: Surface + ?Sized>(surface: &mut S, mode: Mode) {
    surface.set_mode(mode);
}

/// Whether the container currently carries `mode`
pub fn has_mode<S: Surface + ?Sized>(surface: &S, mode: Mode) -> bool {
    surface.mode() == mode
}
