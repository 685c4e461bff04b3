//! Pure easing functions for slide animations
//!
//! Maps input progress [0, 1] to output [0, 1] with various acceleration curves.

pub use crate::config::EasingType;

/// Extension trait for EasingType with calculation methods
pub trait EasingTypeExt {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value in range [0, 1]
    ///
    /// # Returns
    /// Eased value in range [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        match self {
            EasingType::Linear => t.clamp(0.0, 1.0),
            EasingType::Quadratic => quad_ease_in_out(t),
            EasingType::Cubic => ease_in_out_p(t),
        }
    }
}

/// Quadratic ease-in-out: 2t² below the midpoint, 1 - (2 - 2t)²/2 above
#[inline]
pub fn quad_ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-in-out: 4p³ below the midpoint, 1 - (2 - 2p)³/2 above
///
/// Time-based progress mapping for step slides. f(0) = 0, f(0.5) = 0.5,
/// f(1) = 1, symmetric around the midpoint.
#[inline]
pub fn ease_in_out_p(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    if p < 0.5 {
        4.0 * p * p * p
    } else {
        1.0 - (-2.0 * p + 2.0).powi(3) / 2.0
    }
}
