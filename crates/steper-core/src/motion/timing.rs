//! Interpolation and per-frame damping steps

use super::easing::quad_ease_in_out;

/// Ease curve sample point whose value is reused as the drag follow damping
pub const FOLLOW_PROGRESS: f64 = 0.2;

/// Per-frame damping applied while snapping to the nearest slide
pub const SNAP_DAMPING: f64 = 0.05;

/// Linear step from `current` toward `target`
///
/// `damping = 0` keeps `current`, `damping = 1` lands on `target`.
#[inline]
pub fn interpolate(current: f64, target: f64, damping: f64) -> f64 {
    current + (target - current) * damping
}

/// One fixed-damping step toward `target`
///
/// Not time based: the quadratic curve is sampled once at [`FOLLOW_PROGRESS`]
/// and the result is applied every frame, which yields an exponential approach.
#[inline]
pub fn ease_in_out(current: f64, target: f64) -> f64 {
    follow_step(current, target, FOLLOW_PROGRESS)
}

/// [`ease_in_out`] with a configurable sample point
#[inline]
pub fn follow_step(current: f64, target: f64, sample: f64) -> f64 {
    interpolate(current, target, quad_ease_in_out(sample))
}

/// Animation progress (0.0 to 1.0) from elapsed and total milliseconds
///
/// A zero (or negative) duration is complete immediately.
#[inline]
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_endpoints() {
        for (c, t) in [(0.0, 100.0), (-250.5, 13.0), (42.0, 42.0), (1e6, -1e6)] {
            assert_eq!(interpolate(c, t, 0.0), c);
            assert_eq!(interpolate(c, t, 1.0), t);
        }
        assert!((interpolate(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_ease_in_out_damping() {
        // quadratic ease at 0.2 is 0.08
        assert!((ease_in_out(0.0, 100.0) - 8.0).abs() < 1e-9);
        assert!((ease_in_out(-100.0, -100.0) + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_ease_in_out_converges() {
        let mut x = 0.0;
        for _ in 0..500 {
            x = ease_in_out(x, -300.0);
        }
        assert!((x + 300.0).abs() < 0.01);
    }

    #[test]
    fn test_progress() {
        assert_eq!(progress(0.0, 1000.0), 0.0);
        assert!((progress(250.0, 1000.0) - 0.25).abs() < 1e-12);
        assert_eq!(progress(5000.0, 1000.0), 1.0);
        assert_eq!(progress(10.0, 0.0), 1.0);
    }
}
