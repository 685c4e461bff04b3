//! Motion primitives shared by the drag and slide controllers
//!
//! ## Atomic layer
//! - `easing` - Pure progress curves mapping [0, 1] to [0, 1]
//! - `timing` - Interpolation and per-frame damping steps
//!
//! Nothing in here knows about drag sessions, slide animations or surfaces.

pub mod easing;
pub mod timing;

pub use easing::{ease_in_out_p, quad_ease_in_out, EasingTypeExt};
pub use timing::{ease_in_out, follow_step, interpolate, progress, FOLLOW_PROGRESS, SNAP_DAMPING};
