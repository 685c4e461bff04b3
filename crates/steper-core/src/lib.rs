pub mod config;
pub mod drag;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod motion;
pub mod signal;
pub mod slider;
pub mod strip;
pub mod surface;

pub use config::{AppConfig, DragConfig, EasingType, SliderConfig, UiConfig};
pub use drag::{DragCallbacks, DragController};
pub use error::{Error, Result};
pub use frame::{FrameHandle, FrameQueue, FrameScheduler};
pub use geometry::{nearest_item, offset_for_index, set_offset, set_offset_by_index, NearestItem};
pub use input::{EventOutcome, EventTarget, InputEvent, MouseButton};
pub use signal::{Signal, SubscriptionId};
pub use slider::{SlideCallbacks, StepSlider};
pub use strip::SlideStrip;
pub use surface::{Mode, Rect, Slide, Surface};
