//! Programmatic step slides
//!
//! `move_by(step)` resolves the target slide from live geometry, starts a
//! fixed-duration eased transition and returns the target index right away.
//! The transition itself runs on frame callbacks.

use tracing::debug;

use crate::config::{EasingType, SliderConfig};
use crate::drag::SlideCallback;
use crate::frame::{FrameHandle, FrameScheduler};
use crate::geometry::{has_mode, nearest_item, offset_for_index, set_mode, set_offset};
use crate::motion::{progress, EasingTypeExt};
use crate::surface::{Mode, Slide, Surface};

/// Optional hooks fired on the first and last frame of a slide
#[derive(Default)]
pub struct SlideCallbacks {
    pub on_slide_start: Option<SlideCallback>,
    pub on_slide_end: Option<SlideCallback>,
}

impl SlideCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_slide_start<F: FnMut(Slide) + 'static>(mut self, callback: F) -> Self {
        self.on_slide_start = Some(Box::new(callback));
        self
    }

    pub fn on_slide_end<F: FnMut(Slide) + 'static>(mut self, callback: F) -> Self {
        self.on_slide_end = Some(Box::new(callback));
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct SlideAnimation {
    /// Timestamp of the first frame, set lazily
    started_at: Option<f64>,
    from: f64,
    to: f64,
    target: Slide,
}

/// Step navigation for one container
pub struct StepSlider {
    duration_ms: f64,
    easing: EasingType,
    callbacks: SlideCallbacks,
    animation: Option<SlideAnimation>,
    pending: Option<FrameHandle>,
}

impl std::fmt::Debug for StepSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepSlider")
            .field("duration_ms", &self.duration_ms)
            .field("easing", &self.easing)
            .field("animation", &self.animation)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl Default for StepSlider {
    fn default() -> Self {
        Self::create(1.0, SlideCallbacks::default())
    }
}

impl StepSlider {
    /// Slider whose transitions last `duration_secs` seconds
    ///
    /// Negative or non-finite durations are treated as instant.
    pub fn create(duration_secs: f64, callbacks: SlideCallbacks) -> Self {
        let duration_ms = if duration_secs.is_finite() {
            (duration_secs * 1000.0).max(0.0)
        } else {
            0.0
        };
        Self {
            duration_ms,
            easing: EasingType::Cubic,
            callbacks,
            animation: None,
            pending: None,
        }
    }

    pub fn from_config(config: &SliderConfig, callbacks: SlideCallbacks) -> Self {
        Self::create(config.duration_secs, callbacks).with_easing(config.easing)
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Index the running animation is heading to
    pub fn target_index(&self) -> Option<usize> {
        self.animation.map(|a| a.target.index)
    }

    /// Move by `step` slides and return the resulting index
    ///
    /// Out-of-range targets return the current index and schedule nothing.
    /// While a drag or its snap owns the container the move is refused the
    /// same way.
    pub fn move_by<S, F>(&mut self, step: isize, surface: &mut S, frames: &mut F) -> usize
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        let nearest = nearest_item(surface);

        if has_mode(surface, Mode::Dragging) {
            debug!(index = nearest.index, step, "Slide refused while dragging");
            return nearest.index;
        }

        let count = surface.child_count() as isize;
        let target = match (nearest.index as isize).checked_add(step) {
            Some(target) if (0..count).contains(&target) => target as usize,
            _ => {
                debug!(index = nearest.index, step, count, "Slide target out of range");
                return nearest.index;
            }
        };

        let to = offset_for_index(surface, target);
        if nearest.target_offset - to == 0.0 {
            return target;
        }
        let Some(slide) = surface.slide(target) else {
            return nearest.index;
        };

        if let Some(handle) = self.pending.take() {
            frames.cancel_frame(handle);
            debug!(
                preempted = ?self.target_index(),
                target,
                "Slide preempted"
            );
        }

        set_mode(surface, Mode::Sliding);
        self.animation = Some(SlideAnimation {
            started_at: None,
            from: nearest.current_offset,
            to,
            target: slide,
        });
        self.pending = Some(frames.request_frame());
        debug!(
            from = nearest.current_offset,
            to,
            target,
            duration_ms = self.duration_ms,
            "Slide scheduled"
        );

        target
    }

    /// Run one frame callback; handles this slider did not request are ignored
    pub fn on_frame<S, F>(&mut self, handle: FrameHandle, timestamp_ms: f64, surface: &mut S, frames: &mut F)
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if self.pending != Some(handle) {
            return;
        }
        self.pending = None;

        let Some(animation) = self.animation.as_mut() else {
            return;
        };

        if !has_mode(surface, Mode::Sliding) {
            debug!(target = animation.target.index, "Slide interrupted");
            self.animation = None;
            return;
        }

        let started_at = match animation.started_at {
            Some(started_at) => started_at,
            None => {
                animation.started_at = Some(timestamp_ms);
                if let Some(callback) = self.callbacks.on_slide_start.as_mut() {
                    callback(animation.target);
                }
                timestamp_ms
            }
        };

        let p = progress(timestamp_ms - started_at, self.duration_ms);
        let x = if p >= 1.0 {
            animation.to
        } else {
            animation.from + (animation.to - animation.from) * self.easing.apply(p)
        };
        set_offset(surface, x);

        if p < 1.0 {
            self.pending = Some(frames.request_frame());
            return;
        }

        let target = animation.target;
        self.animation = None;
        set_mode(surface, Mode::Idle);
        debug!(index = target.index, "Slide finished");
        if let Some(callback) = self.callbacks.on_slide_end.as_mut() {
            callback(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::{DragCallbacks, DragController};
    use crate::frame::FrameQueue;
    use crate::input::InputEvent;
    use crate::strip::SlideStrip;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<usize>>>;

    fn recording(duration_secs: f64) -> (StepSlider, Log, Log) {
        let starts: Log = Rc::default();
        let ends: Log = Rc::default();
        let s = starts.clone();
        let e = ends.clone();
        let slider = StepSlider::create(
            duration_secs,
            SlideCallbacks::new()
                .on_slide_start(move |slide| s.borrow_mut().push(slide.index))
                .on_slide_end(move |slide| e.borrow_mut().push(slide.index)),
        );
        (slider, starts, ends)
    }

    /// Drive frames every 16ms starting at `start`; returns the next timestamp
    fn run_frames(slider: &mut StepSlider, strip: &mut SlideStrip, frames: &mut FrameQueue, start: f64, count: usize) -> f64 {
        let mut now = start;
        for _ in 0..count {
            for handle in frames.take_due() {
                slider.on_frame(handle, now, strip, frames);
            }
            now += 16.0;
        }
        now
    }

    #[test]
    fn test_move_out_of_range_is_noop() {
        let (mut slider, starts, _) = recording(1.0);
        let mut strip = SlideStrip::uniform(3, 100.0, 0.0);
        let mut frames = FrameQueue::new();

        assert_eq!(slider.move_by(-1, &mut strip, &mut frames), 0);
        assert_eq!(slider.move_by(3, &mut strip, &mut frames), 0);
        assert!(frames.is_idle());
        assert!(!slider.is_animating());
        assert_eq!(strip.mode(), Mode::Idle);
        assert!(starts.borrow().is_empty());
    }

    #[test]
    fn test_move_by_huge_step_is_noop() {
        let (mut slider, starts, _) = recording(1.0);
        let mut strip = SlideStrip::uniform(3, 100.0, 0.0);
        let mut frames = FrameQueue::new();
        set_offset(&mut strip, -100.0);

        assert_eq!(slider.move_by(isize::MAX, &mut strip, &mut frames), 1);
        assert_eq!(slider.move_by(isize::MIN, &mut strip, &mut frames), 1);
        assert!(frames.is_idle());
        assert_eq!(strip.mode(), Mode::Idle);
        assert!(starts.borrow().is_empty());
    }

    #[test]
    fn test_move_forward_settles_on_target() {
        let (mut slider, starts, ends) = recording(1.0);
        let mut strip = SlideStrip::uniform(3, 100.0, 10.0);
        let mut frames = FrameQueue::new();

        assert_eq!(slider.move_by(1, &mut strip, &mut frames), 1);
        assert_eq!(strip.mode(), Mode::Sliding);
        assert_eq!(strip.writes(), 0);

        // first frame at t=1000 anchors the animation
        let now = run_frames(&mut slider, &mut strip, &mut frames, 1000.0, 1);
        assert_eq!(*starts.borrow(), vec![1]);
        assert_eq!(strip.offset(), 0.0);

        let now = run_frames(&mut slider, &mut strip, &mut frames, now, 31);
        // roughly halfway through a 1s slide
        assert!(strip.offset() < -30.0 && strip.offset() > -80.0);
        assert!(ends.borrow().is_empty());

        run_frames(&mut slider, &mut strip, &mut frames, now, 40);
        assert!((strip.offset() + 110.0).abs() < 1e-9);
        assert_eq!(*ends.borrow(), vec![1]);
        assert_eq!(strip.mode(), Mode::Idle);
        assert!(frames.is_idle());
        assert!(!slider.is_animating());
    }

    #[test]
    fn test_second_move_preempts_first() {
        let (mut slider, starts, ends) = recording(0.5);
        let mut strip = SlideStrip::uniform(4, 100.0, 0.0);
        let mut frames = FrameQueue::new();

        assert_eq!(slider.move_by(1, &mut strip, &mut frames), 1);
        let now = run_frames(&mut slider, &mut strip, &mut frames, 0.0, 10);
        assert!(strip.offset() < 0.0 && strip.offset() > -100.0);

        // nearest is still slide 0 or 1 depending on progress; move relative to it
        let nearest = nearest_item(&strip).index;
        let second = slider.move_by(2, &mut strip, &mut frames);
        assert_eq!(second, nearest + 2);
        assert_eq!(frames.pending_len(), 1);

        run_frames(&mut slider, &mut strip, &mut frames, now, 100);
        assert_eq!(*ends.borrow(), vec![second]);
        assert_eq!(*starts.borrow(), vec![1, second]);
        assert!((strip.offset() - offset_for_index(&strip, second)).abs() < 1e-9);
        assert!((strip.offset() + 100.0 * second as f64).abs() < 1e-9);
    }

    #[test]
    fn test_zero_step_returns_without_animating() {
        let (mut slider, _, _) = recording(1.0);
        let mut strip = SlideStrip::uniform(3, 100.0, 0.0);
        let mut frames = FrameQueue::new();
        set_offset(&mut strip, -90.0);

        assert_eq!(slider.move_by(0, &mut strip, &mut frames), 1);
        assert!(frames.is_idle());
        assert_eq!(strip.offset(), -90.0);
    }

    #[test]
    fn test_empty_container_returns_zero() {
        let (mut slider, _, _) = recording(1.0);
        let mut strip = SlideStrip::new(Vec::new(), 0.0);
        let mut frames = FrameQueue::new();

        assert_eq!(slider.move_by(1, &mut strip, &mut frames), 0);
        assert_eq!(slider.move_by(-1, &mut strip, &mut frames), 0);
        assert!(frames.is_idle());
    }

    #[test]
    fn test_zero_duration_lands_on_first_frame() {
        let (mut slider, starts, ends) = recording(0.0);
        let mut strip = SlideStrip::uniform(3, 100.0, 0.0);
        let mut frames = FrameQueue::new();

        slider.move_by(2, &mut strip, &mut frames);
        run_frames(&mut slider, &mut strip, &mut frames, 5.0, 1);
        assert_eq!(strip.offset(), -200.0);
        assert_eq!(*starts.borrow(), vec![2]);
        assert_eq!(*ends.borrow(), vec![2]);
    }

    #[test]
    fn test_move_refused_while_dragging() {
        let (mut slider, _, _) = recording(1.0);
        let mut drag = DragController::attach(DragCallbacks::new());
        let mut strip = SlideStrip::uniform(3, 100.0, 0.0);
        let mut frames = FrameQueue::new();

        drag.handle_event(&InputEvent::press(100.0), &mut strip, &mut frames);
        assert_eq!(slider.move_by(1, &mut strip, &mut frames), 0);
        assert!(!slider.is_animating());
    }

    #[test]
    fn test_drag_interrupts_slide() {
        let (mut slider, _, ends) = recording(1.0);
        let mut drag = DragController::attach(DragCallbacks::new());
        let mut strip = SlideStrip::uniform(3, 100.0, 0.0);
        let mut frames = FrameQueue::new();

        slider.move_by(1, &mut strip, &mut frames);
        run_frames(&mut slider, &mut strip, &mut frames, 0.0, 5);
        let writes = strip.writes();

        drag.handle_event(&InputEvent::press(100.0), &mut strip, &mut frames);
        for handle in frames.take_due() {
            slider.on_frame(handle, 100.0, &mut strip, &mut frames);
            drag.on_frame(handle, 100.0, &mut strip, &mut frames);
        }

        assert!(!slider.is_animating());
        assert!(ends.borrow().is_empty());
        // only the drag frame wrote
        assert_eq!(strip.writes(), writes + 1);
        assert_eq!(strip.mode(), Mode::Dragging);
    }

    #[test]
    fn test_from_config_uses_easing() {
        let config = SliderConfig {
            duration_secs: 2.0,
            easing: EasingType::Linear,
        };
        let mut slider = StepSlider::from_config(&config, SlideCallbacks::new());
        assert_eq!(slider.duration_ms(), 2000.0);

        let mut strip = SlideStrip::uniform(2, 100.0, 0.0);
        let mut frames = FrameQueue::new();
        slider.move_by(1, &mut strip, &mut frames);
        for now in [0.0, 500.0] {
            for handle in frames.take_due() {
                slider.on_frame(handle, now, &mut strip, &mut frames);
            }
        }
        assert!((strip.offset() + 25.0).abs() < 1e-9);
    }
}
