//! Drag-to-scroll controller
//!
//! State machine: Idle -> Dragging -> Snapping -> Idle.
//!
//! While dragging, every frame moves the live offset one damped step toward
//! `base + pointer delta`, so the container trails the pointer slightly.
//! Pointer moves only record the coordinate; rendering happens on frames.
//! On release the controller snaps to the nearest slide and fires the index
//! signal.

use tracing::{debug, trace};

use crate::config::DragConfig;
use crate::frame::{FrameHandle, FrameScheduler};
use crate::geometry::{current_offset, has_mode, nearest_item, set_mode, set_offset};
use crate::input::{EventOutcome, EventTarget, InputEvent, MouseButton};
use crate::motion::{follow_step, interpolate};
use crate::signal::{Signal, SubscriptionId};
use crate::surface::{Mode, Slide, Surface};

pub type SlideCallback = Box<dyn FnMut(Slide)>;

/// Optional hooks fired on drag start and once the snap settles
#[derive(Default)]
pub struct DragCallbacks {
    pub on_drag_start: Option<SlideCallback>,
    pub on_drag_end: Option<SlideCallback>,
}

impl DragCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_drag_start<F: FnMut(Slide) + 'static>(mut self, callback: F) -> Self {
        self.on_drag_start = Some(Box::new(callback));
        self
    }

    pub fn on_drag_end<F: FnMut(Slide) + 'static>(mut self, callback: F) -> Self {
        self.on_drag_end = Some(Box::new(callback));
        self
    }
}

/// Pointer bookkeeping for one drag
#[derive(Debug, Clone, Copy)]
struct DragSession {
    start_x: f64,
    current_x: f64,
    /// Offset when the drag started
    base_offset: f64,
}

impl DragSession {
    fn target_offset(&self) -> f64 {
        self.base_offset + (self.current_x - self.start_x)
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Dragging(DragSession),
    Snapping { target: f64 },
}

/// Whole columns left to travel, halves rounded toward positive infinity
fn rounded_distance(target: f64, offset: f64) -> f64 {
    (target - offset + 0.5).floor().abs()
}

/// Attached drag handling for one container
///
/// The host routes input through [`handle_event`](Self::handle_event) and
/// due frames through [`on_frame`](Self::on_frame). [`detach`](Self::detach)
/// consumes the controller.
pub struct DragController {
    phase: Phase,
    pending: Option<FrameHandle>,
    config: DragConfig,
    callbacks: DragCallbacks,
    index_signal: Signal<usize>,
    target_index: usize,
}

impl std::fmt::Debug for DragController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("phase", &self.phase)
            .field("pending", &self.pending)
            .field("target_index", &self.target_index)
            .finish_non_exhaustive()
    }
}

impl DragController {
    /// Attach with default damping
    pub fn attach(callbacks: DragCallbacks) -> Self {
        Self::with_config(DragConfig::default(), callbacks)
    }

    pub fn with_config(config: DragConfig, callbacks: DragCallbacks) -> Self {
        debug!(
            follow_progress = config.follow_progress,
            snap_damping = config.snap_damping,
            "Drag controller attached"
        );
        Self {
            phase: Phase::Idle,
            pending: None,
            config,
            callbacks,
            index_signal: Signal::new(),
            target_index: 0,
        }
    }

    /// Subscribe to the index settled on at each release
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&usize) + 'static,
    {
        self.index_signal.add(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.index_signal.remove(id)
    }

    /// Index fired by the most recent release
    #[inline]
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    #[inline]
    pub fn is_snapping(&self) -> bool {
        matches!(self.phase, Phase::Snapping { .. })
    }

    /// Whether a frame callback is outstanding
    #[inline]
    pub fn needs_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Route one input event
    pub fn handle_event<S, F>(&mut self, event: &InputEvent, surface: &mut S, frames: &mut F) -> EventOutcome
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        match event {
            InputEvent::MouseDown {
                button: MouseButton::Primary,
                client_x,
                target: EventTarget::Container,
            } => {
                self.start_drag(*client_x, surface, frames);
                EventOutcome::Consumed
            }
            InputEvent::TouchStart {
                touches,
                target: EventTarget::Container,
            } => match touches.first() {
                Some(x) => {
                    self.start_drag(*x, surface, frames);
                    EventOutcome::Consumed
                }
                None => EventOutcome::Ignored,
            },
            InputEvent::MouseMove { client_x } => {
                self.track(*client_x);
                EventOutcome::Ignored
            }
            InputEvent::TouchMove { touches } => {
                if let Some(x) = touches.first() {
                    self.track(*x);
                }
                EventOutcome::Ignored
            }
            InputEvent::MouseUp | InputEvent::TouchEnd => {
                self.stop_drag(surface, frames);
                EventOutcome::Ignored
            }
            _ => EventOutcome::Ignored,
        }
    }

    /// Run one frame callback; handles this controller did not request are ignored
    pub fn on_frame<S, F>(&mut self, handle: FrameHandle, _timestamp_ms: f64, surface: &mut S, frames: &mut F)
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if self.pending != Some(handle) {
            return;
        }
        self.pending = None;

        match self.phase {
            Phase::Idle => {}
            Phase::Dragging(session) => {
                let live = current_offset(surface);
                let next = follow_step(live, session.target_offset(), self.config.follow_progress);
                set_offset(surface, next);
                trace!(offset = next, target = session.target_offset(), "Drag frame");
                self.pending = Some(frames.request_frame());
            }
            Phase::Snapping { target } => {
                let live = current_offset(surface);
                let next = interpolate(live, target, self.config.snap_damping);
                set_offset(surface, next);

                if rounded_distance(target, next) > 0.0 && has_mode(surface, Mode::Dragging) {
                    self.pending = Some(frames.request_frame());
                } else {
                    self.finish_snap(surface);
                }
            }
        }
    }

    /// Remove the controller: cancels its pending frame and drops all subscribers
    pub fn detach<S, F>(mut self, surface: &mut S, frames: &mut F)
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if let Some(handle) = self.pending.take() {
            frames.cancel_frame(handle);
        }
        if !matches!(self.phase, Phase::Idle) {
            // release the marker so slides are not blocked by an abandoned drag
            if has_mode(surface, Mode::Dragging) {
                set_mode(surface, Mode::Idle);
            }
            surface.set_will_change(false);
        }
        self.index_signal.destroy();
        debug!("Drag controller detached");
    }

    fn start_drag<S, F>(&mut self, client_x: f64, surface: &mut S, frames: &mut F)
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        // a running snap (or a stray drag loop) is abandoned without on_drag_end
        if let Some(handle) = self.pending.take() {
            frames.cancel_frame(handle);
        }

        let nearest = nearest_item(surface);
        self.phase = Phase::Dragging(DragSession {
            start_x: client_x,
            current_x: client_x,
            base_offset: nearest.current_offset,
        });
        surface.set_will_change(true);
        set_mode(surface, Mode::Dragging);
        debug!(
            client_x,
            base_offset = nearest.current_offset,
            index = nearest.index,
            "Drag started"
        );

        if let (Some(callback), Some(slide)) =
            (self.callbacks.on_drag_start.as_mut(), surface.slide(nearest.index))
        {
            callback(slide);
        }

        self.pending = Some(frames.request_frame());
    }

    fn track(&mut self, client_x: f64) {
        if let Phase::Dragging(session) = &mut self.phase {
            session.current_x = client_x;
        }
    }

    fn stop_drag<S, F>(&mut self, surface: &mut S, frames: &mut F)
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if !self.is_dragging() {
            return;
        }
        if let Some(handle) = self.pending.take() {
            frames.cancel_frame(handle);
        }
        surface.set_will_change(false);

        let nearest = nearest_item(surface);
        set_mode(surface, Mode::Dragging);
        self.phase = Phase::Snapping {
            target: nearest.target_offset,
        };
        self.pending = Some(frames.request_frame());
        debug!(
            index = nearest.index,
            offset = nearest.current_offset,
            target = nearest.target_offset,
            "Drag released, snapping"
        );

        self.target_index = nearest.index;
        self.index_signal.fire(&nearest.index);
    }

    fn finish_snap<S>(&mut self, surface: &mut S)
    where
        S: Surface + ?Sized,
    {
        self.phase = Phase::Idle;
        set_mode(surface, Mode::Idle);

        let nearest = nearest_item(surface);
        debug!(index = nearest.index, "Snap settled");
        if let (Some(callback), Some(slide)) =
            (self.callbacks.on_drag_end.as_mut(), surface.slide(nearest.index))
        {
            callback(slide);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameQueue;
    use crate::strip::SlideStrip;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<usize>>>;

    fn recording() -> (DragCallbacks, Log, Log) {
        let starts: Log = Rc::default();
        let ends: Log = Rc::default();
        let s = starts.clone();
        let e = ends.clone();
        let callbacks = DragCallbacks::new()
            .on_drag_start(move |slide| s.borrow_mut().push(slide.index))
            .on_drag_end(move |slide| e.borrow_mut().push(slide.index));
        (callbacks, starts, ends)
    }

    fn run_frames(drag: &mut DragController, strip: &mut SlideStrip, frames: &mut FrameQueue, count: usize) {
        for i in 0..count {
            for handle in frames.take_due() {
                drag.on_frame(handle, i as f64 * 16.0, strip, frames);
            }
        }
    }

    #[test]
    fn test_press_starts_drag() {
        let (callbacks, starts, _) = recording();
        let mut drag = DragController::attach(callbacks);
        let mut strip = SlideStrip::uniform(3, 100.0, 0.0);
        let mut frames = FrameQueue::new();

        let outcome = drag.handle_event(&InputEvent::press(500.0), &mut strip, &mut frames);

        assert_eq!(outcome, EventOutcome::Consumed);
        assert!(drag.is_dragging());
        assert!(strip.will_change());
        assert_eq!(strip.mode(), Mode::Dragging);
        assert_eq!(*starts.borrow(), vec![0]);
        assert_eq!(frames.pending_len(), 1);
    }

    #[test]
    fn test_moves_only_render_on_frames() {
        let mut drag = DragController::attach(DragCallbacks::new());
        let mut strip = SlideStrip::uniform(3, 100.0, 0.0);
        let mut frames = FrameQueue::new();

        drag.handle_event(&InputEvent::press(500.0), &mut strip, &mut frames);
        drag.handle_event(&InputEvent::move_to(380.0), &mut strip, &mut frames);
        assert_eq!(strip.writes(), 0);

        run_frames(&mut drag, &mut strip, &mut frames, 1);
        // one 0.08 damping step toward -120
        assert!((strip.offset() + 9.6).abs() < 1e-9);

        run_frames(&mut drag, &mut strip, &mut frames, 300);
        assert!((strip.offset() + 120.0).abs() < 0.01);
        assert!(drag.is_dragging());
    }

    #[test]
    fn test_release_snaps_to_nearest() {
        let (callbacks, _, ends) = recording();
        let mut drag = DragController::attach(callbacks);
        let fired: Log = Rc::default();
        let sink = fired.clone();
        drag.subscribe(move |index| sink.borrow_mut().push(*index));

        let mut strip = SlideStrip::uniform(3, 100.0, 0.0);
        let mut frames = FrameQueue::new();

        drag.handle_event(&InputEvent::press(500.0), &mut strip, &mut frames);
        drag.handle_event(&InputEvent::move_to(380.0), &mut strip, &mut frames);
        run_frames(&mut drag, &mut strip, &mut frames, 300);

        drag.handle_event(&InputEvent::release(), &mut strip, &mut frames);
        assert!(drag.is_snapping());
        assert!(!strip.will_change());
        assert_eq!(strip.mode(), Mode::Dragging);
        assert_eq!(*fired.borrow(), vec![1]);
        assert_eq!(drag.target_index(), 1);

        run_frames(&mut drag, &mut strip, &mut frames, 1000);
        assert!(frames.is_idle());
        assert!(!drag.needs_frame());
        assert_eq!(strip.mode(), Mode::Idle);
        assert!((strip.offset() + 100.0).abs() < 0.5);
        assert_eq!(*ends.borrow(), vec![1]);
    }

    #[test]
    fn test_new_drag_abandons_snap() {
        let (callbacks, starts, ends) = recording();
        let mut drag = DragController::attach(callbacks);
        let mut strip = SlideStrip::uniform(3, 100.0, 0.0);
        let mut frames = FrameQueue::new();

        drag.handle_event(&InputEvent::press(500.0), &mut strip, &mut frames);
        drag.handle_event(&InputEvent::move_to(330.0), &mut strip, &mut frames);
        run_frames(&mut drag, &mut strip, &mut frames, 300);
        drag.handle_event(&InputEvent::release(), &mut strip, &mut frames);
        run_frames(&mut drag, &mut strip, &mut frames, 3);
        assert!(drag.is_snapping());

        drag.handle_event(&InputEvent::press(200.0), &mut strip, &mut frames);
        assert!(drag.is_dragging());
        assert_eq!(frames.pending_len(), 1);
        assert_eq!(starts.borrow().len(), 2);
        assert!(ends.borrow().is_empty());
    }

    #[test]
    fn test_detach_cancels_frames_and_stops_writes() {
        let mut drag = DragController::attach(DragCallbacks::new());
        let fired: Log = Rc::default();
        let sink = fired.clone();
        drag.subscribe(move |index| sink.borrow_mut().push(*index));

        let mut strip = SlideStrip::uniform(3, 100.0, 0.0);
        let mut frames = FrameQueue::new();

        drag.handle_event(&InputEvent::press(500.0), &mut strip, &mut frames);
        drag.handle_event(&InputEvent::move_to(300.0), &mut strip, &mut frames);
        run_frames(&mut drag, &mut strip, &mut frames, 5);
        let writes = strip.writes();
        let offset = strip.offset();

        drag.detach(&mut strip, &mut frames);
        assert!(frames.is_idle());
        assert_eq!(strip.mode(), Mode::Idle);
        assert!(!strip.will_change());

        // the host has nothing left to route events or frames to
        for _ in 0..10 {
            assert!(frames.take_due().is_empty());
        }
        assert_eq!(strip.writes(), writes);
        assert_eq!(strip.offset(), offset);
        assert!(fired.borrow().is_empty());
    }

    #[test]
    fn test_ignores_secondary_button_and_outside_presses() {
        let mut drag = DragController::attach(DragCallbacks::new());
        let mut strip = SlideStrip::uniform(3, 100.0, 0.0);
        let mut frames = FrameQueue::new();

        let secondary = InputEvent::MouseDown {
            button: MouseButton::Secondary,
            client_x: 10.0,
            target: EventTarget::Container,
        };
        let outside = InputEvent::MouseDown {
            button: MouseButton::Primary,
            client_x: 10.0,
            target: EventTarget::Window,
        };
        assert_eq!(drag.handle_event(&secondary, &mut strip, &mut frames), EventOutcome::Ignored);
        assert_eq!(drag.handle_event(&outside, &mut strip, &mut frames), EventOutcome::Ignored);
        drag.handle_event(&InputEvent::release(), &mut strip, &mut frames);

        assert!(frames.is_idle());
        assert_eq!(strip.mode(), Mode::Idle);
    }

    #[test]
    fn test_touch_uses_first_touch() {
        let mut drag = DragController::attach(DragCallbacks::new());
        let mut strip = SlideStrip::uniform(4, 100.0, 0.0);
        let mut frames = FrameQueue::new();

        let start = InputEvent::TouchStart {
            touches: vec![400.0, 10.0],
            target: EventTarget::Container,
        };
        assert_eq!(drag.handle_event(&start, &mut strip, &mut frames), EventOutcome::Consumed);
        drag.handle_event(&InputEvent::TouchMove { touches: vec![190.0, 900.0] }, &mut strip, &mut frames);
        run_frames(&mut drag, &mut strip, &mut frames, 300);
        assert!((strip.offset() + 210.0).abs() < 0.01);

        drag.handle_event(&InputEvent::TouchEnd, &mut strip, &mut frames);
        assert_eq!(drag.target_index(), 2);
    }

    #[test]
    fn test_empty_container_degenerates() {
        let (callbacks, starts, ends) = recording();
        let mut drag = DragController::attach(callbacks);
        let mut strip = SlideStrip::new(Vec::new(), 0.0);
        let mut frames = FrameQueue::new();

        drag.handle_event(&InputEvent::press(50.0), &mut strip, &mut frames);
        drag.handle_event(&InputEvent::move_to(10.0), &mut strip, &mut frames);
        run_frames(&mut drag, &mut strip, &mut frames, 10);
        drag.handle_event(&InputEvent::release(), &mut strip, &mut frames);
        run_frames(&mut drag, &mut strip, &mut frames, 2000);

        assert_eq!(drag.target_index(), 0);
        assert!(frames.is_idle());
        assert!(starts.borrow().is_empty());
        assert!(ends.borrow().is_empty());
    }

    #[test]
    fn test_rounded_distance_halves_round_up() {
        assert_eq!(rounded_distance(0.0, 0.5), 0.0);
        assert_eq!(rounded_distance(0.0, -0.5), 1.0);
        assert_eq!(rounded_distance(-100.0, -100.4), 0.0);
        assert_eq!(rounded_distance(-100.0, -98.0), 2.0);
    }

    #[test]
    fn test_foreign_frame_handles_ignored() {
        let mut drag = DragController::attach(DragCallbacks::new());
        let mut strip = SlideStrip::uniform(3, 100.0, 0.0);
        let mut frames = FrameQueue::new();

        let foreign = frames.request_frame();
        drag.on_frame(foreign, 0.0, &mut strip, &mut frames);
        assert_eq!(strip.writes(), 0);
    }
}
