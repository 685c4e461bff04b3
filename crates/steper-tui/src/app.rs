use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use steper_core::geometry::{current_offset, nearest_item, set_offset_by_index};
use steper_core::{
    AppConfig, DragCallbacks, DragController, EventOutcome, FrameQueue, InputEvent, Mode,
    SlideCallbacks, SlideStrip, StepSlider, Surface,
};
use tracing::info;

/// Maximum number of lines kept in the activity log
const ACTIVITY_LIMIT: usize = 8;

/// Shared sink the controller callbacks write into
pub type ActivityLog = Rc<RefCell<VecDeque<String>>>;

fn push_activity(log: &ActivityLog, line: String) {
    let mut log = log.borrow_mut();
    if log.len() == ACTIVITY_LIMIT {
        log.pop_front();
    }
    log.push_back(line);
}

/// Terminal carousel state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// The slide row being translated
    pub strip: SlideStrip,
    /// Frame requests from both controllers
    pub frames: FrameQueue,
    /// Drag handling; `None` while detached
    pub drag: Option<DragController>,
    /// Step navigation
    pub slider: StepSlider,
    /// Logical index reported by the last move or drag release
    pub index: Rc<Cell<usize>>,
    /// Recent controller callbacks, newest last
    pub activity: ActivityLog,
    /// Columns occupied by the carousel: (x, width)
    pub viewport: (u16, u16),
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let strip = SlideStrip::uniform(
            config.ui.slide_count,
            config.ui.slide_width as f64,
            config.ui.slide_gap as f64,
        );
        let activity: ActivityLog = Rc::default();

        let slider = {
            let start_log = activity.clone();
            let end_log = activity.clone();
            StepSlider::from_config(
                &config.slider,
                SlideCallbacks::new()
                    .on_slide_start(move |slide| {
                        push_activity(&start_log, format!("slide start -> {}", slide.index + 1))
                    })
                    .on_slide_end(move |slide| {
                        push_activity(&end_log, format!("slide end   -> {}", slide.index + 1))
                    }),
            )
        };

        let mut app = Self {
            config,
            strip,
            frames: FrameQueue::new(),
            drag: None,
            slider,
            index: Rc::new(Cell::new(0)),
            activity,
            viewport: (0, 0),
            should_quit: false,
            status_message: None,
        };
        app.attach_drag();
        app
    }

    fn attach_drag(&mut self) {
        let start_log = self.activity.clone();
        let end_log = self.activity.clone();
        let callbacks = DragCallbacks::new()
            .on_drag_start(move |slide| {
                push_activity(&start_log, format!("drag start  @ {}", slide.index + 1))
            })
            .on_drag_end(move |slide| {
                push_activity(&end_log, format!("drag end    @ {}", slide.index + 1))
            });

        let mut drag = DragController::with_config(self.config.drag.clone(), callbacks);
        let index = self.index.clone();
        drag.subscribe(move |settled| index.set(*settled));
        self.drag = Some(drag);
    }

    /// Attach or detach drag handling
    pub fn toggle_drag(&mut self) {
        match self.drag.take() {
            Some(drag) => {
                drag.detach(&mut self.strip, &mut self.frames);
                self.status_message = Some("Dragging disabled".to_string());
                info!("Drag detached");
            }
            None => {
                self.attach_drag();
                self.status_message = Some("Dragging enabled".to_string());
                info!("Drag attached");
            }
        }
    }

    /// Place the carousel in the given columns
    pub fn set_viewport(&mut self, x: u16, width: u16) {
        if self.viewport != (x, width) {
            self.viewport = (x, width);
            self.strip.set_origin(x as f64);
        }
    }

    /// Whether `column` falls inside the carousel
    pub fn hits_carousel(&self, column: u16) -> bool {
        let (x, width) = self.viewport;
        column >= x && column < x.saturating_add(width)
    }

    /// Route a pointer event to the drag controller
    pub fn handle_input(&mut self, event: &InputEvent) -> EventOutcome {
        match self.drag.as_mut() {
            Some(drag) => drag.handle_event(event, &mut self.strip, &mut self.frames),
            None => EventOutcome::Ignored,
        }
    }

    /// Step by `step` slides
    pub fn step(&mut self, step: isize) {
        let index = self.slider.move_by(step, &mut self.strip, &mut self.frames);
        self.index.set(index);
        self.status_message = None;
    }

    /// Jump to `index` without animating
    pub fn jump_to(&mut self, index: usize) {
        if self.strip.mode() != Mode::Idle {
            return;
        }
        let index = index.min(self.strip.child_count().saturating_sub(1));
        set_offset_by_index(&mut self.strip, index);
        self.index.set(index);
    }

    pub fn jump_to_last(&mut self) {
        self.jump_to(self.strip.child_count().saturating_sub(1));
    }

    /// Run every frame callback due at `now_ms`
    pub fn tick(&mut self, now_ms: f64) {
        for handle in self.frames.take_due() {
            if let Some(drag) = self.drag.as_mut() {
                drag.on_frame(handle, now_ms, &mut self.strip, &mut self.frames);
            }
            self.slider.on_frame(handle, now_ms, &mut self.strip, &mut self.frames);
        }
    }

    /// Whether the next loop iteration should run at animation frame rate
    #[inline]
    pub fn needs_fast_update(&self) -> bool {
        !self.frames.is_idle()
    }

    /// Current translation in columns
    pub fn offset(&self) -> f64 {
        current_offset(&self.strip)
    }

    /// Slide nearest to the current offset
    pub fn nearest_index(&self) -> usize {
        nearest_item(&self.strip).index
    }

    pub fn slide_count(&self) -> usize {
        self.strip.child_count()
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
