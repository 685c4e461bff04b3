use anyhow::{bail, Result};
use serde::Serialize;
use tracing::info;

use steper_core::geometry::nearest_item;
use steper_core::{
    AppConfig, DragCallbacks, DragController, FrameQueue, InputEvent, SlideCallbacks, SlideStrip,
    StepSlider, Surface,
};

/// Upper bound on simulated frames per phase
const MAX_FRAMES: usize = 100_000;

/// Frames the pointer is held after moving, before release
const HOLD_FRAMES: usize = 30;

/// One rendered frame of the simulation
#[derive(Debug, Clone, Serialize)]
struct TraceFrame {
    phase: &'static str,
    t_ms: f64,
    offset: f64,
    nearest: usize,
    mode: &'static str,
}

/// Headless host: strip, frame queue and both controllers on one clock
struct Simulation {
    strip: SlideStrip,
    frames: FrameQueue,
    drag: Option<DragController>,
    slider: StepSlider,
    now_ms: f64,
    frame_ms: f64,
    json: bool,
}

impl Simulation {
    fn new(config: &AppConfig, fps: u32) -> Self {
        let strip = SlideStrip::uniform(
            config.ui.slide_count,
            config.ui.slide_width as f64,
            config.ui.slide_gap as f64,
        );
        let slider = StepSlider::from_config(
            &config.slider,
            SlideCallbacks::new()
                .on_slide_start(|slide| info!(index = slide.index, "slide start"))
                .on_slide_end(|slide| info!(index = slide.index, "slide end")),
        );
        let drag = DragController::with_config(
            config.drag.clone(),
            DragCallbacks::new()
                .on_drag_start(|slide| info!(index = slide.index, "drag start"))
                .on_drag_end(|slide| info!(index = slide.index, "drag end")),
        );

        Self {
            strip,
            frames: FrameQueue::new(),
            drag: Some(drag),
            slider,
            now_ms: 0.0,
            frame_ms: 1000.0 / fps as f64,
            json: false,
        }
    }

    fn frame(&mut self, phase: &'static str) -> Result<()> {
        for handle in self.frames.take_due() {
            if let Some(drag) = self.drag.as_mut() {
                drag.on_frame(handle, self.now_ms, &mut self.strip, &mut self.frames);
            }
            self.slider.on_frame(handle, self.now_ms, &mut self.strip, &mut self.frames);
        }
        self.print(phase)?;
        self.now_ms += self.frame_ms;
        Ok(())
    }

    fn settle(&mut self, phase: &'static str) -> Result<()> {
        for _ in 0..MAX_FRAMES {
            if self.frames.is_idle() {
                return Ok(());
            }
            self.frame(phase)?;
        }
        bail!("{phase} did not settle within {MAX_FRAMES} frames")
    }

    fn input(&mut self, event: InputEvent) {
        if let Some(drag) = self.drag.as_mut() {
            drag.handle_event(&event, &mut self.strip, &mut self.frames);
        }
    }

    fn print(&self, phase: &'static str) -> Result<()> {
        let frame = TraceFrame {
            phase,
            t_ms: self.now_ms,
            offset: self.strip.offset(),
            nearest: nearest_item(&self.strip).index,
            mode: self.strip.mode().as_str(),
        };
        if self.json {
            println!("{}", serde_json::to_string(&frame)?);
        } else {
            println!(
                "{:>5} {:>9.1}ms offset {:>9.2} nearest {} {}",
                frame.phase, frame.t_ms, frame.offset, frame.nearest, frame.mode
            );
        }
        Ok(())
    }
}

pub fn run(config: &AppConfig, steps: &[isize], drag: Option<f64>, fps: u32, json: bool) -> Result<()> {
    if fps == 0 {
        bail!("--fps must be at least 1");
    }

    let mut sim = Simulation::new(config, fps);
    sim.json = json;

    if let Some(distance) = drag {
        sim.input(InputEvent::press(0.0));
        sim.input(InputEvent::move_to(distance));
        for _ in 0..HOLD_FRAMES {
            sim.frame("drag")?;
        }
        sim.input(InputEvent::release());
        sim.settle("snap")?;
    }

    for &step in steps {
        let index = sim.slider.move_by(step, &mut sim.strip, &mut sim.frames);
        if !json {
            println!("move_by({step}) -> {index}");
        }
        sim.settle("slide")?;
    }

    if let Some(drag) = sim.drag.take() {
        drag.detach(&mut sim.strip, &mut sim.frames);
    }
    if !json {
        println!(
            "settled at slide {} of {} (offset {:.2})",
            nearest_item(&sim.strip).index,
            sim.strip.child_count(),
            sim.strip.offset()
        );
    }
    Ok(())
}
