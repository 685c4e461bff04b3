use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tracing::info;

use steper_core::AppConfig;
use steper_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{apply_action, handle_key_event, map_mouse_event},
    widgets::{ActivityWidget, CarouselWidget, StatusBarWidget},
    Theme,
};

pub fn run(config: Arc<AppConfig>) -> Result<()> {
    info!(
        slides = config.ui.slide_count,
        duration_secs = config.slider.duration_secs,
        "Starting demo"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("steper"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.clone());
    let result = run_loop(&mut terminal, &mut app, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, config: &AppConfig) -> Result<()> {
    let theme = Theme::default();
    let event_handler = EventHandler::new(config.ui.tick_rate_ms, config.ui.frame_interval_ms());
    let frame_interval = Duration::from_millis(config.ui.frame_interval_ms());

    let clock = Instant::now();
    let mut last_frame = clock;

    loop {
        terminal.draw(|frame| draw(frame, app, &theme))?;

        if app.should_quit {
            info!("Quitting demo");
            return Ok(());
        }

        match event_handler.next(app.needs_fast_update())? {
            Some(AppEvent::Key(key)) => apply_action(app, handle_key_event(key)),
            Some(AppEvent::Mouse(mouse)) => {
                if let Some(event) = map_mouse_event(mouse, app) {
                    app.handle_input(&event);
                }
            }
            Some(AppEvent::Resize(_, _)) | Some(AppEvent::Tick) | None => {}
        }

        // Frame callbacks run at frame rate, independent of input rate
        let now = Instant::now();
        if now.duration_since(last_frame) >= frame_interval {
            last_frame = now;
            app.tick(now.duration_since(clock).as_secs_f64() * 1000.0);
        }
    }
}

fn draw(frame: &mut Frame, app: &mut App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let slides_area = CarouselWidget::inner_area(chunks[0]);
    app.set_viewport(slides_area.x, slides_area.width);

    CarouselWidget::render(frame, chunks[0], app, theme);
    ActivityWidget::render(frame, chunks[1], app, theme);
    StatusBarWidget::render(frame, chunks[2], app, theme);
}
