use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton as TermButton, MouseEvent, MouseEventKind};
use steper_core::{EventTarget, InputEvent, MouseButton};

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Prev,
    Next,
    /// Step several slides at once
    Skip(isize),
    JumpToFirst,
    JumpToLast,
    ToggleDrag,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,

        // Stepping
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::Prev,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::Next,
        (KeyCode::Left, KeyModifiers::NONE) => Action::Prev,
        (KeyCode::Right, KeyModifiers::NONE) => Action::Next,
        (KeyCode::Char('H'), KeyModifiers::SHIFT) => Action::Skip(-2),
        (KeyCode::Char('L'), KeyModifiers::SHIFT) => Action::Skip(2),

        // Jump without animation
        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::JumpToFirst,
        (KeyCode::Home, _) => Action::JumpToFirst,
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpToLast,
        (KeyCode::End, _) => Action::JumpToLast,

        (KeyCode::Char('d'), KeyModifiers::NONE) => Action::ToggleDrag,

        _ => Action::None,
    }
}

/// Apply an action to the app
pub fn apply_action(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.quit(),
        Action::Prev => app.step(-1),
        Action::Next => app.step(1),
        Action::Skip(step) => app.step(step),
        Action::JumpToFirst => app.jump_to(0),
        Action::JumpToLast => app.jump_to_last(),
        Action::ToggleDrag => app.toggle_drag(),
        Action::None => {}
    }
}

/// Translate a terminal mouse event into a pointer event
///
/// Presses are targeted at the container only when they land inside the
/// carousel; drags and releases are window-level.
pub fn map_mouse_event(event: MouseEvent, app: &App) -> Option<InputEvent> {
    let client_x = event.column as f64;
    match event.kind {
        MouseEventKind::Down(button) => {
            let target = if app.hits_carousel(event.column) {
                EventTarget::Container
            } else {
                EventTarget::Window
            };
            let button = match button {
                TermButton::Left => MouseButton::Primary,
                TermButton::Middle => MouseButton::Middle,
                TermButton::Right => MouseButton::Secondary,
            };
            Some(InputEvent::MouseDown {
                button,
                client_x,
                target,
            })
        }
        MouseEventKind::Drag(_) | MouseEventKind::Moved => Some(InputEvent::MouseMove { client_x }),
        MouseEventKind::Up(_) => Some(InputEvent::MouseUp),
        _ => None,
    }
}
