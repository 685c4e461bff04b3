//! Pointer and touch events as delivered by the host
//!
//! Down/start events only count when they hit the container; move and
//! up/end events are window-level so a drag keeps tracking after the pointer
//! leaves the container.

/// Where a down/start event landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    Container,
    Window,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    MouseDown {
        button: MouseButton,
        client_x: f64,
        target: EventTarget,
    },
    MouseMove {
        client_x: f64,
    },
    MouseUp,
    /// `touches` holds the client x of every active touch point, first touch first
    TouchStart {
        touches: Vec<f64>,
        target: EventTarget,
    },
    TouchMove {
        touches: Vec<f64>,
    },
    TouchEnd,
}

impl InputEvent {
    /// Primary-button mouse down on the container
    pub fn press(client_x: f64) -> Self {
        InputEvent::MouseDown {
            button: MouseButton::Primary,
            client_x,
            target: EventTarget::Container,
        }
    }

    pub fn move_to(client_x: f64) -> Self {
        InputEvent::MouseMove { client_x }
    }

    pub fn release() -> Self {
        InputEvent::MouseUp
    }
}

/// Whether the host should suppress its default handling of the event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Consumed,
    Ignored,
}
