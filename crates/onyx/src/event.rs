use onyx_engine::coords::Vec2;
use onyx_engine::input::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, MouseWheelDelta, PointerButtonEvent,
    PointerMoveEvent, TextEvent,
};

/// Discriminant of an [`Event`], used by components to declare interest.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventKind {
    Quit,
    KeyDown,
    KeyUp,
    MouseButtonDown,
    MouseButtonUp,
    MouseMotion,
    MouseWheel,
    TextInput,
    FocusGained,
    FocusLost,
    MouseLeave,
    Resized,
    User,
}

/// Events routed to a scene's components.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The window was asked to close. The frame finishes, then the loop stops.
    Quit,
    KeyDown { key: Key, modifiers: Modifiers, repeat: bool },
    KeyUp { key: Key, modifiers: Modifiers },
    MouseButtonDown { button: MouseButton, pos: Vec2 },
    MouseButtonUp { button: MouseButton, pos: Vec2 },
    MouseMotion { pos: Vec2 },
    MouseWheel { delta: MouseWheelDelta, modifiers: Modifiers },
    TextInput { text: String },
    FocusGained,
    FocusLost,
    MouseLeave,
    /// New window size in logical pixels.
    Resized { width: f32, height: f32 },
    /// Posted through [`Context::post_event`](crate::Context::post_event).
    User { code: u32 },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Quit => EventKind::Quit,
            Event::KeyDown { .. } => EventKind::KeyDown,
            Event::KeyUp { .. } => EventKind::KeyUp,
            Event::MouseButtonDown { .. } => EventKind::MouseButtonDown,
            Event::MouseButtonUp { .. } => EventKind::MouseButtonUp,
            Event::MouseMotion { .. } => EventKind::MouseMotion,
            Event::MouseWheel { .. } => EventKind::MouseWheel,
            Event::TextInput { .. } => EventKind::TextInput,
            Event::FocusGained => EventKind::FocusGained,
            Event::FocusLost => EventKind::FocusLost,
            Event::MouseLeave => EventKind::MouseLeave,
            Event::Resized { .. } => EventKind::Resized,
            Event::User { .. } => EventKind::User,
        }
    }

    /// Maps an engine input event. Modifier-only changes have no counterpart.
    pub fn from_input(ev: &InputEvent) -> Option<Event> {
        let event = match ev {
            InputEvent::CloseRequested => Event::Quit,
            InputEvent::Resized { width, height } => Event::Resized { width: *width, height: *height },
            InputEvent::ModifiersChanged(_) => return None,

            InputEvent::Key { key, state: KeyState::Pressed, modifiers, repeat, .. } => {
                Event::KeyDown { key: *key, modifiers: *modifiers, repeat: *repeat }
            }
            InputEvent::Key { key, state: KeyState::Released, modifiers, .. } => {
                Event::KeyUp { key: *key, modifiers: *modifiers }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => Event::MouseMotion { pos: Vec2::new(*x, *y) },
            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y, .. }) => {
                let pos = Vec2::new(*x, *y);
                match state {
                    MouseButtonState::Pressed => Event::MouseButtonDown { button: *button, pos },
                    MouseButtonState::Released => Event::MouseButtonUp { button: *button, pos },
                }
            }

            InputEvent::MouseWheel { delta, modifiers } => Event::MouseWheel { delta: *delta, modifiers: *modifiers },
            InputEvent::Text(TextEvent { text }) => Event::TextInput { text: text.clone() },
            InputEvent::PointerLeft => Event::MouseLeave,
            InputEvent::Focused(true) => Event::FocusGained,
            InputEvent::Focused(false) => Event::FocusLost,
        };
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_request_becomes_quit() {
        assert_eq!(Event::from_input(&InputEvent::CloseRequested), Some(Event::Quit));
    }

    #[test]
    fn key_events_split_by_state() {
        let press = InputEvent::Key {
            key: Key::Space,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: true,
        };
        let ev = Event::from_input(&press);
        assert_eq!(ev, Some(Event::KeyDown { key: Key::Space, modifiers: Modifiers::default(), repeat: true }));
        assert_eq!(ev.map(|e| e.kind()), Some(EventKind::KeyDown));

        let release = InputEvent::Key {
            key: Key::Space,
            state: KeyState::Released,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        };
        assert_eq!(Event::from_input(&release).map(|e| e.kind()), Some(EventKind::KeyUp));
    }

    #[test]
    fn modifier_changes_are_not_forwarded() {
        assert_eq!(Event::from_input(&InputEvent::ModifiersChanged(Modifiers::default())), None);
    }

    #[test]
    fn focus_and_pointer_mapping() {
        assert_eq!(Event::from_input(&InputEvent::Focused(false)), Some(Event::FocusLost));
        assert_eq!(Event::from_input(&InputEvent::PointerLeft), Some(Event::MouseLeave));
        assert_eq!(
            Event::from_input(&InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 2.0 })),
            Some(Event::MouseMotion { pos: Vec2::new(1.0, 2.0) })
        );
    }
}
