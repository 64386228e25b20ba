//! Platform-agnostic input handling
use std::collections::{HashSet, VecDeque};

use winit::keyboard::KeyCode;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Move(MoveKey),
    Escape,
}

/// Keys that move the camera while held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(MouseButton::Left),
            winit::event::MouseButton::Right => Some(MouseButton::Right),
            winit::event::MouseButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Platform-independent input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerDelta { dx: f32, dy: f32 },
    MouseButton { button: MouseButton, pressed: bool },
    /// Cursor grabbed (true) or released (false).
    PointerCaptured(bool),
    FocusLost,
    ExitRequested,
}

/// FIFO of events collected between frames.
///
/// Window callbacks only push; the game drains it once per frame so state is
/// never mutated from inside a platform callback.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Keys currently held down
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<MoveKey>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: MoveKey) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: MoveKey) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held.contains(&key)
    }

    pub fn held(&self) -> &HashSet<MoveKey> {
        &self.held
    }

    pub fn clear_keys(&mut self) {
        self.held.clear();
    }
}

/// Key mapping configuration
#[derive(Clone, Debug)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub escape: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            up: KeyCode::Space,
            down: KeyCode::ShiftLeft,
            escape: KeyCode::Escape,
        }
    }
}

impl KeyBindings {
    /// Logical key for a physical key code; arrow keys alias the horizontal moves.
    pub fn map(&self, code: KeyCode) -> Option<Key> {
        let key = match code {
            c if c == self.forward => Key::Move(MoveKey::Forward),
            c if c == self.backward => Key::Move(MoveKey::Backward),
            c if c == self.left => Key::Move(MoveKey::Left),
            c if c == self.right => Key::Move(MoveKey::Right),
            c if c == self.up => Key::Move(MoveKey::Up),
            c if c == self.down => Key::Move(MoveKey::Down),
            c if c == self.escape => Key::Escape,
            KeyCode::ArrowUp => Key::Move(MoveKey::Forward),
            KeyCode::ArrowDown => Key::Move(MoveKey::Backward),
            KeyCode::ArrowLeft => Key::Move(MoveKey::Left),
            KeyCode::ArrowRight => Key::Move(MoveKey::Right),
            _ => return None,
        };
        Some(key)
    }

    pub fn key_event(&self, code: KeyCode, pressed: bool) -> Option<InputEvent> {
        self.map(code).map(|key| {
            if pressed {
                InputEvent::KeyDown(key)
            } else {
                InputEvent::KeyUp(key)
            }
        })
    }
}
