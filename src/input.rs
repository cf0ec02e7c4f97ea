//! Input events delivered to a scene between frames.
//!
//! Pointer coordinates are canvas pixels with the origin at the top-left.
//! Key codes are forwarded untouched; interpreting them is up to the
//! registered keyboard handlers.

use bitflags::bitflags;

bitflags! {
    /// Mouse buttons held during a pointer event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ButtonMask: u8 {
        const LEFT = 1 << 0;
        const MIDDLE = 1 << 1;
        const RIGHT = 1 << 2;
    }
}

impl ButtonMask {
    /// Mask for a DOM-style `which` button number (1 left, 2 middle, 3 right)
    pub fn from_which(which: u8) -> Self {
        match which {
            1 => ButtonMask::LEFT,
            2 => ButtonMask::MIDDLE,
            3 => ButtonMask::RIGHT,
            _ => ButtonMask::empty(),
        }
    }
}

/// Platform key code, forwarded as-is
pub type KeyCode = u32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseDown { x: f32, y: f32, buttons: ButtonMask },
    MouseUp { x: f32, y: f32, buttons: ButtonMask },
    MouseMove { x: f32, y: f32, buttons: ButtonMask },
    /// Positive deltas scroll toward the user
    Scroll { delta: f32 },
    KeyDown(KeyCode),
    KeyUp(KeyCode),
}

impl InputEvent {
    /// Pointer position for mouse events
    pub fn position(&self) -> Option<(f32, f32)> {
        match *self {
            InputEvent::MouseDown { x, y, .. }
            | InputEvent::MouseUp { x, y, .. }
            | InputEvent::MouseMove { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }
}
