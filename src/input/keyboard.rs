//! Keys as seen by focus traversal and widgets.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT = 0b0000_0010;
        const CTRL = 0b0000_0100;
    }
}

/// Keys the element tree reacts to. Anything else arrives as `Char`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    /// Shift+Tab as reported by most terminals.
    BackTab,
    Delete,
    Char(char),
    Esc,
}

/// Direction of a focus move requested by the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key with no modifiers.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    #[must_use]
    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    #[must_use]
    pub fn with_ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CTRL)
    }

    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(KeyModifiers::SHIFT)
    }

    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CTRL)
    }

    #[must_use]
    pub fn alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    /// Enter or space, the keys that activate buttons and toggles.
    #[must_use]
    pub fn is_activate(&self) -> bool {
        matches!(self.code, KeyCode::Enter | KeyCode::Char(' ')) && !self.ctrl() && !self.alt()
    }

    /// Tab moves forward; Shift+Tab and BackTab move backward.
    #[must_use]
    pub fn traversal(&self) -> Option<Traversal> {
        match self.code {
            KeyCode::Tab if self.shift() => Some(Traversal::Backward),
            KeyCode::Tab => Some(Traversal::Forward),
            KeyCode::BackTab => Some(Traversal::Backward),
            _ => None,
        }
    }

    /// The character to insert into a text field, if this key types one.
    #[must_use]
    pub fn typed_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.ctrl() && !self.alt() && !c.is_control() => Some(c),
            _ => None,
        }
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self::char(c)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::key(code)
    }
}
