//! Key and mouse events delivered to the element tree.
//!
//! Decoding raw terminal input is left to the host application; these types
//! are what it hands to [`crate::focus::dispatch_key`], scroll states and
//! widget hooks.

mod keyboard;
mod mouse;

pub use keyboard::{KeyCode, KeyEvent, KeyModifiers, Traversal};
pub use mouse::{MouseButton, MouseEvent, MouseEventKind};
