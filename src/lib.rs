//! `tessera` - declarative terminal UI core
//!
//! Build a tree of elements, lay it out inside a fixed character grid, paint
//! it through themed, clipped contexts and emit minimal ANSI updates.
//!
//! ```
//! use tessera::element::{Container, ElementBuilder};
//! use tessera::geom::Size;
//! use tessera::snapshot::render_plain;
//! use tessera::widgets::{Button, Spacer};
//!
//! let mut row = Container::hstack()
//!     .with_spacing(1)
//!     .child(Button::new("OK"))
//!     .child(Spacer::new())
//!     .child(Button::new("Cancel"));
//!
//! assert_eq!(render_plain(&mut row, 20, 1), "[ OK ]    [ Cancel ]");
//! ```

// Crate-level lint configuration
#![allow(clippy::cast_possible_truncation)] // Coordinates are clamped before narrowing
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Percentage math
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow Cell::CellContent etc
#![allow(clippy::struct_excessive_bools)] // Interactive state is a set of flags
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::inherent_to_string)] // to_string methods are convenient
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod element;
pub mod error;
pub mod event;
pub mod focus;
pub mod geom;
pub mod glyphs;
pub mod input;
pub mod layout;
pub mod paint;
pub mod renderer;
pub mod scroll;
pub mod snapshot;
pub mod style;
pub mod text;
pub mod theme;
pub mod widgets;

// Re-export core types at crate root
pub use buffer::CellBuffer;
pub use cell::{Cell, CellContent};
pub use color::Rgb;
pub use element::{Container, Element, ElementBuilder, ElementPath, LayoutMode, OverflowX};
pub use error::{Error, Result};
pub use event::{Diagnostics, LogLevel};
pub use focus::{FocusManager, HoverManager, HoverTransition, dispatch_key, dispatch_mouse};
pub use geom::{AlignH, AlignV, Bounds, Insets, Size};
pub use glyphs::{GlyphMode, GlyphSet};
pub use layout::layout;
pub use paint::PaintContext;
pub use scroll::{ScrollRegistry, ScrollState};
pub use style::{Style, TextAttributes};
pub use theme::{PseudoClass, StyleResolver, Theme};

// Re-export input types
pub use input::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind, Traversal,
};

pub use renderer::{RenderStats, Renderer, RendererOptions};
