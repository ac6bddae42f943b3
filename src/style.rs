//! Text styling with attributes and colors.
//!
//! This module provides types for styling text in the terminal:
//!
//! - [`TextAttributes`]: Bitflags for bold, dim, italic, underline, reverse
//! - [`Style`]: Optional-field style record used by the theme cascade
//! - [`StyleBuilder`]: Fluent builder for constructing styles
//!
//! A [`Style`] distinguishes "not specified" from "explicitly off". Each
//! attribute flag is paired with a mask bit, so a `button:focus` rule can turn
//! bold on and a later override can turn it off again.
//!
//! # Examples
//!
//! ```
//! use tessera::{Rgb, Style, TextAttributes};
//!
//! let base = Style::fg(Rgb::WHITE).with_bold();
//! let quiet = Style::builder().no_bold().dim().build();
//!
//! let merged = base.merge(quiet);
//! assert_eq!(merged.fg, Some(Rgb::WHITE));
//! assert!(!merged.is_bold());
//! assert!(merged.attributes.contains(TextAttributes::DIM));
//! ```

use crate::color::Rgb;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Text rendering attributes.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        /// Bold/increased intensity.
        const BOLD      = 0x01;
        /// Dim/decreased intensity.
        const DIM       = 0x02;
        /// Italic (not widely supported).
        const ITALIC    = 0x04;
        /// Underlined text.
        const UNDERLINE = 0x08;
        /// Swapped foreground/background.
        const REVERSE   = 0x10;
    }
}

impl TextAttributes {
    /// SGR parameter that enables each attribute, in emission order.
    pub const SGR_CODES: [(Self, u8); 5] = [
        (Self::BOLD, 1),
        (Self::DIM, 2),
        (Self::ITALIC, 3),
        (Self::UNDERLINE, 4),
        (Self::REVERSE, 7),
    ];
}

/// A resolved (or partial) text style.
///
/// `None` colors mean "terminal default". `attributes` holds the flag values
/// and `mask` records which flags this style sets at all; a flag outside the
/// mask is inherited during [`Style::merge`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground color (None = terminal default).
    pub fg: Option<Rgb>,
    /// Background color (None = terminal default).
    pub bg: Option<Rgb>,
    /// Attribute values.
    pub attributes: TextAttributes,
    /// Attributes explicitly specified by this style.
    pub mask: TextAttributes,
}

impl Style {
    /// Empty style with no colors or attributes.
    pub const NONE: Self = Self {
        fg: None,
        bg: None,
        attributes: TextAttributes::empty(),
        mask: TextAttributes::empty(),
    };

    /// Create a new style builder.
    #[must_use]
    pub fn builder() -> StyleBuilder {
        StyleBuilder::default()
    }

    /// Create a style with only foreground color.
    #[must_use]
    pub const fn fg(color: Rgb) -> Self {
        Self {
            fg: Some(color),
            ..Self::NONE
        }
    }

    /// Create a style with only background color.
    #[must_use]
    pub const fn bg(color: Rgb) -> Self {
        Self {
            bg: Some(color),
            ..Self::NONE
        }
    }

    /// Create a style that turns the given attributes on.
    #[must_use]
    pub const fn attrs(attrs: TextAttributes) -> Self {
        Self {
            attributes: attrs,
            mask: attrs,
            ..Self::NONE
        }
    }

    /// Create a bold style.
    #[must_use]
    pub const fn bold() -> Self {
        Self::attrs(TextAttributes::BOLD)
    }

    /// Create a dim style.
    #[must_use]
    pub const fn dim() -> Self {
        Self::attrs(TextAttributes::DIM)
    }

    /// Create an italic style.
    #[must_use]
    pub const fn italic() -> Self {
        Self::attrs(TextAttributes::ITALIC)
    }

    /// Create an underline style.
    #[must_use]
    pub const fn underline() -> Self {
        Self::attrs(TextAttributes::UNDERLINE)
    }

    /// Create a reverse-video style.
    #[must_use]
    pub const fn reverse() -> Self {
        Self::attrs(TextAttributes::REVERSE)
    }

    /// Return a new style with the specified foreground color.
    #[must_use]
    pub const fn with_fg(self, color: Rgb) -> Self {
        Self {
            fg: Some(color),
            ..self
        }
    }

    /// Return a new style with the specified background color.
    #[must_use]
    pub const fn with_bg(self, color: Rgb) -> Self {
        Self {
            bg: Some(color),
            ..self
        }
    }

    /// Return a new style with the given attributes switched on.
    #[must_use]
    pub const fn with_attributes(self, attrs: TextAttributes) -> Self {
        Self {
            attributes: self.attributes.union(attrs),
            mask: self.mask.union(attrs),
            ..self
        }
    }

    /// Return a new style with the given attributes explicitly switched off.
    #[must_use]
    pub const fn without_attributes(self, attrs: TextAttributes) -> Self {
        Self {
            attributes: self.attributes.difference(attrs),
            mask: self.mask.union(attrs),
            ..self
        }
    }

    /// Return a new style with the bold attribute added.
    #[must_use]
    pub const fn with_bold(self) -> Self {
        self.with_attributes(TextAttributes::BOLD)
    }

    /// Return a new style with the italic attribute added.
    #[must_use]
    pub const fn with_italic(self) -> Self {
        self.with_attributes(TextAttributes::ITALIC)
    }

    /// Return a new style with the underline attribute added.
    #[must_use]
    pub const fn with_underline(self) -> Self {
        self.with_attributes(TextAttributes::UNDERLINE)
    }

    /// Return a new style with reverse video added.
    #[must_use]
    pub const fn with_reverse(self) -> Self {
        self.with_attributes(TextAttributes::REVERSE)
    }

    /// Check if this style specifies nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.mask.is_empty()
    }

    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.attributes.contains(TextAttributes::BOLD)
    }

    #[must_use]
    pub fn is_italic(&self) -> bool {
        self.attributes.contains(TextAttributes::ITALIC)
    }

    #[must_use]
    pub fn is_underline(&self) -> bool {
        self.attributes.contains(TextAttributes::UNDERLINE)
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        let attributes = self.attributes.difference(other.mask)
            | other.attributes.intersection(other.mask);
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attributes,
            mask: self.mask | other.mask,
        }
    }
}

/// Builder for creating styles fluently.
#[derive(Clone, Debug, Default)]
pub struct StyleBuilder {
    style: Style,
}

impl StyleBuilder {
    /// Set foreground color.
    #[must_use]
    pub fn fg(mut self, color: Rgb) -> Self {
        self.style.fg = Some(color);
        self
    }

    /// Set background color.
    #[must_use]
    pub fn bg(mut self, color: Rgb) -> Self {
        self.style.bg = Some(color);
        self
    }

    /// Add bold attribute.
    #[must_use]
    pub fn bold(self) -> Self {
        self.set(TextAttributes::BOLD, true)
    }

    /// Explicitly disable bold.
    #[must_use]
    pub fn no_bold(self) -> Self {
        self.set(TextAttributes::BOLD, false)
    }

    /// Add dim attribute.
    #[must_use]
    pub fn dim(self) -> Self {
        self.set(TextAttributes::DIM, true)
    }

    /// Add italic attribute.
    #[must_use]
    pub fn italic(self) -> Self {
        self.set(TextAttributes::ITALIC, true)
    }

    /// Add underline attribute.
    #[must_use]
    pub fn underline(self) -> Self {
        self.set(TextAttributes::UNDERLINE, true)
    }

    /// Add reverse attribute.
    #[must_use]
    pub fn reverse(self) -> Self {
        self.set(TextAttributes::REVERSE, true)
    }

    /// Set or clear an attribute explicitly.
    #[must_use]
    pub fn set(mut self, attr: TextAttributes, on: bool) -> Self {
        self.style = if on {
            self.style.with_attributes(attr)
        } else {
            self.style.without_attributes(attr)
        };
        self
    }

    /// Build the final style.
    #[must_use]
    pub fn build(self) -> Style {
        self.style
    }
}

/// Serializable style description used by theme documents.
///
/// Boolean fields left out of the document stay unspecified so they inherit
/// through the cascade.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSpec {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub bold: Option<bool>,
    pub dim: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub reverse: Option<bool>,
}

impl From<&StyleSpec> for Style {
    fn from(spec: &StyleSpec) -> Self {
        let mut builder = Style::builder();
        if let Some(fg) = spec.fg {
            builder = builder.fg(fg);
        }
        if let Some(bg) = spec.bg {
            builder = builder.bg(bg);
        }
        let flags = [
            (TextAttributes::BOLD, spec.bold),
            (TextAttributes::DIM, spec.dim),
            (TextAttributes::ITALIC, spec.italic),
            (TextAttributes::UNDERLINE, spec.underline),
            (TextAttributes::REVERSE, spec.reverse),
        ];
        for (attr, value) in flags {
            if let Some(on) = value {
                builder = builder.set(attr, on);
            }
        }
        builder.build()
    }
}

impl From<Style> for StyleSpec {
    fn from(style: Style) -> Self {
        let flag = |attr: TextAttributes| {
            style
                .mask
                .contains(attr)
                .then(|| style.attributes.contains(attr))
        };
        Self {
            fg: style.fg,
            bg: style.bg,
            bold: flag(TextAttributes::BOLD),
            dim: flag(TextAttributes::DIM),
            italic: flag(TextAttributes::ITALIC),
            underline: flag(TextAttributes::UNDERLINE),
            reverse: flag(TextAttributes::REVERSE),
        }
    }
}
