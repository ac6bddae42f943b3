//! Themes and the style cascade.
//!
//! A [`Theme`] maps rule keys to styles. Keys are a class name (`"button"`)
//! or a class plus pseudo-class (`"button:focus"`). [`StyleResolver`] folds
//! the matching rules for an element into one [`Style`]:
//!
//! 1. base class rules,
//! 2. `:focus`, `:hover`, `:disabled`, `:checked`, `:selected` rules for each
//!    active state, in that order,
//! 3. inline overrides.
//!
//! Later steps win. Unknown keys contribute nothing.
//!
//! # Examples
//!
//! ```
//! use tessera::theme::{PseudoClass, StyleResolver, Theme};
//! use tessera::Style;
//!
//! let mut theme = Theme::new("demo");
//! theme.set("button", Style::NONE);
//! theme.set("button:focus", Style::bold());
//!
//! let resolver = StyleResolver::new(theme);
//! assert!(resolver.resolve_classes(&["button"], PseudoClass::FOCUS, None).is_bold());
//! assert!(!resolver.resolve_classes(&["button"], PseudoClass::empty(), None).is_bold());
//! ```

use crate::color::Rgb;
use crate::element::{Element, InteractiveState};
use crate::error::Result;
use crate::event::{Diagnostics, LogLevel};
use crate::style::{Style, StyleSpec};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

bitflags! {
    /// Active interactive states consulted by the cascade.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct PseudoClass: u8 {
        const FOCUS    = 0x01;
        const HOVER    = 0x02;
        const DISABLED = 0x04;
        const CHECKED  = 0x08;
        const SELECTED = 0x10;
    }
}

impl PseudoClass {
    /// Cascade order with the suffix used in rule keys.
    pub const ORDER: [(Self, &'static str); 5] = [
        (Self::FOCUS, "focus"),
        (Self::HOVER, "hover"),
        (Self::DISABLED, "disabled"),
        (Self::CHECKED, "checked"),
        (Self::SELECTED, "selected"),
    ];

    /// States currently reported by an element.
    #[must_use]
    pub fn of(state: &(impl InteractiveState + ?Sized)) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::FOCUS, state.is_focused());
        flags.set(Self::HOVER, state.is_hovered());
        flags.set(Self::DISABLED, state.is_disabled());
        flags.set(Self::CHECKED, state.is_checked());
        flags.set(Self::SELECTED, state.is_selected());
        flags
    }
}

/// Theme class for an element type name.
#[must_use]
pub fn class_for_type(type_name: &str) -> &str {
    match type_name {
        "textinput" => "input",
        "statusbar" => "status-bar",
        "vstack" | "hstack" => "container",
        "listview" => "list",
        "treeview" => "tree",
        other => other,
    }
}

/// A named set of style rules.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Theme {
    pub name: String,
    styles: HashMap<String, Style>,
}

#[derive(Serialize, Deserialize)]
struct ThemeDocument {
    name: String,
    #[serde(default)]
    styles: BTreeMap<String, StyleSpec>,
}

impl Theme {
    /// Empty theme.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            styles: HashMap::new(),
        }
    }

    /// Parse a theme document:
    /// `{"name": "dark", "styles": {"button:focus": {"bold": true}}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: ThemeDocument = serde_json::from_str(json)?;
        Ok(Self {
            name: doc.name,
            styles: doc
                .styles
                .iter()
                .map(|(k, spec)| (k.clone(), Style::from(spec)))
                .collect(),
        })
    }

    /// Serialize to the document format read by [`Theme::from_json`].
    pub fn to_json(&self) -> Result<String> {
        let doc = ThemeDocument {
            name: self.name.clone(),
            styles: self
                .styles
                .iter()
                .map(|(k, s)| (k.clone(), StyleSpec::from(*s)))
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Style for a rule key; [`Style::NONE`] when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Style {
        self.styles.get(key).copied().unwrap_or_default()
    }

    /// Insert or replace a rule.
    pub fn set(&mut self, key: impl Into<String>, style: Style) {
        self.styles.insert(key.into(), style);
    }

    /// Builder-style [`Theme::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, style: Style) -> Self {
        self.set(key, style);
        self
    }

    /// True when a rule exists for the key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.styles.contains_key(key)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Built-in dark theme.
    #[must_use]
    pub fn default_theme() -> Self {
        let accent = Rgb::new(0, 95, 175);
        let panel = Rgb::new(48, 48, 48);
        let field = Rgb::new(30, 30, 30);
        let muted = Rgb::new(138, 138, 138);

        Self::new("default")
            .with("button", Style::fg(Rgb::WHITE).with_bg(panel))
            .with("button:hover", Style::bg(Rgb::new(68, 68, 68)))
            .with("button:focus", Style::bg(accent).with_bold())
            .with(
                "button:disabled",
                Style::fg(muted).with_attributes(crate::style::TextAttributes::DIM),
            )
            .with("input", Style::fg(Rgb::WHITE).with_bg(field))
            .with("input:focus", Style::underline())
            .with("input:disabled", Style::fg(muted))
            .with("checkbox:focus", Style::bold())
            .with("checkbox:checked", Style::fg(Rgb::new(95, 215, 95)))
            .with("checkbox:disabled", Style::fg(muted))
            .with("list-item:selected", Style::reverse())
            .with("list-item:focus", Style::bold())
            .with("tree-item:selected", Style::reverse())
            .with("status-bar", Style::fg(Rgb::WHITE).with_bg(Rgb::new(0, 95, 135)))
            .with("frame", Style::fg(muted))
            .with("frame:focus", Style::fg(Rgb::new(95, 175, 255)))
            .with("scrollbar", Style::fg(muted))
            .with("scrollbar-thumb", Style::fg(Rgb::WHITE))
    }
}

/// Resolves element styles against the active theme.
#[derive(Clone, Debug)]
pub struct StyleResolver {
    theme: Theme,
    diagnostics: Diagnostics,
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new(Theme::default_theme())
    }
}

impl StyleResolver {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            diagnostics: Diagnostics::default(),
        }
    }

    /// Report theme swaps to `diagnostics`.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// The active theme.
    #[must_use]
    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    /// Swap the active theme; the next resolution uses it.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.diagnostics.logs_enabled() {
            self.diagnostics.emit_log(
                LogLevel::Info,
                &format!("theme changed: {} -> {}", self.theme.name, theme.name),
            );
        }
        self.diagnostics.emit_event("theme_changed", &theme.name);
        self.theme = theme;
    }

    /// Resolve the style for an element.
    ///
    /// `base_class` replaces the element's own classes when given. Without
    /// either, the class is derived from the element's type name.
    #[must_use]
    pub fn resolve_style(
        &self,
        element: &dyn Element,
        base_class: Option<&str>,
        inline: Option<Style>,
    ) -> Style {
        let pseudo = PseudoClass::of(element);
        let base = element.base();
        let inline = match (base.inline_style, inline) {
            (Some(a), Some(b)) => Some(a.merge(b)),
            (a, b) => a.or(b),
        };
        if let Some(class) = base_class {
            return self.resolve_classes(&[class], pseudo, inline);
        }
        if base.classes.is_empty() {
            return self.resolve_classes(&[class_for_type(element.type_name())], pseudo, inline);
        }
        let classes: Vec<&str> = base.classes.iter().map(String::as_str).collect();
        self.resolve_classes(&classes, pseudo, inline)
    }

    /// Resolve explicit classes under an explicit pseudo-class set.
    #[must_use]
    pub fn resolve_classes(
        &self,
        classes: &[&str],
        pseudo: PseudoClass,
        inline: Option<Style>,
    ) -> Style {
        let mut style = Style::NONE;
        for class in classes {
            style = style.merge(self.theme.get(class));
        }
        for (flag, suffix) in PseudoClass::ORDER {
            if !pseudo.contains(flag) {
                continue;
            }
            for class in classes {
                style = style.merge(self.theme.get(&format!("{class}:{suffix}")));
            }
        }
        if let Some(inline) = inline {
            style = style.merge(inline);
        }
        style
    }
}
