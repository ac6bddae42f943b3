//! Expandable tree with connector lines.
//!
//! Tree data is a typed recursive [`TreeNode`], usually deserialized once at
//! the application boundary:
//!
//! ```
//! use tessera::widgets::TreeNode;
//!
//! let json = r#"{"kind": "branch", "label": "src", "children": [
//!     {"kind": "leaf", "label": "lib.rs"}
//! ]}"#;
//! let node: TreeNode = serde_json::from_str(json).unwrap();
//! assert_eq!(node.children().len(), 1);
//! assert!(node.is_expanded());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementBase, interactive_via_base};
use crate::geom::{Extent, Size};
use crate::glyphs::GlyphSet;
use crate::input::{KeyCode, KeyEvent, MouseButton, MouseEvent};
use crate::paint::PaintContext;
use crate::scroll::ScrollState;
use crate::text::{str_width, truncate_ansi};
use crate::theme::PseudoClass;

const fn yes() -> bool {
    true
}

/// A node of tree data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        metadata: BTreeMap<String, String>,
    },
    Branch {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(default)]
        children: Vec<TreeNode>,
        #[serde(default = "yes")]
        expanded: bool,
    },
}

impl TreeNode {
    #[must_use]
    pub fn leaf(label: impl Into<String>) -> Self {
        Self::Leaf {
            label: label.into(),
            value: None,
            metadata: BTreeMap::new(),
        }
    }

    /// An expanded branch.
    #[must_use]
    pub fn branch(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self::Branch {
            label: label.into(),
            value: None,
            children,
            expanded: true,
        }
    }

    #[must_use]
    pub fn with_value(mut self, v: impl Into<String>) -> Self {
        match &mut self {
            Self::Leaf { value, .. } | Self::Branch { value, .. } => *value = Some(v.into()),
        }
        self
    }

    /// Attach metadata; ignored on branches.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, v: impl Into<String>) -> Self {
        if let Self::Leaf { metadata, .. } = &mut self {
            metadata.insert(key.into(), v.into());
        }
        self
    }

    #[must_use]
    pub fn collapsed(mut self) -> Self {
        self.set_expanded(false);
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf { label, .. } | Self::Branch { label, .. } => label,
        }
    }

    /// The value if set, else the label.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Leaf { value, label, .. } | Self::Branch { value, label, .. } => {
                value.as_deref().unwrap_or(label)
            }
        }
    }

    #[must_use]
    pub fn metadata(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Leaf { metadata, .. } => Some(metadata),
            Self::Branch { .. } => None,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[TreeNode] {
        match self {
            Self::Leaf { .. } => &[],
            Self::Branch { children, .. } => children,
        }
    }

    #[must_use]
    pub const fn is_branch(&self) -> bool {
        matches!(self, Self::Branch { .. })
    }

    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        matches!(self, Self::Branch { expanded: true, .. })
    }

    /// No-op on leaves. Returns true when the state changed.
    pub fn set_expanded(&mut self, open: bool) -> bool {
        match self {
            Self::Branch { expanded, .. } if *expanded != open => {
                *expanded = open;
                true
            }
            _ => false,
        }
    }

    /// Node at a child-index path below this one.
    #[must_use]
    pub fn get(&self, path: &[usize]) -> Option<&TreeNode> {
        path.iter().try_fold(self, |node, &i| node.children().get(i))
    }

    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut TreeNode> {
        let mut node = self;
        for &i in path {
            node = match node {
                Self::Branch { children, .. } => children.get_mut(i)?,
                Self::Leaf { .. } => return None,
            };
        }
        Some(node)
    }
}

/// One visible line of a flattened tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeRow {
    /// Child-index path from the list of roots.
    pub path: Vec<usize>,
    pub depth: usize,
    /// Connector prefix, marker and label.
    pub text: String,
}

fn flatten_into(
    nodes: &[TreeNode],
    glyphs: &GlyphSet,
    path: &mut Vec<usize>,
    indent: &mut String,
    rows: &mut Vec<TreeRow>,
) {
    let depth = path.len();
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let connector = match (depth, last) {
            (0, _) => "",
            (_, true) => glyphs.tree_last,
            (_, false) => glyphs.tree_branch,
        };
        let marker = if node.is_expanded() {
            format!("{} ", glyphs.expanded)
        } else if node.is_branch() {
            format!("{} ", glyphs.collapsed)
        } else {
            String::new()
        };
        path.push(i);
        rows.push(TreeRow {
            path: path.clone(),
            depth,
            text: format!("{indent}{connector}{marker}{}", node.label()),
        });
        if node.is_expanded() {
            let saved = indent.len();
            if depth > 0 {
                indent.push_str(if last { glyphs.tree_blank } else { glyphs.tree_pipe });
            }
            flatten_into(node.children(), glyphs, path, indent, rows);
            indent.truncate(saved);
        }
        path.pop();
    }
}

/// Visible rows of a forest, in display order.
#[must_use]
pub fn flatten(roots: &[TreeNode], glyphs: &GlyphSet) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    flatten_into(roots, glyphs, &mut Vec::new(), &mut String::new(), &mut rows);
    rows
}

/// Interactive tree over a list of root nodes.
#[derive(Clone, Debug)]
pub struct TreeView {
    pub base: ElementBase,
    roots: Vec<TreeNode>,
    selected: usize,
    scroll: ScrollState,
    activated: Option<Vec<usize>>,
    /// Glyphs used for keyboard row bookkeeping; painting uses the context's.
    glyphs: GlyphSet,
}

interactive_via_base!(TreeView);

impl TreeView {
    #[must_use]
    pub fn new(roots: Vec<TreeNode>) -> Self {
        let mut base = ElementBase::sized(Size::Fill, Size::Fill);
        base.focusable = true;
        Self {
            base,
            roots,
            selected: 0,
            scroll: ScrollState::default(),
            activated: None,
            glyphs: GlyphSet::ASCII,
        }
    }

    #[must_use]
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    #[must_use]
    pub fn rows(&self) -> Vec<TreeRow> {
        flatten(&self.roots, &self.glyphs)
    }

    /// Index of the selected visible row.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_path(&self) -> Option<Vec<usize>> {
        self.rows().get(self.selected).map(|r| r.path.clone())
    }

    #[must_use]
    pub fn selected_node(&self) -> Option<&TreeNode> {
        let path = self.selected_path()?;
        self.node(&path)
    }

    /// Path of the leaf last activated with Enter or a click.
    #[must_use]
    pub fn activated(&self) -> Option<&[usize]> {
        self.activated.as_deref()
    }

    fn node(&self, path: &[usize]) -> Option<&TreeNode> {
        let (first, rest) = path.split_first()?;
        self.roots.get(*first)?.get(rest)
    }

    fn node_mut(&mut self, path: &[usize]) -> Option<&mut TreeNode> {
        let (first, rest) = path.split_first()?;
        self.roots.get_mut(*first)?.get_mut(rest)
    }

    fn row_count(&self) -> usize {
        self.rows().len()
    }

    fn select(&mut self, index: usize) -> bool {
        let count = self.row_count();
        if count == 0 {
            return false;
        }
        let index = index.min(count - 1);
        let changed = index != self.selected;
        self.selected = index;
        self.scroll.set_content_size(u32::try_from(count).unwrap_or(u32::MAX));
        self.scroll.ensure_visible(u32::try_from(index).unwrap_or(u32::MAX));
        changed
    }

    fn set_selected_expanded(&mut self, open: bool) -> bool {
        let Some(path) = self.selected_path() else {
            return false;
        };
        let changed = self.node_mut(&path).is_some_and(|n| n.set_expanded(open));
        if changed {
            self.select(self.selected);
        }
        changed
    }

    /// Toggle a branch or activate a leaf.
    fn activate(&mut self) -> bool {
        let Some(path) = self.selected_path() else {
            return false;
        };
        match self.node(&path) {
            Some(node) if node.is_branch() => {
                let open = !node.is_expanded();
                self.set_selected_expanded(open)
            }
            Some(_) => {
                self.activated = Some(path);
                true
            }
            None => false,
        }
    }

    fn expand_or_descend(&mut self) -> bool {
        match self.selected_node() {
            Some(n) if n.is_branch() && !n.is_expanded() => self.set_selected_expanded(true),
            Some(n) if !n.children().is_empty() => self.select(self.selected + 1),
            _ => false,
        }
    }

    fn collapse_or_ascend(&mut self) -> bool {
        if self.selected_node().is_some_and(TreeNode::is_expanded) {
            return self.set_selected_expanded(false);
        }
        let Some(mut path) = self.selected_path() else {
            return false;
        };
        if path.len() < 2 {
            return false;
        }
        path.pop();
        match self.rows().iter().position(|r| r.path == path) {
            Some(parent) => self.select(parent),
            None => false,
        }
    }
}

impl Element for TreeView {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "treeview"
    }

    fn measure(&self, _available: Extent) -> Extent {
        let rows = self.rows();
        let width = rows.iter().map(|r| str_width(&r.text)).max().unwrap_or(0);
        Extent::new(
            u32::try_from(width).unwrap_or(u32::MAX),
            u32::try_from(rows.len()).unwrap_or(u32::MAX),
        )
    }

    fn render_to(&self, ctx: &mut PaintContext<'_>) {
        let style = ctx.resolve(self);
        if style.bg.is_some() {
            ctx.fill(style);
        }
        let rows = flatten(&self.roots, ctx.glyphs());
        let first = self.scroll.visible_range().start;
        let width = ctx.width();
        for (line, row) in self.scroll.visible(&rows).iter().enumerate() {
            let mut pseudo = PseudoClass::empty();
            if first + line == self.selected {
                pseudo |= PseudoClass::SELECTED;
                if self.base.focused {
                    pseudo |= PseudoClass::FOCUS;
                }
            }
            let row_style = style.merge(ctx.resolve_classes(&["tree-item"], pseudo, None));
            if !pseudo.is_empty() {
                ctx.fill_rect(0, line as i32, width, 1, ' ', row_style);
            }
            ctx.write_text(0, line as i32, &truncate_ansi(&row.text, width as usize), row_style);
        }
    }

    fn scroll_state(&self) -> Option<&ScrollState> {
        Some(&self.scroll)
    }

    fn scroll_state_mut(&mut self) -> Option<&mut ScrollState> {
        Some(&mut self.scroll)
    }

    fn on_layout(&mut self) {
        let height = self.base.bounds.map_or(0, |b| b.height);
        let count = self.row_count();
        self.scroll
            .resize(u32::try_from(count).unwrap_or(u32::MAX), height);
        self.selected = self.selected.min(count.saturating_sub(1));
        self.scroll
            .ensure_visible(u32::try_from(self.selected).unwrap_or(u32::MAX));
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => self.select(self.selected.saturating_sub(1)),
            KeyCode::Down => self.select(self.selected + 1),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(usize::MAX),
            KeyCode::Right => self.expand_or_descend(),
            KeyCode::Left => self.collapse_or_ascend(),
            _ if key.is_activate() => self.activate(),
            _ => return false,
        };
        true
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        if event.is_scroll() {
            return self.scroll.handle_wheel(event);
        }
        let Some(bounds) = self.base.bounds else {
            return false;
        };
        if !event.is_press()
            || event.button != MouseButton::Left
            || !bounds.contains(event.x, event.y)
        {
            return false;
        }
        let row = u32::try_from(event.y - bounds.y).unwrap_or(0);
        let index = (self.scroll.position() + row) as usize;
        if index >= self.row_count() {
            return false;
        }
        self.select(index);
        self.activate()
    }
}
