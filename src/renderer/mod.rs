//! Double-buffered renderer with diff detection.
//!
//! [`Renderer`] owns the whole frame pipeline: it lays the element tree out
//! to the screen, paints it into the back buffer, rebuilds the hit grid used
//! for mouse lookup, and encodes only the cells that differ from the previous
//! frame.
//!
//! # Examples
//!
//! ```
//! use tessera::element::Container;
//! use tessera::widgets::Text;
//! use tessera::Renderer;
//!
//! let mut root = Container::vstack().child(Text::new("Hello!"));
//! let mut renderer = Renderer::new(20, 2).unwrap();
//!
//! let first = renderer.render(&mut root).unwrap();
//! assert!(first.contains("Hello!"));
//!
//! // Nothing changed, so nothing is emitted.
//! assert!(renderer.render(&mut root).unwrap().is_empty());
//! ```

mod diff;
mod hitgrid;

pub use diff::{BufferDiff, DirtyRegion};
pub use hitgrid::HitGrid;

use crate::ansi::{self, AnsiWriter};
use crate::buffer::CellBuffer;
use crate::element::{Element, ElementPath, OverflowX};
use crate::error::{Error, Result};
use crate::event::{Diagnostics, LogLevel};
use crate::geom::Bounds;
use crate::glyphs::GlyphSet;
use crate::layout::layout;
use crate::paint::PaintContext;
use crate::theme::{StyleResolver, Theme};
use std::io::Write;

/// Renderer configuration options.
#[derive(Clone, Copy, Debug)]
pub struct RendererOptions {
    /// Symbols for borders, scrollbars and marks.
    pub glyphs: GlyphSet,
    /// Emit only changed cells; when off every frame is a full repaint.
    pub diff: bool,
    /// Wrap each frame in synchronized-update markers.
    pub synchronized: bool,
    /// Hide the cursor at the start of each frame.
    pub hide_cursor: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            glyphs: GlyphSet::UNICODE,
            diff: true,
            synchronized: false,
            hide_cursor: false,
        }
    }
}

/// Rendering statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames: u64,
    /// Cells emitted by the last frame.
    pub cells_changed: usize,
    /// Bytes produced by the last frame.
    pub last_frame_bytes: usize,
    /// Bytes produced since creation.
    pub bytes_written: usize,
    /// Whether the last frame repainted every cell.
    pub full_redraw: bool,
}

/// Frame pipeline with double buffering.
///
/// The front buffer holds what the terminal currently shows; the back buffer
/// is painted each frame and swapped in once encoded.
pub struct Renderer {
    front: CellBuffer,
    back: CellBuffer,
    resolver: StyleResolver,
    options: RendererOptions,
    hits: HitGrid,
    hit_paths: Vec<ElementPath>,
    force_full: bool,
    stats: RenderStats,
    diagnostics: Diagnostics,
}

impl Renderer {
    /// Create a renderer for a `width` by `height` screen with default options.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_options(width, height, RendererOptions::default())
    }

    /// Create a renderer with explicit options.
    pub fn with_options(width: u32, height: u32, options: RendererOptions) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            front: CellBuffer::new(width, height),
            back: CellBuffer::new(width, height),
            resolver: StyleResolver::default(),
            options,
            hits: HitGrid::new(width, height),
            hit_paths: Vec::new(),
            force_full: true,
            stats: RenderStats::default(),
            diagnostics: Diagnostics::default(),
        })
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.front.size()
    }

    #[must_use]
    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    /// The last presented frame.
    #[must_use]
    pub fn buffer(&self) -> &CellBuffer {
        &self.front
    }

    #[must_use]
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    #[must_use]
    pub fn resolver(&self) -> &StyleResolver {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut StyleResolver {
        &mut self.resolver
    }

    /// Report resizes, redraws and theme swaps to `diagnostics`.
    pub fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.resolver.set_diagnostics(diagnostics.clone());
        self.diagnostics = diagnostics;
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Swap the theme; the next frame repaints everything.
    pub fn set_theme(&mut self, theme: Theme) {
        self.resolver.set_theme(theme);
        self.force_full = true;
    }

    /// Force the next frame to repaint every cell.
    pub fn invalidate(&mut self) {
        self.force_full = true;
    }

    /// Resize both buffers. The next frame is a full repaint.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        check_dimensions(width, height)?;
        self.diagnostics.emit_event("resize", &format!("{width}x{height}"));
        self.front.resize(width, height);
        self.back.resize(width, height);
        self.hits.resize(width, height);
        self.hit_paths.clear();
        self.force_full = true;
        Ok(())
    }

    /// Lay out, paint and encode one frame, returning the ANSI output.
    ///
    /// The output is empty when nothing changed since the previous frame.
    pub fn render(&mut self, root: &mut dyn Element) -> Result<String> {
        let (width, height) = self.size();
        layout(root, Bounds::sized(width, height));

        self.back.clear_scissors();
        self.back.clear(None);
        PaintContext::new(&mut self.back, &self.resolver, self.options.glyphs).paint_child(&*root);
        self.rebuild_hits(&*root);

        let full = self.force_full || !self.options.diff;
        let diff = if full {
            BufferDiff::default()
        } else {
            BufferDiff::compute(&self.front, &self.back)
        };
        let total = (width as usize) * (height as usize);
        let full = full || diff.should_full_redraw(total);

        let output = if full {
            self.encode_full()?
        } else if diff.is_empty() {
            String::new()
        } else {
            self.encode_diff(&diff)?
        };

        std::mem::swap(&mut self.front, &mut self.back);
        self.force_full = false;

        self.stats.frames += 1;
        self.stats.cells_changed = if full { total } else { diff.change_count };
        self.stats.last_frame_bytes = output.len();
        self.stats.bytes_written += output.len();
        self.stats.full_redraw = full;
        if full && self.diagnostics.logs_enabled() {
            self.diagnostics.emit_log(
                LogLevel::Debug,
                &format!("frame {}: full redraw, {} bytes", self.stats.frames, output.len()),
            );
        }

        Ok(output)
    }

    /// Render a frame and write it to `out`.
    pub fn present(&mut self, root: &mut dyn Element, out: &mut impl Write) -> Result<()> {
        let frame = self.render(root)?;
        if !frame.is_empty() {
            out.write_all(frame.as_bytes())?;
        }
        out.flush()?;
        Ok(())
    }

    /// Sequence that undoes what frames leave behind: attributes are reset
    /// and a hidden cursor is shown again. Write it before handing the
    /// terminal back. The next frame is a full repaint.
    pub fn restore(&mut self) -> String {
        self.force_full = true;
        let mut out = String::from(ansi::RESET);
        if self.options.hide_cursor {
            out.push_str(ansi::CURSOR_SHOW);
        }
        out
    }

    /// Path of the topmost element painted at a screen cell.
    #[must_use]
    pub fn element_at(&self, x: i32, y: i32) -> Option<&ElementPath> {
        self.hits.test(x, y).and_then(|id| self.hit_paths.get(id))
    }

    /// Register every laid-out element in paint order, clipped the same way
    /// painting clips it, so later (inner) elements win.
    fn rebuild_hits(&mut self, root: &dyn Element) {
        fn visit(
            node: &dyn Element,
            path: &mut ElementPath,
            clip: Bounds,
            hits: &mut HitGrid,
            paths: &mut Vec<ElementPath>,
        ) {
            let Some(bounds) = node.base().bounds else {
                return;
            };
            if let Some(area) = clip.intersect(&bounds) {
                hits.register(area, paths.len());
                paths.push(path.clone());
            }

            let child_clip = match node.as_container() {
                Some(c) if c.overflow_x == OverflowX::Visible => clip,
                Some(c) => {
                    let content = c.content_rect(bounds);
                    clip.intersect(&content).unwrap_or(Bounds::new(content.x, content.y, 0, 0))
                }
                None => clip.intersect(&bounds).unwrap_or(Bounds::new(bounds.x, bounds.y, 0, 0)),
            };
            for (i, child) in node.children().iter().enumerate() {
                path.push(i);
                visit(child.as_ref(), path, child_clip, hits, paths);
                path.pop();
            }
        }

        self.hits.clear();
        self.hit_paths.clear();
        let screen = self.back.bounds();
        visit(root, &mut Vec::new(), screen, &mut self.hits, &mut self.hit_paths);
    }

    fn begin(&self, writer: &mut AnsiWriter<Vec<u8>>) {
        if self.options.synchronized {
            writer.write_str(ansi::sync::BEGIN);
        }
        if self.options.hide_cursor {
            writer.write_str(ansi::CURSOR_HIDE);
        }
        writer.write_str(ansi::CURSOR_HOME);
    }

    fn finish(&self, mut writer: AnsiWriter<Vec<u8>>) -> Result<String> {
        writer.reset();
        if self.options.synchronized {
            writer.write_str(ansi::sync::END);
        }
        writer.flush()?;
        String::from_utf8(writer.into_inner())
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    fn encode_full(&self) -> Result<String> {
        let mut writer = AnsiWriter::new(Vec::new());
        self.begin(&mut writer);
        for y in 0..self.back.height() {
            writer.move_cursor_absolute(y, 0);
            for cell in self.back.row(y) {
                writer.write_cell(cell);
            }
        }
        self.finish(writer)
    }

    fn encode_diff(&self, diff: &BufferDiff) -> Result<String> {
        let width = self.back.width();
        let mut writer = AnsiWriter::new(Vec::new());
        self.begin(&mut writer);
        let mut at_edge = false;
        for region in &diff.dirty_regions {
            let row = self.back.row(region.y);
            let mut positioned = false;
            for x in region.x..region.x + region.width {
                let cell = &row[x as usize];
                if cell.is_continuation() {
                    continue;
                }
                if !positioned {
                    if at_edge {
                        writer.move_cursor_absolute(region.y, x);
                    } else {
                        writer.move_cursor(region.y, x);
                    }
                    positioned = true;
                }
                writer.write_cell(cell);
                at_edge = x + u32::try_from(cell.display_width()).unwrap_or(1) >= width;
            }
        }
        self.finish(writer)
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(())
}
