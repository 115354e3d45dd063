//! Plain-text render backend.
//!
//! Draws the visible (non-overscan) cells of a frame as fixed-width text,
//! one line per grid row, with the panes side by side in screen order:
//! left frozen, main, right frozen.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::error::Result;
use crate::layout::PaneKind;
use crate::render::backend::{GridFrame, PaneFrame, RenderBackend};

const DEFAULT_CELL_CHARS: usize = 10;
const PANE_SEPARATOR: &str = " | ";
const ELLIPSIS: char = '\u{2026}';

/// Text backend; the last frame is kept in [`TextRenderer::output`]
#[derive(Debug, Clone)]
pub struct TextRenderer {
    cell_chars: usize,
    width: u32,
    height: u32,
    output: String,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_CHARS)
    }
}

impl TextRenderer {
    /// Renderer that gives every cell `cell_chars` characters (at least 1)
    pub fn new(cell_chars: usize) -> Self {
        Self {
            cell_chars: cell_chars.max(1),
            width: 0,
            height: 0,
            output: String::new(),
        }
    }

    /// Text of the last rendered frame
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Render a frame and hand back the text
    pub fn render_to_string(&mut self, frame: &GridFrame) -> Result<String> {
        self.render(frame)?;
        Ok(self.output.clone())
    }

    /// Visible cell texts of one pane, keyed by local row
    fn pane_rows(pane: Option<&PaneFrame>) -> BTreeMap<u32, Vec<&str>> {
        let mut rows: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
        if let Some(pane) = pane {
            for cell in pane.visible_cells() {
                rows.entry(cell.local_row).or_default().push(cell.text.as_str());
            }
        }
        rows
    }

    fn write_segment(&self, line: &mut String, texts: Option<&Vec<&str>>) {
        let Some(texts) = texts else {
            return;
        };
        for (i, text) in texts.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            line.push_str(&fit(text, self.cell_chars));
        }
    }
}

/// Pad or truncate `text` to exactly `chars` characters
fn fit(text: &str, chars: usize) -> String {
    let count = text.chars().count();
    if count <= chars {
        let mut out = String::with_capacity(text.len() + chars - count);
        out.push_str(text);
        out.push_str(&" ".repeat(chars - count));
        return out;
    }
    let mut out: String = text.chars().take(chars.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    out
}

impl RenderBackend for TextRenderer {
    fn resize(&mut self, width: u32, height: u32, _dpr: f32) {
        self.width = width;
        self.height = height;
    }

    fn render(&mut self, frame: &GridFrame) -> Result<()> {
        let left = Self::pane_rows(frame.pane(PaneKind::LeftFrozen));
        let main = Self::pane_rows(frame.pane(PaneKind::Main));
        let right = Self::pane_rows(frame.pane(PaneKind::RightFrozen));

        let mut rows: Vec<u32> = left
            .keys()
            .chain(main.keys())
            .chain(right.keys())
            .copied()
            .collect();
        rows.sort_unstable();
        rows.dedup();

        let mut out = String::new();
        for row in rows {
            let mut line = String::new();
            self.write_segment(&mut line, left.get(&row));
            line.push_str(PANE_SEPARATOR);
            self.write_segment(&mut line, main.get(&row));
            line.push_str(PANE_SEPARATOR);
            self.write_segment(&mut line, right.get(&row));
            let _ = writeln!(out, "{}", line.trim_end());
        }
        self.output = out;
        Ok(())
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
