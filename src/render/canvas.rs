//! Canvas 2D render backend.
//!
//! Paints each pane of a [`GridFrame`] inside its own clip rect, in paint
//! order, then draws the divider lines where the frozen panes meet the main
//! pane. The context has DPR scaling applied, so all coordinates are logical
//! (CSS) pixels.

use std::borrow::Cow;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{GridError, Result};
use crate::layout::PaneKind;
use crate::render::backend::{GridFrame, PaneFrame, RenderBackend, RenderedCell};

const FONT: &str = "13px -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif";
const HEADER_FONT: &str = "600 13px -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif";
const CELL_PADDING: f64 = 8.0;

const BACKGROUND: &str = "#FFFFFF";
const FROZEN_BACKGROUND: &str = "#FAFAFA";
const HEADER_BACKGROUND: &str = "#F3F3F3";
const GRID_LINE: &str = "#E1E1E1";
const DIVIDER: &str = "#BABABA";
const TEXT: &str = "#202124";

/// Canvas 2D renderer implementing the [`RenderBackend`] trait
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
    dpr: f32,
}

impl CanvasRenderer {
    /// Create a renderer drawing into `canvas`
    ///
    /// # Errors
    /// Fails if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| GridError::Render("Failed to get 2d context".into()))?
            .ok_or_else(|| GridError::Render("No 2d context available".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GridError::Render("Failed to cast to CanvasRenderingContext2d".into()))?;

        let width = canvas.width();
        let height = canvas.height();

        Ok(Self {
            canvas,
            ctx,
            width,
            height,
            dpr: 1.0,
        })
    }

    /// Set the CSS dimensions of the canvas element (logical pixels).
    pub fn set_canvas_css_size(&self, css_w: f32, css_h: f32) {
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{css_w}px"));
        let _ = style.set_property("height", &format!("{css_h}px"));
    }

    /// Helper to get crisp pixel position for 1px lines
    fn crisp(x: f64) -> f64 {
        x.floor() + 0.5
    }

    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn stroke_line(&self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(1.0);
        self.ctx.move_to(Self::crisp(x1), Self::crisp(y1));
        self.ctx.line_to(Self::crisp(x2), Self::crisp(y2));
        self.ctx.stroke();
    }

    fn measure(&self, text: &str) -> f64 {
        self.ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
    }

    /// Truncate text with an ellipsis if it exceeds `max_width`
    fn truncate_text<'a>(&self, text: &'a str, max_width: f64) -> Cow<'a, str> {
        if self.measure(text) <= max_width {
            return Cow::Borrowed(text);
        }

        let ellipsis = "\u{2026}";
        let available = max_width - self.measure(ellipsis);
        if available <= 0.0 {
            return Cow::Borrowed(ellipsis);
        }

        // Binary search for the longest prefix that fits
        let chars: Vec<char> = text.chars().collect();
        let mut low = 0;
        let mut high = chars.len();
        while low < high {
            let mid = (low + high).div_ceil(2);
            let prefix: String = chars.iter().take(mid).collect();
            if self.measure(&prefix) <= available {
                low = mid;
            } else {
                high = mid - 1;
            }
        }

        let mut truncated: String = chars.iter().take(low).collect();
        truncated.push_str(ellipsis);
        Cow::Owned(truncated)
    }

    fn render_cell(&self, pane: &PaneFrame, cell: &RenderedCell) -> Result<()> {
        let x = f64::from(pane.rect.x + cell.rect.x);
        let y = f64::from(pane.rect.y + cell.rect.y);
        let w = f64::from(cell.rect.width);
        let h = f64::from(cell.rect.height);

        let background = match (cell.class.header, cell.class.pane.is_frozen()) {
            (true, _) => HEADER_BACKGROUND,
            (false, true) => FROZEN_BACKGROUND,
            (false, false) => BACKGROUND,
        };
        self.fill_rect(x, y, w, h, background);
        self.stroke_line(x + w, y, x + w, y + h, GRID_LINE);
        self.stroke_line(x, y + h, x + w, y + h, GRID_LINE);

        self.ctx
            .set_font(if cell.class.header { HEADER_FONT } else { FONT });
        self.ctx.set_fill_style_str(TEXT);
        let text = self.truncate_text(&cell.text, w - CELL_PADDING * 2.0);
        self.ctx
            .fill_text(&text, x + CELL_PADDING, y + h / 2.0)
            .map_err(|e| GridError::Render(format!("fill_text failed: {e:?}")))
    }

    fn render_pane(&self, pane: &PaneFrame) -> Result<()> {
        if pane.rect.is_empty() {
            return Ok(());
        }
        let (x, y) = (f64::from(pane.rect.x), f64::from(pane.rect.y));
        let (w, h) = (f64::from(pane.rect.width), f64::from(pane.rect.height));

        self.ctx.save();
        self.ctx.begin_path();
        self.ctx.rect(x, y, w, h);
        self.ctx.clip();
        self.fill_rect(x, y, w, h, BACKGROUND);
        let result = pane
            .visible_cells()
            .try_for_each(|cell| self.render_cell(pane, cell));
        self.ctx.restore();
        result
    }

    /// Vertical lines where the frozen panes meet the main pane
    fn render_frozen_dividers(&self, frame: &GridFrame) {
        let height = f64::from(frame.viewport.height);
        let left = frame.composition.rect(PaneKind::LeftFrozen);
        let right = frame.composition.rect(PaneKind::RightFrozen);
        if !left.is_empty() {
            let x = f64::from(left.right());
            self.stroke_line(x, 0.0, x, height, DIVIDER);
        }
        if !right.is_empty() {
            let x = f64::from(right.x);
            self.stroke_line(x, 0.0, x, height, DIVIDER);
        }
    }
}

impl RenderBackend for CanvasRenderer {
    fn resize(&mut self, width: u32, height: u32, dpr: f32) {
        self.width = width;
        self.height = height;
        self.dpr = dpr;

        // Set canvas buffer size to physical pixels; this also resets the transform
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let _ = self.ctx.scale(f64::from(dpr), f64::from(dpr));
    }

    fn render(&mut self, frame: &GridFrame) -> Result<()> {
        let dpr = f64::from(self.dpr);
        self.ctx
            .set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
            .map_err(|_| GridError::Render("failed to set canvas transform".into()))?;
        self.ctx.set_text_baseline("middle");
        self.fill_rect(
            0.0,
            0.0,
            f64::from(frame.viewport.width),
            f64::from(frame.viewport.height),
            BACKGROUND,
        );
        // Paint order is z order: main, then left, then right on top
        for pane in &frame.panes {
            self.render_pane(pane)?;
        }
        self.render_frozen_dividers(frame);
        Ok(())
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
