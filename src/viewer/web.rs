//! Browser front end.
//!
//! [`DomResizeHost`] measures a container element and follows it with a
//! `ResizeObserver`. [`FrozenGridView`] mounts a [`FrozenGrid`] on a
//! container and canvas: a transparent scroll container sits over the canvas
//! and its scroll events are the main pane's scroll events.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Reflect;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlDivElement, HtmlElement, ResizeObserver};

use super::resize::ListenerSet;
use super::{FrozenGrid, ListenerId, ResizeHost, ResizeListener};
use crate::config::GridConfig;
use crate::csv::{parse_delimited, Delimiter};
use crate::error::{GridError, Result};
use crate::layout::{PaneKind, ViewportState};
use crate::render::{CanvasRenderer, RenderBackend};
use crate::source::{DataSource, MatrixSource, SyntheticSource};

#[allow(clippy::cast_precision_loss)]
fn element_size(element: &HtmlElement) -> ViewportState {
    ViewportState::new(element.client_width() as f32, element.client_height() as f32)
}

fn scroll_offset(element: &HtmlDivElement, prop: &str, fallback: i32) -> f64 {
    Reflect::get(element.as_ref(), &JsValue::from_str(prop))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(f64::from(fallback))
}

/// [`ResizeHost`] backed by a DOM element and one shared `ResizeObserver`
pub struct DomResizeHost {
    element: HtmlElement,
    listeners: Rc<ListenerSet>,
    observer: RefCell<Option<(ResizeObserver, Closure<dyn FnMut(JsValue)>)>>,
}

impl DomResizeHost {
    pub fn new(element: HtmlElement) -> Self {
        Self {
            element,
            listeners: Rc::new(ListenerSet::default()),
            observer: RefCell::new(None),
        }
    }

    fn ensure_observer(&self) -> Result<()> {
        if self.observer.borrow().is_some() {
            return Ok(());
        }

        let element = self.element.clone();
        let listeners = Rc::clone(&self.listeners);
        let callback = Closure::wrap(Box::new(move |_entries: JsValue| {
            listeners.notify(element_size(&element));
        }) as Box<dyn FnMut(JsValue)>);

        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|_| GridError::HostUnsupported("ResizeObserver is not available".into()))?;
        observer.observe(&self.element);
        *self.observer.borrow_mut() = Some((observer, callback));
        Ok(())
    }
}

impl ResizeHost for DomResizeHost {
    fn measure(&self) -> Result<ViewportState> {
        if !self.element.is_connected() {
            return Err(GridError::HostUnsupported(
                "container is not attached to the document".into(),
            ));
        }
        Ok(element_size(&self.element))
    }

    fn add_listener(&self, listener: ResizeListener) -> Result<ListenerId> {
        self.ensure_observer()?;
        Ok(self.listeners.add(listener))
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.remove(id);
        if self.listeners.is_empty() {
            if let Some((observer, _callback)) = self.observer.borrow_mut().take() {
                observer.disconnect();
            }
        }
    }
}

impl Drop for DomResizeHost {
    fn drop(&mut self) {
        if let Some((observer, _callback)) = self.observer.get_mut().take() {
            observer.disconnect();
        }
    }
}

struct ViewState {
    grid: FrozenGrid<Box<dyn DataSource>>,
    renderer: CanvasRenderer,
    dpr: f32,
}

impl ViewState {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn draw(&mut self) -> Result<()> {
        let frame = self.grid.frame();
        let width = (frame.viewport.width * self.dpr).round() as u32;
        let height = (frame.viewport.height * self.dpr).round() as u32;
        if width != self.renderer.width() || height != self.renderer.height() {
            self.renderer.resize(width, height, self.dpr);
            self.renderer
                .set_canvas_css_size(frame.viewport.width, frame.viewport.height);
        }
        self.renderer.render(&frame)
    }

    fn draw_logged(&mut self) {
        if let Err(e) = self.draw() {
            warn!("render failed: {e}");
        }
    }
}

fn create_div() -> Result<HtmlDivElement> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.create_element("div").ok())
        .and_then(|el| el.dyn_into::<HtmlDivElement>().ok())
        .ok_or_else(|| GridError::HostUnsupported("cannot create DOM elements".into()))
}

/// Frozen-pane grid mounted on a container element and a canvas
#[wasm_bindgen]
pub struct FrozenGridView {
    state: Rc<RefCell<ViewState>>,
    host: Rc<DomResizeHost>,
    redraw_listener: Option<ListenerId>,
    scroll_container: HtmlDivElement,
    scroll_closure: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

#[wasm_bindgen]
impl FrozenGridView {
    /// Mount on `container` (which must hold `canvas`). `config` is a JSON
    /// object in camelCase; `undefined` or `null` selects the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        canvas: HtmlCanvasElement,
        config: JsValue,
        dpr: f32,
    ) -> std::result::Result<FrozenGridView, JsValue> {
        console_error_panic_hook::set_once();
        Ok(Self::mount(container, canvas, config, dpr)?)
    }

    /// Repaint the current state
    pub fn render(&self) -> std::result::Result<(), JsValue> {
        Ok(self.state.borrow_mut().draw()?)
    }

    /// Scroll the main pane; the scroll event drives the repaint
    #[wasm_bindgen(js_name = scrollTo)]
    pub fn scroll_to(&self, top: f64, left: f64) {
        self.scroll_container.scroll_to_with_x_and_y(left, top);
    }

    /// Current scroll state as `{ top, left }`
    #[wasm_bindgen(js_name = scrollState)]
    pub fn scroll_state(&self) -> std::result::Result<JsValue, JsValue> {
        let scroll = self.state.borrow().grid.scroll_state();
        serde_wasm_bindgen::to_value(&scroll).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Materialize a frame and return it as a plain JS object
    pub fn frame(&self) -> std::result::Result<JsValue, JsValue> {
        let frame = self.state.borrow_mut().grid.frame();
        serde_wasm_bindgen::to_value(&frame).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the cell values with a CSV (or TSV) document
    #[wasm_bindgen(js_name = loadCsv)]
    pub fn load_csv(&self, text: &str, tab_separated: bool) -> std::result::Result<(), JsValue> {
        let delim = if tab_separated {
            Delimiter::Tab
        } else {
            Delimiter::Comma
        };
        let matrix = parse_delimited(text.as_bytes(), delim)?;
        self.set_source(Box::new(matrix))
    }

    /// Replace the cell values with an array of string arrays
    #[wasm_bindgen(js_name = setData)]
    pub fn set_data(&self, rows: JsValue) -> std::result::Result<(), JsValue> {
        let rows: Vec<Vec<String>> = serde_wasm_bindgen::from_value(rows)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.set_source(Box::new(MatrixSource::new(rows)))
    }
}

impl FrozenGridView {
    fn mount(
        container: HtmlElement,
        canvas: HtmlCanvasElement,
        config: JsValue,
        dpr: f32,
    ) -> Result<FrozenGridView> {
        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| GridError::config(e.to_string()))?
        };
        let source: Box<dyn DataSource> =
            Box::new(SyntheticSource::new(config.row_count(), config.col_count()));

        let host = Rc::new(DomResizeHost::new(container.clone()));
        let grid = FrozenGrid::mount(config, source, Rc::<DomResizeHost>::clone(&host))?;

        let scroll_container = create_div()?;
        let spacer = create_div()?;
        Self::style_layers(&container, &canvas, &scroll_container, &spacer, grid.geometry());
        container
            .append_child(&scroll_container)
            .map_err(|_| GridError::HostUnsupported("cannot attach scroll container".into()))?;

        let state = Rc::new(RefCell::new(ViewState {
            grid,
            renderer: CanvasRenderer::new(canvas)?,
            dpr: if dpr > 0.0 { dpr } else { 1.0 },
        }));

        // Registered after the grid's tracker, so the viewport is already updated
        let weak: Weak<RefCell<ViewState>> = Rc::downgrade(&state);
        let redraw_listener = host.add_listener(Box::new(move |_viewport| {
            if let Some(state) = weak.upgrade() {
                if let Ok(mut state) = state.try_borrow_mut() {
                    state.draw_logged();
                }
            }
        }))?;

        let weak = Rc::downgrade(&state);
        let container_for_scroll = scroll_container.clone();
        let scroll_closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let Ok(mut state) = state.try_borrow_mut() else {
                return;
            };
            #[allow(clippy::cast_possible_truncation)]
            let (top, left) = (
                scroll_offset(&container_for_scroll, "scrollTop", container_for_scroll.scroll_top())
                    as f32,
                scroll_offset(&container_for_scroll, "scrollLeft", container_for_scroll.scroll_left())
                    as f32,
            );
            if state.grid.on_scroll(PaneKind::Main, top, left) {
                state.draw_logged();
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        scroll_container
            .add_event_listener_with_callback("scroll", scroll_closure.as_ref().unchecked_ref())
            .map_err(|_| GridError::HostUnsupported("cannot listen for scroll events".into()))?;

        debug!("grid view mounted");
        let view = FrozenGridView {
            state,
            host,
            redraw_listener: Some(redraw_listener),
            scroll_container,
            scroll_closure: Some(scroll_closure),
        };
        view.state.borrow_mut().draw()?;
        Ok(view)
    }

    /// Canvas behind a transparent scroll container whose spacer has the
    /// full content size, so its scroll range equals the main pane's.
    fn style_layers(
        container: &HtmlElement,
        canvas: &HtmlCanvasElement,
        scroll_container: &HtmlDivElement,
        spacer: &HtmlDivElement,
        geometry: &crate::layout::GridGeometry,
    ) {
        let container_style = container.style();
        if container_style
            .get_property_value("position")
            .unwrap_or_default()
            .is_empty()
        {
            let _ = container_style.set_property("position", "relative");
        }
        let _ = container_style.set_property("overflow", "hidden");

        let canvas_style = canvas.style();
        let _ = canvas_style.set_property("position", "absolute");
        let _ = canvas_style.set_property("top", "0");
        let _ = canvas_style.set_property("left", "0");
        let _ = canvas_style.set_property("pointer-events", "none");
        let _ = canvas_style.set_property("z-index", "0");

        let scroll_style = scroll_container.style();
        let _ = scroll_style.set_property("position", "absolute");
        let _ = scroll_style.set_property("inset", "0");
        let _ = scroll_style.set_property("overflow", "auto");
        let _ = scroll_style.set_property("background", "transparent");
        let _ = scroll_style.set_property("z-index", "1");

        let config = geometry.config();
        #[allow(clippy::cast_precision_loss)]
        let content_width = config.col_count() as f32 * config.col_width();
        let spacer_style = spacer.style();
        let _ = spacer_style.set_property("width", &format!("{content_width}px"));
        let _ = spacer_style.set_property("height", &format!("{}px", geometry.content_height()));
        let _ = scroll_container.append_child(spacer);
    }

    fn set_source(&self, source: Box<dyn DataSource>) -> std::result::Result<(), JsValue> {
        let mut state = self.state.borrow_mut();
        state.grid.set_source(source);
        Ok(state.draw()?)
    }
}

impl Drop for FrozenGridView {
    fn drop(&mut self) {
        if let Some(closure) = self.scroll_closure.take() {
            let _ = self
                .scroll_container
                .remove_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        }
        if let Some(id) = self.redraw_listener.take() {
            self.host.remove_listener(id);
        }
        self.scroll_container.remove();
    }
}
