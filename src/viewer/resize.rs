//! Viewport tracking.
//!
//! [`ViewportTracker`] is the only writer of [`ViewportState`]. It measures
//! the host synchronously on mount, then follows every resize notification
//! the [`ResizeHost`] delivers until it is dropped, at which point the
//! listener is deregistered.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};

use crate::error::Result;
use crate::layout::ViewportState;

/// Callback invoked with the new container size
pub type ResizeListener = Box<dyn FnMut(ViewportState)>;

/// Handle returned by [`ResizeHost::add_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Host environment that can measure the container and report resizes.
pub trait ResizeHost {
    /// Current container box, read immediately
    ///
    /// # Errors
    /// Returns an error if the container cannot be measured.
    fn measure(&self) -> Result<ViewportState>;

    /// Register a listener for subsequent size changes
    ///
    /// # Errors
    /// Returns [`crate::GridError::HostUnsupported`] if the host cannot
    /// deliver resize notifications.
    fn add_listener(&self, listener: ResizeListener) -> Result<ListenerId>;

    /// Deregister a listener. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}

/// Owner of the current [`ViewportState`]
pub struct ViewportTracker {
    state: Rc<Cell<ViewportState>>,
    changed: Rc<Cell<bool>>,
    host: Rc<dyn ResizeHost>,
    listener: Option<ListenerId>,
}

impl ViewportTracker {
    /// Measure the host and start listening for resizes.
    ///
    /// # Errors
    /// Fails if the host cannot be measured or refuses the listener; a grid
    /// that cannot follow its container would stay misaligned.
    pub fn mount(host: Rc<dyn ResizeHost>) -> Result<Self> {
        let initial = host.measure()?;
        let state = Rc::new(Cell::new(initial));
        let changed = Rc::new(Cell::new(false));

        let weak_state = Rc::downgrade(&state);
        let weak_changed = Rc::downgrade(&changed);
        let listener = host.add_listener(Box::new(move |viewport| {
            if let (Some(state), Some(changed)) = (weak_state.upgrade(), weak_changed.upgrade()) {
                debug!("viewport resized to {}x{}", viewport.width, viewport.height);
                state.set(viewport);
                changed.set(true);
            }
        }))?;

        debug!("viewport mounted at {}x{}", initial.width, initial.height);
        Ok(Self {
            state,
            changed,
            host,
            listener: Some(listener),
        })
    }

    /// Latest measured viewport
    pub fn current(&self) -> ViewportState {
        self.state.get()
    }

    /// True once after each resize notification
    pub fn take_changed(&self) -> bool {
        self.changed.replace(false)
    }
}

impl Drop for ViewportTracker {
    fn drop(&mut self) {
        if let Some(id) = self.listener.take() {
            self.host.remove_listener(id);
        }
    }
}

/// Registered resize listeners of a host.
///
/// A notification that arrives while the listeners are running (a listener
/// resized the container) is queued and delivered once the running pass
/// finishes, so no listener misses the latest size.
#[derive(Default)]
pub(crate) struct ListenerSet {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, ResizeListener)>>,
    pending: Cell<Option<ViewportState>>,
    removed: RefCell<Vec<ListenerId>>,
}

impl ListenerSet {
    pub(crate) fn add(&self, listener: ResizeListener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    pub(crate) fn remove(&self, id: ListenerId) {
        match self.listeners.try_borrow_mut() {
            Ok(mut listeners) => listeners.retain(|(lid, _)| *lid != id),
            // Removed from inside a listener; applied after the pass
            Err(_) => self.removed.borrow_mut().push(id),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.try_borrow().map_or(0, |listeners| listeners.len())
    }

    /// False while a dispatch pass is running
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub(crate) fn is_empty(&self) -> bool {
        self.listeners
            .try_borrow()
            .is_ok_and(|listeners| listeners.is_empty())
    }

    /// Deliver `viewport` to every listener in registration order
    pub(crate) fn notify(&self, viewport: ViewportState) {
        let Ok(mut listeners) = self.listeners.try_borrow_mut() else {
            warn!(
                "resize to {}x{} arrived during dispatch; deferring",
                viewport.width, viewport.height
            );
            self.pending.set(Some(viewport));
            return;
        };

        let mut next = Some(viewport);
        while let Some(viewport) = next {
            for (_, listener) in listeners.iter_mut() {
                listener(viewport);
            }
            let removed = std::mem::take(&mut *self.removed.borrow_mut());
            listeners.retain(|(id, _)| !removed.contains(id));
            next = self.pending.take();
        }
    }
}

/// Resize host driven explicitly by the embedding application.
///
/// Useful outside a browser (terminal front ends, tests): the application
/// calls [`ManualResizeHost::set_size`] whenever its container changes and
/// every registered listener is notified synchronously.
pub struct ManualResizeHost {
    size: Cell<ViewportState>,
    listeners: ListenerSet,
}

impl Default for ManualResizeHost {
    fn default() -> Self {
        Self::new(ViewportState::default())
    }
}

impl ManualResizeHost {
    pub fn new(initial: ViewportState) -> Self {
        Self {
            size: Cell::new(initial),
            listeners: ListenerSet::default(),
        }
    }

    /// Change the container size and notify listeners
    pub fn set_size(&self, width: f32, height: f32) {
        let viewport = ViewportState::new(width, height);
        self.size.set(viewport);
        self.listeners.notify(viewport);
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl ResizeHost for ManualResizeHost {
    fn measure(&self) -> Result<ViewportState> {
        Ok(self.size.get())
    }

    fn add_listener(&self, listener: ResizeListener) -> Result<ListenerId> {
        Ok(self.listeners.add(listener))
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.remove(id);
    }
}
