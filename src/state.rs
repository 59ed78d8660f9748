/// Shared panel state container with single-writer discipline.
///
/// All mutations flow through the sync controller and the action proxy via
/// the named methods here; the view only reads [`SharedStore::snapshot`].
/// A generation counter guards against stale sync responses (a passive
/// listener-triggered sync racing a manual refresh), and a liveness flag
/// lets responses that arrive after panel teardown be dropped safely.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::group_data::TabGroup;

/// State shared between the panel view and its controllers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelState {
    /// The last successfully fetched group snapshot, replaced wholesale.
    pub groups: Vec<TabGroup>,
    pub loading: bool,
    /// Set only for explicit user-triggered refreshes.
    pub refreshing: bool,
    pub error: Option<String>,
}

type Subscriber = Box<dyn Fn()>;

/// Single-threaded shared store; clone the `Rc` handle freely.
pub struct SharedStore {
    state: RefCell<PanelState>,
    issued: Cell<u64>,
    alive: Cell<bool>,
    next_subscriber: Cell<u64>,
    subscribers: RefCell<Vec<(u64, Subscriber)>>,
}

impl SharedStore {
    pub fn new() -> Rc<Self> {
        Rc::new(SharedStore {
            state: RefCell::new(PanelState::default()),
            issued: Cell::new(0),
            alive: Cell::new(true),
            next_subscriber: Cell::new(0),
            subscribers: RefCell::new(Vec::new()),
        })
    }

    pub fn snapshot(&self) -> PanelState {
        self.state.borrow().clone()
    }

    /// Register a change callback; returns a token for [`Self::unsubscribe`].
    pub fn subscribe(&self, subscriber: Subscriber) -> u64 {
        let id = self.next_subscriber.get();
        self.next_subscriber.set(id + 1);
        self.subscribers.borrow_mut().push((id, subscriber));
        id
    }

    pub fn unsubscribe(&self, id: u64) {
        self.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    /// Start a sync cycle: raises the loading flag (and the refreshing flag
    /// for manual refreshes) and issues a new generation. The matching
    /// [`Self::finish_sync`] call must pass the generation back.
    pub fn begin_sync(&self, refreshing: bool) -> u64 {
        let generation = self.issued.get() + 1;
        self.issued.set(generation);
        {
            let mut state = self.state.borrow_mut();
            state.loading = true;
            if refreshing {
                state.refreshing = true;
            }
        }
        self.notify();
        generation
    }

    /// Complete a sync cycle. Returns `false` when the outcome was discarded
    /// because a newer sync has been issued since, or the panel was torn
    /// down — in either case the previous snapshot is left untouched.
    pub fn finish_sync(&self, generation: u64, outcome: Result<Vec<TabGroup>, String>) -> bool {
        if !self.alive.get() || generation != self.issued.get() {
            return false;
        }
        {
            let mut state = self.state.borrow_mut();
            state.loading = false;
            state.refreshing = false;
            match outcome {
                Ok(groups) => {
                    state.groups = groups;
                    state.error = None;
                }
                Err(message) => {
                    state.error = Some(message);
                }
            }
        }
        self.notify();
        true
    }

    pub fn set_loading(&self, loading: bool) {
        if !self.alive.get() {
            return;
        }
        self.state.borrow_mut().loading = loading;
        self.notify();
    }

    /// Surface a user-visible error message, overwriting any prior one.
    pub fn set_error(&self, message: impl Into<String>) {
        if !self.alive.get() {
            return;
        }
        self.state.borrow_mut().error = Some(message.into());
        self.notify();
    }

    pub fn clear_error(&self) {
        if !self.alive.get() {
            return;
        }
        self.state.borrow_mut().error = None;
        self.notify();
    }

    /// Mark the panel as torn down: later mutations and in-flight sync
    /// completions are ignored, and subscribers are dropped.
    pub fn shutdown(&self) {
        self.alive.set(false);
        self.subscribers.borrow_mut().clear();
    }

    fn notify(&self) {
        for (_, subscriber) in self.subscribers.borrow().iter() {
            subscriber();
        }
    }
}
