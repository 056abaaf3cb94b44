use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::Handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListenerId(u64);

/// Window-scope event a gesture listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenerKind {
    PointerMove,
    PointerUp,
    Blur,
    /// One-shot move listener armed by a blur; the next move commits.
    DeferredCommitMove,
}

/// Pointer/focus events delivered at window scope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WindowEvent {
    PointerMove { client_x: f64 },
    PointerUp { client_x: f64 },
    Blur,
}

impl WindowEvent {
    /// Whether a listener of `kind` receives this event.
    #[must_use]
    pub fn reaches(self, kind: ListenerKind) -> bool {
        matches!(
            (self, kind),
            (
                WindowEvent::PointerMove { .. },
                ListenerKind::PointerMove | ListenerKind::DeferredCommitMove
            ) | (WindowEvent::PointerUp { .. }, ListenerKind::PointerUp)
                | (WindowEvent::Blur, ListenerKind::Blur)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowListener {
    pub handle: Handle,
    pub kind: ListenerKind,
}

/// Registry of live window-scope listeners, kept in registration order.
#[derive(Debug, Default)]
pub struct WindowListenerRegistry {
    next_id: u64,
    entries: IndexMap<ListenerId, WindowListener>,
}

impl WindowListenerRegistry {
    fn add(&mut self, listener: WindowListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, listener);
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        self.entries.shift_remove(&id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries.contains_key(&id)
    }

    #[must_use]
    pub fn count_for(&self, handle: Handle) -> usize {
        self.entries
            .values()
            .filter(|listener| listener.handle == handle)
            .count()
    }

    /// Snapshot of the listeners an event reaches, taken before dispatch so
    /// listeners added while handling the event only see later events.
    #[must_use]
    pub fn targets(&self, event: WindowEvent) -> SmallVec<[(ListenerId, WindowListener); 4]> {
        self.entries
            .iter()
            .filter(|(_, listener)| event.reaches(listener.kind))
            .map(|(id, listener)| (*id, *listener))
            .collect()
    }
}

pub type SharedListenerRegistry = Rc<RefCell<WindowListenerRegistry>>;

/// Listeners registered for one gesture phase.
///
/// Dropping (or disposing) the subscription removes every listener it
/// registered, exactly once.
#[derive(Debug)]
#[must_use = "dropping a gesture subscription detaches its listeners immediately"]
pub struct GestureSubscription {
    registry: SharedListenerRegistry,
    handle: Handle,
    ids: SmallVec<[ListenerId; 3]>,
}

impl GestureSubscription {
    pub fn attach(registry: &SharedListenerRegistry, handle: Handle, kinds: &[ListenerKind]) -> Self {
        let ids = {
            let mut entries = registry.borrow_mut();
            kinds
                .iter()
                .map(|&kind| entries.add(WindowListener { handle, kind }))
                .collect()
        };
        Self {
            registry: Rc::clone(registry),
            handle,
            ids,
        }
    }

    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for GestureSubscription {
    fn drop(&mut self) {
        let mut registry = self.registry.borrow_mut();
        trace!(handle = ?self.handle, listeners = self.ids.len(), "gesture listeners detached");
        for id in self.ids.drain(..) {
            registry.remove(id);
        }
    }
}
