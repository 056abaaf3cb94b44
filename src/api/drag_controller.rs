//! Per-handle drag gestures.
//!
//! ```text
//! Idle --pointer_down--> Dragging --pointer_up--> Idle (commit)
//!                           |
//!                         blur
//!                           v
//!                  PendingBlurCommit --next move--> Idle (commit)
//! ```
//!
//! Each phase holds a `GestureSubscription` for the window listeners it
//! needs; leaving a phase drops it, which is the only way listeners are
//! removed.

use tracing::{debug, trace};

use crate::interaction::{DragPhase, GestureSubscription, Handle, ListenerKind, WindowEvent};

use super::{EmitOutcome, RangeSelector, Transport};

const DRAG_LISTENERS: [ListenerKind; 3] = [
    ListenerKind::PointerMove,
    ListenerKind::PointerUp,
    ListenerKind::Blur,
];

const DEFERRED_COMMIT_LISTENERS: [ListenerKind; 1] = [ListenerKind::DeferredCommitMove];

impl<T: Transport> RangeSelector<T> {
    /// Gesture start on `handle`.
    ///
    /// Applies the press position immediately so a click without movement
    /// still lands, then listens at window scope until release or blur.
    pub fn pointer_down(&mut self, handle: Handle, client_x: f64) {
        let subscription = GestureSubscription::attach(&self.listeners, handle, &DRAG_LISTENERS);
        if let Some(previous) = self.drag.begin(handle, subscription) {
            previous.dispose();
        }
        debug!(?handle, client_x, "drag started");
        self.adjust_handle(handle, client_x);
    }

    pub fn pointer_move(&mut self, client_x: f64) -> usize {
        self.dispatch_window_event(WindowEvent::PointerMove { client_x })
    }

    pub fn pointer_up(&mut self, client_x: f64) -> usize {
        self.dispatch_window_event(WindowEvent::PointerUp { client_x })
    }

    pub fn window_blur(&mut self) -> usize {
        self.dispatch_window_event(WindowEvent::Blur)
    }

    /// Delivers a window-scope event to the listeners registered when it
    /// arrived. Returns how many listeners ran.
    pub fn dispatch_window_event(&mut self, event: WindowEvent) -> usize {
        let targets = self.listeners.borrow().targets(event);
        let mut delivered = 0;

        for (id, listener) in targets {
            // An earlier listener in this dispatch may have ended the gesture.
            if !self.listeners.borrow().contains(id) {
                continue;
            }
            let handle = listener.handle;
            let handled = match (listener.kind, event) {
                (ListenerKind::PointerMove, WindowEvent::PointerMove { client_x }) => {
                    self.on_drag_move(handle, client_x);
                    true
                }
                (ListenerKind::PointerUp, WindowEvent::PointerUp { client_x }) => {
                    self.on_drag_release(handle, client_x);
                    true
                }
                (ListenerKind::Blur, WindowEvent::Blur) => {
                    self.on_drag_blur(handle);
                    true
                }
                (ListenerKind::DeferredCommitMove, WindowEvent::PointerMove { client_x }) => {
                    self.on_deferred_commit_move(handle, client_x);
                    true
                }
                _ => false,
            };
            if handled {
                delivered += 1;
            }
        }

        delivered
    }

    fn on_drag_move(&mut self, handle: Handle, client_x: f64) {
        self.adjust_handle(handle, client_x);
    }

    fn on_drag_release(&mut self, handle: Handle, client_x: f64) {
        self.adjust_handle(handle, client_x);
        let subscription = self.drag.finish(handle);
        debug!(?handle, client_x, "drag released");
        self.commit(handle);
        if let Some(subscription) = subscription {
            subscription.dispose();
        }
    }

    fn on_drag_blur(&mut self, handle: Handle) {
        let deferred =
            GestureSubscription::attach(&self.listeners, handle, &DEFERRED_COMMIT_LISTENERS);
        match self.drag.defer_commit(handle, deferred) {
            Ok(retired) => {
                if let Some(retired) = retired {
                    retired.dispose();
                }
                debug!(?handle, "focus lost mid-drag; commit deferred to next move");
            }
            Err(unused) => {
                unused.dispose();
                trace!(?handle, phase = ?self.drag.phase(handle), "blur ignored");
            }
        }
    }

    fn on_deferred_commit_move(&mut self, handle: Handle, client_x: f64) {
        if self.drag.phase(handle) != DragPhase::PendingBlurCommit {
            return;
        }
        self.adjust_handle(handle, client_x);
        let subscription = self.drag.finish(handle);
        debug!(?handle, client_x, "deferred commit applied");
        self.commit(handle);
        if let Some(subscription) = subscription {
            subscription.dispose();
        }
    }

    /// Writes the pointer position through the range model.
    ///
    /// Returns `false` when the track is unmeasured; the range is untouched.
    fn adjust_handle(&mut self, handle: Handle, client_x: f64) -> bool {
        let Some(percent) = self.dimensions.client_x_to_percent(client_x, handle) else {
            trace!(?handle, client_x, "pointer ignored; track not measured");
            return false;
        };
        match handle {
            Handle::Min => self.range.set_min(percent),
            Handle::Max => self.range.set_max(percent),
        };
        true
    }

    /// Forwards the current window, read fresh for both bounds.
    fn commit(&mut self, handle: Handle) -> EmitOutcome {
        let window = self.range.window();
        let outcome = self.emitter.emit(window);
        debug!(?handle, ?outcome, "range committed");
        outcome
    }
}
