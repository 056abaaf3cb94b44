pub mod listeners;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use listeners::{
    GestureSubscription, ListenerId, ListenerKind, SharedListenerRegistry, WindowEvent,
    WindowListener, WindowListenerRegistry,
};

/// One of the two draggable endpoints of the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    Min,
    Max,
}

impl Handle {
    pub const ALL: [Handle; 2] = [Handle::Min, Handle::Max];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    /// Focus was lost mid-drag; the next pointer move commits.
    PendingBlurCommit,
}

/// Per-handle gesture session.
///
/// The subscription is present exactly while the phase is not `Idle`.
#[derive(Debug, Default)]
pub struct DragSession {
    phase: DragPhase,
    subscription: Option<GestureSubscription>,
}

impl DragSession {
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    #[must_use]
    pub fn pending_commit_on_blur(&self) -> bool {
        self.phase == DragPhase::PendingBlurCommit
    }

    /// Time labels follow the session: shown only while dragging.
    #[must_use]
    pub fn label_visible(&self) -> bool {
        self.is_active()
    }

    fn replace(
        &mut self,
        phase: DragPhase,
        subscription: Option<GestureSubscription>,
    ) -> Option<GestureSubscription> {
        self.phase = phase;
        std::mem::replace(&mut self.subscription, subscription)
    }
}

/// Drag sessions for both handles.
///
/// Transitions hand back the subscription they retire so the caller decides
/// when its listeners go away; dropping it is enough.
#[derive(Debug, Default)]
pub struct DragState {
    min: DragSession,
    max: DragSession,
}

impl DragState {
    #[must_use]
    pub fn session(&self, handle: Handle) -> &DragSession {
        match handle {
            Handle::Min => &self.min,
            Handle::Max => &self.max,
        }
    }

    fn session_mut(&mut self, handle: Handle) -> &mut DragSession {
        match handle {
            Handle::Min => &mut self.min,
            Handle::Max => &mut self.max,
        }
    }

    #[must_use]
    pub fn phase(&self, handle: Handle) -> DragPhase {
        self.session(handle).phase()
    }

    /// `* -> Dragging`. A session that was still open is discarded.
    pub fn begin(
        &mut self,
        handle: Handle,
        subscription: GestureSubscription,
    ) -> Option<GestureSubscription> {
        let session = self.session_mut(handle);
        if session.phase != DragPhase::Idle {
            debug!(?handle, phase = ?session.phase, "restarting gesture over an open session");
        }
        session.replace(DragPhase::Dragging, Some(subscription))
    }

    /// `Dragging -> PendingBlurCommit`.
    ///
    /// Returns `Err(subscription)` untouched when the handle is not dragging.
    pub fn defer_commit(
        &mut self,
        handle: Handle,
        subscription: GestureSubscription,
    ) -> Result<Option<GestureSubscription>, GestureSubscription> {
        let session = self.session_mut(handle);
        if session.phase != DragPhase::Dragging {
            return Err(subscription);
        }
        Ok(session.replace(DragPhase::PendingBlurCommit, Some(subscription)))
    }

    /// `Dragging | PendingBlurCommit -> Idle`.
    pub fn finish(&mut self, handle: Handle) -> Option<GestureSubscription> {
        self.session_mut(handle).replace(DragPhase::Idle, None)
    }
}
