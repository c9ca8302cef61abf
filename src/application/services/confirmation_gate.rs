//! ConfirmationGate - holds destructive and drop-initiated actions until
//! the user confirms them
//!
//! The gate itself never touches the catalog. It only tracks which action
//! is pending; the session resolves a confirmed action against the catalog
//! store and the backend.
//!
//! One slot: a new request replaces whatever was pending. Confirming two
//! actions concurrently is not supported.

use log::debug;

use crate::domain::entities::{AppItem, PendingAction};

/// Pending-action state machine
#[derive(Debug, Default)]
pub struct ConfirmationGate {
    pending: PendingAction,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold a delete of `app`; returns the action it replaced, if any
    pub fn request_delete(&mut self, app: AppItem) -> Option<PendingAction> {
        debug!("Delete of '{}' awaiting confirmation", app.name);
        self.replace(PendingAction::Delete(app))
    }

    /// Hold an add of a dropped file; returns the action it replaced, if any
    pub fn request_add(
        &mut self,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> Option<PendingAction> {
        let (name, path) = (name.into(), path.into());
        debug!("Add of '{}' ({}) awaiting confirmation", name, path);
        self.replace(PendingAction::Add { name, path })
    }

    /// Discard the pending action without side effects
    pub fn cancel(&mut self) -> Option<PendingAction> {
        let discarded = self.take();
        if let Some(action) = &discarded {
            debug!("Cancelled pending action {:?}", action.prompt());
        }
        discarded
    }

    /// Move the pending action out, returning the gate to idle
    pub fn take(&mut self) -> Option<PendingAction> {
        match std::mem::take(&mut self.pending) {
            PendingAction::None => None,
            action => Some(action),
        }
    }

    /// The action awaiting confirmation
    pub fn pending(&self) -> &PendingAction {
        &self.pending
    }

    pub fn is_idle(&self) -> bool {
        !self.pending.is_pending()
    }

    fn replace(&mut self, action: PendingAction) -> Option<PendingAction> {
        match std::mem::replace(&mut self.pending, action) {
            PendingAction::None => None,
            previous => {
                debug!("Replaced pending action {:?}", previous.prompt());
                Some(previous)
            }
        }
    }
}
