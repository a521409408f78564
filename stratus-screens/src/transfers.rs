//! Completed transfers list controller
//!
//! Owns the visible, persisted list of finished transfers. All
//! operations are synchronous; the controller writes through to the
//! SQLite store and keeps the in-memory list as the source of truth
//! for projections.

use crate::messages::TransfersAction;
use crate::state::CompletedTransferList;
use stratus_gateway::{CompletedTransfer, Result, TransferStore};
use tracing::{debug, info};

/// Controller for the completed-transfers screen
pub struct CompletedTransfersController {
    store: TransferStore,
    list: CompletedTransferList,
}

impl CompletedTransfersController {
    /// Create the controller and load the persisted list
    pub fn new(store: TransferStore, max: usize) -> Result<Self> {
        let mut controller = Self {
            store,
            list: CompletedTransferList::new(max),
        };
        controller.reload()?;
        Ok(controller)
    }

    /// Replace the in-memory list with all persisted records
    pub fn reload(&mut self) -> Result<()> {
        let records = self.store.load_all()?;
        debug!("Loaded {} completed transfers", records.len());
        self.list.replace_all(records);
        Ok(())
    }

    /// A transfer finished; prepend it to the list
    ///
    /// Persists the record, evicts the oldest entry beyond the bound,
    /// and asks the host to rebuild its action menu when the list goes
    /// from empty to non-empty.
    pub fn record_finished(
        &mut self,
        transfer: CompletedTransfer,
    ) -> Result<Vec<TransfersAction>> {
        let stored = self.store.insert(&transfer)?;
        if let Some(evicted) = self.list.prepend(stored) {
            debug!("Evicting oldest completed transfer {}", evicted.id);
            self.store.remove(evicted.id)?;
        }
        self.store.prune_to(self.list.max())?;

        let mut actions = Vec::new();
        if self.list.len() == 1 {
            actions.push(TransfersAction::RefreshActionMenu);
        }
        Ok(actions)
    }

    /// A transfer was cancelled or removed elsewhere; drop our record
    ///
    /// Removes the first stored record that is the same transfer under
    /// the identity rule. A probe that matches nothing is a no-op.
    pub fn record_removed(
        &mut self,
        probe: &CompletedTransfer,
    ) -> Result<Vec<TransfersAction>> {
        if let Some(removed) = self.list.remove_same(probe) {
            debug!("Removed completed transfer {}", removed.id);
            self.store.remove(removed.id)?;
        }
        Ok(vec![TransfersAction::RefreshActionMenu])
    }

    /// Remove every completed transfer
    pub fn clear_all(&mut self) -> Result<()> {
        info!("Clearing completed transfers");
        self.list.clear();
        self.store.clear()?;
        Ok(())
    }

    /// Whether any completed transfer is retained
    pub fn has_any(&self) -> bool {
        !self.list.is_empty()
    }

    /// The current list, newest first
    pub fn transfers(&self) -> &[CompletedTransfer] {
        self.list.items()
    }
}
