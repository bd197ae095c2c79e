use super::ChangeEvent;
use super::slot::{Slot, normalize_slots};
use crate::codegen::{Generator, Lowerer};
use crate::error::WorkspaceError;
use crate::program::{IntoDefinition, ProgramDefinition, encode_definition};
use crate::remote::SlotStore;
use std::panic::{self, AssertUnwindSafe};

/// Owns the slot list and the block tree being edited.
///
/// All mutation of the tree goes through `edit`, and persistence through
/// `save`, which writes the slot list only when the serialized tree differs
/// from what the active slot already holds.
pub struct WorkspaceController<S: SlotStore> {
    store: S,
    slots: Vec<Slot>,
    active_index: usize,
    active: ProgramDefinition,
    batch_depth: usize,
    pending_save: bool,
    /// Set when a write failed, so the next save retries even without changes.
    unsynced: bool,
}

impl<S: SlotStore> WorkspaceController<S> {
    /// Fetches the slot list and opens the first slot.
    pub fn load(store: S) -> Result<Self, WorkspaceError> {
        let slots = normalize_slots(store.fetch_all()?);
        let mut controller = Self {
            store,
            slots,
            active_index: 0,
            active: ProgramDefinition::default(),
            batch_depth: 0,
            pending_save: false,
            unsynced: false,
        };
        controller.update_workspace()?;
        tracing::info!(slots = controller.slots.len(), "workspace loaded");
        Ok(controller)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_slot(&self) -> &Slot {
        &self.slots[self.active_index]
    }

    /// The block tree currently on the canvas.
    pub fn program(&self) -> &ProgramDefinition {
        &self.active
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Opens another slot. An index past the end opens the first slot.
    ///
    /// Stored slot data is never modified by switching.
    pub fn switch_active(&mut self, index: usize) -> Result<(), WorkspaceError> {
        self.active_index = if index < self.slots.len() { index } else { 0 };
        tracing::debug!(
            index = self.active_index,
            name = %self.slots[self.active_index].name,
            "switched active slot"
        );
        self.update_workspace()
    }

    /// Reacts to a change notification from the editor surface.
    /// Returns whether the slot list was written.
    pub fn handle_event(&mut self, event: ChangeEvent) -> Result<bool, WorkspaceError> {
        if !event.is_structural() {
            return Ok(false);
        }
        self.save()
    }

    /// Applies a mutation to the block tree and autosaves.
    pub fn edit<F, R>(&mut self, f: F) -> Result<R, WorkspaceError>
    where
        F: FnOnce(&mut ProgramDefinition) -> R,
    {
        let result = f(&mut self.active);
        self.save()?;
        Ok(result)
    }

    /// Runs `f` with autosave suspended, then saves once if anything asked to.
    ///
    /// Autosave is restored even if `f` panics.
    pub fn batch<F, R>(&mut self, f: F) -> Result<R, WorkspaceError>
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.batch_depth += 1;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| f(&mut *self)));
        self.batch_depth -= 1;
        let result = outcome.unwrap_or_else(|payload| panic::resume_unwind(payload));
        if self.batch_depth == 0 && self.pending_save {
            self.pending_save = false;
            self.save()?;
        }
        Ok(result)
    }

    /// Serializes the tree and writes the slot list if the active slot changed.
    /// Returns whether a write happened.
    pub fn save(&mut self) -> Result<bool, WorkspaceError> {
        if self.batch_depth > 0 {
            self.pending_save = true;
            return Ok(false);
        }

        let data = encode_definition(&self.active).map_err(WorkspaceError::Serialize)?;
        let slot = &mut self.slots[self.active_index];
        if data == slot.data && !self.unsynced {
            tracing::trace!(index = self.active_index, "active slot unchanged, skipping save");
            return Ok(false);
        }
        slot.data = data;
        self.write_slots()?;
        Ok(true)
    }

    /// Writes the whole slot list. A failure leaves the controller unsynced so
    /// the next `save` writes again.
    fn write_slots(&mut self) -> Result<(), WorkspaceError> {
        match self.store.store_all(&self.slots) {
            Ok(()) => {
                self.unsynced = false;
                tracing::debug!(index = self.active_index, "saved slots");
                Ok(())
            }
            Err(e) => {
                self.unsynced = true;
                tracing::warn!(index = self.active_index, error = %e, "failed to save slots");
                Err(e.into())
            }
        }
    }

    /// Re-fetches the slot list. If the active slot was renamed elsewhere the
    /// first slot is opened instead.
    pub fn refresh(&mut self) -> Result<(), WorkspaceError> {
        let fetched = normalize_slots(self.store.fetch_all()?);
        if fetched[self.active_index].name != self.slots[self.active_index].name {
            tracing::debug!(
                index = self.active_index,
                "active slot was renamed remotely, opening the first slot"
            );
            self.active_index = 0;
        }
        self.slots = fetched;
        self.update_workspace()
    }

    pub fn rename_active(&mut self, name: &str) -> Result<(), WorkspaceError> {
        self.slots[self.active_index].name = name.to_string();
        self.write_slots()
    }

    /// Removes every block from the canvas and autosaves.
    pub fn clear_active(&mut self) -> Result<bool, WorkspaceError> {
        self.active.roots.clear();
        self.save()
    }

    /// Lowers the active tree and generates its script.
    pub fn generate(
        &self,
        lowerer: &Lowerer,
        generator: &Generator,
    ) -> Result<String, WorkspaceError> {
        let program = lowerer.lower(&self.active)?;
        Ok(generator.generate(&program))
    }

    /// Replaces the canvas with the active slot's stored tree.
    fn update_workspace(&mut self) -> Result<(), WorkspaceError> {
        let index = self.active_index;
        self.active = ProgramDefinition::default();
        let slot = &self.slots[index];
        self.active = slot
            .data
            .as_str()
            .into_definition()
            .map_err(|source| WorkspaceError::CorruptSlot {
                index,
                name: slot.name.clone(),
                source,
            })?;
        Ok(())
    }
}
