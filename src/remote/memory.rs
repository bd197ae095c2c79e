use super::SlotStore;
use crate::error::RemoteError;
use crate::workspace::Slot;

/// A slot store kept in process memory. Counts writes so callers can observe
/// how often the workspace persisted.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: Vec<Slot>,
    writes: usize,
    fail_writes: bool,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slots(slots: Vec<Slot>) -> Self {
        Self {
            slots,
            ..Self::default()
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Replaces the stored list without counting a write, as another editor
    /// session would.
    pub fn replace_slots(&mut self, slots: Vec<Slot>) {
        self.slots = slots;
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Makes subsequent writes fail, simulating an unreachable server.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl SlotStore for MemorySlotStore {
    fn fetch_all(&self) -> Result<Vec<Slot>, RemoteError> {
        Ok(self.slots.clone())
    }

    fn store_all(&mut self, slots: &[Slot]) -> Result<(), RemoteError> {
        if self.fail_writes {
            return Err(RemoteError::Transport {
                endpoint: "memory".to_string(),
                message: "writes are disabled".to_string(),
            });
        }
        self.slots = slots.to_vec();
        self.writes += 1;
        Ok(())
    }
}
