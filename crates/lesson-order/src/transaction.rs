//! Drag Transaction
//!
//! One reorder gesture, from drag start to drop.

use crate::lesson::ModuleId;

/// Ephemeral description of a drag gesture within one module's list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragTransaction {
    pub module_id: ModuleId,
    /// Index at drag start
    pub source_index: usize,
    /// Currently highlighted drop position
    pub target_index: usize,
    /// List version observed at drag start
    pub snapshot_version: u64,
}

impl DragTransaction {
    pub fn new(module_id: ModuleId, source_index: usize, snapshot_version: u64) -> Self {
        Self {
            module_id,
            source_index,
            target_index: source_index,
            snapshot_version,
        }
    }

    /// Move the highlighted target. Idempotent.
    pub fn hover(&mut self, index: usize) {
        self.target_index = index;
    }

    pub fn is_noop(&self) -> bool {
        self.source_index == self.target_index
    }

    /// Valid only against the list it was started on
    pub fn is_current(&self, version: u64) -> bool {
        self.snapshot_version == version
    }
}
