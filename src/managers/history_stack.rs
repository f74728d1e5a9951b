//! Navigation history for the shell.
//!
//! An ordered list of entries plus a cursor. Pushing while the cursor is not
//! at the end drops the forward entries first, like every browser does.

use crate::types::errors::HistoryError;
use crate::types::navigation::HistoryEntry;

/// Trait defining history stack operations.
pub trait HistoryStackTrait {
    fn push(&mut self, entry: HistoryEntry);
    fn back(&mut self) -> Result<HistoryEntry, HistoryError>;
    fn forward(&mut self) -> Result<HistoryEntry, HistoryError>;
    fn current(&self) -> HistoryEntry;
    fn home(&mut self);
    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;
}

/// In-memory history stack.
///
/// Invariant: `cursor` is `Some(i)` with `i < entries.len()` whenever
/// `entries` is non-empty, and `None` otherwise.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

impl HistoryStackTrait for HistoryStack {
    /// Drops everything after the cursor, appends `entry` and moves the cursor onto it.
    fn push(&mut self, entry: HistoryEntry) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push(entry);
        self.cursor = Some(self.entries.len() - 1);
    }

    fn back(&mut self) -> Result<HistoryEntry, HistoryError> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                Ok(self.entries[cursor - 1].clone())
            }
            _ => Err(HistoryError::NoBackEntry),
        }
    }

    fn forward(&mut self) -> Result<HistoryEntry, HistoryError> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                Ok(self.entries[cursor + 1].clone())
            }
            _ => Err(HistoryError::NoForwardEntry),
        }
    }

    /// Entry under the cursor, or the home sentinel when nothing was visited yet.
    fn current(&self) -> HistoryEntry {
        self.cursor
            .and_then(|cursor| self.entries.get(cursor))
            .cloned()
            .unwrap_or_else(HistoryEntry::home)
    }

    fn home(&mut self) {
        self.push(HistoryEntry::home());
    }

    fn can_go_back(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    fn can_go_forward(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }
}
