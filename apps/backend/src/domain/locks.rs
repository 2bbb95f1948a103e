//! Wrong-guess lock queue for one player's board.
//!
//! The queue is global per (session, player): a correct answered question
//! clears the oldest uncleared entry regardless of which cell that entry
//! targets. A cell stays locked while any uncleared entry references it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEntry {
    /// Store id; 0 for entries not yet persisted.
    pub id: i64,
    pub cell_index: usize,
    pub cleared: bool,
}

/// Outcome of clearing the oldest uncleared lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearedLock {
    pub entry_id: i64,
    pub cell_index: usize,
    /// Whether another uncleared entry still pins this cell.
    pub cell_still_locked: bool,
}

/// Entries in FIFO order (created_at, then id).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockQueue {
    entries: Vec<LockEntry>,
}

impl LockQueue {
    pub fn new(entries: Vec<LockEntry>) -> LockQueue {
        LockQueue { entries }
    }

    pub fn entries(&self) -> &[LockEntry] {
        &self.entries
    }

    pub fn is_locked(&self, cell_index: usize) -> bool {
        self.entries
            .iter()
            .any(|e| !e.cleared && e.cell_index == cell_index)
    }

    pub fn push(&mut self, cell_index: usize) {
        self.entries.push(LockEntry {
            id: 0,
            cell_index,
            cleared: false,
        });
    }

    /// Clear the oldest uncleared entry, if any.
    pub fn clear_oldest(&mut self) -> Option<ClearedLock> {
        let pos = self.entries.iter().position(|e| !e.cleared)?;
        self.entries[pos].cleared = true;
        let entry_id = self.entries[pos].id;
        let cell_index = self.entries[pos].cell_index;
        Some(ClearedLock {
            entry_id,
            cell_index,
            cell_still_locked: self.is_locked(cell_index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(cells: &[usize]) -> LockQueue {
        LockQueue::new(
            cells
                .iter()
                .enumerate()
                .map(|(i, &cell_index)| LockEntry {
                    id: i as i64 + 1,
                    cell_index,
                    cleared: false,
                })
                .collect(),
        )
    }

    #[test]
    fn clears_oldest_first_across_cells() {
        let mut q = queue(&[7, 3]);
        let cleared = q.clear_oldest().unwrap();
        assert_eq!(cleared.cell_index, 7);
        assert!(!cleared.cell_still_locked);
        assert!(q.is_locked(3));
        assert!(!q.is_locked(7));
    }

    #[test]
    fn doubly_locked_cell_stays_locked_after_one_clear() {
        let mut q = queue(&[4, 4]);
        let cleared = q.clear_oldest().unwrap();
        assert_eq!(cleared.cell_index, 4);
        assert!(cleared.cell_still_locked);
        assert!(q.is_locked(4));

        let cleared = q.clear_oldest().unwrap();
        assert_eq!(cleared.cell_index, 4);
        assert!(!cleared.cell_still_locked);
        assert!(!q.is_locked(4));
    }

    #[test]
    fn clear_on_empty_queue_is_none() {
        let mut q = LockQueue::default();
        assert!(q.clear_oldest().is_none());
    }
}
