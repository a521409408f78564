//! In-memory model of the completed-transfers list
//!
//! Newest-first, bounded. The controller layers persistence on top;
//! this model only knows ordering, the bound, and the identity rule.

use stratus_gateway::CompletedTransfer;

/// Bounded, newest-first list of completed transfers
#[derive(Debug)]
pub struct CompletedTransferList {
    items: Vec<CompletedTransfer>,
    max: usize,
}

impl CompletedTransferList {
    pub fn new(max: usize) -> Self {
        Self {
            items: Vec::new(),
            max,
        }
    }

    pub fn items(&self) -> &[CompletedTransfer] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Replace the whole list with freshly loaded records
    pub fn replace_all(&mut self, items: Vec<CompletedTransfer>) {
        self.items = items;
        self.items.truncate(self.max);
    }

    /// Prepend a record, evicting the oldest (last) beyond the bound
    ///
    /// Returns the evicted record, if any.
    pub fn prepend(&mut self, transfer: CompletedTransfer) -> Option<CompletedTransfer> {
        self.items.insert(0, transfer);
        if self.items.len() > self.max {
            self.items.pop()
        } else {
            None
        }
    }

    /// Remove the first record that is the same transfer as `probe`
    ///
    /// Returns the removed record, if one matched.
    pub fn remove_same(&mut self, probe: &CompletedTransfer) -> Option<CompletedTransfer> {
        let index = self
            .items
            .iter()
            .position(|item| item.is_same_transfer(probe))?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use stratus_gateway::{TransferDirection, INVALID_HANDLE};

    fn record(id: i64, name: &str) -> CompletedTransfer {
        CompletedTransfer {
            id,
            file_name: name.to_string(),
            direction: TransferDirection::Download,
            size: id as u64,
            node_handle: INVALID_HANDLE,
            path: String::new(),
            error: String::new(),
            timestamp: DateTime::<Utc>::from_timestamp(1_700_000_000 + id, 0).unwrap(),
        }
    }

    #[test]
    fn test_prepend_orders_newest_first() {
        let mut list = CompletedTransferList::new(5);
        list.prepend(record(1, "first.txt"));
        list.prepend(record(2, "second.txt"));
        assert_eq!(list.items()[0].file_name, "second.txt");
        assert_eq!(list.items()[1].file_name, "first.txt");
    }

    #[test]
    fn test_bound_evicts_oldest() {
        let mut list = CompletedTransferList::new(3);
        for i in 1..=3 {
            assert!(list.prepend(record(i, &format!("f{}.txt", i))).is_none());
        }

        let evicted = list.prepend(record(4, "f4.txt")).unwrap();
        assert_eq!(evicted.file_name, "f1.txt");
        assert_eq!(list.len(), 3);
        assert_eq!(list.items()[0].file_name, "f4.txt");
    }

    #[test]
    fn test_remove_same_takes_first_match() {
        let mut list = CompletedTransferList::new(5);
        list.prepend(record(1, "dup.txt"));
        list.prepend(record(2, "other.txt"));

        // sizes and names differ, so only the id path can match
        let mut probe = record(1, "renamed.txt");
        probe.size = 999;
        let removed = list.remove_same(&probe).unwrap();
        assert_eq!(removed.file_name, "dup.txt");
        assert_eq!(list.len(), 1);

        assert!(list.remove_same(&probe).is_none());
    }

    #[test]
    fn test_replace_all_truncates_to_bound() {
        let mut list = CompletedTransferList::new(2);
        list.replace_all(vec![record(1, "a"), record(2, "b"), record(3, "c")]);
        assert_eq!(list.len(), 2);
    }
}
