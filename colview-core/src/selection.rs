//! View-local multi-selection.

use colview_model::Record;

/// Records currently selected in one rendered view.
///
/// Membership is by record identity; a record appears at most once. Order is
/// insertion order. `revision` increases on every change of membership so a
/// host can tell when toolbar state must be re-resolved.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    records: Vec<Record>,
    revision: u64,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `record` if selected, appends it otherwise.
    /// Returns whether the record is selected afterwards.
    pub fn toggle(&mut self, record: Record) -> bool {
        let selected = match self.position(&record) {
            Some(idx) => {
                self.records.remove(idx);
                false
            }
            None => {
                self.records.push(record);
                true
            }
        };
        self.revision += 1;
        selected
    }

    pub fn contains(&self, record: &Record) -> bool {
        self.position(record).is_some()
    }

    /// Removes `record` if present. Returns whether anything was removed.
    pub fn remove(&mut self, record: &Record) -> bool {
        match self.position(record) {
            Some(idx) => {
                self.records.remove(idx);
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    /// Removes every selected record that is one of `records`. Returns how many were removed.
    pub fn remove_all(&mut self, records: &[Record]) -> usize {
        let before = self.records.len();
        self.records
            .retain(|selected| !records.iter().any(|r| r.same_identity(selected)));
        let removed = before - self.records.len();
        if removed > 0 {
            self.revision += 1;
        }
        removed
    }

    pub fn clear(&mut self) {
        if !self.records.is_empty() {
            self.records.clear();
            self.revision += 1;
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Owned copy of the current selection.
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn position(&self, record: &Record) -> Option<usize> {
        self.records.iter().position(|r| r.same_identity(record))
    }
}
