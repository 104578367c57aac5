//! The user-facing queue of failed requests.

use serde::{Deserialize, Serialize};

/// One failed request as shown in the error list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub text: String,
    pub url: String,
}

impl ErrorRecord {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// Accumulating, dismissible error list.
///
/// Dismissing leaves a hole instead of shifting later entries, so the index
/// a rendered entry was shown with stays valid until the session ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorQueue {
    slots: Vec<Option<ErrorRecord>>,
}

impl ErrorQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its index.
    pub fn push(&mut self, record: ErrorRecord) -> usize {
        self.slots.push(Some(record));
        self.slots.len() - 1
    }

    /// Remove the record at `index`. Returns it if it was still present.
    pub fn dismiss(&mut self, index: usize) -> Option<ErrorRecord> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    pub fn get(&self, index: usize) -> Option<&ErrorRecord> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Live records with their stable indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ErrorRecord)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|r| (i, r)))
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss_keeps_indices_stable() {
        let mut queue = ErrorQueue::new();
        queue.push(ErrorRecord::new("API request failed: 500", "http://a"));
        queue.push(ErrorRecord::new("API request failed: 404", "http://b"));
        queue.push(ErrorRecord::new("API request failed: 502", "http://c"));

        assert_eq!(queue.dismiss(1).unwrap().url, "http://b");
        assert_eq!(queue.len(), 2);

        let indices: Vec<usize> = queue.iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(queue.get(2).unwrap().url, "http://c");
    }

    #[test]
    fn test_dismiss_twice_or_out_of_range() {
        let mut queue = ErrorQueue::new();
        queue.push(ErrorRecord::new("x", "u"));
        assert!(queue.dismiss(0).is_some());
        assert!(queue.dismiss(0).is_none());
        assert!(queue.dismiss(7).is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_push_after_dismiss_appends() {
        let mut queue = ErrorQueue::new();
        queue.push(ErrorRecord::new("a", "u"));
        queue.dismiss(0);
        assert_eq!(queue.push(ErrorRecord::new("b", "u")), 1);
    }
}
