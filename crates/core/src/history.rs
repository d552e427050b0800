//! Undo history - an append-only stack of full snapshots.

/// Snapshots taken immediately before each committed move.
#[derive(Debug, Clone, PartialEq)]
pub struct History<T> {
    entries: Vec<T>,
}

impl<T> History<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, snapshot: T) {
        self.entries.push(snapshot);
    }

    /// Pop the most recent snapshot, if any.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_order() {
        let mut history = History::new();
        history.push(1);
        history.push(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Some(2));
        assert_eq!(history.pop(), Some(1));
        assert_eq!(history.pop(), None);
        assert!(history.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.push("a");
        history.clear();
        assert!(history.is_empty());
    }
}
