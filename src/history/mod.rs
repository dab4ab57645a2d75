//! Append-only calculation history for one session.
//!
//! Entries can be appended or cleared all at once. There is no way to edit
//! or remove a single entry.

mod entry;

pub use entry::HistoryEntry;

/// Ordered record of past calculations, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end.
    pub fn push(&mut self, entry: HistoryEntry) {
        tracing::debug!(line = %entry.line(), "history entry added");
        self.entries.push(entry);
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        tracing::info!(count = self.entries.len(), "history cleared");
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Entries in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Entries as display lines, in chronological order.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(HistoryEntry::line).collect()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::NumberFormat;
    use crate::session::Mode;

    fn entry(expression: &str, value: f64) -> HistoryEntry {
        HistoryEntry::from_evaluation(
            Mode::Scientific,
            expression,
            &Ok(value),
            &NumberFormat::default(),
        )
    }

    #[test]
    fn test_insertion_order() {
        let mut history = History::new();
        history.push(entry("1+1", 2.0));
        history.push(entry("2+2", 4.0));
        history.push(entry("3+3", 6.0));

        assert_eq!(history.len(), 3);
        assert_eq!(history.lines(), vec!["1+1 = 2", "2+2 = 4", "3+3 = 6"]);
        assert_eq!(history.last().map(|e| e.expression.as_str()), Some("3+3"));
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.push(entry("1+1", 2.0));
        history.clear();
        assert!(history.is_empty());
        assert!(history.last().is_none());

        history.push(entry("5", 5.0));
        assert_eq!(history.len(), 1);
    }
}
