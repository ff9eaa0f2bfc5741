//! History backends
//!
//! The browser frontend pushes entries through `window.history` and gets
//! them back through `popstate`. [`MemoryHistory`] keeps the same stack in
//! memory for the terminal front-end and tests.

use super::location::HistoryEntry;

pub trait HistoryBackend {
    /// Record `entry` at `url`, discarding any forward entries
    fn push(&mut self, entry: &HistoryEntry, url: &str);

    /// Step back one entry.
    ///
    /// Returns the entry to replay, or `None` if there is nothing to go
    /// back to or the backend reports it later (a browser `popstate`).
    fn back(&mut self) -> Option<HistoryEntry>;
}

/// In-memory history stack with a cursor
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Vec<(HistoryEntry, String)>,
    cursor: Option<usize>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step forward one entry, returning it for replay
    pub fn forward(&mut self) -> Option<HistoryEntry> {
        let next = self.cursor.map_or(0, |c| c + 1);
        let (entry, _) = self.entries.get(next)?;
        self.cursor = Some(next);
        Some(entry.clone())
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.cursor
            .and_then(|c| self.entries.get(c))
            .map(|(entry, _)| entry)
    }

    /// URL of the current entry (the address bar)
    pub fn current_url(&self) -> Option<&str> {
        self.cursor
            .and_then(|c| self.entries.get(c))
            .map(|(_, url)| url.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HistoryBackend for MemoryHistory {
    fn push(&mut self, entry: &HistoryEntry, url: &str) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push((entry.clone(), url.to_string()));
        self.cursor = Some(self.entries.len() - 1);
    }

    fn back(&mut self) -> Option<HistoryEntry> {
        let prev = self.cursor?.checked_sub(1)?;
        self.cursor = Some(prev);
        Some(self.entries[prev].0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{NavParams, Page};

    fn entry(page: Page) -> HistoryEntry {
        HistoryEntry::new(page, NavParams::new())
    }

    #[test]
    fn test_push_back_forward() {
        let mut history = MemoryHistory::new();
        assert!(history.back().is_none());

        history.push(&entry(Page::Login), "?page=login");
        history.push(&entry(Page::Dashboard), "?page=dashboard");
        assert_eq!(history.current_url(), Some("?page=dashboard"));

        assert_eq!(history.back(), Some(entry(Page::Login)));
        assert!(history.back().is_none());
        assert_eq!(history.forward(), Some(entry(Page::Dashboard)));
        assert!(history.forward().is_none());
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = MemoryHistory::new();
        history.push(&entry(Page::Login), "?page=login");
        history.push(&entry(Page::Dashboard), "?page=dashboard");
        history.back();

        history.push(&entry(Page::MedicationHistory), "?page=medication-history");
        assert_eq!(history.len(), 2);
        assert!(history.forward().is_none());
        assert_eq!(history.current(), Some(&entry(Page::MedicationHistory)));
    }
}
