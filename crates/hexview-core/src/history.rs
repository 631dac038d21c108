//! Search history with ArrowUp/ArrowDown recall.

/// Most entries kept.
pub const HISTORY_LIMIT: usize = 10;

/// Committed search inputs, most recent first, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchHistory {
    entries: Vec<String>,
    recall: Option<usize>,
}

impl SearchHistory {
    /// Restore persisted entries (most recent first). Blanks and duplicates are dropped.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut history = Self::default();
        let mut restored: Vec<String> = entries.into_iter().map(Into::into).collect();
        restored.reverse();
        for entry in restored {
            history = history.push(&entry);
        }
        history
    }

    /// Record a committed input.
    pub fn push(mut self, input: &str) -> Self {
        if input.trim().is_empty() {
            return self;
        }
        self.entries.retain(|entry| entry != input);
        self.entries.insert(0, input.to_string());
        self.entries.truncate(HISTORY_LIMIT);
        self.recall = None;
        self
    }

    /// Step back in time, stopping at the oldest entry.
    pub fn recall_older(mut self) -> Self {
        if self.entries.is_empty() {
            return self;
        }
        self.recall = Some(match self.recall {
            None => 0,
            Some(i) => (i + 1).min(self.entries.len() - 1),
        });
        self
    }

    /// Step forward in time. Past the newest entry the recall ends.
    pub fn recall_newer(mut self) -> Self {
        self.recall = self.recall.and_then(|i| i.checked_sub(1));
        self
    }

    /// The recalled entry, if recall is active.
    pub fn current(&self) -> Option<&str> {
        self.recall
            .and_then(|i| self.entries.get(i))
            .map(String::as_str)
    }

    /// Forget the recall position (the user typed something).
    pub fn reset_recall(self) -> Self {
        Self {
            recall: None,
            ..self
        }
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Position of the recalled entry.
    pub fn recall_position(&self) -> Option<usize> {
        self.recall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_dedup_and_limit() {
        let mut history = SearchHistory::default();
        for i in 0..12 {
            history = history.push(&format!("text:{i}"));
        }
        history = history.push("text:5").push("   ");
        assert_eq!(history.entries().len(), HISTORY_LIMIT);
        assert_eq!(history.entries()[0], "text:5");
        assert_eq!(
            history.entries().iter().filter(|e| *e == "text:5").count(),
            1
        );
        assert!(!history.entries().contains(&"text:0".to_string()));
    }

    #[test]
    fn test_recall() {
        let history = SearchHistory::from_entries(["hex:41", "text:a"]);
        assert_eq!(history.entries(), &["hex:41", "text:a"]);
        assert_eq!(history.current(), None);

        let history = history.recall_older();
        assert_eq!(history.current(), Some("hex:41"));
        let history = history.recall_older().recall_older();
        assert_eq!(history.current(), Some("text:a"));
        let history = history.recall_newer();
        assert_eq!(history.current(), Some("hex:41"));
        let history = history.recall_newer();
        assert_eq!(history.current(), None);
        assert_eq!(history.recall_position(), None);
        assert_eq!(history.clone().recall_newer(), history);
    }
}
