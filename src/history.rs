use std::collections::VecDeque;

/// Fixed-capacity record of the most recent command lines.
///
/// Entries are kept in insertion order. Once the buffer is full, recording a new
/// line evicts the oldest one, so the newest entry is always last.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
}

impl History {
    /// Create an empty history holding at most `capacity` lines.
    ///
    /// A capacity of zero yields a history that records nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `line`, evicting the oldest entry when at capacity.
    pub fn record(&mut self, line: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                log::trace!("history full, evicting {:?}", evicted);
            }
        }
        self.entries.push_back(line.into());
    }

    /// Enumerate `(position, line)` pairs, oldest first, positions starting at 1.
    ///
    /// Every call walks the current contents afresh.
    pub fn list(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, line)| (i + 1, line.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently recorded line.
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(history: &History) -> Vec<String> {
        history.list().map(|(_, line)| line.to_string()).collect()
    }

    #[test]
    fn test_record_appends_last() {
        let mut history = History::new(3);
        for (i, line) in ["ls", "pwd", "date", "uptime", "whoami"].iter().enumerate() {
            let before = history.len();
            history.record(*line);
            assert_eq!(history.last(), Some(*line));
            assert_eq!(history.len(), (before + 1).min(3), "after record #{}", i);
        }
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut history = History::new(10);
        for i in 0..11 {
            history.record(format!("cmd{}", i));
        }

        let expected: Vec<String> = (1..11).map(|i| format!("cmd{}", i)).collect();
        assert_eq!(lines(&history), expected);
        assert!(!lines(&history).contains(&"cmd0".to_string()));
    }

    #[test]
    fn test_list_positions_start_at_one() {
        let mut history = History::new(10);
        history.record("ls");
        history.record("pwd");

        let listed: Vec<(usize, &str)> = history.list().collect();
        assert_eq!(listed, [(1, "ls"), (2, "pwd")]);
    }

    #[test]
    fn test_list_is_restartable() {
        let mut history = History::new(2);
        history.record("a");
        assert_eq!(history.list().count(), 1);
        assert_eq!(history.list().count(), 1);

        history.record("b");
        history.record("c");
        assert_eq!(lines(&history), ["b", "c"]);
        assert_eq!(lines(&history), ["b", "c"]);
    }

    #[test]
    fn test_empty_lines_are_kept() {
        let mut history = History::new(4);
        history.record("");
        history.record("   ");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_zero_capacity_records_nothing() {
        let mut history = History::new(0);
        history.record("ls");
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 0);
    }
}
