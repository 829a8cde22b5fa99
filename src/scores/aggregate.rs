use std::collections::HashMap;

use super::parse::ScoreEntry;

/// Scores collected across all processed screenshots.
///
/// Keyed by corrected player name. A later insert for the same name replaces
/// the score but keeps the name's original position.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
    index: HashMap<String, usize>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a score, replacing any earlier one for the same name.
    pub fn insert(&mut self, name: &str, score: &str) {
        match self.index.get(name) {
            Some(&i) => self.entries[i].score = score.to_string(),
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push(ScoreEntry {
                    name: name.to_string(),
                    score: score.to_string(),
                });
            }
        }
    }

    pub fn extend<'a>(&mut self, entries: impl IntoIterator<Item = &'a ScoreEntry>) {
        for entry in entries {
            self.insert(&entry.name, &entry.score);
        }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|&i| self.entries[i].score.as_str())
    }

    /// Entries sorted by name, ignoring case. Names that compare equal keep
    /// their insertion order.
    pub fn export(&self) -> Vec<ScoreEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_cached_key(|e| e.name.to_lowercase());
        sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[ScoreEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_last_insert_wins() {
        let mut board = Leaderboard::new();
        board.insert("Alice", "12.5M");
        board.insert("Bob", "3B");
        board.insert("Alice", "13.1M");

        assert_eq!(board.len(), 2);
        assert_eq!(board.get("Alice"), Some("13.1M"));
        assert_eq!(board.get("Bob"), Some("3B"));
        assert_eq!(board.get("Carol"), None);
    }

    #[test]
    fn test_export_sorted_case_insensitive() {
        let mut board = Leaderboard::new();
        for name in ["charlie", "Bob", "alice", "Dave"] {
            board.insert(name, "1M");
        }

        assert_eq!(names(&board.export()), vec!["alice", "Bob", "charlie", "Dave"]);
    }

    #[test]
    fn test_export_ties_keep_insertion_order() {
        let mut board = Leaderboard::new();
        board.insert("bob", "1M");
        board.insert("Bob", "2M");
        board.insert("BOB", "3M");
        board.insert("bob", "4M");

        let exported = board.export();
        assert_eq!(names(&exported), vec!["bob", "Bob", "BOB"]);
        assert_eq!(exported[0].score, "4M");
    }

    #[test]
    fn test_extend() {
        let mut board = Leaderboard::new();
        let batch = vec![
            ScoreEntry {
                name: "Alice".to_string(),
                score: "1M".to_string(),
            },
            ScoreEntry {
                name: "Alice".to_string(),
                score: "2M".to_string(),
            },
        ];
        board.extend(&batch);
        assert_eq!(board.len(), 1);
        assert_eq!(board.get("Alice"), Some("2M"));
        assert!(!board.is_empty());
    }
}
