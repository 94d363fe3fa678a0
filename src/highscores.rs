//! High score leaderboard
//!
//! In-memory only: every submitted score is kept, ordered by descending score
//! with ties in submission order.

use serde::{Deserialize, Serialize};

/// A single submitted score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
}

/// Leaderboard of submitted scores
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a score, returning the rank achieved (1-indexed)
    pub fn submit(&mut self, name: impl Into<String>, score: u64) -> usize {
        // Insert after every entry with an equal or higher score (stable)
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            pos,
            ScoreEntry {
                name: name.into(),
                score,
            },
        );
        pos + 1
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Scoreboard page body
    pub fn render(&self) -> String {
        let mut out = String::from("<h1>scoreboard</h1>\n");
        if self.entries.is_empty() {
            out.push_str("<p>no score recorded</p>");
        } else {
            out.push_str("<ol>\n");
            for entry in &self.entries {
                out.push_str(&format!("<li>{} : {}</li>\n", entry.name, entry.score));
            }
            out.push_str("</ol>");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_descending() {
        let mut board = Leaderboard::new();
        assert_eq!(board.submit("ann", 12), 1);
        assert_eq!(board.submit("bob", 30), 1);
        assert_eq!(board.submit("cy", 3), 3);
        let scores: Vec<u64> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![30, 12, 3]);
        assert_eq!(board.top_score(), Some(30));
    }

    #[test]
    fn test_ties_keep_submission_order() {
        let mut board = Leaderboard::new();
        board.submit("first", 10);
        board.submit("second", 10);
        assert_eq!(board.submit("third", 10), 3);
        let names: Vec<&str> = board.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_render() {
        let mut board = Leaderboard::new();
        assert_eq!(board.render(), "<h1>scoreboard</h1>\n<p>no score recorded</p>");
        board.submit("ann", 8);
        board.submit("bob", 21);
        assert_eq!(
            board.render(),
            "<h1>scoreboard</h1>\n<ol>\n<li>bob : 21</li>\n<li>ann : 8</li>\n</ol>"
        );
    }

    #[test]
    fn test_clear() {
        let mut board = Leaderboard::new();
        board.submit("ann", 1);
        board.clear();
        assert!(board.is_empty());
        assert_eq!(board.top_score(), None);
    }
}
