//! Query tokenisation for keyword search.
//!
//! Matching is deliberately literal: strip grouping brackets, lower-case,
//! split on whitespace. No stemming, no stopword removal, no deduplication —
//! every token the user typed participates in matching.

/// A parsed search query: lower-cased whitespace tokens, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    tokens: Vec<String>,
}

impl SearchQuery {
    /// Parse a raw query string into tokens.
    ///
    /// Strips `(`, `)`, `[`, `]` — users paste regulation titles that contain
    /// them — then lower-cases and splits on Unicode whitespace. The result
    /// may be empty for blank or bracket-only input.
    pub fn parse(raw: &str) -> Self {
        let cleaned: String = raw
            .chars()
            .filter(|c| !matches!(c, '(' | ')' | '[' | ']'))
            .collect();
        let tokens = cleaned
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
