//! Syntax Highlighting
//!
//! Lexical highlighting: each line is split on whitespace and every token is
//! classified as a number, a configured keyword, or plain text. No parsing.

use once_cell::sync::Lazy;
use regex::Regex;

use linedit_core::{KeywordTable, Style};

use crate::position::lines;

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("number pattern is valid"));

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Keyword,
    Plain,
}

/// A classified token and the style to paint it with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub style: Option<Style>,
}

/// One rendered line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedLine {
    /// 1-based line number
    pub number: usize,
    pub tokens: Vec<Token>,
}

/// Keyword highlighter for one language profile
#[derive(Debug, Clone)]
pub struct SyntaxHighlighter {
    keywords: KeywordTable,
}

impl SyntaxHighlighter {
    pub fn new(keywords: KeywordTable) -> Self {
        Self { keywords }
    }

    /// Classify a single whitespace-free token
    pub fn classify(&self, token: &str) -> (TokenKind, Option<Style>) {
        if NUMBER.is_match(token) {
            return (TokenKind::Number, None);
        }
        match self.keywords.get(token) {
            Some(style) => (TokenKind::Keyword, Some(style)),
            None => (TokenKind::Plain, None),
        }
    }

    /// Highlight one line
    pub fn highlight_line(&self, number: usize, line: &str) -> HighlightedLine {
        let tokens = line
            .split_whitespace()
            .map(|text| {
                let (kind, style) = self.classify(text);
                Token {
                    text: text.to_string(),
                    kind,
                    style,
                }
            })
            .collect();
        HighlightedLine { number, tokens }
    }

    /// Highlight every line of `text`, numbering from 1
    pub fn highlights(&self, text: &str) -> Vec<HighlightedLine> {
        lines(text)
            .enumerate()
            .map(|(i, line)| self.highlight_line(i + 1, line))
            .collect()
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(KeywordTable::python())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linedit_core::Color;

    #[test]
    fn test_classify() {
        let highlighter = SyntaxHighlighter::default();
        assert_eq!(highlighter.classify("42"), (TokenKind::Number, None));
        assert_eq!(highlighter.classify("3.14"), (TokenKind::Number, None));
        assert_eq!(highlighter.classify("3."), (TokenKind::Plain, None));
        assert_eq!(highlighter.classify("x1"), (TokenKind::Plain, None));
        assert_eq!(
            highlighter.classify("def"),
            (TokenKind::Keyword, Some(Style::fg(Color::Blue)))
        );
        assert_eq!(highlighter.classify("def:"), (TokenKind::Plain, None));
    }

    #[test]
    fn test_highlights_preserve_order() {
        let highlighter = SyntaxHighlighter::default();
        let lines = highlighter.highlights("def  f(x):\n    return 1.5\n\nx\n");

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].number, 1);
        let texts: Vec<&str> = lines[0].tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["def", "f(x):"]);
        assert_eq!(lines[0].tokens[0].kind, TokenKind::Keyword);

        assert_eq!(lines[1].tokens[0].style, Some(Style::fg(Color::Magenta)));
        assert_eq!(lines[1].tokens[1].kind, TokenKind::Number);
        assert!(lines[2].tokens.is_empty());
        assert_eq!(lines[3].number, 4);
    }

    #[test]
    fn test_custom_profile() {
        let mut table = KeywordTable::new();
        table.insert("fn", Style::fg(Color::Green));
        let highlighter = SyntaxHighlighter::new(table);

        let line = highlighter.highlight_line(7, "pub fn main");
        assert_eq!(line.number, 7);
        assert_eq!(line.tokens[0].style, None);
        assert_eq!(line.tokens[1].style, Some(Style::fg(Color::Green)));
    }

    #[test]
    fn test_empty_text() {
        assert!(SyntaxHighlighter::default().highlights("").is_empty());
    }
}
