//! Display Styles
//!
//! Terminal colors and the keyword table used by the highlighter.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// ANSI terminal color
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
}

impl Color {
    /// SGR code when used as the foreground
    pub const fn fg_code(&self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
            Color::BrightRed => 91,
            Color::BrightGreen => 92,
            Color::BrightYellow => 93,
            Color::BrightBlue => 94,
            Color::BrightMagenta => 95,
            Color::BrightCyan => 96,
        }
    }

    /// SGR code when used as the background
    pub const fn bg_code(&self) -> u8 {
        self.fg_code() + 10
    }
}

/// How a token is painted
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<Color>,
}

impl Style {
    pub const fn fg(color: Color) -> Self {
        Self { fg: Some(color), bg: None }
    }

    pub const fn bg(color: Color) -> Self {
        Self { fg: None, bg: Some(color) }
    }

    /// SGR escape that switches this style on
    pub fn ansi_prefix(&self) -> String {
        let codes: Vec<String> = self
            .fg
            .iter()
            .map(|c| c.fg_code())
            .chain(self.bg.iter().map(|c| c.bg_code()))
            .map(|code| code.to_string())
            .collect();
        if codes.is_empty() {
            String::new()
        } else {
            format!("\x1b[{}m", codes.join(";"))
        }
    }
}

/// Keyword to style mapping for one language profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct KeywordTable {
    entries: BTreeMap<String, Style>,
}

impl KeywordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in Python profile
    pub fn python() -> Self {
        [
            ("import", Style::fg(Color::Red)),
            ("as", Style::fg(Color::Green)),
            ("from", Style::fg(Color::Yellow)),
            ("def", Style::fg(Color::Blue)),
            ("return", Style::fg(Color::Magenta)),
            ("if", Style::fg(Color::Cyan)),
            ("else", Style::fg(Color::BrightBlue)),
            ("for", Style::fg(Color::BrightMagenta)),
            ("while", Style::fg(Color::BrightCyan)),
            ("break", Style::fg(Color::BrightRed)),
            ("continue", Style::fg(Color::BrightGreen)),
            ("class", Style::fg(Color::BrightYellow)),
            ("try", Style::bg(Color::Red)),
            ("except", Style::bg(Color::Green)),
            ("raise", Style::bg(Color::Yellow)),
            ("in", Style::bg(Color::Blue)),
            ("not", Style::bg(Color::Magenta)),
            ("is", Style::bg(Color::Cyan)),
        ]
        .into_iter()
        .collect()
    }

    /// Look up the style of an exact keyword
    pub fn get(&self, keyword: &str) -> Option<Style> {
        self.entries.get(keyword).copied()
    }

    pub fn insert(&mut self, keyword: impl Into<String>, style: Style) {
        self.entries.insert(keyword.into(), style);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Style)> for KeywordTable {
    fn from_iter<I: IntoIterator<Item = (K, Style)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, s)| (k.into(), s)).collect(),
        }
    }
}
