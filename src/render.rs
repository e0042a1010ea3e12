//! Terminal rendering
//!
//! Paints command outcomes as plain text with ANSI colors.

use std::fmt::Write;

use linedit_editor::commands::NumberedLine;
use linedit_editor::{HighlightedLine, Outcome};

const RESET: &str = "\x1b[0m";

/// Render numbered lines as `N: text`
pub fn numbered(lines: &[NumberedLine]) -> String {
    let mut out = String::new();
    for (number, line) in lines {
        let _ = writeln!(out, "{}: {}", number, line);
    }
    out
}

/// Render highlighted lines, painting styled tokens
pub fn highlighted(lines: &[HighlightedLine], show_line_numbers: bool) -> String {
    let mut out = String::new();
    for line in lines {
        if show_line_numbers {
            let _ = write!(out, "{}: ", line.number);
        }
        let tokens: Vec<String> = line
            .tokens
            .iter()
            .map(|token| match token.style {
                Some(style) if !style.ansi_prefix().is_empty() => {
                    format!("{}{}{}", style.ansi_prefix(), token.text, RESET)
                }
                _ => token.text.clone(),
            })
            .collect();
        out.push_str(&tokens.join(" "));
        out.push('\n');
    }
    out
}

/// Render the result of a command
pub fn outcome(outcome: &Outcome, show_line_numbers: bool) -> String {
    match outcome {
        Outcome::Opened { path, lines } => format!(
            "The file {:?} opened successfully.\nFile content of {}:\n\n{}",
            path,
            path.display(),
            numbered(lines)
        ),
        Outcome::Created(path) => format!("File {:?} created successfully.\n", path),
        Outcome::Saved(path) => format!("File {:?} has been saved successfully.\n", path),
        Outcome::Closed => "File closed.\n".to_string(),
        Outcome::Inserted { offset } => format!("Text inserted at position {}.\n", offset),
        Outcome::Deleted { text } => format!("Deleted {} bytes.\n", text.len()),
        Outcome::Copied { length } => format!("Copied {} bytes to clipboard.\n", length),
        Outcome::Pasted { offset, length } => {
            format!("Pasted {} bytes at position {}.\n", length, offset)
        }
        Outcome::Found(Some(offset)) => format!("Text found at position: {}\n", offset),
        Outcome::Found(None) => "Text not found.\n".to_string(),
        Outcome::Replaced(count) => format!("Replaced {} occurrences.\n", count),
        Outcome::Line { number, text } => format!("Line {}: {}\n", number, text),
        Outcome::Scrolled { first_line, lines } => {
            format!("-- from line {} --\n{}", first_line, numbered(lines))
        }
        Outcome::Highlighted(lines) => highlighted(lines, show_line_numbers),
        Outcome::Status(status) => format!("{}\n", status),
        Outcome::Undone => "Last action undone.\n".to_string(),
        Outcome::Redone => "Last action redone.\n".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linedit_editor::SyntaxHighlighter;

    #[test]
    fn test_highlighted_paints_keywords() {
        let lines = SyntaxHighlighter::default().highlights("def f(x):\n  return   42\n");
        assert_eq!(
            highlighted(&lines, true),
            "1: \x1b[34mdef\x1b[0m f(x):\n2: \x1b[35mreturn\x1b[0m 42\n"
        );
        assert_eq!(highlighted(&lines[1..], false), "\x1b[35mreturn\x1b[0m 42\n");
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(outcome(&Outcome::Found(None), true), "Text not found.\n");
        assert_eq!(
            outcome(&Outcome::Line { number: 2, text: "b".into() }, true),
            "Line 2: b\n"
        );
        assert_eq!(
            numbered(&[(1, "a".to_string()), (2, String::new())]),
            "1: a\n2: \n"
        );
    }
}
