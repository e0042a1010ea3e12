//! Command-line parsing for linedit
//!
//! Turns one line of operator input into an editor command.

use std::path::PathBuf;
use anyhow::{anyhow, bail, Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use linedit_editor::{Command, DeleteKind};

/// A parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Help,
    Quit,
    Empty,
}

pub const HELP: &str = "\
Commands:
  open PATH                     open a file
  create PATH                   create an empty file and edit it
  save [PATH]                   save to PATH or the current file
  close                         close the current file
  insert LINE COL TEXT          insert TEXT (\\n and \\t are unescaped)
  delete char LINE COL          delete one character
  delete line LINE COL          delete the line containing LINE:COL
  delete block LINE COL LEN     delete LEN bytes
  copy POS LEN                  copy LEN bytes at offset POS
  paste POS                     paste the clipboard at offset POS
  find TEXT                     find the first occurrence of TEXT
  replace OLD => NEW            replace every OLD with NEW
  goto LINE                     jump to a line
  scroll DELTA                  scroll the view by DELTA lines
  highlight                     show the buffer with keyword colors
  status                        show the status line
  undo | redo                   step through history
  quit                          leave the editor";

/// Read one line of operator input without its terminator.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// stray byte cannot end the session. Returns `None` at end of input.
pub async fn read_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> std::io::Result<Option<String>> {
    let mut raw = Vec::new();
    if reader.read_until(b'\n', &mut raw).await? == 0 {
        return Ok(None);
    }
    if raw.last() == Some(&b'\n') {
        raw.pop();
    }
    if raw.last() == Some(&b'\r') {
        raw.pop();
    }
    Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
}

/// Parse one line of input
pub fn parse(line: &str) -> Result<Input> {
    let Some((verb, rest)) = next_word(line) else {
        return Ok(Input::Empty);
    };

    let command = match verb {
        "help" => return Ok(Input::Help),
        "quit" | "exit" => return Ok(Input::Quit),
        "open" => Command::Open(path_arg(rest)?),
        "create" => Command::Create(path_arg(rest)?),
        "save" => {
            let rest = rest.trim();
            Command::Save((!rest.is_empty()).then(|| PathBuf::from(rest)))
        }
        "close" => Command::Close { save_changes: false },
        "insert" => {
            let (line, rest) = number_arg(rest, "line")?;
            let (column, rest) = number_arg(rest, "column")?;
            let text = rest.strip_prefix(char::is_whitespace).unwrap_or(rest);
            Command::Insert {
                line,
                column,
                text: unescape(text),
            }
        }
        "delete" => parse_delete(rest)?,
        "copy" => {
            let (offset, rest) = number_arg(rest, "position")?;
            let (length, _) = number_arg(rest, "length")?;
            Command::Copy { offset, length }
        }
        "paste" => Command::Paste {
            offset: number_arg(rest, "position")?.0,
        },
        "find" => Command::Find(text_arg(rest)?),
        "replace" => {
            let (old, new) = rest
                .trim_start()
                .split_once(" => ")
                .ok_or_else(|| anyhow!("usage: replace OLD => NEW"))?;
            Command::Replace {
                old: unescape(old),
                new: unescape(new),
            }
        }
        "goto" => Command::Goto(number_arg(rest, "line")?.0),
        "scroll" => {
            let (word, _) = next_word(rest).ok_or_else(|| anyhow!("missing scroll amount"))?;
            let delta = word
                .parse::<isize>()
                .with_context(|| format!("invalid scroll amount {:?}", word))?;
            Command::Scroll(delta)
        }
        "highlight" => Command::Highlight,
        "status" => Command::Status,
        "undo" => Command::Undo,
        "redo" => Command::Redo,
        other => bail!("Unknown command {:?} (try \"help\")", other),
    };
    Ok(Input::Command(command))
}

fn parse_delete(rest: &str) -> Result<Command> {
    let (kind, rest) = next_word(rest)
        .ok_or_else(|| anyhow!("usage: delete char|line|block LINE COL [LEN]"))?;
    let (line, rest) = number_arg(rest, "line")?;
    let (column, rest) = number_arg(rest, "column")?;
    let kind = match kind {
        "char" => DeleteKind::Char,
        "line" => DeleteKind::Line,
        "block" => DeleteKind::Block(number_arg(rest, "length")?.0),
        other => bail!("Invalid deletion type {:?}", other),
    };
    Ok(Command::Delete { kind, line, column })
}

/// Split off the first whitespace-delimited word
fn next_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    Some(input.split_once(char::is_whitespace).unwrap_or((input, "")))
}

fn number_arg<'a>(input: &'a str, what: &str) -> Result<(usize, &'a str)> {
    let (word, rest) = next_word(input).ok_or_else(|| anyhow!("missing {}", what))?;
    let value = word
        .parse()
        .with_context(|| format!("invalid {} {:?}", what, word))?;
    Ok((value, rest))
}

fn path_arg(input: &str) -> Result<PathBuf> {
    let path = input.trim();
    if path.is_empty() {
        bail!("missing file name");
    }
    Ok(PathBuf::from(path))
}

fn text_arg(input: &str) -> Result<String> {
    let text = input.strip_prefix(char::is_whitespace).unwrap_or(input);
    if text.is_empty() {
        bail!("missing text");
    }
    Ok(unescape(text))
}

/// Expand `\n`, `\t` and `\\` escapes
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
