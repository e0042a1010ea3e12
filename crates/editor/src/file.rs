//! File Access
//!
//! Whole-file reads and writes. The editor never streams: a document is read
//! into memory at open and written out in full at save.

use std::path::Path;
use tracing::info;

use linedit_core::Result;

use crate::position::lines;

/// Read a document, normalizing every line to end in `\n`
pub async fn read_document(path: &Path) -> Result<String> {
    let raw = tokio::fs::read_to_string(path).await?;
    let content = normalize_line_endings(&raw);
    info!("Read {} bytes from {:?}", content.len(), path);
    Ok(content)
}

/// Write the buffer text verbatim
pub async fn write_document(path: &Path, content: &str) -> Result<()> {
    tokio::fs::write(path, content).await?;
    info!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}

/// Create an empty document, truncating any existing file
pub async fn create_document(path: &Path) -> Result<()> {
    tokio::fs::File::create(path).await?;
    info!("Created {:?}", path);
    Ok(())
}

/// Terminate every line with a bare `\n`, dropping `\r` before it
pub fn normalize_line_endings(raw: &str) -> String {
    let mut content = String::with_capacity(raw.len() + 1);
    for line in lines(raw) {
        content.push_str(line.strip_suffix('\r').unwrap_or(line));
        content.push('\n');
    }
    content
}
