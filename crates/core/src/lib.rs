//! linedit Core - shared types
//!
//! This crate provides the error type, display styles and configuration
//! shared by the editing engine and the command-line front end.

pub mod config;
pub mod error;
pub mod style;

pub use config::{AppConfig, EditorConfig, HighlightConfig};
pub use error::{EditorError, Result};
pub use style::{Color, KeywordTable, Style};

/// linedit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "linedit";
