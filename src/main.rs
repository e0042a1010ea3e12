//! linedit - line-oriented terminal text editor
//!
//! Main application entry point: sets up logging and configuration, then
//! runs the interactive command loop.

mod commands;
mod render;

use std::io::Write;
use std::path::PathBuf;
use anyhow::Result;
use tokio::io::{BufReader, Stdin};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use linedit_core::{AppConfig, APP_NAME, VERSION};
use linedit_editor::{Command, Session};

use crate::commands::{Input, HELP};

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("{} v{} starting...", APP_NAME, VERSION);

    let config = load_config().await?;
    let mut session = Session::new(&config);
    let show_line_numbers = config.editor.show_line_numbers;

    println!("Welcome to {} v{}! Type \"help\" for commands.", APP_NAME, VERSION);

    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        run_command(&mut session, Command::Open(path), show_line_numbers).await;
    }

    let mut input = BufReader::new(tokio::io::stdin());
    loop {
        prompt("Enter command: ")?;
        let line = match commands::read_line(&mut input).await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                println!("Error: {}", e);
                break;
            }
        };

        match commands::parse(&line) {
            Ok(Input::Empty) => {}
            Ok(Input::Help) => println!("{}", HELP),
            Ok(Input::Quit) => break,
            Ok(Input::Command(Command::Close { .. })) => {
                let save_changes = confirm_save(&session, &mut input).await?;
                run_command(&mut session, Command::Close { save_changes }, show_line_numbers)
                    .await;
            }
            Ok(Input::Command(command)) => {
                run_command(&mut session, command, show_line_numbers).await;
            }
            Err(e) => println!("Error: {}", e),
        }
    }

    if session.buffer().is_modified() {
        warn!("Exiting with unsaved changes");
    }
    Ok(())
}

/// Load configuration, falling back to defaults if the file cannot be written
async fn load_config() -> Result<AppConfig> {
    match AppConfig::load().await {
        Ok(config) => Ok(config),
        Err(e) if e.is_recoverable() => {
            warn!("Using default configuration: {}", e);
            Ok(AppConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Execute one command and print its outcome, or the error, plus the status
async fn run_command(session: &mut Session, command: Command, show_line_numbers: bool) {
    let reports_status = command.reports_status();
    match session.execute(command).await {
        Ok(outcome) => {
            print!("{}", render::outcome(&outcome, show_line_numbers));
            if reports_status {
                println!("{}", session.status());
            }
        }
        Err(e) => {
            if e.is_recoverable() {
                debug!("{}", e);
            } else {
                warn!("{}", e);
            }
            println!("Error: {}", e.user_message());
        }
    }
}

/// Ask whether unsaved changes should be written before closing
async fn confirm_save(session: &Session, input: &mut BufReader<Stdin>) -> Result<bool> {
    if !session.buffer().is_modified() {
        return Ok(false);
    }

    let name = session
        .buffer()
        .file()
        .name()
        .unwrap_or_else(|| "the buffer".to_string());
    prompt(&format!(
        "There are unsaved changes in {}. Do you want to save them? (yes/no): ",
        name
    ))?;
    let answer = match commands::read_line(input).await {
        Ok(answer) => answer.unwrap_or_default(),
        Err(e) => {
            warn!("Failed to read answer, keeping the file unsaved: {}", e);
            String::new()
        }
    };
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}

fn prompt(text: &str) -> Result<()> {
    print!("{}", text);
    std::io::stdout().flush()?;
    Ok(())
}
