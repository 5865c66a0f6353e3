//! Terminal host for the task list client.
//!
//! Renders lists and tasks as text, reads commands line by line and hands
//! them to the client core. Type `help` for the command list.

mod commands;
mod terminal;

use std::io::{self, BufRead, Write};

use clap::Parser;
use tasklist_core::{ClientConfig, ReorderController};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::{Flow, Line, Session};
use terminal::{StdinPrompt, TerminalView};

#[derive(Debug, Parser)]
#[command(name = "tasklist", about = "Manage task lists stored on a remote server")]
struct Cli {
    /// Base URL of the API; defaults to $TASKLIST_API_URL or the local mock server
    #[arg(long)]
    url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.url.map(ClientConfig::new).unwrap_or_else(ClientConfig::from_env);
    let mut state = tasklist_core::connect(&config, TerminalView::stdout());
    info!(base_url = %state.gateway().client().base_url(), "starting");
    let mut prompt = StdinPrompt;
    let mut reorder = ReorderController::new();

    if let Err(err) = state.load_lists() {
        eprintln!("error: {err}");
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let words: Vec<&str> = input.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        let line = match Line::try_parse_from(words) {
            Ok(line) => line,
            Err(err) => {
                let _ = err.print();
                continue;
            }
        };

        let mut session = Session {
            state: &mut state,
            prompt: &mut prompt,
            reorder: &mut reorder,
        };
        match session.run(line.command) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            // Failures are reported and the session stays usable.
            Err(err) => eprintln!("error: {err}"),
        }
    }
    Ok(())
}
