//! Entry point for kawa, a pipeline-friendly LLM query tool for the terminal.
//!
//! This binary loads environment variables, parses CLI arguments via [`cli`],
//! and dispatches to the appropriate subcommand handler.

mod cli;
mod config;
mod constants;
mod error;
mod fetch;
mod models;
mod options;
mod prompt;
mod prompts;
mod provider;

use anyhow::Result;

/// Runs the kawa CLI.
///
/// Loads `.env` files (silently ignored if absent), parses command-line
/// arguments into a [`cli::Cli`] struct, and dispatches the chosen
/// subcommand via [`cli::run`].
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = cli::parse();
    cli::run(cli).await
}
