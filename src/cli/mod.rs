//! Command-line interface definition and dispatch for kawa.
//!
//! Uses [`clap`] for argument parsing with derive macros. The four
//! query-style commands share one execution pipeline in the [`execute`]
//! submodule and differ only in the system prompt they send; `models` is
//! local. Running with no subcommand behaves like `query` so bare pipelines
//! (`echo hi | kawa`) keep working.

mod execute;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::constants::DEFAULT_MODEL;
use crate::models;
use crate::prompts;
use crate::provider::ALL_PROVIDERS;

/// Top-level CLI structure for kawa.
///
/// Parsed from command-line arguments via [`clap::Parser`]. The model and
/// temperature flags are global so they work with and without a subcommand.
#[derive(Parser)]
#[command(
    name = "kawa",
    about = "Query LLM providers from the terminal, pipeline style",
    long_about = "Kawa sends a prompt assembled from stdin, files, and URLs to an LLM \
                  and prints the response on stdout, so queries compose with shell \
                  pipelines. The query, plan, code, and review commands differ only in \
                  the system prompt they attach."
)]
pub struct Cli {
    /// Model to use (overrides config)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Temperature on a 0..100 scale (overrides config)
    #[arg(short, long, global = true)]
    pub temperature: Option<f32>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Files or URLs appended to the prompt when no command is given
    #[arg(value_name = "FILE|URL")]
    pub references: Vec<String>,
}

/// Available subcommands for the kawa CLI.
///
/// The `///` doc comments on variants double as `--help` text rendered by
/// clap.
#[derive(Subcommand)]
pub enum Commands {
    /// Send an arbitrary query to the LLM
    Query {
        /// Files or URLs appended to the prompt, in order
        #[arg(value_name = "FILE|URL")]
        references: Vec<String>,
    },
    /// Ask the LLM for an implementation plan
    Plan {
        /// Files or URLs appended to the prompt, in order
        #[arg(value_name = "FILE|URL")]
        references: Vec<String>,
    },
    /// Ask the LLM to generate source code
    Code {
        /// Files or URLs appended to the prompt, in order
        #[arg(value_name = "FILE|URL")]
        references: Vec<String>,
    },
    /// Ask the LLM to review source code
    Review {
        /// Files or URLs appended to the prompt, in order
        #[arg(value_name = "FILE|URL")]
        references: Vec<String>,
    },
    /// List supported models grouped by provider
    Models,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid
/// input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its handler.
pub async fn run(cli: Cli) -> Result<()> {
    let overrides = execute::Overrides {
        model: cli.model,
        temperature: cli.temperature,
    };

    match cli.command {
        None => respond(prompts::QUERY, &cli.references, &overrides).await,
        Some(Commands::Query { references }) => {
            respond(prompts::QUERY, &references, &overrides).await
        }
        Some(Commands::Plan { references }) => {
            respond(prompts::PLAN, &references, &overrides).await
        }
        Some(Commands::Code { references }) => {
            respond(prompts::CODE, &references, &overrides).await
        }
        Some(Commands::Review { references }) => {
            respond(prompts::REVIEW, &references, &overrides).await
        }
        Some(Commands::Models) => list_models(),
    }
}

/// Runs one query and prints the response to stdout with a final newline.
async fn respond(
    system: &str,
    references: &[String],
    overrides: &execute::Overrides,
) -> Result<()> {
    let response = execute::run_query(system, references, overrides).await?;
    println!("{response}");
    Ok(())
}

/// List all registered models, grouped by provider.
fn list_models() -> Result<()> {
    println!("Available models:\n");

    let mut first = true;
    for kind in ALL_PROVIDERS {
        if !first {
            println!();
        }
        first = false;

        println!("  {kind}:");
        for info in models::all().filter(|m| m.provider == *kind) {
            let marker = if info.name == DEFAULT_MODEL {
                " (default)"
            } else {
                ""
            };
            println!("    {}{marker}", info.name);
        }
    }

    Ok(())
}
