//! The shared execution pipeline behind the query-style commands.
//!
//! Every command that talks to a model runs the same steps: resolve the
//! model and temperature (CLI flag > config.toml > defaults), gather prompt
//! input from stdin and the named references, build the provider's wire
//! client from environment credentials, and send one query under a
//! cancellable context. Commands differ only in the system prompt they pass
//! in.

use anyhow::{Context, Result};
use colored::Colorize;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::constants::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, MAX_INPUT_TOTAL_BYTES};
use crate::fetch::{self, WebFetcher};
use crate::models;
use crate::options::QueryOptions;
use crate::prompt;
use crate::provider;

/// Flag-level overrides that win over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

/// Resolve which model to query.
/// Priority: CLI flag > config.toml > hardcoded default, then alias
/// expansion so shorthand names work everywhere a model can be named.
fn resolve_model(flag: Option<&str>, config: &Config) -> String {
    let name = flag
        .map(str::to_string)
        .or_else(|| config.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    models::resolve_alias(&name).to_string()
}

/// Resolve the temperature on the canonical 0..100 scale.
/// Priority: CLI flag > config.toml > hardcoded default. Range checking
/// happens later, in one place, when options are normalized per provider.
fn resolve_temperature(flag: Option<f32>, config: &Config) -> f32 {
    flag.or(config.temperature).unwrap_or(DEFAULT_TEMPERATURE)
}

/// Runs one query end to end and hands back the response text.
pub async fn run_query(
    system: &str,
    references: &[String],
    overrides: &Overrides,
) -> Result<String> {
    let config = Config::load()?;
    let model = resolve_model(overrides.model.as_deref(), &config);
    let temperature = resolve_temperature(overrides.temperature, &config);

    // Announce on stderr; stdout stays reserved for the response so the
    // command composes in pipelines.
    eprintln!("{} {}", "Using model :".dimmed(), model.as_str().yellow());

    let kind = models::provider_for(&model)?;
    let mut client = provider::build_client(kind)?;

    let stdin = fetch::read_piped_stdin(MAX_INPUT_TOTAL_BYTES)?;
    let fetcher = WebFetcher::new()?;
    let prompts = prompt::gather(stdin, references, &fetcher).await?;

    let options = QueryOptions::new(temperature, models::max_tokens_for(&model));

    // Ctrl-C flips the token and the in-flight request is dropped.
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    let response = client
        .query_text(&cancel, system, &prompts, &model, options)
        .await
        .with_context(|| format!("query to {model} failed"))?;
    client.close();

    Ok(response)
}
