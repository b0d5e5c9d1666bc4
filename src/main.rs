//! nscache - command-line access to a namespaced cache
//!
//! Runs a single cache operation against the backend described by the
//! environment (see [`Config::from_env`]).

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nscache::{Cache, Config};

#[derive(Parser, Debug)]
#[command(name = "nscache", version, about = "Namespaced cache client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store a JSON value (bare text is stored as a string)
    Set {
        key: String,
        value: String,
        /// TTL in seconds, overriding CACHE_TTL
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// Print the value stored under a key, or null
    Get { key: String },
    /// Delete a key
    Del { key: String },
    /// Delete every key under the configured prefix
    Flush,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nscache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("failed to load configuration")?;
    let cache = Cache::from_config(&config).context("failed to build cache")?;
    info!(prefix = cache.prefix(), ttl = cache.ttl(), "cache ready");

    let output = match cli.command {
        Command::Set { key, value, ttl } => {
            let value: Value = serde_json::from_str(&value).unwrap_or(Value::String(value));
            cache.set(&key, &value, ttl).await?;
            json!({ "key": key, "stored": true })
        }
        Command::Get { key } => cache.get(&key).await?.unwrap_or(Value::Null),
        Command::Del { key } => {
            cache.delete(&key).await?;
            json!({ "key": key, "deleted": true })
        }
        Command::Flush => {
            let removed = cache.flush().await?;
            json!({ "prefix": cache.prefix(), "removed": removed })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
