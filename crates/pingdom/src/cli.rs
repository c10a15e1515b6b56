//! Command-line front end for the `pingdom` binary

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::Level;

use crate::{load_config, Check, ClientConfig, MessageResponse, PingdomClient, Result};

#[derive(Debug, Parser)]
#[command(name = "pingdom")]
#[command(about = "Manage Pingdom uptime checks")]
#[command(version)]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    pub log_level: Level,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List all checks
    List,
    /// Create an HTTP check
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        host: String,
    },
    /// Show a single check
    Read { id: u64 },
    /// Change the name and/or host of a check
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        host: Option<String>,
    },
    /// Delete a check
    Delete { id: u64 },
}

/// Resolve configuration, build a client and run the requested command
pub async fn run<W: Write>(args: Args, out: &mut W) -> Result<()> {
    tracing::debug!(
        "Parsed command line arguments: config={:?}, base_url={:?}, log_level={:?}",
        args.config,
        args.base_url,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        ClientConfig::default()
    };

    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    config.resolve_secrets()?;

    let client = PingdomClient::from_config(&config)?;
    execute(&client, args.command, args.json, out).await
}

/// Run one command against `client`, writing its result to `out`
pub async fn execute<W: Write>(
    client: &PingdomClient,
    command: Command,
    json: bool,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::List => {
            let checks = client.list_checks().await?;
            if json {
                write_json(out, &checks)
            } else {
                checks.iter().try_for_each(|check| write_row(&mut *out, check))
            }
        }
        Command::Create { name, host } => {
            let created = client.create_check(&Check::new(name, host)).await?;
            tracing::info!("Created check {}", created.id);
            write_check(out, json, &created)
        }
        Command::Read { id } => {
            let check = client.read_check(id).await?;
            write_check(out, json, &check)
        }
        Command::Update { id, name, host } => {
            let check = update_target(client, id, name, host).await?;
            let response = client.update_check(id, &check).await?;
            write_message(out, json, &response)
        }
        Command::Delete { id } => {
            let response = client.delete_check(id).await?;
            write_message(out, json, &response)
        }
    }
}

/// Name and host to send for an update.
///
/// Fields not given on the command line keep their current server value, so
/// the check is read first unless both are supplied.
pub async fn update_target(
    client: &PingdomClient,
    id: u64,
    name: Option<String>,
    host: Option<String>,
) -> Result<Check> {
    match (name, host) {
        (Some(name), Some(host)) => Ok(Check::new(name, host)),
        (name, host) => {
            tracing::debug!("Fetching check {} to fill unchanged fields", id);
            let current = client.read_check(id).await?;
            Ok(Check::new(
                name.unwrap_or(current.name),
                host.unwrap_or(current.hostname),
            ))
        }
    }
}

fn write_row<W: Write>(out: &mut W, check: &Check) -> Result<()> {
    let status = check
        .status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    writeln!(out, "{}\t{}\t{}\t{}", check.id, check.name, check.hostname, status)?;
    Ok(())
}

fn write_check<W: Write>(out: &mut W, json: bool, check: &Check) -> Result<()> {
    if json {
        write_json(out, check)
    } else {
        write_row(out, check)
    }
}

fn write_message<W: Write>(out: &mut W, json: bool, response: &MessageResponse) -> Result<()> {
    if json {
        write_json(out, response)
    } else {
        writeln!(out, "{}", response.message)?;
        Ok(())
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
