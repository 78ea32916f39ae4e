//! CLI helper for checking request log configuration.
//!
//! # Usage
//!
//! ```bash
//! # Redact a JSON document with LOG_FILTERED_KEYS plus extra keys
//! echo '{"user":{"password":"x"}}' | cargo run --bin logctl -- filter --key token
//!
//! # Print the record a synthetic request would produce
//! cargo run --bin logctl -- sample --debug
//!
//! # Show the effective configuration
//! cargo run --bin logctl -- config
//! ```
//!
//! # Environment Variables
//!
//! Same as the server, see `request_json_logger::config`.

use request_json_logger::LogOptions;
use request_json_logger::application::record_assembler::assemble;
use request_json_logger::config::{self, Config};
use request_json_logger::domain::{HandlerId, LogLevel, RequestContext, UploadedFile};
use request_json_logger::utils::value_filter::filter_value;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

/// CLI tool for inspecting request log output.
#[derive(Parser)]
#[command(name = "logctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Redact a JSON document the way request params are redacted
    Filter {
        /// Input file (reads stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Extra sensitive key, may be repeated
        #[arg(short = 'k', long = "key")]
        keys: Vec<String>,
    },

    /// Print the record produced for a synthetic request
    Sample {
        /// Include client_ip, client_version and params
        #[arg(long)]
        debug: bool,

        /// Request path of the synthetic request
        #[arg(long, default_value = "/orders/42")]
        path: String,
    },

    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Filter { file, keys } => filter(&config, file, keys)?,
        Commands::Sample { debug, path } => sample(&config, debug, path)?,
        Commands::Config => show_config(&config),
    }

    Ok(())
}

/// Reads JSON from a file or stdin and prints it redacted.
fn filter(config: &Config, file: Option<PathBuf>, keys: Vec<String>) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let value: Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;

    let mut sensitive = config.filter.filtered_keys.clone();
    sensitive.extend(keys);

    println!("{}", serde_json::to_string_pretty(&filter_value(&value, &sensitive))?);
    Ok(())
}

/// Prints the lifecycle record of a made-up request.
fn sample(config: &Config, debug: bool, path: String) -> Result<()> {
    let started = Instant::now();

    let ctx = RequestContext::new("POST", path)
        .with_status(200)
        .with_header("accept", "application/json")
        .with_header("x-forwarded-for", "209.49.75.165, 10.0.0.1")
        .with_header("user-agent", "logctl/sample")
        .with_request_id("sample-request")
        .with_handler(HandlerId::new("Orders", "show"))
        .with_param(
            "user",
            json!({"username": "me", "password": "secret", "token": "abc"}),
        )
        .with_param(
            "avatar",
            UploadedFile::new(Some("image/png"), Some("me.png"), Some("/tmp/upload-1")),
        );

    let level = if debug {
        LogLevel::Debug
    } else {
        config.request_log_level
    };
    let options = LogOptions::new(level).include_debug_logging(config.include_debug_logging);

    let record = assemble(&ctx, Some(started), &options, &config.filter);

    println!("{}", "📝 Sample request record".bright_blue().bold());
    println!();
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Prints the configuration relevant to request records.
fn show_config(config: &Config) {
    println!("{}", "⚙️  Request log configuration".bright_blue().bold());
    println!();
    row("Level:", config.request_log_level.to_string());
    row("Start records:", config.log_request.to_string());
    row("Forced debug fields:", config.include_debug_logging.to_string());
    row("Request id header:", config.request_id_header.clone());
    row("Filtered keys:", list(&config.filter.filtered_keys));
    row("Suppressed fields:", list(&config.filter.suppressed_fields));
}

fn row(label: &str, value: String) {
    println!("  {} {}", format!("{label:<22}").bold(), value.yellow());
}

fn list(set: &HashSet<String>) -> String {
    let mut items: Vec<&str> = set.iter().map(String::as_str).collect();
    items.sort_unstable();
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
