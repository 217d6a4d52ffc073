//! Command-line interface.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::{AppConfig, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "keystone-overrides",
    version,
    about = "Resolve Keystone endpoint overrides from a labeled secret"
)]
pub struct Cli {
    /// Path to a YAML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up the override secret and print the resolved overrides as JSON.
    Resolve(ResolveArgs),
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Namespace to search.
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Label selector identifying the override secret.
    #[arg(short = 'l', long)]
    pub selector: Option<String>,

    /// Deadline for the whole call, e.g. `5s` or `1m`.
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,
}

impl Cli {
    /// Fold flag values over the loaded configuration.
    pub fn apply_to(&self, cfg: &mut AppConfig) {
        if self.json_logs {
            cfg.logging.format = LogFormat::Json;
        }

        match &self.command {
            Command::Resolve(args) => {
                if let Some(ns) = &args.namespace {
                    cfg.namespace.clone_from(ns);
                }
                if let Some(sel) = &args.selector {
                    cfg.label_selector.clone_from(sel);
                }
            }
        }
    }
}
