//! CLI for resolving OSDF resources through the director.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use osdf_core::config;

use commands::{run_parse_link, run_plan, run_resolve};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "osdf")]
#[command(about = "Resolve OSDF resources to ordered cache endpoints", long_about = None)]
pub struct Cli {
    /// More detailed logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Ask the director about a resource and print its namespace and caches.
    Resolve {
        /// Resource path, e.g. /ospool/data/file.txt.
        resource: String,
        /// Director base URL (overrides config).
        #[arg(long, value_name = "URL")]
        director: Option<String>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print the ordered transfer attempts for a resource.
    Plan {
        /// Resource path, e.g. /ospool/data/file.txt.
        resource: String,
        /// Director base URL (overrides config).
        #[arg(long, value_name = "URL")]
        director: Option<String>,
        /// Expand only the N highest-priority caches (0 = all; default from config).
        #[arg(long, value_name = "N")]
        caches: Option<usize>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Parse a Link header value offline and print the caches in priority order.
    ParseLink {
        /// Raw header value, e.g. "<cache.example.org:8443>; pri=1".
        header: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            CliCommand::Resolve {
                resource,
                director,
                json,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_resolve(&cfg, &resource, director.as_deref(), json).await?;
            }
            CliCommand::Plan {
                resource,
                director,
                caches,
                json,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let max_caches = caches.unwrap_or(cfg.max_caches);
                run_plan(&cfg, &resource, director.as_deref(), max_caches, json).await?;
            }
            CliCommand::ParseLink { header } => run_parse_link(&header)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
