//! # ig-publish
//!
//! Command line front end of the implementation guide registry. The record
//! handling lives in `ig-registry`; this crate adds argument parsing,
//! logging, and the filesystem side of a publish (versioned copies and zip
//! archives).

#![warn(clippy::all)]

pub mod archive;
pub mod cli;
pub mod config;
pub mod logging;
pub mod publish;

use anyhow::{Context, Result};
use clap::CommandFactory;
use ig_registry::registry::render_history;
use tracing::info;

pub use cli::{Cli, Command, RegistryArgs};
pub use config::PublishConfig;
pub use publish::{publish, publish_at, PublishReport};

/// Run a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Publish {
            project_dir,
            registry,
        }) => {
            let config = PublishConfig::resolve(project_dir, registry)?;
            let report = publish(&config)?;
            info!(
                package = %report.publication.edition.package,
                "published"
            );
        }
        Some(Command::RenderList { registry }) => {
            let config = PublishConfig::resolve(None, registry)?;
            config
                .registry
                .render_list(&config.list_title)
                .with_context(|| {
                    format!("cannot render list in {}", config.registry_dir().display())
                })?;
        }
        Some(Command::RenderHistory { history }) => {
            render_history(&history)
                .with_context(|| format!("cannot render {}", history.display()))?;
        }
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            Cli::command().print_help()?;
        }
    }
    Ok(())
}
