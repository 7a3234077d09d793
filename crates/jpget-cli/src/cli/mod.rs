//! CLI for jpget.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jpget_core::config::{self, JpgetConfig};
use jpget_core::coordinate::ArtifactRequest;
use std::path::PathBuf;

use commands::run_get;

/// Top-level CLI for the Jenkins plugin downloader.
#[derive(Debug, Parser)]
#[command(name = "jpget")]
#[command(about = "jpget: download a Jenkins plugin and all of its dependencies", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a plugin and its transitive dependencies into a directory.
    Get {
        /// Compact coordinate: group:artifact:version[:packaging[:classifier]] or artifact:version.
        artifact: Option<String>,

        /// Group id (ignored when ARTIFACT is given).
        #[arg(long, value_name = "GROUP")]
        group_id: Option<String>,

        /// Artifact id (ignored when ARTIFACT is given).
        #[arg(long, value_name = "NAME")]
        artifact_id: Option<String>,

        /// Version (ignored when ARTIFACT is given).
        #[arg(long, value_name = "VERSION")]
        version: Option<String>,

        /// Packaging, default hpi (ignored when ARTIFACT is given).
        #[arg(long, value_name = "PACKAGING")]
        packaging: Option<String>,

        /// Directory that receives the downloaded files in repository layout.
        #[arg(long, value_name = "DIR")]
        download_dir: PathBuf,

        /// Plugin server used when the primary repository cannot provide a file.
        #[arg(long, value_name = "URL")]
        plugin_server_url: Option<String>,

        /// Local repository cache (overrides config).
        #[arg(long, value_name = "DIR")]
        local_repository: Option<PathBuf>,

        /// Remote repository to try, in order. Repeatable; replaces the configured list.
        #[arg(long = "remote-repository", value_name = "URL")]
        remote_repositories: Vec<String>,
    },
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub plugin_server_url: Option<String>,
    pub local_repository: Option<PathBuf>,
    pub remote_repositories: Vec<String>,
}

impl Overrides {
    pub(crate) fn apply(self, cfg: &mut JpgetConfig) {
        if let Some(url) = self.plugin_server_url {
            cfg.plugin_server_url = url;
        }
        if let Some(dir) = self.local_repository {
            cfg.local_repository = Some(dir);
        }
        if !self.remote_repositories.is_empty() {
            cfg.remote_repositories = self.remote_repositories;
        }
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().command.run()
    }

    /// Validates the requested artifact, then loads config and runs. A bad
    /// request fails before the config file is read or created.
    pub fn run(self) -> Result<()> {
        match self {
            CliCommand::Get {
                artifact,
                group_id,
                artifact_id,
                version,
                packaging,
                download_dir,
                plugin_server_url,
                local_repository,
                remote_repositories,
            } => {
                let root = ArtifactRequest {
                    group_id,
                    artifact_id,
                    version,
                    packaging,
                    artifact,
                }
                .into_coordinate()?;

                let mut cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                Overrides {
                    plugin_server_url,
                    local_repository,
                    remote_repositories,
                }
                .apply(&mut cfg);
                run_get(&cfg, &root, &download_dir)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
