//! `jpget get` – resolve a plugin and its dependency closure into a directory.

use anyhow::{Context, Result};
use jpget_core::config::JpgetConfig;
use jpget_core::coordinate::Coordinate;
use jpget_core::downloader::Downloader;
use jpget_core::resolver::maven::MavenRepoResolver;
use jpget_core::resolver::plugin_server::PluginServer;
use jpget_core::resolver::{ResolutionStrategy, Source};
use std::path::Path;

pub fn run_get(cfg: &JpgetConfig, root: &Coordinate, download_dir: &Path) -> Result<()> {
    let local_repository = cfg.local_repository()?;
    let http = cfg.http.options();
    let primary = MavenRepoResolver::new(
        &local_repository,
        cfg.remote_repositories.as_slice(),
        http,
    )
    .context("invalid remote repository")?;
    let plugin_server = PluginServer::new(&cfg.plugin_server_url, &local_repository, http)
        .context("invalid plugin server URL")?;
    tracing::debug!(
        "local repository {}, remotes {:?}, plugin server {}",
        primary.local_repository().display(),
        cfg.remote_repositories,
        plugin_server.base_url()
    );
    let downloader = Downloader::new(ResolutionStrategy::new(primary, plugin_server), download_dir);

    let report = downloader
        .run(root)
        .with_context(|| format!("failed to download {}", root))?;

    for artifact in &report.artifacts {
        let origin = match artifact.source {
            Source::Primary => "repository",
            Source::PluginServer => "plugin server",
        };
        println!("{}  {} ({})", artifact.coordinate, artifact.path.display(), origin);
    }
    println!(
        "Downloaded {} file(s) into {} ({} from plugin server)",
        report.len(),
        downloader.download_dir().display(),
        report.fallback_count()
    );
    Ok(())
}
