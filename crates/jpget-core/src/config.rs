use crate::fetch::HttpOptions;
use crate::resolver::maven::DEFAULT_REMOTE_REPOSITORY;
use crate::resolver::plugin_server::DEFAULT_PLUGIN_SERVER_URL;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// HTTP limits applied to every plugin server and remote repository request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Seconds allowed for establishing a connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for a whole download; a timeout fails that source.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: 600,
        }
    }
}

impl HttpConfig {
    pub fn options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/jpget/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JpgetConfig {
    /// Base URL of the plugin distribution server used as fallback.
    pub plugin_server_url: String,
    /// Local repository cache; `None` = `<XDG cache>/jpget/repository`.
    #[serde(default)]
    pub local_repository: Option<PathBuf>,
    /// Remote Maven repositories tried in order by the primary resolver.
    #[serde(default = "default_remote_repositories")]
    pub remote_repositories: Vec<String>,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_remote_repositories() -> Vec<String> {
    vec![DEFAULT_REMOTE_REPOSITORY.to_string()]
}

impl Default for JpgetConfig {
    fn default() -> Self {
        Self {
            plugin_server_url: DEFAULT_PLUGIN_SERVER_URL.to_string(),
            local_repository: None,
            remote_repositories: default_remote_repositories(),
            http: HttpConfig::default(),
        }
    }
}

impl JpgetConfig {
    /// Configured local repository, or the XDG cache default.
    pub fn local_repository(&self) -> Result<PathBuf> {
        match &self.local_repository {
            Some(path) => Ok(path.clone()),
            None => default_local_repository(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("jpget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

pub fn default_local_repository() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("jpget")?;
    Ok(xdg_dirs.get_cache_home().join("repository"))
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<JpgetConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = JpgetConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: JpgetConfig = toml::from_str(&data)?;
    Ok(cfg)
}
