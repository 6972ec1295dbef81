use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::director::{DirectorClientOptions, DEFAULT_DIRECTOR_URL};

/// Forward-proxy overrides (optional section in config.toml).
///
/// Unset fields fall back to what the environment says.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Route plaintext reads through the forward proxy.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Allow a direct (no proxy) attempt after the proxied one.
    #[serde(default)]
    pub allow_fallback: Option<bool>,
}

/// Global configuration loaded from `~/.config/osdf/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsdfConfig {
    /// Base URL of the director queried for every resource.
    pub director_url: String,
    /// Seconds allowed to establish the director connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole director request.
    pub timeout_secs: u64,
    /// How many caches (in priority order) to expand into attempts; 0 = all.
    pub max_caches: usize,
    /// Optional proxy overrides; if missing, the environment decides.
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
}

impl Default for OsdfConfig {
    fn default() -> Self {
        Self {
            director_url: DEFAULT_DIRECTOR_URL.to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 30,
            max_caches: 3,
            proxy: None,
        }
    }
}

impl OsdfConfig {
    /// Director client settings, optionally pointing at another director.
    pub fn client_options(&self, director_override: Option<&str>) -> DirectorClientOptions {
        DirectorClientOptions {
            director_url: director_override
                .unwrap_or(self.director_url.as_str())
                .to_string(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            ..DirectorClientOptions::default()
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("osdf")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<OsdfConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = OsdfConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from a specific file.
pub fn load_from(path: &Path) -> Result<OsdfConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: OsdfConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
