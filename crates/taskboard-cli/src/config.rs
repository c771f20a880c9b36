use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use taskboard_core::config::{BACKEND_URL_ENV, BackendConfig};
use tracing::{debug, info};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "TASKBOARD_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub backend_url: Option<String>,
}

impl ConfigFile {
    #[tracing::instrument]
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let parsed: ConfigFile = toml::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        info!(file = %path.display(), "loaded config file");
        Ok(parsed)
    }
}

/// Resolves the backend from the CLI override, the environment, the
/// config file and finally the built-in default, in that order.
#[tracing::instrument(skip(cli_override, config_override))]
pub fn resolve_backend(
    cli_override: Option<&str>,
    config_override: Option<&Path>,
) -> anyhow::Result<BackendConfig> {
    let file = match resolve_config_path(config_override)? {
        Some(path) => ConfigFile::load(&path)?,
        None => ConfigFile::default(),
    };

    BackendConfig::resolve([
        cli_override.map(str::to_string),
        std::env::var(BACKEND_URL_ENV).ok(),
        file.backend_url,
    ])
}

fn resolve_config_path(override_path: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = override_path {
        return Ok(Some(path.to_path_buf()));
    }

    if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV)
        && !env_path.trim().is_empty()
    {
        return Ok(Some(PathBuf::from(env_path)));
    }

    let Some(config_dir) = dirs::config_dir() else {
        debug!("no user config directory; skipping config file");
        return Ok(None);
    };
    let candidate = config_dir.join("taskboard").join("config.toml");
    if candidate.exists() {
        return Ok(Some(candidate));
    }

    debug!(candidate = %candidate.display(), "no config file found; using defaults");
    Ok(None)
}
