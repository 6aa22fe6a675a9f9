use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use spdx_checkr::Catalog;

/// Root configuration structure, deserialized from `.spdx-checkr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// JSON catalog regenerated from the license list; replaces the
    /// built-in tables when set. Relative paths resolve against the
    /// directory holding the config file.
    pub catalog: Option<PathBuf>,
    /// Organisation-specific identifiers accepted on top of the catalog.
    #[serde(default)]
    pub extra: ExtraConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExtraConfig {
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default)]
    pub exceptions: Vec<String>,
}

impl Config {
    /// The effective catalog: the configured or built-in tables plus extras.
    pub fn catalog(&self) -> Result<Catalog> {
        let base = match &self.catalog {
            Some(path) => Catalog::from_json_file(path)
                .with_context(|| format!("loading catalog {}", path.display()))?,
            None => Catalog::builtin().clone(),
        };

        if self.extra.licenses.is_empty() && self.extra.exceptions.is_empty() {
            return Ok(base);
        }
        Ok(base.with_additional(&self.extra.licenses, &self.extra.exceptions))
    }

    fn from_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;

        if let Some(dir) = path.parent() {
            config.catalog = config.catalog.take().map(|catalog| {
                if catalog.is_relative() {
                    dir.join(catalog)
                } else {
                    catalog
                }
            });
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<project_path>/.spdx-checkr/config.toml`
/// 3. `~/.config/spdx-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return Config::from_file(path);
    }

    let project_config = project_path.join(".spdx-checkr").join("config.toml");
    if project_config.exists() {
        return Config::from_file(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("spdx-checkr").join("config.toml");
        if home_config.exists() {
            return Config::from_file(&home_config);
        }
    }

    Ok(Config::default())
}
