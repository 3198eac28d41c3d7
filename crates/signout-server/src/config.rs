//! Server configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level signout-sim configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignoutConfig {
    /// Address the HTTP API listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// JSON case catalog.
    #[serde(default = "default_cases_file")]
    pub cases_file: PathBuf,
    /// Page size for list requests without a limit.
    #[serde(default = "default_page_limit")]
    pub default_page_limit: usize,
    /// Largest page a list request may ask for.
    #[serde(default = "default_max_page_limit")]
    pub max_page_limit: usize,
    /// Origins allowed by CORS (the frontend dev server by default).
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}
fn default_cases_file() -> PathBuf {
    PathBuf::from("data/cases.json")
}
fn default_page_limit() -> usize {
    50
}
fn default_max_page_limit() -> usize {
    200
}
fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

impl Default for SignoutConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cases_file: default_cases_file(),
            default_page_limit: default_page_limit(),
            max_page_limit: default_max_page_limit(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl SignoutConfig {
    /// Check the values that would otherwise fail later at request time.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.default_page_limit >= 1,
            "default_page_limit must be at least 1"
        );
        anyhow::ensure!(
            self.max_page_limit >= self.default_page_limit,
            "max_page_limit ({}) must be >= default_page_limit ({})",
            self.max_page_limit,
            self.default_page_limit
        );
        Ok(())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the well-known locations.
///
/// Search order when no path is given:
/// 1. `signout.toml` in the current directory
/// 2. `~/.config/signout/config.toml`
///
/// Environment variable overrides: `SIGNOUT_BIND_ADDR`, `SIGNOUT_CASES_FILE`.
pub fn load_config_from(path: Option<&Path>) -> Result<SignoutConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("signout.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<SignoutConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => SignoutConfig::default(),
    };

    if let Ok(addr) = std::env::var("SIGNOUT_BIND_ADDR") {
        config.bind_addr = addr;
    }
    if let Ok(file) = std::env::var("SIGNOUT_CASES_FILE") {
        config.cases_file = PathBuf::from(file);
    }

    config.bind_addr = resolve_env_vars(&config.bind_addr);
    config.cases_file = PathBuf::from(resolve_env_vars(&config.cases_file.to_string_lossy()));
    config.allowed_origins = config
        .allowed_origins
        .iter()
        .map(|o| resolve_env_vars(o))
        .collect();

    config.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("signout"))
}
