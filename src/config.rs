use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::rng::DEFAULT_SEED;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("frontend/dist")
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("frontend/dist/media")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_secret_path() -> PathBuf {
    PathBuf::from("/run/secrets/mapbox_token")
}

fn default_token_env_var() -> String {
    "MAPBOX_TOKEN".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RanchConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub mapbox: MapboxConfig,
}

impl Default for RanchConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            seed: default_seed(),
            static_dir: default_static_dir(),
            media_dir: default_media_dir(),
            log_level: default_log_level(),
            mapbox: MapboxConfig::default(),
        }
    }
}

/// Where the map token comes from: a mounted secret first, then the
/// environment.
#[derive(Debug, Clone, Deserialize)]
pub struct MapboxConfig {
    #[serde(default = "default_secret_path")]
    pub secret_path: PathBuf,
    #[serde(default = "default_token_env_var")]
    pub env_var: String,
}

impl Default for MapboxConfig {
    fn default() -> Self {
        Self {
            secret_path: default_secret_path(),
            env_var: default_token_env_var(),
        }
    }
}

impl MapboxConfig {
    pub fn resolve_token(&self) -> Option<String> {
        self.secret_token()
            .or_else(|| std::env::var(&self.env_var).ok())
    }

    fn secret_token(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.secret_path).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }
}

pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<RanchConfig> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: RanchConfig = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }
}
