// File: src/config.rs
// Purpose: Configuration parsing from autoroutes.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub routing: AutorouteConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Options of one autoload pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutorouteConfig {
    /// Directory containing route files (default: "./routes")
    #[serde(default = "default_routes_dir")]
    pub routes_dir: String,

    /// Path prepended to every mounted route (default: none)
    #[serde(default)]
    pub prefix: String,

    /// Tag undocumented routes with their pattern (default: true)
    #[serde(default = "default_true")]
    pub generate_tags: bool,

    /// Directory a relative `routes_dir` is resolved against
    /// (default: the working directory at resolve time)
    #[serde(default)]
    pub base_dir: Option<PathBuf>,

    /// File extensions to index, all files when empty
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_routes_dir() -> String {
    "./routes".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AutorouteConfig {
    fn default() -> Self {
        Self {
            routes_dir: default_routes_dir(),
            prefix: String::new(),
            generate_tags: true,
            base_dir: None,
            extensions: Vec::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl AutorouteConfig {
    pub fn with_routes_dir(mut self, routes_dir: impl Into<String>) -> Self {
        self.routes_dir = routes_dir.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_generate_tags(mut self, generate_tags: bool) -> Self {
        self.generate_tags = generate_tags;
        self
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Absolute routes directory
    ///
    /// An absolute `routes_dir` is used as is; a relative one is joined onto
    /// `base_dir`, or onto the working directory when no base is set.
    pub fn resolve_dir(&self) -> PathBuf {
        let routes_dir = Path::new(&self.routes_dir);
        if routes_dir.is_absolute() {
            return routes_dir.to_path_buf();
        }

        let base = self
            .base_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        base.join(routes_dir)
    }
}

impl Config {
    /// Load configuration from autoroutes.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./autoroutes.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("autoroutes.toml")
    }
}
