//! Configuration for lessonlib paths.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (LESSONLIB_CONTENT, LESSONLIB_AUTHORING)
//! 2. Config file (.lessonlib/config.yaml)
//! 3. Defaults (~/.lessonlib)
//!
//! Config file discovery:
//! - Searches current directory and parents for .lessonlib/config.yaml
//! - Paths in config file are relative to the config file's project root

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Built content root (relative to the project root)
    pub content: Option<String>,
    /// Authoring source directory (relative to the project root)
    pub authoring: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to the built artifact tree the stores read
    pub content: PathBuf,
    /// Absolute path to the authored section documents the build reads
    pub authoring: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".lessonlib").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".lessonlib");

    let config_file = find_config_file();

    let (content, authoring) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Project root is the parent of .lessonlib/
        let base_dir = config_path
            .parent() // .lessonlib/
            .and_then(|p| p.parent()) // project root
            .unwrap_or(Path::new("."));

        let content = if let Ok(env_content) = std::env::var("LESSONLIB_CONTENT") {
            PathBuf::from(env_content)
        } else if let Some(ref content_path) = config.paths.content {
            resolve_path(base_dir, content_path)
        } else {
            default_home.join("content")
        };

        let authoring = if let Ok(env_authoring) = std::env::var("LESSONLIB_AUTHORING") {
            PathBuf::from(env_authoring)
        } else if let Some(ref authoring_path) = config.paths.authoring {
            resolve_path(base_dir, authoring_path)
        } else {
            default_home.join("authoring")
        };

        (content, authoring)
    } else {
        let content = std::env::var("LESSONLIB_CONTENT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home.join("content"));

        let authoring = std::env::var("LESSONLIB_AUTHORING")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home.join("authoring"));

        (content, authoring)
    };

    Ok(ResolvedConfig {
        content,
        authoring,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Get the built content root the stores read from.
pub fn content_dir() -> Result<PathBuf> {
    Ok(config()?.content.clone())
}

/// Get the authoring source directory the build reads from.
pub fn authoring_dir() -> Result<PathBuf> {
    Ok(config()?.authoring.clone())
}
