//! Configuration for the timedtext CLI.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (TIMEDTEXT_OUTPUT_DIR, TIMEDTEXT_MAX_PAYLOAD_BYTES)
//! 2. Config file (.timedtext/config.yaml)
//! 3. Defaults (~/Downloads, 50 MiB payload limit)
//!
//! Config file discovery:
//! - Searches current directory and parents for .timedtext/config.yaml
//! - A relative output dir is resolved against the directory holding .timedtext/
//!
//! Extraction itself never reads configuration.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

pub const ENV_OUTPUT_DIR: &str = "TIMEDTEXT_OUTPUT_DIR";
pub const ENV_MAX_PAYLOAD_BYTES: &str = "TIMEDTEXT_MAX_PAYLOAD_BYTES";

const DEFAULT_MAX_PAYLOAD_BYTES: usize = 50 * 1024 * 1024;
const DEFAULT_PREFERRED_LANGUAGE: &str = "en";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub limits: Option<LimitsConfig>,
    #[serde(default)]
    pub tracks: Option<TracksConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Output directory (relative to the project root)
    pub dir: Option<String>,
    /// Write `<file>.report.json` next to each transcript
    #[serde(default)]
    pub write_report: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    pub max_payload_bytes: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TracksConfig {
    pub preferred_language: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory transcripts are written to
    pub output_dir: PathBuf,
    pub write_report: bool,
    pub max_payload_bytes: usize,
    /// Language prefix ranked first when listing tracks
    pub preferred_language: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".timedtext").join("config.yaml");
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

/// Resolve a path that may be relative to the project root
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

fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Parse TIMEDTEXT_MAX_PAYLOAD_BYTES if set
fn env_max_payload_bytes() -> Result<Option<usize>> {
    match std::env::var(ENV_MAX_PAYLOAD_BYTES) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid {}: {}", ENV_MAX_PAYLOAD_BYTES, value)),
        Err(_) => Ok(None),
    }
}

/// Combine a parsed config file (if any) with env overrides and defaults
fn resolve(config_path: Option<PathBuf>, config: Option<ConfigFile>) -> Result<ResolvedConfig> {
    // Base directory is the parent of .timedtext/
    let base_dir = config_path
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let output_dir = if let Ok(env_dir) = std::env::var(ENV_OUTPUT_DIR) {
        PathBuf::from(env_dir)
    } else if let Some(dir) = config.as_ref().and_then(|c| c.output.dir.as_deref()) {
        resolve_path(&base_dir, dir)
    } else {
        default_output_dir()
    };

    let max_payload_bytes = match env_max_payload_bytes()? {
        Some(limit) => limit,
        None => config
            .as_ref()
            .and_then(|c| c.limits.as_ref())
            .and_then(|l| l.max_payload_bytes)
            .unwrap_or(DEFAULT_MAX_PAYLOAD_BYTES),
    };

    let preferred_language = config
        .as_ref()
        .and_then(|c| c.tracks.as_ref())
        .and_then(|t| t.preferred_language.clone())
        .unwrap_or_else(|| DEFAULT_PREFERRED_LANGUAGE.to_string());

    Ok(ResolvedConfig {
        output_dir,
        write_report: config.as_ref().map(|c| c.output.write_report).unwrap_or(false),
        max_payload_bytes,
        preferred_language,
        config_file: config_path,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_path = find_config_file();
    let config = match config_path.as_deref() {
        Some(path) => Some(load_config_file(path)?),
        None => None,
    };

    resolve(config_path, config)
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
