//! Configuration management for vahan-checker
//!
//! Config stored at: ~/.config/vahan-checker/config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vahan_types::{ConfigError, OutputFormat, Result};

const APP_DIR: &str = "vahan-checker";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Registration series prepended to every number (e.g. "TN09DE")
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// First number of the range to check
    #[serde(default = "default_start")]
    pub start: i64,

    /// Last number of the range to check (inclusive)
    #[serde(default = "default_end")]
    pub end: i64,

    /// Also check numbers that match no fancy pattern
    #[serde(default = "default_true")]
    pub include_others: bool,

    /// Command used to query the registry; the candidate is appended as the
    /// last argument
    #[serde(default)]
    pub lookup_command: Option<String>,

    /// Pause between two registry lookups, in milliseconds
    #[serde(default = "default_lookup_delay_ms")]
    pub lookup_delay_ms: u64,

    /// Status cache file override
    #[serde(default)]
    pub cache_path: Option<PathBuf>,

    /// CSV report file
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_prefix() -> String {
    "TN09DE".to_string()
}

fn default_start() -> i64 {
    1200
}

fn default_end() -> i64 {
    2300
}

fn default_true() -> bool {
    true
}

fn default_lookup_delay_ms() -> u64 {
    500
}

fn default_report_path() -> PathBuf {
    PathBuf::from("output.csv")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            start: default_start(),
            end: default_end(),
            include_others: true,
            lookup_command: None,
            lookup_delay_ms: default_lookup_delay_ms(),
            cache_path: None,
            report_path: default_report_path(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the status cache file path
    pub fn cache_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.cache_path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(data_dir.join("data.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Vahan Checker Configuration")?;
        writeln!(f, "===========================")?;
        writeln!(f)?;
        writeln!(f, "Prefix:          {}", self.prefix)?;
        writeln!(f, "Range:           {}..={}", self.start, self.end)?;
        writeln!(f, "Include others:  {}", self.include_others)?;
        writeln!(
            f,
            "Lookup command:  {}",
            self.lookup_command.as_deref().unwrap_or("(not set)")
        )?;
        writeln!(f, "Lookup delay:    {} ms", self.lookup_delay_ms)?;
        writeln!(
            f,
            "Cache file:      {}",
            self.cache_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Report file:     {}", self.report_path.display())?;
        writeln!(f, "Output format:   {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}
