//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and used to build the adapters.
//! The CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables: `CLUSTERVAL_<SECTION>__<KEY>`
//! 2. Config file: `--config <FILE>` (must exist) or the per-user default
//!    location (optional)
//! 3. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "CLUSTERVAL";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Local probe settings.
    pub probes: ProbeConfig,
    /// How commands reach other nodes.
    pub remote: RemoteConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub ping_program: String,
    pub ping_timeout_secs: u64,
    pub connect_timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ping_program: "ping".into(),
            ping_timeout_secs: 1,
            connect_timeout_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub ssh_program: String,
    pub ssh_options: Vec<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            ssh_program: "ssh".into(),
            ssh_options: ["-o", "BatchMode=yes", "-o", "ConnectTimeout=5"]
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from defaults, file and environment.
    ///
    /// `config_file` is the path the user passed via `--config`; when it is
    /// `None` the default location is tried and silently skipped if absent.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(" ")
                    .with_list_parse_key("remote.ssh_options"),
            )
            .build()
            .context("Failed to read configuration sources")?;

        settings
            .try_deserialize()
            .context("Configuration values are invalid")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.clusterval.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "clusterval", "clusterval")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".clusterval.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.probes.ping_program, "ping");
        assert_eq!(cfg.probes.ping_timeout_secs, 1);
        assert_eq!(cfg.remote.ssh_options[1], "BatchMode=yes");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn file_overrides_only_what_it_sets() {
        let file = toml_file("[probes]\nping_timeout_secs = 3\n");
        let cfg = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.probes.ping_timeout_secs, 3);
        assert_eq!(cfg.probes.ping_program, "ping");
        assert_eq!(cfg.remote, RemoteConfig::default());
    }

    #[test]
    fn explicit_file_must_exist() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/clusterval.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("configuration"));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let file = toml_file("[probes]\nconnect_timeout_ms = \"soon\"\n");
        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
