//! Connection settings: flags and environment first, YAML file second.
//!
//! ```yaml
//! # ~/.bamboosync/config.yaml
//! bamboo_subdomain: acme
//! bamboo_api_key: ...
//! google_admin: admin@acme.com
//! google_credentials: /etc/bamboosync/service-account.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Deserialize;

/// Connection arguments shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// BambooHR company subdomain.
    #[arg(long, env = "BAMBOO_SUBDOMAIN")]
    pub bamboo_subdomain: Option<String>,

    /// BambooHR API key.
    #[arg(long, env = "BAMBOO_API_KEY", hide_env_values = true)]
    pub bamboo_api_key: Option<String>,

    /// Google Workspace admin the service account acts as.
    #[arg(long, env = "GOOGLE_ADMIN")]
    pub google_admin: Option<String>,

    /// Service account key: path to the JSON file, or the JSON itself.
    #[arg(long, env = "GOOGLE_CREDENTIALS", hide_env_values = true)]
    pub google_credentials: Option<String>,

    /// YAML config file (default: ~/.bamboosync/config.yaml if present).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// On-disk config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub bamboo_subdomain: Option<String>,
    pub bamboo_api_key: Option<String>,
    pub google_admin: Option<String>,
    pub google_credentials: Option<String>,
}

/// Fully resolved connection settings.
pub struct Settings {
    pub bamboo_subdomain: String,
    pub bamboo_api_key: String,
    pub google_admin: String,
    pub google_credentials: String,
}

/// `<home>/.bamboosync/config.yaml`
pub fn default_config_path(home: &Path) -> PathBuf {
    home.join(".bamboosync").join("config.yaml")
}

pub fn load_file(path: &Path) -> Result<FileConfig> {
    tracing::debug!(path = %path.display(), "loading config file");
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

impl Settings {
    /// Resolve from `args`, falling back to the config file. An explicit
    /// `--config` must exist; the default one is optional.
    pub fn resolve(args: &ConnectionArgs, home: Option<&Path>) -> Result<Self> {
        let file = match (&args.config, home) {
            (Some(path), _) => load_file(path)?,
            (None, Some(home)) => {
                let path = default_config_path(home);
                if path.exists() {
                    load_file(&path)?
                } else {
                    FileConfig::default()
                }
            }
            (None, None) => FileConfig::default(),
        };

        Ok(Self {
            bamboo_subdomain: pick(
                &args.bamboo_subdomain,
                file.bamboo_subdomain,
                "--bamboo-subdomain",
                "BAMBOO_SUBDOMAIN",
            )?,
            bamboo_api_key: pick(
                &args.bamboo_api_key,
                file.bamboo_api_key,
                "--bamboo-api-key",
                "BAMBOO_API_KEY",
            )?,
            google_admin: pick(
                &args.google_admin,
                file.google_admin,
                "--google-admin",
                "GOOGLE_ADMIN",
            )?,
            google_credentials: pick(
                &args.google_credentials,
                file.google_credentials,
                "--google-credentials",
                "GOOGLE_CREDENTIALS",
            )?,
        })
    }
}

fn pick(arg: &Option<String>, file: Option<String>, flag: &str, env: &str) -> Result<String> {
    match arg.clone().or(file).filter(|v| !v.is_empty()) {
        Some(value) => Ok(value),
        None => bail!("missing {flag}: pass the flag, set {env}, or add it to the config file"),
    }
}
