//! Configuration management.

use anyhow::{Context as _, Result};
use dangle::audit::{MatcherSpec, ReportFormat};
use dangle::{RateLimit, TransportConfig};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "DANGLE_CONFIG";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Provider API endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// API token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Hosted zone to audit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,

    /// Address and name inventory.
    pub ip_inventory: String,

    /// Name-only inventory.
    pub name_inventory: String,

    /// Report for recognized targets.
    pub recognized_report: String,

    /// Report for unknown targets.
    pub unknown_report: String,

    /// Report encoding.
    pub format: ReportFormat,

    /// Record sets requested per page; the provider decides when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// Requests per second; 0 disables the limit.
    pub rate_limit: u32,

    /// Transport timeouts.
    pub timeouts: Timeouts,

    /// Ripe domains added to the built-in list.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ripe_domains: Vec<MatcherSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            token: None,
            zone_id: None,
            ip_inventory: "public.csv".to_string(),
            name_inventory: "elbs.txt".to_string(),
            recognized_report: "rt53-recog-targets.csv".to_string(),
            unknown_report: "rt53-unkno-targets.csv".to_string(),
            format: ReportFormat::Csv,
            page_size: None,
            rate_limit: RateLimit::PROVIDER_DEFAULT.per_second.get(),
            timeouts: Timeouts::default(),
            ripe_domains: Vec::new(),
        }
    }
}

/// Transport timeouts, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub connect: u64,
    pub tls_handshake: u64,
    pub response_header: u64,
    pub idle_connection: u64,
    pub keep_alive: u64,
    pub request: u64,
    pub max_idle_per_host: usize,
}

impl Default for Timeouts {
    fn default() -> Self {
        let transport = TransportConfig::default();
        Self {
            connect: transport.connect.as_secs(),
            tls_handshake: transport.tls_handshake.as_secs(),
            response_header: transport.response_header.as_secs(),
            idle_connection: transport.idle_connection.as_secs(),
            keep_alive: transport.keep_alive.as_secs(),
            request: transport.request.as_secs(),
            max_idle_per_host: transport.max_idle_per_host,
        }
    }
}

impl Timeouts {
    /// Transport settings for the client
    pub const fn transport(&self) -> TransportConfig {
        TransportConfig::new()
            .connect(Duration::from_secs(self.connect))
            .tls_handshake(Duration::from_secs(self.tls_handshake))
            .response_header(Duration::from_secs(self.response_header))
            .idle_connection(Duration::from_secs(self.idle_connection))
            .keep_alive(Duration::from_secs(self.keep_alive))
            .request(Duration::from_secs(self.request))
            .max_idle_per_host(self.max_idle_per_host)
    }
}

/// Keys accepted by `config set`, with descriptions.
pub const KEYS: &[(&str, &str)] = &[
    ("endpoint", "Provider API endpoint"),
    ("token", "API token"),
    ("zone_id", "Hosted zone to audit"),
    ("ip_inventory", "Address and name inventory path"),
    ("name_inventory", "Name-only inventory path"),
    ("recognized_report", "Report path for recognized targets"),
    ("unknown_report", "Report path for unknown targets"),
    ("format", "Report format (csv/jsonl)"),
    ("page_size", "Record sets per page (0 for the provider default)"),
    ("rate_limit", "Requests per second (0 disables)"),
    ("ripe_domain", "Append a ripe domain suffix"),
    ("timeouts.<name>", "connect, tls_handshake, response_header, idle_connection, keep_alive, request (seconds), max_idle_per_host"),
];

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("dev", "dangle", "dangle")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;

        Ok(())
    }

    /// Update one key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "endpoint" => self.endpoint = Some(value.to_string()),
            "token" | "api_token" => self.token = Some(value.to_string()),
            "zone_id" | "zone" => self.zone_id = Some(value.to_string()),
            "ip_inventory" => self.ip_inventory = value.to_string(),
            "name_inventory" => self.name_inventory = value.to_string(),
            "recognized_report" | "recognized" => self.recognized_report = value.to_string(),
            "unknown_report" | "unknown" => self.unknown_report = value.to_string(),
            "format" => self.format = value.parse()?,
            "page_size" => {
                self.page_size = match value.parse::<u32>()? {
                    0 => None,
                    n => Some(n),
                };
            }
            "rate_limit" => self.rate_limit = value.parse()?,
            "ripe_domain" | "ripe_domains" => self.ripe_domains.push(MatcherSpec::Suffix {
                suffix: value.to_string(),
                annotation: None,
            }),
            _ => {
                let Some(timeout) = key.strip_prefix("timeouts.") else {
                    return Err(unknown_key(key));
                };
                let t = &mut self.timeouts;
                match timeout {
                    "connect" => t.connect = value.parse()?,
                    "tls_handshake" => t.tls_handshake = value.parse()?,
                    "response_header" => t.response_header = value.parse()?,
                    "idle_connection" => t.idle_connection = value.parse()?,
                    "keep_alive" => t.keep_alive = value.parse()?,
                    "request" => t.request = value.parse()?,
                    "max_idle_per_host" => t.max_idle_per_host = value.parse()?,
                    _ => return Err(unknown_key(key)),
                }
            }
        }

        Ok(())
    }
}

fn unknown_key(key: &str) -> anyhow::Error {
    let available: Vec<String> = KEYS
        .iter()
        .map(|(name, about)| format!("  {name:<18} - {about}"))
        .collect();
    anyhow::anyhow!(
        "Unknown config key: {}\n\nAvailable keys:\n{}",
        key,
        available.join("\n")
    )
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .with_context(|| format!("failed to expand path {path}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
