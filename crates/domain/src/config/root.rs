use super::{
    CaptureConfig, ConfigError, EnrichmentConfig, LoggingConfig, ResponseConfig, ServerConfig,
    SignatureRuleConfig, ThreatSyncConfig,
};
use serde::{Deserialize, Serialize};
use std::fs;

/// Main configuration, loaded from a YAML file.
///
/// Detection keys (`signature_rules`, `threat_intelligence_url`,
/// `port_scan_threshold`, `scan_time_window`) sit at the top level; the
/// ambient sections are optional and default-initialized.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Payload signature rules, evaluated in declared order
    #[serde(default)]
    pub signature_rules: Vec<SignatureRuleConfig>,

    /// Newline-delimited hostile-IP feed. Optional; without it the
    /// blocklist detector starts empty.
    #[serde(default)]
    pub threat_intelligence_url: Option<String>,

    /// Per-source ring capacity and detection floor (default: 50)
    #[serde(default = "default_port_scan_threshold")]
    pub port_scan_threshold: usize,

    /// Burstiness window for scan detection, in seconds (default: 10)
    #[serde(default = "default_scan_time_window")]
    pub scan_time_window: u64,

    #[serde(default)]
    pub response: ResponseConfig,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    #[serde(default)]
    pub threat_sync: ThreatSyncConfig,

    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            signature_rules: vec![],
            threat_intelligence_url: None,
            port_scan_threshold: default_port_scan_threshold(),
            scan_time_window: default_scan_time_window(),
            response: ResponseConfig::default(),
            enrichment: EnrichmentConfig::default(),
            threat_sync: ThreatSyncConfig::default(),
            capture: CaptureConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub interface: Option<String>,
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => {
                let text = fs::read_to_string(p)
                    .map_err(|e| ConfigError::Io(format!("{}: {}", p, e)))?;
                serde_yaml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            None => Config::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(interface) = overrides.interface {
            self.capture.interface = Some(interface);
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port_scan_threshold == 0 {
            return Err(ConfigError::Invalid(
                "port_scan_threshold must be at least 1".to_string(),
            ));
        }
        if self.scan_time_window == 0 {
            return Err(ConfigError::Invalid(
                "scan_time_window must be at least 1 second".to_string(),
            ));
        }
        if self.response.block_duration_secs == 0 {
            return Err(ConfigError::Invalid(
                "response.block_duration_secs must be at least 1 second".to_string(),
            ));
        }
        if self.response.alert_queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "response.alert_queue_capacity must be at least 1".to_string(),
            ));
        }
        for rule in &self.signature_rules {
            if rule.name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "signature rule with empty name".to_string(),
                ));
            }
            if rule.pattern.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "signature rule '{}' has an empty pattern",
                    rule.name
                )));
            }
        }
        Ok(())
    }
}

fn default_port_scan_threshold() -> usize {
    50
}

fn default_scan_time_window() -> u64 {
    10
}
