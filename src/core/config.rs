//! Configuration structures and types for action-trigger
//!
//! This module provides type-safe configuration management with serde support.
//! The resolved configuration is constructed once at startup and passed by
//! parameter into the pipeline; no component reads ambient global state.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default workflow file dispatched via `gh workflow run`
pub const DEFAULT_WORKFLOW_FILE: &str = "simple-log-analysis-test.yml";

/// Default deadline for the dispatched command
pub const DEFAULT_DEADLINE_SECS: u64 = 30;

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct TriggerConfig {
    /// Hex-encoded SHA-256 fingerprint of the expected access code.
    /// Never logged or echoed.
    pub access_code_hash: Option<String>,

    /// Workflow file passed to `gh workflow run`
    pub workflow_file: String,

    /// Deadline for the dispatched command
    pub deadline_secs: u64,

    /// Text-generation backend settings; absent means the run falls back to
    /// the fixed default title/body pair
    pub analyzer: Option<AnalyzerSettings>,

    /// Log file to analyze; absent means the embedded sample payload
    pub log_file: Option<PathBuf>,
}

impl TriggerConfig {
    /// Deadline as a `Duration`
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            access_code_hash: None,
            workflow_file: DEFAULT_WORKFLOW_FILE.to_string(),
            deadline_secs: DEFAULT_DEADLINE_SECS,
            analyzer: None,
            log_file: None,
        }
    }
}

/// Settings for the generative analysis backend
///
/// All three values must be configured for the backend to be selected; a
/// partial set degrades to the default content.
#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    /// Base URL of an OpenAI-compatible chat completions API
    pub endpoint: String,

    /// API key, held as a secret so it cannot leak through Debug output
    pub api_key: SecretString,

    /// Model (deployment) name
    pub model: String,
}

/// Project file schema (`.trigger-config.yaml`)
///
/// Carries only the non-secret knobs. The fingerprint and analyzer
/// credentials come exclusively from the environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FileConfig {
    /// Workflow file override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,

    /// Deadline override in seconds
    #[serde(skip_serializing_if = "Option::is_none", rename = "deadlineSecs")]
    pub deadline_secs: Option<u64>,

    /// Log file to analyze instead of the embedded sample
    #[serde(skip_serializing_if = "Option::is_none", rename = "logFile")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TriggerConfig::default();
        assert_eq!(config.workflow_file, DEFAULT_WORKFLOW_FILE);
        assert_eq!(config.deadline_secs, 30);
        assert!(config.access_code_hash.is_none());
        assert!(config.analyzer.is_none());
    }

    #[test]
    fn test_deadline_duration() {
        let config = TriggerConfig {
            deadline_secs: 5,
            ..TriggerConfig::default()
        };
        assert_eq!(config.deadline(), Duration::from_secs(5));
    }

    #[test]
    fn test_deserialize_minimal_file_config() {
        let yaml = r#"
workflow: nightly-healthcheck.yml
deadlineSecs: 60
"#;
        let config: FileConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.workflow.as_deref(), Some("nightly-healthcheck.yml"));
        assert_eq!(config.deadline_secs, Some(60));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_file_config_round_trip() {
        let config = FileConfig {
            workflow: Some("deploy.yml".to_string()),
            deadline_secs: None,
            log_file: Some(PathBuf::from("/var/log/pod.log")),
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("logFile"));
        assert!(!yaml.contains("deadlineSecs"));

        let parsed: FileConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_analyzer_settings_debug_redacts_key() {
        let settings = AnalyzerSettings {
            endpoint: "https://api.example.com/v1".to_string(),
            api_key: SecretString::new("super-secret-key".into()),
            model: "gpt-4o".to_string(),
        };
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("super-secret-key"));
    }
}
