//! Configuration loader for action-trigger
//!
//! This module provides configuration loading and merging across sources.
//! Environment data is passed in as a map so the loader stays free of
//! ambient global state and tests never mutate the process environment.

use super::config::{AnalyzerSettings, FileConfig, TriggerConfig};
use crate::core::error::TriggerError;
use secrecy::SecretString;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Configuration file name
const CONFIG_FILENAME: &str = ".trigger-config.yaml";

/// Environment variable holding the hex SHA-256 fingerprint
pub const ENV_ACCESS_CODE_HASH: &str = "ACCESS_CODE_HASH";

/// Environment variables consumed by the analyzer backend
pub const ENV_ENDPOINT: &str = "ENDPOINT";
pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_MODEL: &str = "MODEL";

/// Optional workflow file override
pub const ENV_WORKFLOW: &str = "TRIGGER_WORKFLOW";

/// CLI overrides (highest priority)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub workflow: Option<String>,
    pub deadline_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

/// Configuration load options
#[derive(Debug, Clone)]
pub struct ConfigLoadOptions {
    /// Project path to load the config file from
    pub project_path: PathBuf,

    /// CLI arguments (highest priority)
    pub cli: CliOverrides,

    /// Environment variables
    pub env: HashMap<String, String>,
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from multiple sources with priority
    ///
    /// Priority (high to low):
    /// 1. CLI arguments
    /// 2. Environment variables
    /// 3. Project config (./.trigger-config.yaml)
    /// 4. Default values
    pub async fn load(options: ConfigLoadOptions) -> Result<TriggerConfig, TriggerError> {
        let mut config = TriggerConfig::default();

        // 3. Project config
        if let Some(file_config) = Self::load_project_config(&options.project_path).await? {
            if let Some(workflow) = file_config.workflow {
                config.workflow_file = workflow;
            }
            if let Some(deadline) = file_config.deadline_secs {
                config.deadline_secs = deadline;
            }
            if let Some(log_file) = file_config.log_file {
                config.log_file = Some(log_file);
            }
        }

        // 2. Environment variables
        config.access_code_hash = non_empty(options.env.get(ENV_ACCESS_CODE_HASH));
        if let Some(workflow) = non_empty(options.env.get(ENV_WORKFLOW)) {
            config.workflow_file = workflow;
        }
        config.analyzer = Self::analyzer_from_env(&options.env);

        // 1. CLI arguments (highest priority)
        if let Some(workflow) = options.cli.workflow {
            config.workflow_file = workflow;
        }
        if let Some(deadline) = options.cli.deadline_secs {
            config.deadline_secs = deadline;
        }
        if let Some(log_file) = options.cli.log_file {
            config.log_file = Some(log_file);
        }

        Ok(config)
    }

    /// Build analyzer settings when the full set of variables is present
    ///
    /// A partial set is not an error; the run degrades to default content.
    fn analyzer_from_env(env: &HashMap<String, String>) -> Option<AnalyzerSettings> {
        let endpoint = non_empty(env.get(ENV_ENDPOINT))?;
        let api_key = non_empty(env.get(ENV_API_KEY))?;
        let model = non_empty(env.get(ENV_MODEL))?;

        Some(AnalyzerSettings {
            endpoint,
            api_key: SecretString::new(api_key.into()),
            model,
        })
    }

    /// Load the project configuration file, if present
    async fn load_project_config(project_path: &Path) -> Result<Option<FileConfig>, TriggerError> {
        let path = project_path.join(CONFIG_FILENAME);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(TriggerError::ConfigInvalid {
                    message: format!("{}: {}", path.display(), e),
                });
            }
        };

        let parsed = serde_yaml::from_str(&content).map_err(|e| TriggerError::ConfigInvalid {
            message: format!("{}: {}", path.display(), e),
        })?;

        Ok(Some(parsed))
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    fn env_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn options_with_env(dir: &Path, env: HashMap<String, String>) -> ConfigLoadOptions {
        ConfigLoadOptions {
            project_path: dir.to_path_buf(),
            cli: CliOverrides::default(),
            env,
        }
    }

    #[tokio::test]
    async fn test_load_defaults_without_sources() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::load(options_with_env(dir.path(), HashMap::new()))
            .await
            .unwrap();

        assert_eq!(config.workflow_file, "simple-log-analysis-test.yml");
        assert_eq!(config.deadline_secs, 30);
        assert!(config.access_code_hash.is_none());
        assert!(config.analyzer.is_none());
    }

    #[tokio::test]
    async fn test_load_fingerprint_from_env() {
        let dir = TempDir::new().unwrap();
        let env = env_map(&[(ENV_ACCESS_CODE_HASH, "deadbeef")]);
        let config = ConfigLoader::load(options_with_env(dir.path(), env))
            .await
            .unwrap();

        assert_eq!(config.access_code_hash.as_deref(), Some("deadbeef"));
    }

    #[tokio::test]
    async fn test_empty_fingerprint_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        let env = env_map(&[(ENV_ACCESS_CODE_HASH, "")]);
        let config = ConfigLoader::load(options_with_env(dir.path(), env))
            .await
            .unwrap();

        assert!(config.access_code_hash.is_none());
    }

    #[tokio::test]
    async fn test_analyzer_requires_full_variable_set() {
        let dir = TempDir::new().unwrap();

        let partial = env_map(&[(ENV_ENDPOINT, "https://api.example.com"), (ENV_MODEL, "gpt-4o")]);
        let config = ConfigLoader::load(options_with_env(dir.path(), partial))
            .await
            .unwrap();
        assert!(config.analyzer.is_none());

        let full = env_map(&[
            (ENV_ENDPOINT, "https://api.example.com"),
            (ENV_API_KEY, "key-123"),
            (ENV_MODEL, "gpt-4o"),
        ]);
        let config = ConfigLoader::load(options_with_env(dir.path(), full))
            .await
            .unwrap();
        let analyzer = config.analyzer.unwrap();
        assert_eq!(analyzer.endpoint, "https://api.example.com");
        assert_eq!(analyzer.api_key.expose_secret(), "key-123");
        assert_eq!(analyzer.model, "gpt-4o");
    }

    #[tokio::test]
    async fn test_project_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "workflow: nightly.yml\ndeadlineSecs: 10\n",
        )
        .await
        .unwrap();

        let config = ConfigLoader::load(options_with_env(dir.path(), HashMap::new()))
            .await
            .unwrap();

        assert_eq!(config.workflow_file, "nightly.yml");
        assert_eq!(config.deadline_secs, 10);
    }

    #[tokio::test]
    async fn test_priority_cli_over_env_over_file() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join(CONFIG_FILENAME), "workflow: file.yml\n")
            .await
            .unwrap();

        let env = env_map(&[(ENV_WORKFLOW, "env.yml")]);
        let options = ConfigLoadOptions {
            project_path: dir.path().to_path_buf(),
            cli: CliOverrides {
                workflow: Some("cli.yml".to_string()),
                deadline_secs: None,
                log_file: None,
            },
            env,
        };

        let config = ConfigLoader::load(options).await.unwrap();
        assert_eq!(config.workflow_file, "cli.yml");
    }

    #[tokio::test]
    async fn test_invalid_yaml_is_config_error() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join(CONFIG_FILENAME), "workflow: [unclosed\n")
            .await
            .unwrap();

        let result = ConfigLoader::load(options_with_env(dir.path(), HashMap::new())).await;
        assert!(matches!(
            result,
            Err(TriggerError::ConfigInvalid { .. })
        ));
    }
}
