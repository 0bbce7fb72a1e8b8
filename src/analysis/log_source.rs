//! Log payload sources
//!
//! The subject matter handed to the analyzer either ships embedded (the
//! sample pod log) or comes from a configured file.

use crate::core::error::TriggerError;
use std::path::PathBuf;
use tokio::fs;

/// Embedded sample pod log
pub const SAMPLE_LOG: &str = "\
2023-11-19T12:30:00.000Z [info]  Application starting...
2023-11-19T12:30:15.000Z [info]  Database connection established.
2023-11-19T12:32:00.000Z [warn]  Database query took longer than 500ms, potential performance bottleneck.
2023-11-19T12:33:00.000Z [error] Failed to connect to external service: Connection refused.
2023-11-19T12:35:00.000Z [info]  External service now reachable, resuming normal operation.
2023-11-19T12:40:00.000Z [info]  Processing batch job #12345.
2023-11-19T12:45:00.000Z [warn]  Memory usage is at 85%, monitor for potential issues.
2023-11-19T12:50:00.000Z [error] Out of memory error during batch job processing. Job #12345 was terminated.
2023-11-19T12:55:00.000Z [info]  Application restarted after OutOfMemoryError, health checks passed.
2023-11-19T13:00:00.000Z [info]  New request received at /api/v1/data endpoint.
2023-11-19T13:05:00.000Z [warn]  Retrying operation after temporary network issue.
";

/// Where the log payload comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    /// The embedded sample payload
    Sample,
    /// A file on disk
    File(PathBuf),
}

impl LogSource {
    /// Pick the source from configuration
    pub fn from_config(log_file: Option<PathBuf>) -> Self {
        match log_file {
            Some(path) => Self::File(path),
            None => Self::Sample,
        }
    }

    /// Read the payload
    pub async fn load(&self) -> Result<String, TriggerError> {
        match self {
            Self::Sample => Ok(SAMPLE_LOG.to_string()),
            Self::File(path) => {
                fs::read_to_string(path)
                    .await
                    .map_err(|e| TriggerError::ConfigInvalid {
                        message: format!("{}: {}", path.display(), e),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_source_selection() {
        assert_eq!(LogSource::from_config(None), LogSource::Sample);
        assert_eq!(
            LogSource::from_config(Some(PathBuf::from("/tmp/pod.log"))),
            LogSource::File(PathBuf::from("/tmp/pod.log"))
        );
    }

    #[tokio::test]
    async fn test_sample_payload_is_multiline() {
        let payload = LogSource::Sample.load().await.unwrap();
        assert!(payload.lines().count() > 5);
        assert!(payload.contains("[error]"));
    }

    #[tokio::test]
    async fn test_file_payload_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pod.log");
        tokio::fs::write(&path, "line one\nline two\n").await.unwrap();

        let payload = LogSource::File(path).load().await.unwrap();
        assert_eq!(payload, "line one\nline two\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let result = LogSource::File(PathBuf::from("/nonexistent/pod.log"))
            .load()
            .await;
        assert!(matches!(result, Err(TriggerError::ConfigInvalid { .. })));
    }
}
