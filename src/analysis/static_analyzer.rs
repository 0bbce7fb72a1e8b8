//! Fixed-content analysis backend
//!
//! Selected when no generative backend is configured, and used as the
//! fallback whenever the generative backend fails or returns an incomplete
//! result. The external command is never invoked with both fields empty.

use super::traits::{LogAnalysis, LogAnalyzer};
use async_trait::async_trait;

/// Default title when no analysis is generated
pub const DEFAULT_TITLE: &str = "Automated log review";

/// Default body when no analysis is generated
pub const DEFAULT_BODY: &str =
    "Log analysis was not generated for this run. See the attached log output for details.";

/// The fallback title/body pair
pub fn fallback_analysis() -> LogAnalysis {
    LogAnalysis {
        title: DEFAULT_TITLE.to_string(),
        body: DEFAULT_BODY.to_string(),
    }
}

/// Backend returning the fixed default pair
#[derive(Debug, Default)]
pub struct StaticAnalyzer;

impl StaticAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LogAnalyzer for StaticAnalyzer {
    fn name(&self) -> &str {
        "static"
    }

    async fn analyze(&self, _log_payload: &str) -> anyhow::Result<LogAnalysis> {
        Ok(fallback_analysis())
    }
}
