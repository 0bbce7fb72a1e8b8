//! Core trait for log analysis backends
//!
//! The trigger pipeline treats analysis as an external collaborator behind a
//! narrow request/response contract: free-form log text in, a title and body
//! out, or failure. Backends are swapped by configuration, not by maintaining
//! parallel program variants.

use async_trait::async_trait;

/// Title/body pair destined for the workflow invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogAnalysis {
    pub title: String,
    pub body: String,
}

impl LogAnalysis {
    /// Both fields must be non-empty for the pipeline to proceed
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.body.trim().is_empty()
    }
}

/// Analysis backend interface
///
/// Called at most once per run; any error or incomplete result is handled by
/// the caller with fallback content, never retried here.
#[async_trait]
pub trait LogAnalyzer: Send + Sync {
    /// Backend name (e.g., "chat", "static")
    fn name(&self) -> &str;

    /// Produce a title/body pair from raw log text
    async fn analyze(&self, log_payload: &str) -> anyhow::Result<LogAnalysis>;
}
