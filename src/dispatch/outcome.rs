//! Terminal outcome of one dispatched command
//!
//! Consumed only by the reporter.

/// What happened to the dispatched command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Exited zero within the deadline
    Success { stdout: String },

    /// Exited nonzero within the deadline
    NonZeroExit {
        code: i32,
        stdout: String,
        stderr: String,
    },

    /// Still running at the deadline; forcibly terminated. Partial output is
    /// discarded from the report.
    TimedOut,
}

impl ProcessOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_zero_exit_is_success() {
        let success = ProcessOutcome::Success {
            stdout: "queued".to_string(),
        };
        assert!(success.is_success());

        let failure = ProcessOutcome::NonZeroExit {
            code: 2,
            stdout: String::new(),
            stderr: "boom".to_string(),
        };
        assert!(!failure.is_success());

        assert!(!ProcessOutcome::TimedOut.is_success());
    }
}
