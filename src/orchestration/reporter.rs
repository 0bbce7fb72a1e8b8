//! Outcome reporting
//!
//! Surfaces the terminal `ProcessOutcome` as status lines and a process exit
//! code. Captured output of the external command is echoed back verbatim
//! apart from secret redaction; unescaping `\n` sequences is the receiving
//! workflow's job, not this tool's.

use crate::dispatch::ProcessOutcome;
use crate::security::SecretMasker;

/// Exit code for every failed run
const FAILURE_EXIT: i32 = 1;

/// Maps outcomes to printed diagnostics and exit codes
pub struct Reporter {
    masker: SecretMasker,
}

impl Reporter {
    /// Create a reporter; the masker must already hold every secret that
    /// could surface in captured output
    pub fn new(masker: SecretMasker) -> Self {
        Self { masker }
    }

    /// Print the outcome and return the exit code for the process
    pub fn report(&self, outcome: &ProcessOutcome) -> i32 {
        match outcome {
            ProcessOutcome::Success { stdout } => {
                if !stdout.is_empty() {
                    println!("{}", self.masker.redact(stdout));
                }
                println!("✅ Workflow successfully triggered");
                0
            }
            ProcessOutcome::NonZeroExit {
                code,
                stdout,
                stderr,
            } => {
                if !stdout.is_empty() {
                    println!("{}", self.masker.redact(stdout));
                }
                eprintln!("❌ Workflow trigger exited with code {}", code);
                if !stderr.is_empty() {
                    eprintln!("{}", self.masker.redact(stderr));
                }
                FAILURE_EXIT
            }
            ProcessOutcome::TimedOut => {
                eprintln!("❌ Workflow trigger did not complete within the deadline");
                FAILURE_EXIT
            }
        }
    }
}
