//! Dispatch of the external workflow command
//!
//! # Security Features
//!
//! - **Fixed program name**: the command and its flag names are compile-time
//!   constants, never derived from input
//! - **Injection prevention**: arguments are passed as discrete argv entries
//!   through `tokio::process::Command`, never interpolated into shell strings
//! - **Escaped values**: every value-bearing flag carries one string escaped
//!   by [`crate::security::arg_escape`], enforced at `InvocationSpec`
//!   construction
//! - **Deadline control**: the child is forcibly terminated when the deadline
//!   expires
//!
//! Both output streams are drained concurrently with the exit wait so the
//! child can never deadlock against a full pipe while the dispatcher blocks
//! on `wait`.

use super::outcome::ProcessOutcome;
use super::state::{DispatchState, DispatchStateMachine};
use crate::core::error::TriggerError;
use crate::security::arg_escape::escape;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::time::timeout;

/// Fixed workflow-trigger program
const GH_PROGRAM: &str = "gh";

/// Fully-escaped argument set for one invocation
///
/// Fields are escaped on construction and only reachable escaped, so no
/// unescaped quote or line break can reach the command line.
#[derive(Clone, PartialEq, Eq)]
pub struct InvocationSpec {
    access_code: String,
    issue_title: String,
    log_analysis: String,
}

impl InvocationSpec {
    /// Escape each field independently and assemble the spec
    pub fn build(access_code: &str, issue_title: &str, log_analysis: &str) -> Self {
        Self {
            access_code: escape(access_code),
            issue_title: escape(issue_title),
            log_analysis: escape(log_analysis),
        }
    }

    pub fn issue_title(&self) -> &str {
        &self.issue_title
    }

    pub fn log_analysis(&self) -> &str {
        &self.log_analysis
    }

    /// `key=value` pairs for the `-f` flags, in wire order
    fn field_args(&self) -> Vec<String> {
        vec![
            format!("access_code={}", self.access_code),
            format!("issue_title={}", self.issue_title),
            format!("log_analysis={}", self.log_analysis),
        ]
    }
}

// The access code is a credential; keep it out of Debug output.
impl std::fmt::Debug for InvocationSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationSpec")
            .field("access_code", &"[REDACTED]")
            .field("issue_title", &self.issue_title)
            .field("log_analysis", &self.log_analysis)
            .finish()
    }
}

/// Program plus fixed leading arguments
#[derive(Debug, Clone)]
pub struct WorkflowCommand {
    program: String,
    base_args: Vec<String>,
}

impl WorkflowCommand {
    /// The production command: `gh workflow run <workflow-file>`
    pub fn gh_workflow_run(workflow_file: &str) -> Self {
        Self {
            program: GH_PROGRAM.to_string(),
            base_args: vec![
                "workflow".to_string(),
                "run".to_string(),
                workflow_file.to_string(),
            ],
        }
    }

    #[cfg(test)]
    fn custom(program: &str, base_args: Vec<String>) -> Self {
        Self {
            program: program.to_string(),
            base_args,
        }
    }
}

/// Dispatch interface
///
/// The runner depends on this trait so tests can observe dispatch behavior
/// with a double instead of spawning processes.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Execute the external command once and report its outcome
    async fn dispatch(&self, spec: &InvocationSpec) -> Result<ProcessOutcome, TriggerError>;
}

/// Real dispatcher spawning the workflow command
#[derive(Debug)]
pub struct WorkflowDispatcher {
    command: WorkflowCommand,
    deadline: Duration,
}

impl WorkflowDispatcher {
    pub fn new(command: WorkflowCommand, deadline: Duration) -> Self {
        Self { command, deadline }
    }
}

#[async_trait]
impl Dispatcher for WorkflowDispatcher {
    async fn dispatch(&self, spec: &InvocationSpec) -> Result<ProcessOutcome, TriggerError> {
        let mut state = DispatchStateMachine::new();

        let mut command = Command::new(&self.command.program);
        command.args(&self.command.base_args);
        for field in spec.field_args() {
            command.arg("-f").arg(field);
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                state.transition(DispatchState::LaunchFailed);
                return Err(TriggerError::LaunchFailed {
                    message: e.to_string(),
                });
            }
        };
        state.transition(DispatchState::Started);

        // One drain task per pipe; each accumulates until its stream closes.
        let stdout_task = tokio::spawn(drain(child.stdout.take()));
        let stderr_task = tokio::spawn(drain(child.stderr.take()));
        state.transition(DispatchState::Draining);

        match timeout(self.deadline, child.wait()).await {
            Ok(Ok(status)) => {
                let stdout = collect(stdout_task.await);
                let stderr = collect(stderr_task.await);
                state.transition(DispatchState::Completed);

                if status.success() {
                    Ok(ProcessOutcome::Success { stdout })
                } else {
                    Ok(ProcessOutcome::NonZeroExit {
                        code: status.code().unwrap_or(-1),
                        stdout,
                        stderr,
                    })
                }
            }
            Ok(Err(e)) => {
                stdout_task.abort();
                stderr_task.abort();
                Err(TriggerError::WaitFailed {
                    message: e.to_string(),
                })
            }
            Err(_) => {
                // The process may exit between the deadline check and the
                // kill call; that race is expected, not a failure.
                let _ = child.kill().await;
                stdout_task.abort();
                stderr_task.abort();
                state.transition(DispatchState::TimedOut);
                Ok(ProcessOutcome::TimedOut)
            }
        }
    }
}

async fn drain<R>(pipe: Option<R>) -> Vec<u8>
where
    R: AsyncRead + Unpin + Send,
{
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf).await;
    }
    buf
}

fn collect(joined: Result<Vec<u8>, tokio::task::JoinError>) -> String {
    String::from_utf8_lossy(&joined.unwrap_or_default()).into_owned()
}
