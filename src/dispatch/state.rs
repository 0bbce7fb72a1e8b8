//! Dispatch state tracking
//!
//! In-memory record of the dispatcher's progression through
//! `Idle → Started → Draining → {Completed, TimedOut, LaunchFailed}`.
//! One launch per machine; there is no resume, so nothing is persisted.

use chrono::{DateTime, Utc};

/// Dispatch lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Started,
    Draining,
    Completed,
    TimedOut,
    LaunchFailed,
}

impl DispatchState {
    /// Terminal states end the run; no transition leaves them
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::TimedOut | Self::LaunchFailed)
    }
}

/// One recorded transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub from: DispatchState,
    pub to: DispatchState,
    pub timestamp: DateTime<Utc>,
}

/// Transition recorder for a single dispatch
#[derive(Debug)]
pub struct DispatchStateMachine {
    current: DispatchState,
    transitions: Vec<StateTransition>,
}

impl Default for DispatchStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchStateMachine {
    /// Create a machine in `Idle`
    pub fn new() -> Self {
        Self {
            current: DispatchState::Idle,
            transitions: Vec::new(),
        }
    }

    /// Record a transition to a new state
    pub fn transition(&mut self, to: DispatchState) {
        self.transitions.push(StateTransition {
            from: self.current,
            to,
            timestamp: Utc::now(),
        });
        self.current = to;
    }

    /// Current state
    pub fn current(&self) -> DispatchState {
        self.current
    }

    /// Recorded transition history
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }
}
