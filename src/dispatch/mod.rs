pub mod dispatcher;
pub mod outcome;
pub mod state;

pub use dispatcher::{Dispatcher, InvocationSpec, WorkflowCommand, WorkflowDispatcher};
pub use outcome::ProcessOutcome;
pub use state::{DispatchState, DispatchStateMachine, StateTransition};
