use std::fmt;

use thiserror::Error;

/// A failure surfaced by a host-supplied callback (`ValidityChecker` or `GoalRegion`).
///
/// Callbacks in this crate are opaque: they may be backed by a scripting-language object across
/// an FFI boundary, where a Rust panic is not an option. Implementations report failure by
/// returning `Err(CallbackError)` instead, and the planner propagates the message verbatim.
#[derive(Debug, Clone)]
pub struct CallbackError {
    message: String,
}

impl CallbackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CallbackError {}

/// The error taxonomy returned by planner `setup`/`solve`/`construct_roadmap`.
///
/// Per-iteration failures (an invalid sample, an invalid motion) are not represented here: they
/// are discarded internally and the planning loop continues. Only outcomes that end a `solve`
/// call reach this enum.
#[derive(Error, Debug, Clone)]
pub enum PlannerError {
    #[error("solve() was called before setup()")]
    NotConfigured,

    #[error("start state is invalid or does not satisfy the state space's bounds")]
    InvalidStart,

    #[error("failed to obtain a valid goal sample after exhausting the retry budget")]
    InvalidGoalSample,

    #[error("no solution found within the time budget")]
    Timeout,

    #[error("no path exists between the start and the goal region in the constructed roadmap")]
    NoSolution,

    #[error("host callback failed: {0}")]
    CallbackFailed(#[from] CallbackError),
}
