use crate::base::state::State;
use crate::error::CallbackError;

/// Host-supplied collision/feasibility predicate. Implementations may be backed by an opaque
/// callback across an FFI boundary, so failure is reported through `Result` rather than by
/// panicking.
pub trait ValidityChecker: Send + Sync {
    fn is_valid(&self, state: &State) -> Result<bool, CallbackError>;
}

/// Accepts every state. Useful for planner unit tests and for problems where validity is
/// entirely encoded in the state space's bounds.
pub struct AllValidityChecker;

impl ValidityChecker for AllValidityChecker {
    fn is_valid(&self, _state: &State) -> Result<bool, CallbackError> {
        Ok(true)
    }
}

/// Wraps a plain closure as a `ValidityChecker`, for problems whose validity predicate can't
/// fail and doesn't need its own named type.
pub struct FunctionalValidityChecker<F>(F)
where
    F: Fn(&State) -> bool + Send + Sync;

impl<F> FunctionalValidityChecker<F>
where
    F: Fn(&State) -> bool + Send + Sync,
{
    pub fn new(predicate: F) -> Self {
        Self(predicate)
    }
}

impl<F> ValidityChecker for FunctionalValidityChecker<F>
where
    F: Fn(&State) -> bool + Send + Sync,
{
    fn is_valid(&self, state: &State) -> Result<bool, CallbackError> {
        Ok((self.0)(state))
    }
}
