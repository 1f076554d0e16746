use std::sync::Arc;
use std::time::Duration;

use crate::base::path::Path;
use crate::base::state_validity_checker::ValidityChecker;
use crate::error::PlannerError;

/// Common shape of every planner in this crate: configure once against a validity checker, then
/// solve (possibly more than once, for planners like PRM that retain their roadmap across
/// calls).
pub trait Planner {
    /// Bind the validity checker and perform any one-time setup (e.g. PRM's resolution
    /// defaults). Must be called before `solve`.
    fn setup(&mut self, checker: Arc<dyn ValidityChecker>);

    /// Search for a solution, giving up after `timeout` elapses.
    fn solve(&mut self, timeout: Duration) -> Result<Path, PlannerError>;

    fn name(&self) -> &'static str;
}
