pub mod base;
pub mod datastructure;
pub mod error;
pub mod geometric;
pub mod randomness;
pub mod tools;

pub mod prelude {
    pub use crate::base::goal_region::GoalRegion;
    pub use crate::base::path::Path;
    pub use crate::base::planner::Planner;
    pub use crate::base::problem_definition::ProblemDefinition;
    pub use crate::base::state::State;
    pub use crate::base::state_validity_checker::ValidityChecker;
    pub use crate::base::statespace::StateSpace;
    pub use crate::error::{CallbackError, PlannerError};
}
