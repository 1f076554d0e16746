//! We strive to minimize the use of bare constants scattered through the planner code, but a
//! handful of numeric defaults are genuinely arbitrary engineering choices rather than values
//! derived from the problem at hand. They live here, named and documented, instead of scattered
//! as literals.

/// Lower bound on the motion validator's step size `ρ`, regardless of how small
/// `max_distance` / `connection_radius` is configured. Prevents a degenerate planner
/// configuration from making every motion check subdivide into an unbounded number of steps.
pub const MOTION_VALIDATOR_RESOLUTION_FLOOR: f64 = 1e-3;

/// Fraction of a planner's characteristic step length (`max_distance` for the tree planners,
/// `connection_radius` for PRM) used as the motion validator's resolution `ρ`, before the floor
/// above is applied.
pub const MOTION_VALIDATOR_RESOLUTION_FRACTION: f64 = 0.1;

/// Derive the motion validator's step size from a planner's characteristic length.
pub fn motion_validator_resolution(characteristic_length: f64) -> f64 {
    (characteristic_length * MOTION_VALIDATOR_RESOLUTION_FRACTION)
        .max(MOTION_VALIDATOR_RESOLUTION_FLOOR)
}

/// When a goal region's `sample_goal` keeps returning off-manifold or invalid states, this is
/// how many attempts are made for a single logical "give me a goal sample" request before it is
/// abandoned (not yet fatal to the solve).
pub const MAX_GOAL_SAMPLE_ATTEMPTS_PER_CALL: u32 = 16;

/// Total goal-sample attempts (across every request made during one `solve`) tolerated before
/// `InvalidGoalSample` is surfaced as a hard failure.
pub const MAX_GOAL_SAMPLE_ATTEMPTS_TOTAL: u32 = 100;

/// Default number of goal samples PRM inserts as temporary query vertices.
pub const PRM_DEFAULT_GOAL_SAMPLES: usize = 5;

/// Number of roadmap vertices `Prm::solve` constructs on its first call if `construct_roadmap`
/// wasn't called explicitly beforehand.
pub const PRM_DEFAULT_ROADMAP_SAMPLES: usize = 200;

/// Real-vector dimension above which the KD-tree nearest-neighbor specialization is no longer
/// selected in favor of the always-correct linear scan.
pub const KD_TREE_MAX_DIMENSION: usize = 8;
