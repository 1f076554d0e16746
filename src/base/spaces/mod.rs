pub mod real_vector_bounds;
pub mod real_vector_state_space;
pub mod so2_state_space;
pub mod so3_state_space;

pub use real_vector_bounds::RealVectorBounds;
pub use real_vector_state_space::RealVectorStateSpace;
pub use so2_state_space::SO2StateSpace;
pub use so3_state_space::SO3StateSpace;
