pub mod prm;
pub mod roadmap;
pub mod rrt;
pub mod rrt_connect;
pub mod rrt_star;
pub mod tree;

pub use prm::Prm;
pub use rrt::Rrt;
pub use rrt_connect::RrtConnect;
pub use rrt_star::RrtStar;
