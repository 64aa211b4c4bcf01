//! Graph module - Dependency index and traversals over the requirement set

pub mod depth;
pub mod index;
pub mod propagation;

pub use depth::DepthCalculator;
pub use index::{DependencyIndex, DependencyStatus};
pub use propagation::PropagationRun;
