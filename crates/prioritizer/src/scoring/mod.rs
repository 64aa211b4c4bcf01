//! Scoring module
//!
//! Intrinsic attribute scoring, the unmet-dependency combiner and the tier
//! classifier. None of these traverse the graph themselves.

pub mod dynamic;
pub mod intrinsic;
pub mod tier;

pub use dynamic::dynamic_score;
pub use intrinsic::intrinsic_score;
pub use tier::PriorityTier;
