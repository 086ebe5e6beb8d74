//! Compatibility scoring and ranking.
//!
//! - [`compatibility`]: pairwise tandem-parking score for two students
//! - [`ranking`]: pool-wide ranking and summary statistics
//!
//! Every comparison is an independent pure function of its two inputs, so a
//! ranking run over N candidates may fan out freely; the only ordering
//! requirement is the final stable sort.

pub mod compatibility;
pub mod ranking;

pub use compatibility::{
    compute_compatibility, CompatibilityResult, DayScore, EXTRACURRICULAR_WEIGHT, GRADE_BONUS,
    LUNCH_WEIGHT, OVERLAP_WEIGHT, STAGGER_WEIGHT,
};
pub use ranking::{pool_snapshot, rank_partners, PoolSnapshot};
