//! Pool-wide partner ranking and summary statistics.

use serde::{Deserialize, Serialize};

use crate::algorithms::compatibility::{compute_compatibility, CompatibilityResult};
use crate::core::domain::StudentSchedule;

/// Rank every candidate against a target student.
///
/// The target is excluded from its own pool by student-name identity.
/// Nothing else is filtered: grade-incompatible zero scores stay in the
/// result so the caller can see why a candidate was rejected. The sort is
/// stable, so equal scores keep their encounter order.
pub fn rank_partners(
    target: &StudentSchedule,
    candidates: &[StudentSchedule],
) -> Vec<CompatibilityResult> {
    let mut results: Vec<CompatibilityResult> = candidates
        .iter()
        .filter(|candidate| candidate.student != target.student)
        .map(|candidate| compute_compatibility(target, candidate))
        .collect();

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}

/// Pool-level summary of a ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub total_candidates: usize,
    pub compatible_count: usize,
    pub incompatible_count: usize,
    pub mean_score: f64,
    pub median_score: f64,
    pub best_score: f64,
}

/// Compute summary statistics over a set of ranking results.
pub fn pool_snapshot(results: &[CompatibilityResult]) -> PoolSnapshot {
    let total_candidates = results.len();
    let compatible_count = results.iter().filter(|r| r.grade_compatible).count();
    let incompatible_count = total_candidates - compatible_count;

    if results.is_empty() {
        return PoolSnapshot {
            total_candidates,
            compatible_count,
            incompatible_count,
            mean_score: 0.0,
            median_score: 0.0,
            best_score: 0.0,
        };
    }

    let scores: Vec<f64> = results.iter().map(|r| r.score).collect();
    let mean_score = scores.iter().sum::<f64>() / total_candidates as f64;

    let mut sorted = scores.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median_score = if total_candidates % 2 == 0 {
        (sorted[total_candidates / 2 - 1] + sorted[total_candidates / 2]) / 2.0
    } else {
        sorted[total_candidates / 2]
    };

    let best_score = sorted.last().copied().unwrap_or(0.0);

    PoolSnapshot {
        total_candidates,
        compatible_count,
        incompatible_count,
        mean_score,
        median_score,
        best_score,
    }
}
