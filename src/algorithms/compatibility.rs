//! Pairwise tandem-parking compatibility scoring.
//!
//! Two students share one parking spot well when their campus presence
//! interleaves: little simultaneous occupancy, a clean arrival/departure
//! handoff, compatible lunch privileges, and different afternoon end times.
//! The scorer is a pure function of two presence timelines; it reads nothing
//! else and mutates nothing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::domain::{DaySchedule, RotationDay, StudentSchedule};
use crate::core::error::ConfigurationError;
use crate::time::clock::overlap_minutes;

/// Maximum points for the schedule-overlap sub-score.
pub const OVERLAP_WEIGHT: f64 = 35.0;
/// Maximum points for the arrival/departure stagger sub-score.
pub const STAGGER_WEIGHT: f64 = 25.0;
/// Maximum points for the lunch sub-score.
pub const LUNCH_WEIGHT: f64 = 15.0;
/// Maximum points for the extracurricular-separation sub-score.
pub const EXTRACURRICULAR_WEIGHT: f64 = 15.0;
/// Bonus awarded to a grade-compatible pair.
pub const GRADE_BONUS: f64 = 10.0;

/// Half-width of the stagger normalization range, in minutes.
const STAGGER_RANGE_MINUTES: f64 = 600.0;
/// Departure-difference cap for the extracurricular sub-score, in minutes.
const EXTRACURRICULAR_CAP_MINUTES: f64 = 180.0;

/// Grade pairings allowed to share a spot. Seniors pair only with seniors.
const ALLOWED_GRADE_PAIRS: [(u8, u8); 5] = [(12, 12), (11, 11), (11, 10), (10, 11), (10, 10)];

/// The four sub-scores and their sum for one rotation day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayScore {
    pub overlap: f64,
    pub stagger: f64,
    pub lunch: f64,
    pub extracurricular: f64,
    pub total: f64,
}

/// Outcome of scoring one pair of students.
///
/// Produced fresh per comparison and never mutated; it carries no references
/// back into the source schedules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub student_a: String,
    pub student_b: String,
    pub grade_compatible: bool,
    /// Per-day breakdown; empty for grade-incompatible pairs.
    pub day_scores: BTreeMap<RotationDay, DayScore>,
    pub weekly_average: f64,
    pub grade_bonus: f64,
    /// Final score in [0, 100].
    pub score: f64,
}

/// Score one pair of students.
///
/// The grade gate runs first and short-circuits: an incompatible pairing
/// scores 0 with no per-day breakdown. A final score outside [0, 100] would
/// mean the weights no longer conserve and fails a fatal assertion.
pub fn compute_compatibility(a: &StudentSchedule, b: &StudentSchedule) -> CompatibilityResult {
    let grade_compatible = ALLOWED_GRADE_PAIRS.contains(&(a.grade, b.grade));
    if !grade_compatible {
        return CompatibilityResult {
            student_a: a.student.clone(),
            student_b: b.student.clone(),
            grade_compatible: false,
            day_scores: BTreeMap::new(),
            weekly_average: 0.0,
            grade_bonus: 0.0,
            score: 0.0,
        };
    }

    let mut day_scores = BTreeMap::new();
    let mut total = 0.0;
    for day in RotationDay::all() {
        let day_a = a.day(day);
        let day_b = b.day(day);

        let overlap = round2(overlap_score(day_a, day_b));
        let stagger = round2(stagger_score(day_a, day_b));
        let lunch = round2(lunch_score(day_a, day_b));
        let extracurricular = round2(extracurricular_score(day_a, day_b));
        let day_total = overlap + stagger + lunch + extracurricular;
        total += day_total;

        day_scores.insert(
            day,
            DayScore {
                overlap,
                stagger,
                lunch,
                extracurricular,
                total: day_total,
            },
        );
    }

    let weekly_average = total / RotationDay::COUNT as f64;
    let score = weekly_average + GRADE_BONUS;
    assert!(
        (0.0..=100.0).contains(&score),
        "{}",
        ConfigurationError::ScoreOutOfRange(score)
    );

    CompatibilityResult {
        student_a: a.student.clone(),
        student_b: b.student.clone(),
        grade_compatible: true,
        day_scores,
        weekly_average,
        grade_bonus: GRADE_BONUS,
        score,
    }
}

/// Simultaneous-occupancy sub-score: less shared campus time scores higher.
///
/// Total pairwise slot overlap is normalized by the smaller of the two
/// occupied totals, so a part-day student against a full-day student is
/// judged on the part-day window. A student absent all day cannot conflict
/// and earns the full award.
fn overlap_score(a: &DaySchedule, b: &DaySchedule) -> f64 {
    if a.arrival.is_none() || b.arrival.is_none() {
        return OVERLAP_WEIGHT;
    }

    let mut shared = 0;
    for slot_a in a.occupied() {
        for slot_b in b.occupied() {
            shared += overlap_minutes(
                slot_a.start_minutes,
                slot_a.end_minutes,
                slot_b.start_minutes,
                slot_b.end_minutes,
            );
        }
    }

    let smaller_total = a.occupied_minutes().min(b.occupied_minutes());
    if smaller_total == 0 {
        return OVERLAP_WEIGHT;
    }

    let normalized = shared as f64 / smaller_total as f64;
    OVERLAP_WEIGHT * (1.0 - normalized)
}

/// Handoff sub-score: the gap between the earlier student's departure and
/// the later student's arrival, mapped linearly from [-600, +600] minutes
/// onto the full weight.
fn stagger_score(a: &DaySchedule, b: &DaySchedule) -> f64 {
    let (arrival_a, arrival_b) = match (a.arrival, b.arrival) {
        (Some(x), Some(y)) => (x, y),
        _ => return STAGGER_WEIGHT,
    };

    let (earlier, later_arrival) = if arrival_a <= arrival_b {
        (a, arrival_b)
    } else {
        (b, arrival_a)
    };

    let earlier_departure = match earlier.departure {
        Some(d) => d,
        None => return STAGGER_WEIGHT,
    };

    let gap = (later_arrival - earlier_departure) as f64;
    let normalized =
        ((gap + STAGGER_RANGE_MINUTES) / (2.0 * STAGGER_RANGE_MINUTES)).clamp(0.0, 1.0);
    STAGGER_WEIGHT * normalized
}

/// Lunch sub-score, categorical on the may-leave-and-free flag pair.
///
/// Exactly one flexible student scores full, both flexible scores lowest,
/// neither scores the neutral half.
fn lunch_score(a: &DaySchedule, b: &DaySchedule) -> f64 {
    if a.arrival.is_none() || b.arrival.is_none() {
        return LUNCH_WEIGHT;
    }

    let a_flexible = a.may_leave_at_lunch && a.lunch_free;
    let b_flexible = b.may_leave_at_lunch && b.lunch_free;
    match (a_flexible, b_flexible) {
        (true, true) => 0.3 * LUNCH_WEIGHT,
        (true, false) | (false, true) => LUNCH_WEIGHT,
        (false, false) => 0.5 * LUNCH_WEIGHT,
    }
}

/// Afternoon-separation sub-score: departure difference capped at 180
/// minutes. Equal departures are the maximal conflict and score zero.
fn extracurricular_score(a: &DaySchedule, b: &DaySchedule) -> f64 {
    match (a.departure, b.departure) {
        (Some(depart_a), Some(depart_b)) => {
            let diff = ((depart_a - depart_b).abs() as f64).min(EXTRACURRICULAR_CAP_MINUTES);
            EXTRACURRICULAR_WEIGHT * (diff / EXTRACURRICULAR_CAP_MINUTES)
        }
        _ => EXTRACURRICULAR_WEIGHT / 2.0,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{SlotCategory, SlotState, SlotStatus};

    fn day(n: u8) -> RotationDay {
        RotationDay::new(n).unwrap()
    }

    /// Hand-built day with the given occupied intervals; departure follows
    /// class end unless overridden in the test.
    fn presence_day(
        n: u8,
        intervals: &[(i32, i32)],
        may_leave: bool,
        lunch_free: bool,
    ) -> DaySchedule {
        let slots: Vec<SlotStatus> = intervals
            .iter()
            .enumerate()
            .map(|(i, (start, end))| SlotStatus {
                name: format!("Block {}", i + 1),
                category: SlotCategory::Block,
                start_minutes: *start,
                end_minutes: *end,
                state: SlotState::Occupied,
                course: None,
            })
            .collect();
        let arrival = slots.iter().map(|s| s.start_minutes).min();
        let class_end = slots.iter().map(|s| s.end_minutes).max();
        DaySchedule {
            day: day(n),
            arrival,
            class_end,
            departure: class_end,
            occupied_slots: slots.iter().map(|s| s.name.clone()).collect(),
            free_slots: Vec::new(),
            lunch_free,
            may_leave_at_lunch: may_leave,
            slots,
        }
    }

    /// Student with the same occupied intervals on every rotation day.
    fn uniform_student(name: &str, grade: u8, intervals: &[(i32, i32)]) -> StudentSchedule {
        let days = RotationDay::all()
            .map(|d| (d, presence_day(d.number(), intervals, grade == 12, true)))
            .collect();
        StudentSchedule {
            student: name.to_string(),
            grade,
            days,
            co_curricular: None,
        }
    }

    /// Student occupied only on day 1.
    fn day_one_student(name: &str, grade: u8, intervals: &[(i32, i32)]) -> StudentSchedule {
        let days = RotationDay::all()
            .map(|d| {
                let day_intervals = if d.number() == 1 { intervals } else { &[][..] };
                (d, presence_day(d.number(), day_intervals, false, false))
            })
            .collect();
        StudentSchedule {
            student: name.to_string(),
            grade,
            days,
            co_curricular: None,
        }
    }

    #[test]
    fn test_weights_conserve() {
        let day_max = OVERLAP_WEIGHT + STAGGER_WEIGHT + LUNCH_WEIGHT + EXTRACURRICULAR_WEIGHT;
        assert_eq!(day_max, 90.0);
        assert_eq!(day_max + GRADE_BONUS, 100.0);
    }

    #[test]
    fn test_grade_gate_totality() {
        let full_day = [(480, 555), (630, 705)];
        for (grade_a, grade_b) in [(12, 11), (11, 12), (12, 10), (10, 12), (9, 9), (9, 10), (11, 9)]
        {
            let a = uniform_student("A", grade_a, &full_day);
            let b = uniform_student("B", grade_b, &full_day);
            let result = compute_compatibility(&a, &b);
            assert!(!result.grade_compatible, "{}-{}", grade_a, grade_b);
            assert_eq!(result.score, 0.0);
            assert_eq!(result.grade_bonus, 0.0);
            assert!(result.day_scores.is_empty());
        }
    }

    #[test]
    fn test_allowed_pairs_get_full_bonus() {
        for (grade_a, grade_b) in ALLOWED_GRADE_PAIRS {
            let a = uniform_student("A", grade_a, &[]);
            let b = uniform_student("B", grade_b, &[]);
            let result = compute_compatibility(&a, &b);
            assert!(result.grade_compatible);
            assert_eq!(result.grade_bonus, GRADE_BONUS);
        }
    }

    #[test]
    fn test_absent_day_scores_maximal_no_conflict() {
        let a = presence_day(1, &[], false, false);
        let b = presence_day(1, &[(480, 555)], false, false);

        assert_eq!(overlap_score(&a, &b), OVERLAP_WEIGHT);
        assert_eq!(stagger_score(&a, &b), STAGGER_WEIGHT);
        assert_eq!(lunch_score(&a, &b), LUNCH_WEIGHT);
        // Departure unknown on one side: half award.
        assert_eq!(extracurricular_score(&a, &b), EXTRACURRICULAR_WEIGHT / 2.0);
    }

    #[test]
    fn test_overlap_extremes() {
        let schedule = [(480, 555), (630, 705)];
        let same_a = presence_day(1, &schedule, false, false);
        let same_b = presence_day(1, &schedule, false, false);
        assert_eq!(overlap_score(&same_a, &same_b), 0.0);

        let morning = presence_day(1, &[(480, 705)], false, false);
        let afternoon = presence_day(1, &[(765, 900)], false, false);
        assert_eq!(overlap_score(&morning, &afternoon), OVERLAP_WEIGHT);
    }

    #[test]
    fn test_overlap_normalizes_by_smaller_student() {
        // A holds 8:00-15:00; B holds only 8:00-9:15, fully inside A's day.
        let long = presence_day(1, &[(480, 900)], false, false);
        let short = presence_day(1, &[(480, 555)], false, false);
        assert_eq!(overlap_score(&long, &short), 0.0);
    }

    #[test]
    fn test_stagger_mapping() {
        // Clean one-hour handoff: A departs 11:45, B arrives 12:45.
        let a = presence_day(1, &[(480, 705)], false, false);
        let b = presence_day(1, &[(765, 900)], false, false);
        assert_eq!(stagger_score(&a, &b), STAGGER_WEIGHT * ((60.0 + 600.0) / 1200.0));
        // Symmetric in argument order.
        assert_eq!(stagger_score(&a, &b), stagger_score(&b, &a));

        // Exact swap: B arrives the minute A departs.
        let c = presence_day(1, &[(705, 900)], false, false);
        assert_eq!(stagger_score(&a, &c), STAGGER_WEIGHT / 2.0);

        // Fully simultaneous pair clamps at the bottom of the range.
        let mut all_day_a = presence_day(1, &[(480, 900)], false, false);
        let mut all_day_b = presence_day(1, &[(480, 900)], false, false);
        all_day_a.departure = Some(480 + 1300);
        all_day_b.arrival = Some(480);
        assert_eq!(stagger_score(&all_day_a, &all_day_b), 0.0);
    }

    #[test]
    fn test_lunch_categories() {
        let flexible = presence_day(1, &[(480, 555), (765, 840)], true, true);
        let rigid = presence_day(1, &[(480, 555), (765, 840)], false, false);

        assert_eq!(lunch_score(&flexible, &flexible), 0.3 * LUNCH_WEIGHT);
        assert_eq!(lunch_score(&flexible, &rigid), LUNCH_WEIGHT);
        assert_eq!(lunch_score(&rigid, &flexible), LUNCH_WEIGHT);
        assert_eq!(lunch_score(&rigid, &rigid), 0.5 * LUNCH_WEIGHT);

        // May-leave without a free lunch is not flexible.
        let leave_only = presence_day(1, &[(480, 555), (765, 840)], true, false);
        assert_eq!(lunch_score(&leave_only, &rigid), 0.5 * LUNCH_WEIGHT);
    }

    #[test]
    fn test_extracurricular_separation() {
        let mut a = presence_day(1, &[(480, 705)], false, false);
        let mut b = presence_day(1, &[(480, 705)], false, false);

        assert_eq!(extracurricular_score(&a, &b), 0.0);

        b.departure = Some(705 + 90);
        assert_eq!(extracurricular_score(&a, &b), EXTRACURRICULAR_WEIGHT / 2.0);

        b.departure = Some(705 + 180);
        assert_eq!(extracurricular_score(&a, &b), EXTRACURRICULAR_WEIGHT);

        // Capped beyond 180 minutes.
        b.departure = Some(705 + 400);
        assert_eq!(extracurricular_score(&a, &b), EXTRACURRICULAR_WEIGHT);

        a.departure = None;
        assert_eq!(extracurricular_score(&a, &b), EXTRACURRICULAR_WEIGHT / 2.0);
    }

    #[test]
    fn test_day_one_reference_scenario() {
        // A: 8:00-9:15 and 10:30-11:45; B: 12:45-14:00 only. Juniors.
        let a = day_one_student("Harper, Quinn", 11, &[(480, 555), (630, 705)]);
        let b = day_one_student("Reyes, Dana", 11, &[(765, 840)]);

        let result = compute_compatibility(&a, &b);
        assert!(result.grade_compatible);

        let day1 = &result.day_scores[&day(1)];
        assert_eq!(day1.overlap, 35.0);
        assert_eq!(day1.stagger, 13.75);
        assert_eq!(day1.lunch, 7.5);
        assert_eq!(day1.extracurricular, 11.25);
        assert_eq!(day1.total, 67.5);

        // Days 2-6: nobody on campus, maximal no-conflict day.
        for n in 2..=6 {
            assert_eq!(result.day_scores[&day(n)].total, 82.5);
        }

        assert_eq!(result.weekly_average, 80.0);
        assert_eq!(result.score, 90.0);
    }

    #[test]
    fn test_identical_full_schedules_score_below_fifty() {
        // The five block periods of the standard grid, every day.
        let full = [(480, 555), (570, 625), (630, 705), (765, 840), (845, 900)];
        for grade in [10, 11, 12] {
            let a = uniform_student("A", grade, &full);
            let b = uniform_student("B", grade, &full);
            let result = compute_compatibility(&a, &b);
            assert!(
                result.score < 50.0,
                "grade {} pair scored {}",
                grade,
                result.score
            );
        }
    }

    #[test]
    fn test_disjoint_schedules_max_overlap_every_day() {
        let a = uniform_student("A", 11, &[(480, 705)]);
        let b = uniform_student("B", 11, &[(765, 900)]);
        let result = compute_compatibility(&a, &b);
        for (_, day_score) in &result.day_scores {
            assert_eq!(day_score.overlap, OVERLAP_WEIGHT);
        }
    }

    #[test]
    fn test_sub_scores_rounded_to_two_decimals() {
        // Gap of -25 minutes: 25 * 575/1200 = 11.979166..., rounds to 11.98.
        let a = presence_day(1, &[(735, 760)], false, false);
        let b = presence_day(1, &[(735, 760)], false, false);
        let rounded = round2(stagger_score(&a, &b));
        assert_eq!(rounded, 11.98);
    }
}
