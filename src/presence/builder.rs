//! Per-day campus-presence builder.
//!
//! For one student, walks the bell grid of every rotation day and reconciles
//! it with the parsed course buckets: numbered blocks against the academic
//! courses, directed-study and seminar slots against their buckets, and a
//! daily co-curricular against the departure time. Each call is a pure
//! function of its inputs; nothing is cached between students.

use std::collections::BTreeMap;

use crate::core::domain::{
    CoCurricular, CourseBuckets, DaySchedule, PatternToken, RotationDay, SlotCategory,
    SlotState, SlotStatus, StudentSchedule,
};
use crate::time::bell::{BellSchedule, BellSlot};

/// Default end of a daily co-curricular, 17:00.
pub const DEFAULT_CO_CURRICULAR_END: i32 = 17 * 60;

/// Grade level allowed to leave campus at lunch.
pub const SENIOR_GRADE: u8 = 12;

/// Per-run knobs for the builder.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Overrides the default co-curricular end time, minutes since midnight.
    pub co_curricular_end: Option<i32>,
}

/// Build a student's full six-day presence timeline.
pub fn build_schedule(
    student: &str,
    grade: u8,
    courses: &CourseBuckets,
    options: &BuildOptions,
) -> StudentSchedule {
    let co_curricular = courses.co_curricular.first().map(|record| CoCurricular {
        name: record.title.clone(),
        end_minutes: options
            .co_curricular_end
            .unwrap_or(DEFAULT_CO_CURRICULAR_END),
    });

    let days = BellSchedule::standard()
        .days()
        .map(|(day, slots)| {
            (
                day,
                build_day(grade, courses, day, slots, co_curricular.as_ref()),
            )
        })
        .collect();

    StudentSchedule {
        student: student.to_string(),
        grade,
        days,
        co_curricular,
    }
}

/// Grade-level keyword used to match seminar slot names.
fn grade_keyword(grade: u8) -> Option<&'static str> {
    match grade {
        10 => Some("sophomore"),
        11 => Some("junior"),
        12 => Some("senior"),
        _ => None,
    }
}

/// Classify every bell slot of one rotation day for one student.
fn build_day(
    grade: u8,
    courses: &CourseBuckets,
    day: RotationDay,
    slots: &[BellSlot],
    co_curricular: Option<&CoCurricular>,
) -> DaySchedule {
    // Numbered blocks the student's academic courses claim today.
    let mut active_blocks: BTreeMap<u8, &str> = BTreeMap::new();
    for record in &courses.academic {
        if let Some(block) = record.block_on(day) {
            active_blocks.entry(block).or_insert(record.title.as_str());
        }
    }

    let directed_study = courses.directed_study.iter().find(|r| r.meets_on(day));
    let midday_seminar = courses
        .seminar
        .iter()
        .find(|r| matches!(r.assignment(day), Some(PatternToken::MiddaySeminar)));
    let keyword = grade_keyword(grade);

    let mut statuses = Vec::with_capacity(slots.len());
    for slot in slots {
        let lower_name = slot.name.to_lowercase();
        let (state, course) = match slot.category {
            SlotCategory::Block => match slot.block.and_then(|b| active_blocks.get(&b)) {
                Some(title) => (SlotState::Occupied, Some((*title).to_string())),
                None => (SlotState::Free, None),
            },
            SlotCategory::DirectedStudy => match directed_study {
                Some(record) => (SlotState::Occupied, Some(record.title.clone())),
                None => (SlotState::Free, None),
            },
            SlotCategory::Seminar => {
                // Two independent attendance rules: an explicit midday-seminar
                // record fills a senior-named slot, and a grade keyword in the
                // slot name fills the matching grade's slot. Either suffices.
                let via_record = midday_seminar.is_some() && lower_name.contains("senior");
                let via_grade = keyword.map_or(false, |k| lower_name.contains(k));
                if via_record || via_grade {
                    let title = if via_record {
                        midday_seminar.map(|r| r.title.clone())
                    } else {
                        None
                    };
                    (SlotState::Occupied, title)
                } else {
                    (SlotState::Free, None)
                }
            }
            SlotCategory::Lunch => (SlotState::Lunch, None),
            SlotCategory::Break => (SlotState::Break, None),
            SlotCategory::Collaboration
            | SlotCategory::Community
            | SlotCategory::OfficeHours => (SlotState::Free, None),
        };

        statuses.push(SlotStatus {
            name: slot.name.clone(),
            category: slot.category,
            start_minutes: slot.start_minutes,
            end_minutes: slot.end_minutes,
            state,
            course,
        });
    }

    let arrival = statuses
        .iter()
        .filter(|s| s.is_occupied())
        .map(|s| s.start_minutes)
        .min();
    let class_end = statuses
        .iter()
        .filter(|s| s.is_occupied())
        .map(|s| s.end_minutes)
        .max();

    // A co-curricular extends an existing class end; it does not create
    // presence on a day with no obligations.
    let departure = match (class_end, co_curricular) {
        (Some(end), Some(cc)) => Some(end.max(cc.end_minutes)),
        (Some(end), None) => Some(end),
        (None, _) => None,
    };

    let lunch = statuses.iter().find(|s| s.category == SlotCategory::Lunch);
    let lunch_free = lunch.map_or(false, |lunch| {
        let obligation_before = statuses
            .iter()
            .any(|s| s.is_occupied() && s.end_minutes <= lunch.start_minutes);
        let obligation_after = statuses
            .iter()
            .any(|s| s.is_occupied() && s.start_minutes >= lunch.end_minutes);
        obligation_before && obligation_after
    });

    let occupied_slots: Vec<String> = statuses
        .iter()
        .filter(|s| s.is_occupied())
        .map(|s| s.name.clone())
        .collect();
    let free_slots: Vec<String> = statuses
        .iter()
        .filter(|s| s.category == SlotCategory::Block && !s.is_occupied())
        .map(|s| s.name.clone())
        .collect();

    log::debug!(
        "{}: {} occupied, arrival {:?}, departure {:?}",
        day,
        occupied_slots.len(),
        arrival,
        departure
    );

    DaySchedule {
        day,
        arrival,
        class_end,
        departure,
        occupied_slots,
        free_slots,
        lunch_free,
        may_leave_at_lunch: grade == SENIOR_GRADE,
        slots: statuses,
    }
}
