//! The fixed six-day bell-schedule template.
//!
//! The school runs a six-day rotation with seven numbered blocks; five block
//! periods meet each day and the remaining slots are fixed campus-life
//! intervals (break, lunch, seminars, office hours). The template is an
//! immutable process-wide constant: it is built and checked once behind a
//! [`once_cell::sync::Lazy`] and never mutated afterwards.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::core::domain::{RotationDay, SlotCategory};
use crate::core::error::{ConfigurationError, ParseResult};
use crate::time::clock::time_to_minutes;

/// One scheduled interval on one rotation day.
///
/// Wall-clock strings are kept for display; the minutes-since-midnight
/// equivalents are derived at construction and cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BellSlot {
    pub name: String,
    /// Numbered block (1–7) for `block`-category slots, `None` otherwise.
    pub block: Option<u8>,
    pub category: SlotCategory,
    pub start: String,
    pub end: String,
    pub start_minutes: i32,
    pub end_minutes: i32,
}

impl BellSlot {
    /// Builds a slot, deriving the cached minute fields from the wall-clock
    /// strings.
    pub fn new(
        name: &str,
        block: Option<u8>,
        category: SlotCategory,
        start: &str,
        end: &str,
    ) -> ParseResult<Self> {
        Ok(Self {
            name: name.to_string(),
            block,
            category,
            start: start.to_string(),
            end: end.to_string(),
            start_minutes: time_to_minutes(start)?,
            end_minutes: time_to_minutes(end)?,
        })
    }

    pub fn duration_minutes(&self) -> i32 {
        self.end_minutes - self.start_minutes
    }
}

/// Which five of the seven blocks meet on each rotation day, in period order.
const BLOCK_ROTATION: [[u8; 5]; RotationDay::COUNT] = [
    [1, 2, 3, 4, 5],
    [6, 7, 1, 2, 3],
    [4, 5, 6, 7, 1],
    [2, 3, 4, 5, 6],
    [7, 1, 2, 3, 4],
    [5, 6, 7, 1, 2],
];

/// Midday special between lunch and the first afternoon block, per day.
const MIDDAY_SPECIALS: [(&str, SlotCategory); RotationDay::COUNT] = [
    ("Community Meeting", SlotCategory::Community),
    ("Senior Seminar", SlotCategory::Seminar),
    ("Class Collaboration", SlotCategory::Collaboration),
    ("Junior Seminar", SlotCategory::Seminar),
    ("Directed Study", SlotCategory::DirectedStudy),
    ("Sophomore Seminar", SlotCategory::Seminar),
];

/// Closing slot of each day.
const AFTERNOON_SPECIALS: [(&str, SlotCategory); RotationDay::COUNT] = [
    ("Office Hours", SlotCategory::OfficeHours),
    ("Directed Study", SlotCategory::DirectedStudy),
    ("Office Hours", SlotCategory::OfficeHours),
    ("Directed Study", SlotCategory::DirectedStudy),
    ("Office Hours", SlotCategory::OfficeHours),
    ("Office Hours", SlotCategory::OfficeHours),
];

/// How many of the six days each numbered block must appear on for the
/// rotation to actually rotate.
const MIN_BLOCK_APPEARANCES: usize = 3;

static STANDARD: Lazy<BellSchedule> = Lazy::new(|| {
    let schedule = BellSchedule::build_standard();
    schedule
        .validate()
        .expect("standard bell schedule satisfies the rotation invariants");
    schedule
});

/// The fixed mapping from rotation day to its ordered bell slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BellSchedule {
    days: BTreeMap<RotationDay, Vec<BellSlot>>,
}

impl BellSchedule {
    /// The process-wide standard template, built once on first use.
    pub fn standard() -> &'static BellSchedule {
        &STANDARD
    }

    fn build_standard() -> Self {
        let slot = |name: &str, block, category, start, end| {
            BellSlot::new(name, block, category, start, end)
                .expect("bell template times are well-formed")
        };

        let mut days = BTreeMap::new();
        for (index, day) in RotationDay::all().enumerate() {
            let blocks = BLOCK_ROTATION[index];
            let (midday_name, midday_category) = MIDDAY_SPECIALS[index];
            let (closing_name, closing_category) = AFTERNOON_SPECIALS[index];

            let block_slot = |n: u8, start, end| {
                slot(
                    &format!("Block {}", n),
                    Some(n),
                    SlotCategory::Block,
                    start,
                    end,
                )
            };

            days.insert(
                day,
                vec![
                    block_slot(blocks[0], "8:00", "9:15"),
                    slot("Morning Break", None, SlotCategory::Break, "9:15", "9:30"),
                    block_slot(blocks[1], "9:30", "10:25"),
                    block_slot(blocks[2], "10:30", "11:45"),
                    slot("Lunch", None, SlotCategory::Lunch, "11:45", "12:15"),
                    slot(midday_name, None, midday_category, "12:15", "12:40"),
                    block_slot(blocks[3], "12:45", "14:00"),
                    block_slot(blocks[4], "14:05", "15:00"),
                    slot(closing_name, None, closing_category, "15:05", "15:45"),
                ],
            );
        }

        Self { days }
    }

    /// The ordered slots of one rotation day.
    pub fn day(&self, day: RotationDay) -> &[BellSlot] {
        self.days
            .get(&day)
            .map(Vec::as_slice)
            .expect("bell schedule covers all rotation days")
    }

    /// Iterates `(day, slots)` pairs in rotation order.
    pub fn days(&self) -> impl Iterator<Item = (RotationDay, &[BellSlot])> {
        self.days.iter().map(|(day, slots)| (*day, slots.as_slice()))
    }

    /// The single lunch slot of a rotation day.
    pub fn lunch_slot(&self, day: RotationDay) -> &BellSlot {
        self.day(day)
            .iter()
            .find(|s| s.category == SlotCategory::Lunch)
            .expect("every rotation day has exactly one lunch slot")
    }

    /// Checks the template invariants: at least six slots per day, exactly
    /// one lunch and one break, slots sorted by start and non-overlapping,
    /// and every block 1–7 appearing on at least three of the six days.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let invalid = |message: String| ConfigurationError::InvalidBellSchedule(message);

        let mut block_days: BTreeMap<u8, usize> = BTreeMap::new();
        for day in RotationDay::all() {
            let slots = self
                .days
                .get(&day)
                .ok_or_else(|| invalid(format!("{} is missing", day)))?;

            if slots.len() < 6 {
                return Err(invalid(format!(
                    "{} has only {} slots",
                    day,
                    slots.len()
                )));
            }

            for category in [SlotCategory::Lunch, SlotCategory::Break] {
                let count = slots.iter().filter(|s| s.category == category).count();
                if count != 1 {
                    return Err(invalid(format!(
                        "{} has {} {:?} slots, expected exactly 1",
                        day, count, category
                    )));
                }
            }

            for pair in slots.windows(2) {
                if pair[1].start_minutes < pair[0].end_minutes {
                    return Err(invalid(format!(
                        "{}: '{}' overlaps '{}'",
                        day, pair[0].name, pair[1].name
                    )));
                }
            }

            let mut seen_today = Vec::new();
            for slot in slots {
                if let Some(block) = slot.block {
                    if !seen_today.contains(&block) {
                        seen_today.push(block);
                        *block_days.entry(block).or_insert(0) += 1;
                    }
                }
            }
        }

        for block in 1..=7u8 {
            let appearances = block_days.get(&block).copied().unwrap_or(0);
            if appearances < MIN_BLOCK_APPEARANCES {
                return Err(invalid(format!(
                    "block {} appears on only {} of {} days",
                    block,
                    appearances,
                    RotationDay::COUNT
                )));
            }
        }

        Ok(())
    }
}
