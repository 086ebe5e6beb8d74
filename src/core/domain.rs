//! Domain models for student schedules and campus presence.
//!
//! This module provides the core data structures shared by the parser, the
//! presence builder, and the compatibility scorer: rotation days, bell-slot
//! vocabulary, parsed course records, and the per-student presence timeline.
//! All of them are plain value objects with no back-references; a caller may
//! drop the source records once a derived value has been produced.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigurationError;

/// One of the six repeating school-day templates.
///
/// A rotation day is not a calendar weekday: the school cycles through days
/// 1–6 regardless of where weekends fall. Values outside 1–6 are rejected at
/// construction.
///
/// # Examples
///
/// ```
/// use tandem_core::core::domain::RotationDay;
///
/// let day = RotationDay::new(3).unwrap();
/// assert_eq!(day.number(), 3);
/// assert!(RotationDay::new(7).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RotationDay(u8);

impl RotationDay {
    /// Number of days in the rotation.
    pub const COUNT: usize = 6;

    /// Creates a rotation day, rejecting values outside 1–6.
    pub fn new(day: u8) -> Result<Self, ConfigurationError> {
        if (1..=Self::COUNT as u8).contains(&day) {
            Ok(Self(day))
        } else {
            Err(ConfigurationError::InvalidRotationDay(day))
        }
    }

    /// Iterates day 1 through day 6 in order.
    pub fn all() -> impl Iterator<Item = RotationDay> {
        (1..=Self::COUNT as u8).map(RotationDay)
    }

    /// The day number, 1–6.
    pub fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for RotationDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {}", self.0)
    }
}

/// Category of a scheduled interval on the bell grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotCategory {
    Block,
    Seminar,
    Lunch,
    Break,
    DirectedStudy,
    Collaboration,
    Community,
    OfficeHours,
}

/// One decoded segment of a course's six-segment rotation pattern.
///
/// `None` in a per-day assignment map means "no class that day"; this enum
/// covers the remaining cases. Tokens the decoder does not recognize are
/// preserved verbatim in [`PatternToken::Unknown`] so no information from the
/// source document is lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternToken {
    /// A numbered academic block (1–7 in the standard grid).
    Block(u8),
    /// Every-day co-curricular marker (`CC`).
    CoCurricular,
    /// Directed-study marker (`DS`).
    DirectedStudy,
    /// Midday-seminar marker (`M12`).
    MiddaySeminar,
    /// Unrecognized segment, preserved verbatim.
    Unknown(String),
}

/// Overall category of a parsed course, derived from its rotation pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseCategory {
    Academic,
    CoCurricular,
    DirectedStudy,
    Seminar,
}

/// One row of the parsed course table.
///
/// Created once by the parser and immutable thereafter. The per-day
/// assignment map always holds an entry for all six rotation days; `None`
/// means the course does not meet that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub code: String,
    pub title: String,
    pub room: Option<String>,
    /// The raw six-segment pattern string as it appeared in the document.
    pub pattern: String,
    /// First non-empty decoded token, used as the course's primary block.
    pub primary_block: Option<PatternToken>,
    pub category: CourseCategory,
    pub day_assignments: BTreeMap<RotationDay, Option<PatternToken>>,
    pub instructor: String,
}

impl CourseRecord {
    /// The decoded token for a given rotation day, if the course meets then.
    pub fn assignment(&self, day: RotationDay) -> Option<&PatternToken> {
        self.day_assignments.get(&day).and_then(|t| t.as_ref())
    }

    /// Whether the course meets at all on the given rotation day.
    pub fn meets_on(&self, day: RotationDay) -> bool {
        self.assignment(day).is_some()
    }

    /// The numbered block this course occupies on the given day, if any.
    pub fn block_on(&self, day: RotationDay) -> Option<u8> {
        match self.assignment(day) {
            Some(PatternToken::Block(n)) => Some(*n),
            _ => None,
        }
    }
}

/// Parsed course records partitioned by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseBuckets {
    pub academic: Vec<CourseRecord>,
    pub co_curricular: Vec<CourseRecord>,
    pub directed_study: Vec<CourseRecord>,
    pub seminar: Vec<CourseRecord>,
}

impl CourseBuckets {
    /// Files a record into the bucket matching its category.
    pub fn push(&mut self, record: CourseRecord) {
        match record.category {
            CourseCategory::Academic => self.academic.push(record),
            CourseCategory::CoCurricular => self.co_curricular.push(record),
            CourseCategory::DirectedStudy => self.directed_study.push(record),
            CourseCategory::Seminar => self.seminar.push(record),
        }
    }

    /// Total number of records across all buckets.
    pub fn len(&self) -> usize {
        self.academic.len()
            + self.co_curricular.len()
            + self.directed_study.len()
            + self.seminar.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates every record regardless of bucket.
    pub fn iter(&self) -> impl Iterator<Item = &CourseRecord> {
        self.academic
            .iter()
            .chain(self.co_curricular.iter())
            .chain(self.directed_study.iter())
            .chain(self.seminar.iter())
    }
}

/// Output of parsing one student's schedule document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDocument {
    pub student: String,
    pub grade: u8,
    pub courses: CourseBuckets,
}

/// How a student relates to one bell slot on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    Occupied,
    Free,
    Lunch,
    Break,
}

/// One annotated bell slot in a student's day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotStatus {
    pub name: String,
    pub category: SlotCategory,
    pub start_minutes: i32,
    pub end_minutes: i32,
    pub state: SlotState,
    /// Title of the course filling this slot, when one does.
    pub course: Option<String>,
}

impl SlotStatus {
    pub fn is_occupied(&self) -> bool {
        self.state == SlotState::Occupied
    }
}

/// One student's physical presence on campus for one rotation day.
///
/// All time fields are minutes since midnight. `arrival`, `class_end`, and
/// `departure` are `None` on a day with no obligations; that is a valid data
/// state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: RotationDay,
    pub arrival: Option<i32>,
    pub class_end: Option<i32>,
    /// Effective departure: extends past `class_end` when a daily
    /// co-curricular applies.
    pub departure: Option<i32>,
    pub occupied_slots: Vec<String>,
    /// Block-category slots the student does not occupy.
    pub free_slots: Vec<String>,
    /// True only when obligations sit strictly on both sides of lunch.
    pub lunch_free: bool,
    /// Grade-gated campus-leave privilege at lunch.
    pub may_leave_at_lunch: bool,
    pub slots: Vec<SlotStatus>,
}

impl DaySchedule {
    /// Iterates the occupied slots of the day.
    pub fn occupied(&self) -> impl Iterator<Item = &SlotStatus> {
        self.slots.iter().filter(|s| s.is_occupied())
    }

    /// Total occupied minutes across the day.
    pub fn occupied_minutes(&self) -> i32 {
        self.occupied()
            .map(|s| s.end_minutes - s.start_minutes)
            .sum()
    }
}

/// Co-curricular metadata attached to a student's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoCurricular {
    pub name: String,
    /// Effective daily end time in minutes since midnight.
    pub end_minutes: i32,
}

/// A student's full six-day presence timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSchedule {
    pub student: String,
    pub grade: u8,
    pub days: BTreeMap<RotationDay, DaySchedule>,
    pub co_curricular: Option<CoCurricular>,
}

impl StudentSchedule {
    /// The day schedule for a rotation day.
    ///
    /// The builder always populates all six days, so a missing entry is a
    /// core bug.
    pub fn day(&self, day: RotationDay) -> &DaySchedule {
        self.days
            .get(&day)
            .expect("student schedule covers all six rotation days")
    }

    pub fn has_co_curricular(&self) -> bool {
        self.co_curricular.is_some()
    }
}
