//! Course-table parser for extracted schedule-document text.
//!
//! The input is the ordered line sequence an external text-extraction step
//! produced from one student's printed schedule. The parser finds the student
//! header, bounds the course table between its column caption and the
//! semester marker, re-joins wrapped course titles, and decomposes each
//! course line into a [`CourseRecord`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::domain::{CourseBuckets, CourseRecord, RotationDay, ScheduleDocument};
use crate::core::error::{ParseError, ParseResult};
use crate::parsing::pattern;

/// How many leading lines are searched for the student header.
const HEADER_SCAN_WINDOW: usize = 10;

/// Exact column caption that opens the course table.
pub const TABLE_CAPTION: &str = "Course Title Room Pattern Instructor";

/// Exact marker that closes the course table.
pub const SEMESTER_MARKER: &str = "Second Semester";

/// Header line as printed: student id, print date, grade, name, "Grade:".
static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\d+\s+\d{1,2}/\d{1,2}/\d{2,4}\s+(\d{1,2})\s+(\S.*?)\s+Grade:")
        .expect("header regex compiles")
});

/// Looser fallback for documents that drop the id/date columns.
static HEADER_FALLBACK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,2})\s+(\S.*?)\s+Grade:").expect("fallback header regex compiles")
});

/// A course line starts with a four-digit code and a dash-delimited suffix.
static COURSE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4}-[A-Za-z0-9]+)").expect("course code regex compiles"));

/// Dot-delimited rotation pattern somewhere in the line remainder.
static PATTERN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9]{1,3}(?:\.[A-Za-z0-9]{1,3}){3,}\b")
        .expect("rotation pattern regex compiles")
});

/// Room code anchored to the end of the title fragment.
static ROOM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s([A-Z]{1,2}\d{2,3}[A-Z]?|Gym|Chapel|Library|Theater|Field)$")
        .expect("room regex compiles")
});

/// Parse one schedule document into its student header and course buckets.
///
/// # Errors
/// [`ParseError::HeaderNotFound`] when no header line matches within the scan
/// window, [`ParseError::TableNotFound`] when the column caption never
/// appears, and [`ParseError::MalformedPattern`] when a course row carries a
/// rotation pattern with the wrong segment count. A table row with no course
/// code or no locatable pattern is skipped, not an error.
pub fn parse<S: AsRef<str>>(lines: &[S]) -> ParseResult<ScheduleDocument> {
    let lines: Vec<&str> = lines.iter().map(|l| l.as_ref()).collect();

    let (student, grade) = extract_header(&lines)?;
    let region = table_region(&lines)?;
    let joined = join_course_lines(region);

    let mut courses = CourseBuckets::default();
    for line in &joined {
        if let Some(record) = parse_course_line(line)? {
            courses.push(record);
        }
    }

    log::debug!(
        "Parsed {} course records for {} (grade {})",
        courses.len(),
        student,
        grade
    );

    Ok(ScheduleDocument {
        student,
        grade,
        courses,
    })
}

/// Scan the leading lines for the student header.
fn extract_header(lines: &[&str]) -> ParseResult<(String, u8)> {
    let window = &lines[..lines.len().min(HEADER_SCAN_WINDOW)];

    for regex in [&*HEADER_RE, &*HEADER_FALLBACK_RE] {
        for line in window {
            if let Some(caps) = regex.captures(line) {
                let grade = caps[1]
                    .parse::<u8>()
                    .expect("two-digit grade capture fits u8");
                let name = caps[2].trim().to_string();
                return Ok((name, grade));
            }
        }
    }

    Err(ParseError::HeaderNotFound(HEADER_SCAN_WINDOW))
}

/// The table content between the column caption and the semester marker.
fn table_region<'a>(lines: &'a [&'a str]) -> ParseResult<&'a [&'a str]> {
    let start = lines
        .iter()
        .position(|line| line.trim() == TABLE_CAPTION)
        .ok_or(ParseError::TableNotFound)?;

    let body = &lines[start + 1..];
    let end = body
        .iter()
        .position(|line| line.trim() == SEMESTER_MARKER)
        .unwrap_or(body.len());

    Ok(&body[..end])
}

/// Re-join wrapped course titles.
///
/// A line is a new course when it starts with the course-code pattern;
/// anything else continues the title of the course above it. The fold keeps
/// the classification a pure function of the line sequence. Continuations
/// with no preceding course line are dropped.
fn join_course_lines(region: &[&str]) -> Vec<String> {
    region.iter().fold(Vec::new(), |mut acc, line| {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return acc;
        }
        if COURSE_CODE_RE.is_match(trimmed) {
            acc.push(trimmed.to_string());
        } else if let Some(current) = acc.last_mut() {
            current.push(' ');
            current.push_str(trimmed);
        }
        acc
    })
}

/// Decompose one joined course line into a record.
///
/// Layout, left to right: course code, title, optional room code, six-segment
/// rotation pattern, instructor. Returns `Ok(None)` for lines that are not
/// course rows at all.
pub(crate) fn parse_course_line(line: &str) -> ParseResult<Option<CourseRecord>> {
    let code_match = match COURSE_CODE_RE.find(line) {
        Some(m) => m,
        None => return Ok(None),
    };
    let code = code_match.as_str().to_string();
    let remainder = line[code_match.end()..].trim();

    let pattern_match = match PATTERN_RE.find(remainder) {
        Some(m) => m,
        None => {
            log::warn!("Course line '{}' has no rotation pattern, skipping", code);
            return Ok(None);
        }
    };
    let pattern_str = pattern_match.as_str();
    let tokens = pattern::decode_pattern(pattern_str)?;

    let before = remainder[..pattern_match.start()].trim();
    let (title, room) = match ROOM_RE.captures(before) {
        Some(caps) => {
            let room_start = caps.get(0).map(|m| m.start()).unwrap_or(before.len());
            (
                before[..room_start].trim().to_string(),
                Some(caps[1].to_string()),
            )
        }
        None => (before.to_string(), None),
    };

    let after = remainder[pattern_match.end()..].trim();
    let instructor = after.strip_suffix(',').unwrap_or(after).trim().to_string();

    let category = pattern::category_of(&tokens);
    let primary_block = pattern::primary_token(&tokens);
    let day_assignments = RotationDay::all().zip(tokens).collect();

    Ok(Some(CourseRecord {
        code,
        title,
        room,
        pattern: pattern_str.to_string(),
        primary_block,
        category,
        day_assignments,
        instructor,
    }))
}
