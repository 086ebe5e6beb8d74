//! Parsed-document validation with detailed error and warning reporting.
//!
//! Validates a parsed schedule document for data-quality issues before it is
//! built into a presence timeline: duplicate course codes, block numbers the
//! bell grid cannot place, unrecognized pattern tokens, and suspicious grade
//! values. Errors make `is_valid` false; warnings are informational.

use serde::{Deserialize, Serialize};

use crate::core::domain::{PatternToken, RotationDay, ScheduleDocument};

/// How many occurrences of one issue kind are reported individually.
const REPORT_CAP: usize = 5;

/// Validation outcome with categorized issues and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary statistics computed during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_courses: usize,
    pub academic_courses: usize,
    pub co_curricular_courses: usize,
    pub directed_study_courses: usize,
    pub seminar_courses: usize,
    pub duplicate_codes: usize,
    pub unknown_tokens: usize,
    pub out_of_range_blocks: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Adds a critical error and marks the result as invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Adds a non-critical warning without invalidating the result.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for parsed schedule documents.
pub struct CourseValidator;

impl CourseValidator {
    /// Validates a parsed document.
    ///
    /// Checks duplicate course codes, block numbers outside 1–7, pattern
    /// tokens the decoder did not recognize, the student's grade level, and
    /// whether the academic bucket is empty.
    pub fn validate_document(document: &ScheduleDocument) -> ValidationResult {
        let mut result = ValidationResult::new();
        let courses = &document.courses;

        result.stats.total_courses = courses.len();
        result.stats.academic_courses = courses.academic.len();
        result.stats.co_curricular_courses = courses.co_curricular.len();
        result.stats.directed_study_courses = courses.directed_study.len();
        result.stats.seminar_courses = courses.seminar.len();

        if !(9..=12).contains(&document.grade) {
            result.add_warning(format!(
                "Student {} has unexpected grade level: {}",
                document.student, document.grade
            ));
        }

        if courses.academic.is_empty() {
            result.add_warning(format!(
                "Student {} has no academic courses",
                document.student
            ));
        }

        Self::check_duplicates(document, &mut result);

        for record in courses.iter() {
            for day in RotationDay::all() {
                match record.assignment(day) {
                    Some(PatternToken::Block(block)) if !(1..=7).contains(block) => {
                        result.stats.out_of_range_blocks += 1;
                        if result.stats.out_of_range_blocks <= REPORT_CAP {
                            result.add_error(format!(
                                "Course {} assigns block {} on {}, outside 1-7",
                                record.code, block, day
                            ));
                        }
                    }
                    Some(PatternToken::Unknown(token)) => {
                        result.stats.unknown_tokens += 1;
                        if result.stats.unknown_tokens <= REPORT_CAP {
                            result.add_warning(format!(
                                "Course {} has unrecognized pattern token '{}' on {}",
                                record.code, token, day
                            ));
                        }
                    }
                    _ => {}
                }
            }
        }

        if result.stats.out_of_range_blocks > REPORT_CAP {
            result.add_error(format!(
                "Total out-of-range blocks: {} (showing first {})",
                result.stats.out_of_range_blocks, REPORT_CAP
            ));
        }
        if result.stats.unknown_tokens > REPORT_CAP {
            result.add_warning(format!(
                "Total unrecognized tokens: {} (showing first {})",
                result.stats.unknown_tokens, REPORT_CAP
            ));
        }

        result
    }

    fn check_duplicates(document: &ScheduleDocument, result: &mut ValidationResult) {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        for record in document.courses.iter() {
            if !seen.insert(record.code.as_str()) {
                result.stats.duplicate_codes += 1;
                if result.stats.duplicate_codes <= REPORT_CAP {
                    result.add_error(format!("Duplicate course code: {}", record.code));
                }
            }
        }

        if result.stats.duplicate_codes > REPORT_CAP {
            result.add_error(format!(
                "Total duplicate codes: {} (showing first {})",
                result.stats.duplicate_codes, REPORT_CAP
            ));
        }
    }
}
