//! Error types for schedule parsing and core configuration.

/// Result type for document parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised while turning extracted document text into course records.
///
/// Every variant is fatal for the document that produced it: parsing is a
/// deterministic function of the input lines, so there is no retry path.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("No student header found in the first {0} lines of the document")]
    HeaderNotFound(usize),

    #[error("Course table not found: no line matches the column caption")]
    TableNotFound,

    #[error("Malformed rotation pattern '{pattern}': expected 6 segments, found {segments}")]
    MalformedPattern { pattern: String, segments: usize },

    #[error("Invalid time string '{0}': expected H:MM in 24-hour format")]
    InvalidTime(String),
}

/// Errors that indicate a programming mistake inside the core rather than
/// bad input data.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid rotation day {0}: expected a value between 1 and 6")]
    InvalidRotationDay(u8),

    #[error("Compatibility score {0} is outside the valid range [0, 100]")]
    ScoreOutOfRange(f64),

    #[error("Invalid bell schedule: {0}")]
    InvalidBellSchedule(String),
}
