use chrono::{NaiveTime, Timelike};

use crate::core::error::{ParseError, ParseResult};

/// Parse an `H:MM` or `HH:MM` 24-hour wall-clock string into minutes since
/// midnight.
///
/// # Arguments
/// * `text` - Wall-clock string, e.g. `"8:00"` or `"14:05"`
///
/// # Returns
/// * Minutes since midnight, or [`ParseError::InvalidTime`] on malformed
///   input. No bounds clamping is applied; callers supply well-formed
///   constant strings.
///
/// # Example
/// ```
/// use tandem_core::time::time_to_minutes;
/// assert_eq!(time_to_minutes("8:30").unwrap(), 510);
/// ```
pub fn time_to_minutes(text: &str) -> ParseResult<i32> {
    let parsed = NaiveTime::parse_from_str(text.trim(), "%H:%M")
        .map_err(|_| ParseError::InvalidTime(text.to_string()))?;
    Ok((parsed.hour() * 60 + parsed.minute()) as i32)
}

/// Format minutes since midnight back into a wall-clock string.
///
/// The hour carries no leading zero, matching the schedule documents.
pub fn minutes_to_time(minutes: i32) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// Minutes shared by two half-open intervals.
///
/// Symmetric in argument order per interval. Disjoint, merely touching, and
/// zero-width intervals all overlap for zero minutes.
pub fn overlap_minutes(start_a: i32, end_a: i32, start_b: i32, end_b: i32) -> i32 {
    (end_a.min(end_b) - start_a.max(start_b)).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_to_minutes() {
        assert_eq!(time_to_minutes("0:00").unwrap(), 0);
        assert_eq!(time_to_minutes("8:00").unwrap(), 480);
        assert_eq!(time_to_minutes("08:00").unwrap(), 480);
        assert_eq!(time_to_minutes("12:15").unwrap(), 735);
        assert_eq!(time_to_minutes("23:59").unwrap(), 1439);
        assert_eq!(time_to_minutes(" 9:05 ").unwrap(), 545);
    }

    #[test]
    fn test_time_to_minutes_rejects_malformed() {
        for bad in ["", "8", "8:", ":30", "25:00", "12:60", "noon", "8.30"] {
            assert!(
                time_to_minutes(bad).is_err(),
                "'{}' should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_minutes_to_time_has_no_leading_zero_hour() {
        assert_eq!(minutes_to_time(480), "8:00");
        assert_eq!(minutes_to_time(545), "9:05");
        assert_eq!(minutes_to_time(1020), "17:00");
        assert_eq!(minutes_to_time(0), "0:00");
    }

    #[test]
    fn test_roundtrip() {
        for s in ["8:00", "9:05", "12:15", "15:45", "0:30"] {
            assert_eq!(minutes_to_time(time_to_minutes(s).unwrap()), s);
        }
    }

    #[test]
    fn test_overlap_minutes() {
        // Partial overlap
        assert_eq!(overlap_minutes(480, 555, 540, 600), 15);
        // Containment
        assert_eq!(overlap_minutes(480, 600, 500, 520), 20);
        // Disjoint
        assert_eq!(overlap_minutes(480, 555, 600, 660), 0);
        // Touching
        assert_eq!(overlap_minutes(480, 555, 555, 600), 0);
        // Zero-width
        assert_eq!(overlap_minutes(480, 480, 470, 500), 0);
        // Symmetric
        assert_eq!(
            overlap_minutes(480, 555, 540, 600),
            overlap_minutes(540, 600, 480, 555)
        );
    }
}
