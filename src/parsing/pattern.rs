use crate::core::domain::{CourseCategory, PatternToken, RotationDay};
use crate::core::error::{ParseError, ParseResult};

/// Decode a six-segment rotation pattern into per-day tokens.
///
/// Position N of the dot-delimited pattern describes rotation day N+1.
/// `None` means no class that day. A segment count other than six is the one
/// malformed-pattern case that fails the whole course line.
pub fn decode_pattern(pattern: &str) -> ParseResult<Vec<Option<PatternToken>>> {
    let segments: Vec<&str> = pattern.split('.').collect();
    if segments.len() != RotationDay::COUNT {
        return Err(ParseError::MalformedPattern {
            pattern: pattern.to_string(),
            segments: segments.len(),
        });
    }
    Ok(segments.into_iter().map(decode_segment).collect())
}

/// Decode a single pattern segment.
///
/// Unrecognized segments are preserved verbatim rather than dropped, so a
/// record still round-trips even when the document uses a marker this
/// decoder has never seen.
pub fn decode_segment(segment: &str) -> Option<PatternToken> {
    match segment {
        "x" | "X" => None,
        "CC" => Some(PatternToken::CoCurricular),
        "DS" => Some(PatternToken::DirectedStudy),
        "M12" => Some(PatternToken::MiddaySeminar),
        other => match other.parse::<u8>() {
            Ok(block) => Some(PatternToken::Block(block)),
            Err(_) => {
                log::warn!("Unrecognized rotation pattern segment '{}'", other);
                Some(PatternToken::Unknown(other.to_string()))
            }
        },
    }
}

/// Course category implied by the first non-empty decoded token.
pub fn category_of(tokens: &[Option<PatternToken>]) -> CourseCategory {
    match tokens.iter().flatten().next() {
        Some(PatternToken::CoCurricular) => CourseCategory::CoCurricular,
        Some(PatternToken::DirectedStudy) => CourseCategory::DirectedStudy,
        Some(PatternToken::MiddaySeminar) => CourseCategory::Seminar,
        _ => CourseCategory::Academic,
    }
}

/// First non-empty decoded token, used as the record's primary block.
pub fn primary_token(tokens: &[Option<PatternToken>]) -> Option<PatternToken> {
    tokens.iter().flatten().next().cloned()
}
