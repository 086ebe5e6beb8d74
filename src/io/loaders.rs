use anyhow::{Context, Result};
use std::path::Path;

use crate::core::domain::ScheduleDocument;
use crate::parsing;

/// Loads extracted schedule-document text from disk.
///
/// The text-extraction step itself runs outside this crate; it leaves behind
/// a plain UTF-8 file with one linearized document line per file line. This
/// loader is the crate's only filesystem touchpoint.
pub struct DocumentLoader;

impl DocumentLoader {
    /// Read a document file into its ordered line sequence.
    pub fn load_lines(path: &Path) -> Result<Vec<String>> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schedule document: {}", path.display()))?;
        Ok(text.lines().map(|line| line.to_string()).collect())
    }

    /// Read and parse a document file in one step.
    pub fn load_document(path: &Path) -> Result<ScheduleDocument> {
        let lines = Self::load_lines(path)?;
        parsing::parse(&lines)
            .with_context(|| format!("Failed to parse schedule document: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_document(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_load_lines_preserves_order() {
        let temp_file = create_temp_document("first\nsecond\n\nfourth\n");
        let lines = DocumentLoader::load_lines(temp_file.path()).unwrap();
        assert_eq!(lines, vec!["first", "second", "", "fourth"]);
    }

    #[test]
    fn test_load_document() {
        let content = "\
000482 08/25/2025 11 Harper, Quinn Grade: 11
Course Title Room Pattern Instructor
2101-03 Honors Chemistry N204 1.1.1.x.1.1 Bennett, Claire
Second Semester
";
        let temp_file = create_temp_document(content);
        let doc = DocumentLoader::load_document(temp_file.path()).unwrap();
        assert_eq!(doc.student, "Harper, Quinn");
        assert_eq!(doc.courses.academic.len(), 1);
    }

    #[test]
    fn test_missing_file_carries_context() {
        let result = DocumentLoader::load_lines(Path::new("/nonexistent/schedule.txt"));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to read schedule document"));
    }

    #[test]
    fn test_parse_failure_carries_context() {
        let temp_file = create_temp_document("no header here\n");
        let result = DocumentLoader::load_document(temp_file.path());
        assert!(result.is_err());
    }
}
