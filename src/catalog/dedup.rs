// src/catalog/dedup.rs
// =============================================================================
// Cleanup pass over a finished course table: drop rows that repeat an
// earlier row on every field. The scrape itself never deduplicates; the same
// section can legitimately appear under two input rows, and that decision is
// left to this separate step.
// =============================================================================

use super::model::CourseRecord;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Keeps the first occurrence of each distinct record, in input order.
pub fn drop_exact_duplicates(records: Vec<CourseRecord>) -> Vec<CourseRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.clone()))
        .collect()
}

/// `data/courses.csv` -> `data/courses-deduped.csv`
pub fn default_dedup_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "courses".to_string());
    input.with_file_name(format!("{}-deduped.csv", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(crn: &str, section: &str) -> CourseRecord {
        CourseRecord {
            term: "202409".into(),
            crn: crn.into(),
            section: section.into(),
            ..CourseRecord::default()
        }
    }

    #[test]
    fn test_drops_only_exact_copies() {
        let rows = vec![
            record("1", "A01"),
            record("2", "A01"),
            record("1", "A01"),
            record("1", "A02"),
        ];
        let kept = drop_exact_duplicates(rows);
        assert_eq!(
            kept,
            vec![record("1", "A01"), record("2", "A01"), record("1", "A02")]
        );
    }

    #[test]
    fn test_default_path() {
        let path = default_dedup_path(Path::new("data/scraped_course_data.csv"));
        assert_eq!(path, Path::new("data/scraped_course_data-deduped.csv"));
    }
}
