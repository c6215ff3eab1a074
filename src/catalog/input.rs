// src/catalog/input.rs
// =============================================================================
// Reads the tables the pipelines start from:
// - the course list ("Subject", "Course Number") for the listing pipeline
// - the (term, crn) columns of a scraped course table for the capacity
//   pipeline
// - a full course table for the dedup pass
//
// A course list without the two required columns is the one input error
// that stops the run. The error names the columns that ARE present so the
// user can see what went wrong.
// =============================================================================

use super::model::{CapacityKey, CourseListing, CourseRecord};
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

const SUBJECT_COLUMN: &str = "Subject";
const COURSE_NUMBER_COLUMN: &str = "Course Number";

pub fn read_course_list(path: &Path) -> Result<Vec<CourseListing>> {
    let file = File::open(path)
        .with_context(|| format!("Could not open course list {}", path.display()))?;
    let listings = parse_course_list(file)
        .with_context(|| format!("Could not read course list {}", path.display()))?;
    info!("Loaded {} course(s) from {}", listings.len(), path.display());
    Ok(listings)
}

/// Parses a course list from any reader.
///
/// Header names must match exactly. Values are trimmed and upper-cased;
/// rows with a blank subject or course number are skipped.
pub fn parse_course_list<R: Read>(reader: R) -> Result<Vec<CourseListing>> {
    // Fields only: a padded " Subject " header is a schema mismatch
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Fields)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let subject_idx = headers.iter().position(|h| h == SUBJECT_COLUMN);
    let number_idx = headers.iter().position(|h| h == COURSE_NUMBER_COLUMN);

    let (subject_idx, number_idx) = match (subject_idx, number_idx) {
        (Some(s), Some(n)) => (s, n),
        _ => {
            let available: Vec<&str> = headers.iter().collect();
            bail!(
                "expected columns '{}' and '{}'; available columns: {:?}",
                SUBJECT_COLUMN,
                COURSE_NUMBER_COLUMN,
                available
            );
        }
    };

    let mut listings = Vec::new();
    for (line, row) in rdr.records().enumerate() {
        let row = row?;
        let subject = row.get(subject_idx).unwrap_or("").trim().to_uppercase();
        let course_number = row.get(number_idx).unwrap_or("").trim().to_uppercase();

        if subject.is_empty() || course_number.is_empty() {
            // +2: one for the header, one for 1-based line numbers
            warn!("Skipping course list row {}: blank subject or course number", line + 2);
            continue;
        }

        listings.push(CourseListing {
            subject,
            course_number,
        });
    }

    Ok(listings)
}

pub fn read_course_table(path: &Path) -> Result<Vec<CourseRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Could not open course table {}", path.display()))?;
    let records = parse_course_table(file)
        .with_context(|| format!("Could not read course table {}", path.display()))?;
    info!("Loaded {} course record(s) from {}", records.len(), path.display());
    Ok(records)
}

pub fn read_capacity_keys(path: &Path) -> Result<Vec<CapacityKey>> {
    let file = File::open(path)
        .with_context(|| format!("Could not open course table {}", path.display()))?;
    let keys = parse_capacity_keys(file)
        .with_context(|| format!("Could not read course table {}", path.display()))?;
    info!("Loaded {} (term, CRN) row(s) from {}", keys.len(), path.display());
    Ok(keys)
}

/// Reads just the `term` and `crn` columns of a course table.
///
/// Every other column may be missing, so a hand-made two-column file
/// works as well as a scraped table.
pub fn parse_capacity_keys<R: Read>(reader: R) -> Result<Vec<CapacityKey>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Fields)
        .from_reader(reader);
    let mut keys = Vec::new();
    for row in rdr.deserialize() {
        keys.push(row?);
    }
    Ok(keys)
}

/// Parses a course table produced by the listing pipeline.
pub fn parse_course_table<R: Read>(reader: R) -> Result<Vec<CourseRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
