// src/catalog/output.rs
// =============================================================================
// Writes the flat output tables.
//
// The header row is written explicitly from the column constants instead of
// letting csv derive it from the first record. That way an empty run still
// produces a file with the right header, and the header order never depends
// on which record happened to come first.
// =============================================================================

use super::model::{CapacityRecord, CourseRecord, CAPACITY_COLUMNS, COURSE_COLUMNS};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Serializes `rows` under a fixed header. Existing files are overwritten.
pub fn write_table<W, T>(writer: W, columns: &[&str], rows: &[T]) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(columns)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_course_table(path: &Path, records: &[CourseRecord]) -> Result<()> {
    write_to_path(path, &COURSE_COLUMNS, records)
}

pub fn write_capacity_table(path: &Path, records: &[CapacityRecord]) -> Result<()> {
    write_to_path(path, &CAPACITY_COLUMNS, records)
}

fn write_to_path<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    write_table(file, columns, rows)
        .with_context(|| format!("Could not write {}", path.display()))?;
    info!("Data has been saved to {} ({} row(s))", path.display(), rows.len());
    Ok(())
}
