// src/catalog/mod.rs
// =============================================================================
// Catalog data: the record types and the CSV files they come from and go to.
//
// Submodules:
// - model: course/capacity keys and records, fixed column lists
// - input: course list, capacity key and course table readers
// - output: fixed-header table writers
// - dedup: exact-duplicate cleanup pass
// =============================================================================

mod dedup;
mod input;
mod model;
mod output;

pub use dedup::{default_dedup_path, drop_exact_duplicates};
pub use input::{read_capacity_keys, read_course_list, read_course_table};
pub use model::{CapacityKey, CapacityRecord, CourseKey, CourseListing, CourseRecord};
pub use output::{write_capacity_table, write_course_table};
