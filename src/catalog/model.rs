// src/catalog/model.rs
// =============================================================================
// Plain data types that flow through the pipelines.
//
// Records are built once by a parser, appended to a Vec and serialized.
// Every field is a String that defaults to "": a value the page didn't
// carry is a blank cell, never an error.
//
// Field order in CourseRecord and CapacityRecord IS the CSV column order.
// The column constants below are the external contract; tests pin the
// struct order to them.
// =============================================================================

use serde::{Deserialize, Serialize};

pub const COURSE_COLUMNS: [&str; 16] = [
    "term",
    "subject",
    "course_name",
    "course_number",
    "crn",
    "section",
    "frequency",
    "time",
    "days",
    "location",
    "date_range",
    "schedule_type",
    "instructor",
    "instructional_method",
    "units",
    "additional_information",
];

pub const CAPACITY_COLUMNS: [&str; 8] = [
    "term",
    "crn",
    "Seats_Capacity",
    "Seats_Actual",
    "Seats_Remaining",
    "Waitlist_Capacity",
    "Waitlist_Actual",
    "Waitlist_Remaining",
];

/// One row of the input course list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseListing {
    pub subject: String,
    pub course_number: String,
}

/// Identifies one listing page to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CourseKey {
    pub term: String,
    pub subject: String,
    pub course_number: String,
}

impl CourseKey {
    pub fn new(term: &str, subject: &str, course_number: &str) -> Self {
        CourseKey {
            term: term.to_string(),
            subject: subject.to_string(),
            course_number: course_number.to_string(),
        }
    }
}

impl std::fmt::Display for CourseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} in term {}", self.subject, self.course_number, self.term)
    }
}

/// One scheduled section of a course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseRecord {
    pub term: String,
    pub subject: String,
    pub course_name: String,
    pub course_number: String,
    pub crn: String,
    pub section: String,
    pub frequency: String,
    pub time: String,
    pub days: String,
    pub location: String,
    pub date_range: String,
    pub schedule_type: String,
    pub instructor: String,
    pub instructional_method: String,
    pub units: String,
    pub additional_information: String,
}

impl CourseRecord {
    /// A blank record seeded with the key it was fetched for.
    pub fn for_key(key: &CourseKey) -> Self {
        CourseRecord {
            term: key.term.clone(),
            subject: key.subject.clone(),
            course_number: key.course_number.clone(),
            ..CourseRecord::default()
        }
    }
}

/// Identifies one detail page to fetch.
///
/// Deserializes from any table with `term` and `crn` columns; other
/// columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapacityKey {
    pub term: String,
    pub crn: String,
}

impl std::fmt::Display for CapacityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "term {} CRN {}", self.term, self.crn)
    }
}

/// Seat and waitlist counters for one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityRecord {
    pub term: String,
    pub crn: String,
    #[serde(rename = "Seats_Capacity")]
    pub seats_capacity: String,
    #[serde(rename = "Seats_Actual")]
    pub seats_actual: String,
    #[serde(rename = "Seats_Remaining")]
    pub seats_remaining: String,
    #[serde(rename = "Waitlist_Capacity")]
    pub waitlist_capacity: String,
    #[serde(rename = "Waitlist_Actual")]
    pub waitlist_actual: String,
    #[serde(rename = "Waitlist_Remaining")]
    pub waitlist_remaining: String,
}

impl CapacityRecord {
    pub fn for_key(key: &CapacityKey) -> Self {
        CapacityRecord {
            term: key.term.clone(),
            crn: key.crn.clone(),
            ..CapacityRecord::default()
        }
    }
}
