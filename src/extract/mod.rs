// src/extract/mod.rs
// =============================================================================
// HTML extraction: the only place that knows the catalog's markup.
//
// Submodules:
// - listing: course sections from a listing page
// - capacity: seat counts from a detail page
// - text: text-node helpers and selector/pattern constructors
//
// If the site changes its tags or classes, the fix belongs in here and
// nowhere else.
// =============================================================================

mod capacity;
mod listing;
mod text;

pub use capacity::parse_capacity;
pub use listing::parse_listing;
