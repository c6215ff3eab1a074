// src/extract/capacity.rs
// =============================================================================
// Reads seat counts from a section detail page.
//
// The numbers live in the table captioned "Registration Availability":
//
//   <table class="datadisplaytable">
//     <caption class="captiontext">Registration Availability</caption>
//     <tr> header: Capacity | Actual | Remaining </tr>
//     <tr><th>Seats</th><td>120</td><td>118</td><td>2</td></tr>
//     <tr><th>Waitlist Seats</th><td>20</td><td>0</td><td>20</td></tr>
//   </table>
//
// No such table means no record for this (term, crn). Rows with other
// labels are ignored, and a missing label row leaves its three fields blank.
// =============================================================================

use super::text::{cell_text, selector};
use crate::catalog::{CapacityKey, CapacityRecord};
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

const AVAILABILITY_CAPTION: &str = "Registration Availability";
const SEATS_LABEL: &str = "Seats";
const WAITLIST_LABEL: &str = "Waitlist Seats";

struct CapacityMarkup {
    table: Selector,
    caption: Selector,
    row: Selector,
    label: Selector,
    cell: Selector,
}

impl CapacityMarkup {
    fn new() -> Self {
        CapacityMarkup {
            table: selector("table.datadisplaytable"),
            caption: selector("caption.captiontext"),
            row: selector("tr"),
            label: selector("th"),
            cell: selector("td"),
        }
    }
}

pub fn parse_capacity(html: &str, key: &CapacityKey) -> Option<CapacityRecord> {
    let document = Html::parse_document(html);
    let markup = CapacityMarkup::new();

    let Some(table) = find_availability_table(&document, &markup) else {
        warn!("No '{}' table found for {}", AVAILABILITY_CAPTION, key);
        return None;
    };

    let mut record = CapacityRecord::for_key(key);
    for row in table.select(&markup.row).skip(1) {
        let Some(label) = row.select(&markup.label).next() else {
            continue;
        };
        let counts: Vec<String> = row.select(&markup.cell).map(cell_text).collect();
        if counts.len() < 3 {
            continue;
        }

        match cell_text(label).as_str() {
            SEATS_LABEL => {
                record.seats_capacity = counts[0].clone();
                record.seats_actual = counts[1].clone();
                record.seats_remaining = counts[2].clone();
            }
            WAITLIST_LABEL => {
                record.waitlist_capacity = counts[0].clone();
                record.waitlist_actual = counts[1].clone();
                record.waitlist_remaining = counts[2].clone();
            }
            _ => {}
        }
    }

    Some(record)
}

fn find_availability_table<'a>(
    document: &'a Html,
    markup: &CapacityMarkup,
) -> Option<ElementRef<'a>> {
    document.select(&markup.table).find(|table| {
        table
            .select(&markup.caption)
            .next()
            .map(|caption| caption.text().collect::<String>().contains(AVAILABILITY_CAPTION))
            .unwrap_or(false)
    })
}
