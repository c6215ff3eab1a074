// src/extract/listing.rs
// =============================================================================
// Turns one catalog listing page into course records.
//
// Page shape (Banner "Sections Found" listing):
//
//   <th class="ddtitle"><a>Name - CRN - SUBJ NUM - Section</a></th>
//   ...
//   <td class="dddefault">            <- details cell: free text lines
//     ... Associated Term: ...          + a schedule table
//     <table class="datadisplaytable">
//       <tr><th>Frequency</th>...</tr>   <- header row, skipped
//       <tr><td>Every Week</td>...</tr>  <- first meeting, columns 0..=6
//     </table>
//   </td>
//
// Every selector and pattern lives in ListingMarkup so a markup change on
// the site touches this struct only.
//
// Nothing here returns an error. A section with an unexpected title or no
// details cell is logged and skipped; any other missing piece leaves its
// field blank.
// =============================================================================

use super::text::{cell_text, lines, pattern, selector};
use crate::catalog::{CourseKey, CourseRecord};
use crate::config::TitleLayout;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

const ASSOCIATED_TERM: &str = "Associated Term:";

struct ListingMarkup {
    /// Section titles and details cells, in document order
    title_or_details: Selector,
    title_link: Selector,
    schedule_table: Selector,
    row: Selector,
    cell: Selector,
    units: Regex,
    method: Regex,
}

impl ListingMarkup {
    fn new() -> Self {
        ListingMarkup {
            title_or_details: selector("th.ddtitle, td.dddefault"),
            title_link: selector("a"),
            schedule_table: selector("table.datadisplaytable"),
            row: selector("tr"),
            cell: selector("td"),
            units: pattern(r"^(\d+\.\d+)\s*Credits$"),
            method: pattern(r"^(.*)\s+Instructional Method$"),
        }
    }
}

/// The pieces of a section title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTitle {
    pub course_name: String,
    pub crn: String,
    /// "SUBJ NUM", only present in the four-part layout
    pub course_code: Option<String>,
    pub section: String,
}

/// Splits a title on " - " according to `layout`.
///
/// Returns None when the piece count fits no accepted layout.
pub fn parse_title(title: &str, layout: TitleLayout) -> Option<SectionTitle> {
    let parts: Vec<&str> = title.trim().split(" - ").map(str::trim).collect();
    let n = parts.len();

    let four_part = match layout {
        TitleLayout::Auto if n == 3 => false,
        TitleLayout::Auto if n >= 4 => true,
        TitleLayout::ThreePart if n >= 3 => false,
        TitleLayout::FourPart if n >= 4 => true,
        _ => return None,
    };

    if four_part {
        Some(SectionTitle {
            course_name: parts[0].to_string(),
            crn: parts[1].to_string(),
            course_code: Some(parts[2].to_string()),
            section: parts[3].to_string(),
        })
    } else {
        Some(SectionTitle {
            course_name: parts[0].to_string(),
            crn: parts[1].to_string(),
            course_code: None,
            section: parts[2].to_string(),
        })
    }
}

/// Extracts one record per well-formed section on the page.
pub fn parse_listing(html: &str, key: &CourseKey, layout: TitleLayout) -> Vec<CourseRecord> {
    let document = Html::parse_document(html);
    let markup = ListingMarkup::new();

    let nodes: Vec<ElementRef> = document.select(&markup.title_or_details).collect();
    let mut records = Vec::new();
    let mut sections = 0;

    for (idx, node) in nodes.iter().enumerate() {
        if node.value().name() != "th" {
            continue;
        }
        sections += 1;

        let title = title_text(*node, &markup);
        let Some(parsed) = parse_title(&title, layout) else {
            warn!("Unexpected title format for {}: {}", key, title);
            continue;
        };

        // The first details cell after the title, wherever it sits
        let details = nodes[idx + 1..]
            .iter()
            .find(|candidate| candidate.value().name() == "td");
        let Some(details) = details else {
            warn!("No details found for section {} of {}", parsed.crn, key);
            continue;
        };

        records.push(build_record(key, parsed, *details, &markup));
    }

    if sections == 0 {
        debug!("No sections found for {}", key);
    }

    records
}

fn title_text(th: ElementRef, markup: &ListingMarkup) -> String {
    let source = th.select(&markup.title_link).next().unwrap_or(th);
    source.text().collect::<String>().trim().to_string()
}

fn build_record(
    key: &CourseKey,
    title: SectionTitle,
    details: ElementRef,
    markup: &ListingMarkup,
) -> CourseRecord {
    // Start from the key: term, subject and number are already known
    let mut record = CourseRecord::for_key(key);
    record.course_name = title.course_name;
    record.crn = title.crn;
    record.section = title.section;

    // Four-part titles carry "SUBJ NUM", which wins over the key
    if let Some(code) = title.course_code {
        let mut tokens = code.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(subject), Some(number)) => {
                record.subject = subject.to_string();
                record.course_number = number.to_string();
            }
            _ => warn!("Unexpected subject and course number format: {}", code),
        }
    }

    // The free-text part of the cell, one trimmed line per text node
    let detail_lines = lines(details);
    record.units = first_capture(&markup.units, &detail_lines);
    record.instructional_method = first_capture(&markup.method, &detail_lines);
    record.additional_information = additional_information(&detail_lines, &record.course_name);

    // No schedule table (e.g. online sections) leaves the seven columns blank
    if let Some(table) = details.select(&markup.schedule_table).next() {
        fill_schedule(&mut record, table, markup);
    }

    record
}

/// Group 1 of the first line matching `re`, or "".
fn first_capture(re: &Regex, lines: &[String]) -> String {
    lines
        .iter()
        .find_map(|line| re.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Free text above the "Associated Term:" line, minus the course name.
fn additional_information(lines: &[String], course_name: &str) -> String {
    let Some(end) = lines.iter().position(|line| line == ASSOCIATED_TERM) else {
        return String::new();
    };

    lines[..end]
        .iter()
        .filter(|line| line.as_str() != course_name)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Copies the first meeting row (at least 7 cells) into the record.
///
/// Further meeting patterns are ignored.
fn fill_schedule(record: &mut CourseRecord, table: ElementRef, markup: &ListingMarkup) {
    for row in table.select(&markup.row).skip(1) {
        let cols: Vec<String> = row.select(&markup.cell).map(cell_text).collect();
        if cols.len() < 7 {
            continue;
        }

        record.frequency = cols[0].clone();
        record.time = cols[1].clone();
        record.days = cols[2].clone();
        record.location = cols[3].clone();
        record.date_range = cols[4].clone();
        record.schedule_type = cols[5].clone();
        record.instructor = cols[6].clone();
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r##"
<html><body>
<table class="datadisplaytable" summary="This layout table is used to present the sections found">
<caption class="captiontext">Sections Found</caption>
<tr>
<th class="ddtitle" scope="colgroup"><a href="/BAN1P/bwckschd.p_disp_detail_sched?term_in=202409&amp;crn_in=10953">Fundamentals of Programming I - 10953 - CSC 110 - A01</a></th>
</tr>
<tr>
<td class="dddefault">
Fundamentals of Programming I
<br>
Restricted to Computer Science majors.
<br>
<span class="fieldlabeltext">Associated Term: </span>Fall Session 2024
<br>
<span class="fieldlabeltext">Levels: </span>Undergraduate
<br>
Main Campus Campus
<br>
Lecture Schedule Type
<br>
Face-to-face Instructional Method
<br>
       1.500 Credits
<br>
<table class="datadisplaytable" summary="This table lists the scheduled meeting times and assigned instructors for this class..">
<caption class="captiontext">Scheduled Meeting Times</caption>
<tr>
<th class="ddheader" scope="col">Type</th>
<th class="ddheader" scope="col">Time</th>
<th class="ddheader" scope="col">Days</th>
<th class="ddheader" scope="col">Where</th>
<th class="ddheader" scope="col">Date Range</th>
<th class="ddheader" scope="col">Schedule Type</th>
<th class="ddheader" scope="col">Instructors</th>
</tr>
<tr>
<td class="dddefault">Every Week</td>
<td class="dddefault">10:00 am - 11:20 am</td>
<td class="dddefault">MR</td>
<td class="dddefault">Engineering Comp Science Bldg 125</td>
<td class="dddefault">Sep 04, 2024 - Dec 02, 2024</td>
<td class="dddefault">Lecture</td>
<td class="dddefault">Jane Smith (<abbr title="Primary">P</abbr>)</td>
</tr>
<tr>
<td class="dddefault">Every Week</td>
<td class="dddefault">2:30 pm - 3:20 pm</td>
<td class="dddefault">F</td>
<td class="dddefault">Clearihue Building A127</td>
<td class="dddefault">Sep 04, 2024 - Dec 02, 2024</td>
<td class="dddefault">Tutorial</td>
<td class="dddefault">TBA</td>
</tr>
</table>
<br>
</td>
</tr>
<tr>
<th class="ddtitle" scope="colgroup"><a href="#">Fundamentals of Programming I - 10954 - CSC 110 - A02</a></th>
</tr>
<tr>
<td class="dddefault">
<span class="fieldlabeltext">Associated Term: </span>Fall Session 2024
<br>
Online Instructional Method
<br>
2.500 Credits
<br>
</td>
</tr>
</table>
</body></html>
"##;

    fn key() -> CourseKey {
        CourseKey::new("202409", "CSC", "110")
    }

    fn page(sections: &str) -> String {
        format!(
            "<html><body><table class=\"datadisplaytable\">{}</table></body></html>",
            sections
        )
    }

    fn section(title: &str, details: &str) -> String {
        format!(
            "<tr><th class=\"ddtitle\"><a href=\"#\">{}</a></th></tr>\
             <tr><td class=\"dddefault\">{}</td></tr>",
            title, details
        )
    }

    #[test]
    fn test_full_section() {
        let records = parse_listing(LISTING, &key(), TitleLayout::Auto);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.term, "202409");
        assert_eq!(first.subject, "CSC");
        assert_eq!(first.course_number, "110");
        assert_eq!(first.course_name, "Fundamentals of Programming I");
        assert_eq!(first.crn, "10953");
        assert_eq!(first.section, "A01");
        assert_eq!(first.units, "1.500");
        assert_eq!(first.instructional_method, "Face-to-face");
        assert_eq!(
            first.additional_information,
            "Restricted to Computer Science majors."
        );
        assert_eq!(first.frequency, "Every Week");
        assert_eq!(first.time, "10:00 am - 11:20 am");
        assert_eq!(first.days, "MR");
        assert_eq!(first.location, "Engineering Comp Science Bldg 125");
        assert_eq!(first.date_range, "Sep 04, 2024 - Dec 02, 2024");
        assert_eq!(first.schedule_type, "Lecture");
        assert_eq!(first.instructor, "Jane Smith (P)");
    }

    #[test]
    fn test_fixture_with_hash_links_parses_every_section() {
        assert!(LISTING.contains("href=\"#\""));
        let crns: Vec<String> = parse_listing(LISTING, &key(), TitleLayout::Auto)
            .into_iter()
            .map(|r| r.crn)
            .collect();
        assert_eq!(crns, vec!["10953", "10954"]);
    }

    #[test]
    fn test_section_without_schedule_table() {
        let records = parse_listing(LISTING, &key(), TitleLayout::Auto);
        let second = &records[1];
        assert_eq!(second.crn, "10954");
        assert_eq!(second.section, "A02");
        assert_eq!(second.units, "2.500");
        assert_eq!(second.instructional_method, "Online");
        assert!(second.additional_information.is_empty());
        assert!(second.frequency.is_empty());
        assert!(second.instructor.is_empty());
    }

    #[test]
    fn test_three_part_title_keeps_caller_key() {
        let html = page(&section(
            "Calculus I - 20001 - A03",
            "<span>Associated Term: </span>Spring",
        ));
        let key = CourseKey::new("202501", "MATH", "100");
        let records = parse_listing(&html, &key, TitleLayout::Auto);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].course_name, "Calculus I");
        assert_eq!(records[0].crn, "20001");
        assert_eq!(records[0].section, "A03");
        assert_eq!(records[0].subject, "MATH");
        assert_eq!(records[0].course_number, "100");
    }

    #[test]
    fn test_four_part_title_overrides_key() {
        let html = page(&section("Calculus I - 20001 - MATH 100A - A03", ""));
        let key = CourseKey::new("202501", "math", "100a");
        let records = parse_listing(&html, &key, TitleLayout::Auto);

        assert_eq!(records[0].subject, "MATH");
        assert_eq!(records[0].course_number, "100A");
        assert_eq!(records[0].section, "A03");
    }

    #[test]
    fn test_unsplittable_course_code_keeps_key() {
        let html = page(&section("Calculus I - 20001 - MATH100 - A03", ""));
        let records = parse_listing(&html, &key(), TitleLayout::Auto);
        assert_eq!(records[0].subject, "CSC");
        assert_eq!(records[0].course_number, "110");
        assert_eq!(records[0].section, "A03");
    }

    #[test]
    fn test_unexpected_title_is_skipped() {
        let html = page(&format!(
            "{}{}",
            section("Just A Name", "1.500 Credits"),
            section("Calculus I - 20001 - A03", "1.500 Credits"),
        ));
        let records = parse_listing(&html, &key(), TitleLayout::Auto);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].crn, "20001");
    }

    #[test]
    fn test_title_without_details_cell_is_skipped() {
        let html = page(
            "<tr><th class=\"ddtitle\"><a>Calculus I - 20001 - A03</a></th></tr>",
        );
        assert!(parse_listing(&html, &key(), TitleLayout::Auto).is_empty());
    }

    #[test]
    fn test_units_must_match_whole_line() {
        let html = page(&format!(
            "{}{}",
            section("A - 1 - A01", "2.500 Credits"),
            section("B - 2 - A01", "Credits: 2.500<br>2 Credits<br>about 2.500 Credits"),
        ));
        let records = parse_listing(&html, &key(), TitleLayout::Auto);
        assert_eq!(records[0].units, "2.500");
        assert!(records[1].units.is_empty());
    }

    #[test]
    fn test_additional_information_joins_lines_before_marker() {
        let html = page(&section(
            "Calculus I - 20001 - A03",
            "Calculus I<br>Line one<br>Line two<br><span>Associated Term: </span>Fall",
        ));
        let records = parse_listing(&html, &key(), TitleLayout::Auto);
        assert_eq!(records[0].additional_information, "Line one Line two");
    }

    #[test]
    fn test_short_schedule_rows_are_passed_over() {
        let table = "<table class=\"datadisplaytable\">\
                     <tr><th>Type</th></tr>\
                     <tr><td>TBA</td></tr>\
                     <tr><td>Every Week</td><td>9:00 am</td><td>T</td><td>ELL 060</td>\
                     <td>Jan</td><td>Lab</td><td>TBA</td></tr>\
                     </table>";
        let html = page(&section("Lab - 3 - B01", table));
        let records = parse_listing(&html, &key(), TitleLayout::Auto);
        assert_eq!(records[0].frequency, "Every Week");
        assert_eq!(records[0].schedule_type, "Lab");
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        let html = "<html><body><p>No classes were found that meet your search criteria</p></body></html>";
        assert!(parse_listing(html, &key(), TitleLayout::Auto).is_empty());
    }

    #[test]
    fn test_forced_layouts() {
        let three = "Name - 1 - A01";
        let four = "Name - 1 - CSC 110 - A01";

        assert!(parse_title(three, TitleLayout::FourPart).is_none());
        assert_eq!(
            parse_title(four, TitleLayout::ThreePart).unwrap().section,
            "CSC 110"
        );
        assert_eq!(
            parse_title(four, TitleLayout::FourPart).unwrap().course_code,
            Some("CSC 110".to_string())
        );
        assert!(parse_title("Name - 1", TitleLayout::Auto).is_none());
    }
}
