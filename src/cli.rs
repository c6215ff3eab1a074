// src/cli.rs
// =============================================================================
// Command-line interface, built with clap's derive API.
//
// Every flag has a default equal to the value the scraper always ran with,
// so `catalog-scraper courses` with no flags does the classic run:
// read courses-list.csv, scrape terms 202409 and 202501 with 10 requests in
// flight, write scraped_course_data.csv.
// =============================================================================

use crate::config::{TitleLayout, DEFAULT_CONCURRENCY};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "catalog-scraper",
    version = "0.1.0",
    about = "Scrape a university course catalog into flat CSV schedule tables",
    long_about = "catalog-scraper fetches one catalog listing page per (term, subject, course number), \
                  extracts every scheduled section into a 16-column CSV, and can follow up with the \
                  seat and waitlist counts for each section."
)]
pub struct Cli {
    /// Increase log detail (-v debug, -vv trace). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape course sections for every (term, course) pair
    ///
    /// Example: catalog-scraper courses --input courses-list.csv --term 202409
    Courses {
        /// Course list with "Subject" and "Course Number" columns
        #[arg(long, default_value = "courses-list.csv")]
        input: PathBuf,

        /// Where to write the course table (overwritten)
        #[arg(long, default_value = "scraped_course_data.csv")]
        output: PathBuf,

        /// Term code to scrape; repeat for several (default: 202409, 202501)
        #[arg(long = "term")]
        terms: Vec<String>,

        /// Maximum number of requests in flight
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Listing endpoint base URL
        #[arg(long)]
        catalog_url: Option<Url>,

        /// Which section-title shape to accept
        #[arg(long, value_enum, default_value_t = TitleLayout::Auto)]
        title_layout: TitleLayout,

        /// Print a JSON run summary on stdout
        #[arg(long)]
        json: bool,
    },

    /// Scrape seat and waitlist counts for every section in a course table
    ///
    /// Example: catalog-scraper capacity --input scraped_course_data.csv
    Capacity {
        /// Course table produced by the `courses` command
        #[arg(long, default_value = "scraped_course_data.csv")]
        input: PathBuf,

        /// Where to write the capacity table (overwritten)
        #[arg(long, default_value = "course_capacity_data.csv")]
        output: PathBuf,

        /// Maximum number of requests in flight
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Detail endpoint base URL
        #[arg(long)]
        detail_url: Option<Url>,

        /// Print a JSON run summary on stdout
        #[arg(long)]
        json: bool,
    },

    /// Drop rows that exactly repeat an earlier row in a course table
    Dedup {
        /// Course table to clean
        input: PathBuf,

        /// Destination (default: <input>-deduped.csv next to the input)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}
