// src/main.rs
// =============================================================================
// Entry point of the catalog scraper CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Turn them into a validated ScrapeConfig
// 3. Dispatch to the subcommand handler (courses, capacity, dedup)
// 4. Exit with 0 on success, 2 on a fatal error
//
// Fetch failures for individual keys are NOT fatal: they are logged, the
// key contributes zero rows, and the run still writes its output file.
// Fatal means the run could not start or could not save (bad input file,
// missing columns, bad config, unwritable output).
// =============================================================================

mod catalog;
mod cli;
mod config;
mod extract;
mod fetch;
mod logging;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::{ScrapeConfig, TitleLayout};
use fetch::HttpSource;
use pipeline::RunSummary;
use std::path::Path;
use std::time::Instant;
use tracing::info;
use url::Url;

// One thread: every fetch is a future multiplexed on it
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let started = Instant::now();
    info!("Script started.");

    match cli.command {
        Commands::Courses {
            input,
            output,
            terms,
            concurrency,
            catalog_url,
            title_layout,
            json,
        } => {
            let config = courses_config(terms, concurrency, catalog_url, title_layout)?;
            handle_courses(&config, &input, &output, json, started).await?;
        }
        Commands::Capacity {
            input,
            output,
            concurrency,
            detail_url,
            json,
        } => {
            let config = capacity_config(concurrency, detail_url)?;
            handle_capacity(&config, &input, &output, json, started).await?;
        }
        Commands::Dedup { input, output } => {
            let output = output.unwrap_or_else(|| catalog::default_dedup_path(&input));
            handle_dedup(&input, &output)?;
        }
    }

    info!("Script execution time: {}", logging::format_elapsed(started.elapsed()));
    info!("Script finished.");
    Ok(())
}

fn courses_config(
    terms: Vec<String>,
    concurrency: usize,
    catalog_url: Option<Url>,
    title_layout: TitleLayout,
) -> Result<ScrapeConfig> {
    let mut config = ScrapeConfig::default();
    if !terms.is_empty() {
        config.terms = terms;
    }
    if let Some(url) = catalog_url {
        config.catalog_url = url;
    }
    config.concurrency = concurrency;
    config.title_layout = title_layout;

    config.validate()?;
    config.require_terms()?;
    Ok(config)
}

fn capacity_config(concurrency: usize, detail_url: Option<Url>) -> Result<ScrapeConfig> {
    let mut config = ScrapeConfig::default();
    if let Some(url) = detail_url {
        config.detail_url = url;
    }
    config.concurrency = concurrency;

    config.validate()?;
    Ok(config)
}

// Handles the 'courses' subcommand
async fn handle_courses(
    config: &ScrapeConfig,
    input: &Path,
    output: &Path,
    json: bool,
    started: Instant,
) -> Result<()> {
    let listings = catalog::read_course_list(input)?;
    let keys = pipeline::course_keys(&config.terms, &listings);
    info!(
        "Scraping {} key(s) across {} term(s), {} at a time",
        keys.len(),
        config.terms.len(),
        config.concurrency
    );

    let source = HttpSource::new(config)?;
    let batch = pipeline::scrape_courses(&source, config, keys).await;

    catalog::write_course_table(output, &batch.rows)?;

    let summary = RunSummary::new(
        "courses",
        &batch,
        output,
        logging::format_elapsed(started.elapsed()),
    );
    print_summary(&summary, json)
}

// Handles the 'capacity' subcommand
async fn handle_capacity(
    config: &ScrapeConfig,
    input: &Path,
    output: &Path,
    json: bool,
    started: Instant,
) -> Result<()> {
    // Only term and crn are read; the rest of the table may be absent
    let rows = catalog::read_capacity_keys(input)?;
    let keys = pipeline::capacity_keys(rows);
    info!("Found {} distinct (term, CRN) pair(s)", keys.len());

    let source = HttpSource::new(config)?;
    let batch = pipeline::scrape_capacity(&source, config, keys).await;

    catalog::write_capacity_table(output, &batch.rows)?;

    let summary = RunSummary::new(
        "capacity",
        &batch,
        output,
        logging::format_elapsed(started.elapsed()),
    );
    print_summary(&summary, json)
}

// Handles the 'dedup' subcommand
fn handle_dedup(input: &Path, output: &Path) -> Result<()> {
    let records = catalog::read_course_table(input)?;
    let before = records.len();
    let kept = catalog::drop_exact_duplicates(records);
    info!("Dropped {} duplicate row(s), kept {}", before - kept.len(), kept.len());
    catalog::write_course_table(output, &kept)
}

fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("📊 Summary ({}):", summary.pipeline);
    println!("   📋 Tasks: {}", summary.tasks);
    println!("   ✅ Records: {}", summary.records);
    println!("   ❌ Failed keys: {}", summary.failed_keys.len());
    for key in &summary.failed_keys {
        println!("      - {}", key);
    }
    println!("   💾 Output: {}", summary.output);
    println!("   ⏱️  Elapsed: {}", summary.elapsed);
    Ok(())
}
