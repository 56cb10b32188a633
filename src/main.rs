//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use env_logger::Env;
use log::info;

use chatlens::ChatlensError;
use chatlens::cli::Args;
use chatlens::config::AnalysisConfig;
use chatlens::core::{Analysis, RecordStore};
use chatlens::format::{RecordFormat, ReportFormat, report_to_string, write_records, write_report};
use chatlens::parser::ingest_path;

fn main() {
    let args = <Args as ClapParser>::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_filter())).init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ChatlensError> {
    let total_start = Instant::now();
    let config = args.build_config()?;
    info!(
        "Analyzing {} (date order: {}, top {} words)",
        args.input.display(),
        config.date_order,
        config.top_word_count
    );

    let parse_start = Instant::now();
    let ingest = ingest_path(&args.input, &config)?;
    info!(
        "Parsed {} messages in {:.2}s",
        ingest.store.len(),
        parse_start.elapsed().as_secs_f64()
    );

    if let Some(path) = &args.records {
        let format = RecordFormat::from_path(path)?;
        write_records(&ingest.store, path, format)?;
        info!("Wrote {} records as {} to {}", ingest.store.len(), format, path.display());
    }

    if ingest.store.is_empty() {
        println!("{}", ingest.report);
        return Err(ChatlensError::EmptyCorpus);
    }

    let analysis = compute(&ingest.store, &config, args.sequential)?;
    let format: ReportFormat = args.format.into();

    match &args.output {
        Some(path) => {
            write_report(&analysis, &ingest.report, path, format)?;
            eprintln!("Report saved to {}", path.display());
        }
        None => print!("{}", report_to_string(&analysis, &ingest.report, format)?),
    }

    info!("Done in {:.2}s", total_start.elapsed().as_secs_f64());
    Ok(())
}

#[cfg(feature = "parallel")]
fn compute(
    store: &RecordStore,
    config: &AnalysisConfig,
    sequential: bool,
) -> Result<Analysis, ChatlensError> {
    if sequential {
        Analysis::compute(store, config)
    } else {
        Analysis::compute_parallel(store, config)
    }
}

#[cfg(not(feature = "parallel"))]
fn compute(
    store: &RecordStore,
    config: &AnalysisConfig,
    _sequential: bool,
) -> Result<Analysis, ChatlensError> {
    Analysis::compute(store, config)
}
