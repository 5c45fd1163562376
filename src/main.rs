// src/main.rs
mod analysis;
mod dates;
mod export;
mod pipeline;
mod storage;
mod tables;
mod utils;

use std::path::PathBuf;
use std::time::SystemTime;
use clap::Parser;
use analysis::{JobInput, JobResult};
use dates::FiscalConfig;
use pipeline::PipelineConfig;
use storage::StorageManager;
use utils::error::StorageError;
use utils::AppError;

/// Consolidates, classifies and year-repairs the tables of an analysed statement
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Owner of the document
    #[arg(long)]
    user_id: String,

    /// Document identifier, used to name the output files
    #[arg(long)]
    document_id: String,

    /// Analysis job identifier
    #[arg(long)]
    job_id: String,

    /// Directory holding analysis results as <job_id>.json
    #[arg(long, default_value = "./analysis")]
    analysis_dir: PathBuf,

    /// Output directory for workbooks and metadata
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// First day of the fiscal year as MM-DD (e.g. 04-01)
    #[arg(long, env = "FISCAL_START")]
    fiscal_start: Option<FiscalConfig>,

    /// Age in hours after which uploaded page images/PDFs are deleted
    #[arg(long, default_value = "1")]
    retention_hours: u64,

    /// Debug mode - save the document text with statement dates highlighted
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    let job = JobInput {
        user_id: args.user_id.clone(),
        document_id: args.document_id.clone(),
        job_id: args.job_id.clone(),
    };
    job.validate()?;

    // 3. Load the analysis result for this job
    let analysis = analysis::load_analysis(&args.analysis_dir, &job.job_id)?;
    tracing::info!("Loaded {} table fragment(s) for document {}", analysis.tables.len(), job.document_id);

    // 4. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    if args.debug {
        let debug_path = storage
            .excel_dir(&job.user_id)
            .join("debug")
            .join(format!("{}_text.txt", job.job_id));
        if let Err(e) = utils::text_debug::save_debug_text(
            &analysis.text,
            &debug_path,
            &dates::start_year::STATEMENT_PERIOD_RE,
        ) {
            tracing::warn!("Failed to create debug text: {}", e);
        }
    }

    // 5. Consolidate, repair dates, classify
    if let Some(fiscal) = &args.fiscal_start {
        tracing::info!("Fiscal year starts on {:02}-{:02}", fiscal.start_month(), fiscal.start_day());
    }
    let config = PipelineConfig { fiscal: args.fiscal_start };
    let sheets = pipeline::process(&analysis, &config)?;
    tracing::info!("Produced {} sheet(s)", sheets.len());

    // 6. Persist outputs
    let payload = export::build_sync_payload(&sheets);
    let written = storage.save_document(&job.user_id, &job.document_id, &analysis.tables, &sheets, &payload)?;
    tracing::info!("Saved workbook to: {}", written.workbook.display());
    tracing::debug!(
        "Also wrote {}, {} and {}",
        written.raw_tables.display(),
        written.metadata.display(),
        written.sync_payload.display()
    );

    // 7. Housekeeping
    storage.remove_staging(&job.user_id, &job.job_id)?;
    let max_age = storage::retention_window(args.retention_hours);
    let pruned = storage.prune_stale_files(&job.user_id, max_age, SystemTime::now())?;
    tracing::info!("Pruned {} stale upload(s)", pruned.len());

    let result = serde_json::to_string(&JobResult::for_job(&job))
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;
    println!("{}", result);

    tracing::info!("Processing finished for document {}", job.document_id);
    Ok(())
}
