// src/analysis/loader.rs
use crate::analysis::models::DocumentAnalysis;
use crate::utils::error::AnalysisError;
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the analysis result for a job: `<dir>/<job_id>.json`.
pub fn analysis_path(dir: &Path, job_id: &str) -> PathBuf {
    dir.join(format!("{}.json", job_id))
}

/// Reads the document analysis produced for `job_id`.
pub fn load_analysis(dir: &Path, job_id: &str) -> Result<DocumentAnalysis, AnalysisError> {
    let path = analysis_path(dir, job_id);
    if !path.exists() {
        tracing::warn!("No analysis result at {}", path.display());
        return Err(AnalysisError::NotFound(path.display().to_string()));
    }

    tracing::info!("Loading analysis result from: {}", path.display());
    let raw = fs::read_to_string(&path)?;
    let analysis: DocumentAnalysis = serde_json::from_str(&raw)?;

    tracing::debug!(
        "Loaded {} table(s) and {} bytes of text for job {}",
        analysis.tables.len(),
        analysis.text.len(),
        job_id
    );
    Ok(analysis)
}
