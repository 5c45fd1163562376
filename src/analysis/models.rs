// src/analysis/models.rs
use crate::tables::Table;
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Result of the external document analysis for one job.
/// Example: `{"text": "STATEMENT DATE 05/06/23 ...", "tables": [{"columns": ["Date", "Amount"], "rows": [["15/03", 12.5]]}]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Raw text of every page, in reading order
    #[serde(default)]
    pub text: String,
    /// Tables in page order, one entry per detected table fragment
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// Identifies which document a job is about and who owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobInput {
    pub user_id: String,
    pub document_id: String,
    pub job_id: String,
}

impl JobInput {
    /// Every key must be present and non-blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [("user_id", &self.user_id), ("document_id", &self.document_id), ("job_id", &self.job_id)];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(name));
            }
        }
        Ok(())
    }
}

/// What the job reports back to the queue on success.
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    pub refresh_worker: bool,
    pub job_results: JobResultIds,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobResultIds {
    pub user_id: String,
    pub doc_id: String,
}

impl JobResult {
    pub fn for_job(job: &JobInput) -> Self {
        Self {
            refresh_worker: false,
            job_results: JobResultIds { user_id: job.user_id.clone(), doc_id: job.document_id.clone() },
        }
    }
}
