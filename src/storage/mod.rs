// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use crate::export::SyncPayload;
use crate::pipeline::ClassifiedSheet;
use crate::tables::Table;
use crate::utils::error::StorageError;
use serde::Serialize;

// Upload types that are only kept around while a job is in flight.
const STALE_UPLOAD_EXTENSIONS: [&str; 4] = ["png", "pdf", "jpeg", "jpg"];

const SECONDS_PER_HOUR: u64 = 3600;

/// Retention age for uploads, saturating instead of wrapping for huge inputs.
pub fn retention_window(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(SECONDS_PER_HOUR))
}

/// Paths written for one processed document.
#[derive(Debug, Clone)]
pub struct WrittenFiles {
    pub workbook: PathBuf,
    pub raw_tables: PathBuf,
    pub metadata: PathBuf,
    pub sync_payload: PathBuf,
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Per-user output folder: /base_dir/user_id/excel/
    pub fn excel_dir(&self, user_id: &str) -> PathBuf {
        self.base_dir.join(user_id).join("excel")
    }

    /// Writes the workbook, the raw table dump, run metadata and the sync payload.
    pub fn save_document(
        &self,
        user_id: &str,
        document_id: &str,
        raw_tables: &[Table],
        sheets: &[ClassifiedSheet],
        payload: &SyncPayload,
    ) -> Result<WrittenFiles, StorageError> {
        let target_dir = self.excel_dir(user_id);
        fs::create_dir_all(&target_dir)?;

        let workbook = target_dir.join(format!("{}.json", document_id));
        write_json(&workbook, &serde_json::json!({ "sheets": sheets }))?;

        let raw_path = target_dir.join(format!("{}_table.json", document_id));
        write_json(&raw_path, &serde_json::json!({ "tables": raw_tables }))?;

        let metadata = serde_json::json!({
            "document_id": document_id,
            "user_id": user_id,
            "sheet_names": sheets.iter().map(|s| s.descriptor.name.as_str()).collect::<Vec<_>>(),
            "raw_table_count": raw_tables.len(),
            "row_count": sheets.iter().map(|s| s.table.row_count()).sum::<usize>(),
            "processed_timestamp": chrono::Utc::now().to_rfc3339(),
        });
        let meta_path = target_dir.join(format!("{}_meta.json", document_id));
        write_json(&meta_path, &metadata)?;

        let sync_path = target_dir.join(format!("{}_sync.json", document_id));
        write_json(&sync_path, payload)?;

        tracing::info!("Saved workbook with {} sheet(s) to {}", sheets.len(), workbook.display());

        Ok(WrittenFiles { workbook, raw_tables: raw_path, metadata: meta_path, sync_payload: sync_path })
    }

    /// Removes the job's staging folder (/base_dir/user_id/excel/job_id), if any.
    pub fn remove_staging(&self, user_id: &str, job_id: &str) -> Result<bool, StorageError> {
        let staging = self.excel_dir(user_id).join(job_id);
        if !staging.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(&staging)?;
        tracing::info!("Removed staging folder {}", staging.display());
        Ok(true)
    }

    /// Deletes uploaded page images/PDFs under the user's folder last modified before `now - max_age`.
    pub fn prune_stale_files(
        &self,
        user_id: &str,
        max_age: Duration,
        now: SystemTime,
    ) -> Result<Vec<PathBuf>, StorageError> {
        let threshold = now.checked_sub(max_age).unwrap_or(SystemTime::UNIX_EPOCH);
        let mut deleted = Vec::new();
        let user_dir = self.base_dir.join(user_id);
        if user_dir.exists() {
            prune_dir(&user_dir, threshold, &mut deleted)?;
        }
        Ok(deleted)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    let body = serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;
    fs::write(path, body)?;
    Ok(())
}

fn is_stale_upload(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| STALE_UPLOAD_EXTENSIONS.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
        .unwrap_or(false)
}

fn prune_dir(dir: &Path, threshold: SystemTime, deleted: &mut Vec<PathBuf>) -> Result<(), StorageError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let meta = entry.metadata()?;
        if meta.is_dir() {
            prune_dir(&path, threshold, deleted)?;
        } else if is_stale_upload(&path) && meta.modified()? < threshold {
            fs::remove_file(&path)?;
            tracing::info!("Deleted file: {}", path.display());
            deleted.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::build_sync_payload;
    use crate::tables::SheetDescriptor;

    #[test]
    fn test_save_document_layout() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("out")).unwrap();
        let table = Table::new(vec!["Date".into()], vec![vec!["15/03/2023".into()]]);
        let sheets = vec![ClassifiedSheet {
            descriptor: SheetDescriptor { name: "Transaction_1".into(), show_header: true },
            table: table.clone(),
            fiscal_years: vec![2023],
        }];

        let written = storage
            .save_document("u1", "doc9", &[table], &sheets, &build_sync_payload(&sheets))
            .unwrap();

        assert_eq!(written.workbook, dir.path().join("out/u1/excel/doc9.json"));
        assert!(written.raw_tables.ends_with("doc9_table.json"));
        assert!(written.sync_payload.exists());

        let workbook: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&written.workbook).unwrap()).unwrap();
        assert_eq!(workbook["sheets"][0]["name"], "Transaction_1");
        assert_eq!(workbook["sheets"][0]["columns"][0], "Date");
        assert_eq!(workbook["sheets"][0]["fiscal_years"][0], 2023);

        let meta: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&written.metadata).unwrap()).unwrap();
        assert_eq!(meta["row_count"], 1);
        assert!(meta["processed_timestamp"].is_string());
    }

    #[test]
    fn test_remove_staging() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let staging = storage.excel_dir("u1").join("job-1");
        fs::create_dir_all(&staging).unwrap();
        fs::write(staging.join("part.json"), "{}").unwrap();

        assert!(storage.remove_staging("u1", "job-1").unwrap());
        assert!(!staging.exists());
        assert!(!storage.remove_staging("u1", "job-1").unwrap());
    }

    #[test]
    fn test_retention_window_saturates() {
        assert_eq!(retention_window(1), Duration::from_secs(3600));
        assert_eq!(retention_window(0), Duration::ZERO);
        assert_eq!(retention_window(5_124_095_576_030_432), Duration::from_secs(u64::MAX));
        assert_eq!(retention_window(u64::MAX), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_huge_retention_keeps_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let pages = dir.path().join("u1");
        fs::create_dir_all(&pages).unwrap();
        fs::write(pages.join("scan.pdf"), "x").unwrap();

        let later = SystemTime::now() + Duration::from_secs(2 * 3600);
        let deleted = storage.prune_stale_files("u1", retention_window(5_124_095_576_030_432), later).unwrap();
        assert!(deleted.is_empty());
        assert!(pages.join("scan.pdf").exists());
    }

    #[test]
    fn test_prune_only_old_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let pages = dir.path().join("u1").join("pages");
        fs::create_dir_all(&pages).unwrap();
        for name in ["scan.PDF", "page.jpg", "notes.txt"] {
            fs::write(pages.join(name), "x").unwrap();
        }

        // Nothing is old enough yet.
        let none = storage.prune_stale_files("u1", Duration::from_secs(3600), SystemTime::now()).unwrap();
        assert!(none.is_empty());

        // Two hours from now, the uploads are stale but other files stay.
        let later = SystemTime::now() + Duration::from_secs(2 * 3600);
        let deleted = storage.prune_stale_files("u1", Duration::from_secs(3600), later).unwrap();
        assert_eq!(deleted.len(), 2);
        assert!(pages.join("notes.txt").exists());
        assert!(!pages.join("scan.PDF").exists());
    }
}
