//! Export manifest — the JSON record of one extraction run, written beside
//! the parquet part files.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use siphon_core::PartitionPlan;
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Status of an extraction run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    Running,
    Completed,
    Failed,
}

/// One written partition file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionFile {
    /// Partition index within the run
    pub index: usize,

    /// File name relative to the output directory
    pub file: String,

    /// Rows written to this file
    pub rows: u64,

    /// WHERE fragment that selected this partition (None = unpartitioned)
    pub predicate: Option<String>,
}

/// Metadata for an extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportManifest {
    /// Unique run identifier
    pub run_id: Uuid,

    /// Source table name
    pub source_table: String,

    /// Partition column requested by the caller, if any
    pub partition_column: Option<String>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run completed or failed
    pub completed_at: Option<DateTime<Utc>>,

    /// The derived partition plan (null = single unbounded read)
    pub plan: Option<PartitionPlan>,

    /// Partition files written so far
    pub partitions: Vec<PartitionFile>,

    /// Total rows across all partition files
    pub total_rows: u64,

    /// Run status
    pub status: ExportStatus,
}

impl ExportManifest {
    pub fn new(
        source_table: String,
        partition_column: Option<String>,
        plan: Option<PartitionPlan>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            source_table,
            partition_column,
            started_at: Utc::now(),
            completed_at: None,
            plan,
            partitions: Vec::new(),
            total_rows: 0,
            status: ExportStatus::Running,
        }
    }

    pub fn complete(&mut self, partitions: Vec<PartitionFile>) {
        self.total_rows = partitions.iter().map(|p| p.rows).sum();
        self.partitions = partitions;
        self.completed_at = Some(Utc::now());
        self.status = ExportStatus::Completed;
    }

    pub fn fail(&mut self) {
        self.completed_at = Some(Utc::now());
        self.status = ExportStatus::Failed;
    }

    /// Write (or rewrite) `manifest.json` under the output directory.
    pub fn write(&self, output_dir: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(output_dir.join("manifest.json"), json)?;
        Ok(())
    }

    /// Read a manifest back from an output directory.
    pub fn read(output_dir: &Path) -> Result<Self> {
        let json = fs::read_to_string(output_dir.join("manifest.json"))?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_plan() -> PartitionPlan {
        PartitionPlan {
            column: "id".to_string(),
            lower_bound: 1,
            upper_bound: 1_000_000,
            num_partitions: 21,
        }
    }

    #[test]
    fn test_manifest_new() {
        let manifest = ExportManifest::new(
            "orders".to_string(),
            Some("id".to_string()),
            Some(sample_plan()),
        );
        assert_eq!(manifest.source_table, "orders");
        assert_eq!(manifest.status, ExportStatus::Running);
        assert!(manifest.completed_at.is_none());
        assert!(manifest.partitions.is_empty());
        assert_eq!(manifest.total_rows, 0);
    }

    #[test]
    fn test_manifest_complete_sums_rows() {
        let mut manifest = ExportManifest::new("orders".to_string(), None, None);
        manifest.complete(vec![
            PartitionFile {
                index: 0,
                file: "part-00000.parquet".to_string(),
                rows: 600,
                predicate: Some("id < 50".to_string()),
            },
            PartitionFile {
                index: 1,
                file: "part-00001.parquet".to_string(),
                rows: 400,
                predicate: Some("id >= 50".to_string()),
            },
        ]);
        assert_eq!(manifest.status, ExportStatus::Completed);
        assert_eq!(manifest.total_rows, 1000);
        assert!(manifest.completed_at.is_some());
    }

    #[test]
    fn test_manifest_fail() {
        let mut manifest = ExportManifest::new("orders".to_string(), None, None);
        manifest.fail();
        assert_eq!(manifest.status, ExportStatus::Failed);
        assert!(manifest.completed_at.is_some());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ExportStatus::Running).unwrap(),
            "\"running\""
        );
        assert_eq!(
            serde_json::to_string(&ExportStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(
            serde_json::to_string(&ExportStatus::Failed).unwrap(),
            "\"failed\""
        );
    }

    #[test]
    fn test_manifest_write_read_roundtrip() {
        let dir = tempdir().unwrap();
        let mut manifest = ExportManifest::new(
            "orders".to_string(),
            Some("id".to_string()),
            Some(sample_plan()),
        );
        manifest.complete(vec![PartitionFile {
            index: 0,
            file: "part-00000.parquet".to_string(),
            rows: 123,
            predicate: None,
        }]);
        manifest.write(dir.path()).unwrap();

        let parsed = ExportManifest::read(dir.path()).unwrap();
        assert_eq!(parsed.run_id, manifest.run_id);
        assert_eq!(parsed.source_table, "orders");
        assert_eq!(parsed.plan, Some(sample_plan()));
        assert_eq!(parsed.partitions.len(), 1);
        assert_eq!(parsed.total_rows, 123);
        assert_eq!(parsed.status, ExportStatus::Completed);
    }

    #[test]
    fn test_manifest_rewrite_overwrites() {
        let dir = tempdir().unwrap();
        let mut manifest = ExportManifest::new("orders".to_string(), None, None);
        manifest.write(dir.path()).unwrap();
        assert_eq!(
            ExportManifest::read(dir.path()).unwrap().status,
            ExportStatus::Running
        );

        manifest.fail();
        manifest.write(dir.path()).unwrap();
        assert_eq!(
            ExportManifest::read(dir.path()).unwrap().status,
            ExportStatus::Failed
        );
    }

    #[test]
    fn test_manifest_unique_run_ids() {
        let m1 = ExportManifest::new("t".to_string(), None, None);
        let m2 = ExportManifest::new("t".to_string(), None, None);
        assert_ne!(m1.run_id, m2.run_id);
    }
}
