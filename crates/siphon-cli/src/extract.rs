//! Extraction engine — derive the plan, fan out range fetches, and write
//! parquet part files plus the run manifest.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::record_batch::RecordBatch;
use futures::StreamExt;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use tracing::info;

use siphon_connectors::PostgresSource;
use siphon_core::{derive_plan, PartitionHints};

use crate::manifest::{ExportManifest, PartitionFile};

pub struct ExtractOptions {
    pub source: String,
    pub partition_column: Option<String>,
    pub num_partitions: usize,
    pub batch_size: u64,
    pub output: PathBuf,
    pub parallelism: usize,
}

/// Run one extraction: plan, fetch every range concurrently, write parts.
///
/// Probe failures only degrade the plan; a failed partition fetch fails the
/// run, after the manifest is rewritten as failed.
pub async fn run(opts: ExtractOptions) -> Result<()> {
    let source = PostgresSource::from_uri(&opts.source)?;
    let hints = PartitionHints {
        requested_partitions: opts.num_partitions,
        batch_size: opts.batch_size,
    };
    let plan = derive_plan(opts.partition_column.as_deref(), hints, &source).await;

    let schema = source
        .infer_schema()
        .await
        .with_context(|| format!("schema inference failed for table '{}'", source.table()))?;

    // One predicate per partition; a single unbounded fetch when no plan.
    let tasks: Vec<(usize, Option<String>)> = match &plan {
        Some(plan) => plan
            .where_clauses()
            .into_iter()
            .enumerate()
            .map(|(index, clause)| (index, Some(clause)))
            .collect(),
        None => vec![(0, None)],
    };
    let order_column = plan.as_ref().map(|p| p.column.clone());

    fs::create_dir_all(&opts.output)?;
    let mut manifest = ExportManifest::new(
        source.table().to_string(),
        opts.partition_column.clone(),
        plan.clone(),
    );
    manifest.write(&opts.output)?;

    info!(
        "Run {}: extracting '{}' in {} partition(s), parallelism {}",
        manifest.run_id,
        source.table(),
        tasks.len(),
        opts.parallelism
    );

    let mut fetches = futures::stream::iter(tasks.into_iter().map(|(index, predicate)| {
        let source = source.clone();
        let schema = Arc::clone(&schema);
        let output = opts.output.clone();
        let order_column = order_column.clone();
        async move {
            let batch = source
                .fetch_range(&schema, order_column.as_deref(), predicate.as_deref())
                .await
                .with_context(|| format!("partition {} fetch failed", index))?;

            let file = format!("part-{:05}.parquet", index);
            write_part(&output.join(&file), &batch)
                .with_context(|| format!("writing {} failed", file))?;

            info!("Partition {}: {} rows -> {}", index, batch.num_rows(), file);
            Ok::<PartitionFile, anyhow::Error>(PartitionFile {
                index,
                file,
                rows: batch.num_rows() as u64,
                predicate,
            })
        }
    }))
    .buffer_unordered(opts.parallelism.max(1));

    let mut parts = Vec::new();
    while let Some(result) = fetches.next().await {
        match result {
            Ok(part) => parts.push(part),
            Err(e) => {
                manifest.fail();
                manifest.write(&opts.output)?;
                return Err(e);
            }
        }
    }

    parts.sort_by_key(|p| p.index);
    manifest.complete(parts);
    manifest.write(&opts.output)?;

    info!(
        "Run {} completed: {} rows in {} part file(s) under {:?}",
        manifest.run_id,
        manifest.total_rows,
        manifest.partitions.len(),
        opts.output
    );
    Ok(())
}

fn write_part(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path)?;
    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}
