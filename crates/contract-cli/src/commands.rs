use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use tracing::{info, info_span};

use contract_ingest::{ContractStore, ImportSnapshot, sample_workbook};
use contract_model::MetricThresholds;
use contract_transform::ContractStats;

use crate::cli::{ImportArgs, SampleArgs};

/// Result of the `import` command, ready for rendering.
#[derive(Debug)]
pub struct ImportReport {
    pub path: PathBuf,
    pub snapshot: ImportSnapshot,
    pub thresholds: MetricThresholds,
    pub stats: ContractStats,
}

pub fn run_import(args: &ImportArgs) -> Result<ImportReport> {
    let reference = args
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());
    let thresholds = MetricThresholds {
        due_soon_days: args.due_soon_days,
    };
    import_file(&args.file, reference, thresholds)
}

/// Reads and imports one workbook against `reference`.
pub fn import_file(
    path: &Path,
    reference: NaiveDate,
    thresholds: MetricThresholds,
) -> Result<ImportReport> {
    let span = info_span!("import", path = %path.display());
    let _guard = span.enter();

    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let mut store = ContractStore::default();
    let snapshot = store
        .import_at(&bytes, reference)
        .with_context(|| format!("import {}", path.display()))?
        .clone();
    let stats = ContractStats::from_records(&snapshot.records, thresholds);
    info!(
        total = stats.total,
        expired = stats.expired,
        due_soon = stats.due_soon,
        active = stats.active_online,
        "classified contracts"
    );
    Ok(ImportReport {
        path: path.to_path_buf(),
        snapshot,
        thresholds,
        stats,
    })
}

pub fn run_sample(args: &SampleArgs) -> Result<PathBuf> {
    if args.output.exists() && !args.force {
        bail!(
            "{} already exists (use --force to replace it)",
            args.output.display()
        );
    }
    let bytes = sample_workbook().context("build sample workbook")?;
    fs::write(&args.output, &bytes)
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(path = %args.output.display(), bytes = bytes.len(), "sample workbook written");
    Ok(args.output.clone())
}
