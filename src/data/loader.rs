use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use super::model::{Churn, ChurnTable, CustomerRecord};

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded. Surfaced verbatim in the UI.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not find file at '{0}'")]
    NotFound(PathBuf),
    #[error("could not load data from '{path}': {source:#}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One raw CSV row before cleaning. Columns beyond these are ignored, so the
/// loader accepts the full export with its demographic/service columns.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "customerID")]
    customer_id: String,
    #[serde(rename = "Contract")]
    contract: String,
    #[serde(rename = "InternetService")]
    internet_service: String,
    #[serde(rename = "PaymentMethod")]
    payment_method: String,
    #[serde(rename = "Churn")]
    churn: String,
    tenure: u32,
    #[serde(rename = "MonthlyCharges")]
    monthly_charges: f64,
    #[serde(rename = "TotalCharges", default)]
    total_charges: Option<String>,
}

/// Load a churn table from a delimited export.
///
/// Header cells are trimmed before matching, and `TotalCharges` is coerced
/// cell-by-cell (blank or garbage → `None`) rather than failing the load.
pub fn load(path: &Path) -> std::result::Result<ChurnTable, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    read_table(path).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn read_table(path: &Path) -> Result<ChurnTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    // Exports in the wild sometimes carry stray whitespace in header cells.
    let headers: csv::StringRecord = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(str::trim)
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let raw: RawRow = record
            .deserialize(Some(&headers))
            .with_context(|| format!("CSV row {row_no}"))?;
        records.push(clean_row(raw));
    }

    Ok(ChurnTable::from_records(records))
}

fn clean_row(raw: RawRow) -> CustomerRecord {
    CustomerRecord {
        customer_id: raw.customer_id,
        contract: raw.contract,
        internet_service: raw.internet_service,
        payment_method: raw.payment_method,
        churn: Churn::from_label(&raw.churn),
        tenure: raw.tenure,
        monthly_charges: raw.monthly_charges,
        total_charges: parse_total_charges(raw.total_charges.as_deref()),
    }
}

/// `TotalCharges` is blank for brand-new accounts in the source export.
fn parse_total_charges(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|s| s.trim().parse::<f64>().ok())
}

// ---------------------------------------------------------------------------
// Load memoization
// ---------------------------------------------------------------------------

/// Remembers the last successful load keyed by path and modification time,
/// so re-rendering the dashboard does not re-read an unchanged file. A
/// different path or mtime misses and re-reads.
#[derive(Default)]
pub struct LoadCache {
    entry: Option<CacheEntry>,
}

struct CacheEntry {
    path: PathBuf,
    modified: Option<SystemTime>,
    table: ChurnTable,
}

impl LoadCache {
    pub fn load(&mut self, path: &Path) -> std::result::Result<ChurnTable, LoadError> {
        let modified = std::fs::metadata(path)
            .ok()
            .and_then(|m| m.modified().ok());

        if let Some(entry) = &self.entry {
            if entry.path == path && modified.is_some() && entry.modified == modified {
                return Ok(entry.table.clone());
            }
        }

        let table = load(path)?;
        self.entry = Some(CacheEntry {
            path: path.to_path_buf(),
            modified,
            table: table.clone(),
        });
        Ok(table)
    }
}
