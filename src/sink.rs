use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::model::{MonthlyCounts, RawReviewRow, ReviewRow, ReviewerCounts};

/// The four tables of a non-empty report, in output order.
pub struct ReportTables<'a> {
  pub rows: &'a [ReviewRow],
  pub monthly: &'a [MonthlyCounts],
  pub reviewers: &'a [ReviewerCounts],
  pub raw: &'a [RawReviewRow],
}

pub trait TabularSink {
  fn write_tables(&self, tables: &ReportTables) -> Result<Vec<PathBuf>>;
}

/// Writes one CSV file per table. Headers come from the row types' serde
/// renames. The output directory is created here, not at construction, so
/// a run that writes nothing leaves nothing behind.
pub struct CsvSink {
  out_dir: PathBuf,
}

impl CsvSink {
  pub fn new<P: AsRef<Path>>(out_dir: P) -> Self {
    Self {
      out_dir: out_dir.as_ref().to_path_buf(),
    }
  }

  fn write_csv<T: Serialize>(&self, file_name: &str, rows: &[T]) -> Result<PathBuf> {
    let path = self.out_dir.join(file_name);
    let mut writer = csv::Writer::from_path(&path).with_context(|| format!("creating {}", path.display()))?;

    for row in rows {
      writer.serialize(row).with_context(|| format!("writing {}", path.display()))?;
    }

    writer.flush().with_context(|| format!("flushing {}", path.display()))?;

    Ok(path)
  }
}

impl TabularSink for CsvSink {
  fn write_tables(&self, tables: &ReportTables) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&self.out_dir)
      .with_context(|| format!("creating output directory {}", self.out_dir.display()))?;

    Ok(vec![
      self.write_csv("all-prs.csv", tables.rows)?,
      self.write_csv("monthly-summary.csv", tables.monthly)?,
      self.write_csv("reviewer-summary.csv", tables.reviewers)?,
      self.write_csv("raw-api-data.csv", tables.raw)?,
    ])
  }
}
