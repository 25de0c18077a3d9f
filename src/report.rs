// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Decide whether a run produced a report and hand the tables and chart data to the sinks
// role: report/orchestration
// inputs: Report tables, daily rollup, tabular and chart sinks
// outputs: ReportOutcome naming every artifact written, or NoData
// invariants: Zero normalized rows short-circuits before any sink call; nothing touches the filesystem on NoData
// errors: Sink failures propagate unchanged
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::PathBuf;

use anyhow::Result;

use crate::chart::ChartSink;
use crate::model::DailyCounts;
use crate::sink::{ReportTables, TabularSink};

#[derive(Debug)]
pub enum ReportOutcome {
  NoData,
  Written { tables: Vec<PathBuf>, chart: Option<PathBuf> },
}

pub fn write_report(
  tables: &ReportTables,
  daily: &[DailyCounts],
  tabular: &dyn TabularSink,
  chart: &dyn ChartSink,
) -> Result<ReportOutcome> {
  if tables.rows.is_empty() {
    return Ok(ReportOutcome::NoData);
  }

  let written = tabular.write_tables(tables)?;

  let chart_path = if daily.is_empty() {
    None
  } else {
    Some(chart.render_daily(daily)?)
  };

  Ok(ReportOutcome::Written {
    tables: written,
    chart: chart_path,
  })
}
