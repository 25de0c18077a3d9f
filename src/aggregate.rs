// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Roll normalized review rows up into monthly, daily, and per-reviewer decision counts
// role: core/aggregation
// inputs: Normalized review rows; the pre-initialized reviewer summary
// outputs: Sorted rollup row vectors ready for the report sinks
// invariants: Bucket keys sort lexically, which is chronological for zero-padded dates; counts start at zero for both decisions
// errors: None; aggregation is total
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use crate::dates::day_bucket;
use crate::model::{DailyCounts, DecisionCounts, MonthlyCounts, ReviewRow, ReviewerCounts, ReviewerSummary};

fn count_by<F>(rows: &[ReviewRow], bucket: F) -> BTreeMap<String, DecisionCounts>
where
  F: Fn(&ReviewRow) -> String,
{
  let mut counts: BTreeMap<String, DecisionCounts> = BTreeMap::new();

  for row in rows {
    counts.entry(bucket(row)).or_default().bump(row.decision);
  }

  counts
}

pub fn monthly_rollup(rows: &[ReviewRow]) -> Vec<MonthlyCounts> {
  count_by(rows, |r| r.month.clone())
    .into_iter()
    .map(|(month, c)| MonthlyCounts {
      month,
      approved: c.approved,
      rejected: c.rejected,
    })
    .collect()
}

pub fn daily_rollup(rows: &[ReviewRow]) -> Vec<DailyCounts> {
  count_by(rows, |r| day_bucket(r.decision_date))
    .into_iter()
    .map(|(day, c)| DailyCounts {
      day,
      approved: c.approved,
      rejected: c.rejected,
    })
    .collect()
}

/// The summary already carries every configured reviewer, so this is a
/// straight reshape into report rows.
pub fn reviewer_rollup(summary: &ReviewerSummary) -> Vec<ReviewerCounts> {
  summary
    .iter()
    .map(|(reviewer, c)| ReviewerCounts {
      reviewer: reviewer.clone(),
      approved: c.approved,
      rejected: c.rejected,
    })
    .collect()
}
