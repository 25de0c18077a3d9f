// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the wire model for Azure DevOps PR payloads and the derived report row/rollup types
// role: model/types
// outputs: Deserializable API structs with defensive defaults; serializable report rows with stable column names
// invariants: Wire structs never fail deserialization on missing fields; report rows are immutable once built
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// --- Wire models (Azure DevOps Git REST API, api-version 7.0) ---

/// List envelope every collection endpoint wraps its payload in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiList<T> {
  #[serde(default)]
  pub value: Vec<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRef {
  #[serde(default)]
  pub display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerEntry {
  #[serde(default)]
  pub unique_name: String,
  #[serde(default)]
  pub vote: i32,
  #[serde(default)]
  pub reviewed_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
  #[serde(default)]
  pub pull_request_id: i64,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub creation_date: Option<String>,
  #[serde(default)]
  pub created_by: IdentityRef,
  #[serde(default)]
  pub reviewers: Vec<ReviewerEntry>,
}

/// Everything fetched for one configured repository, in API order.
#[derive(Debug, Clone)]
pub struct RepoPullRequests {
  pub repo_name: String,
  pub prs: Vec<PullRequest>,
}

// --- Derived report types ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decision {
  Approved,
  Rejected,
}

/// One filtered, normalized review decision. Serde renames carry the report
/// column names; field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRow {
  #[serde(rename = "Repository")]
  pub repository: String,
  #[serde(rename = "PR ID")]
  pub pr_id: i64,
  #[serde(rename = "Title")]
  pub title: String,
  #[serde(rename = "Reviewer")]
  pub reviewer: String,
  #[serde(rename = "Decision")]
  pub decision: Decision,
  #[serde(rename = "Decision Date")]
  pub decision_date: NaiveDateTime,
  #[serde(rename = "PR Created Date")]
  pub pr_created_date: Option<String>,
  #[serde(rename = "Created By")]
  pub created_by: String,
  #[serde(rename = "Month")]
  pub month: String,
}

/// Audit-trail row: one per reviewer entry seen, before any filtering.
/// Dates are carried verbatim from the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawReviewRow {
  #[serde(rename = "Repository")]
  pub repository: String,
  #[serde(rename = "PR ID")]
  pub pr_id: i64,
  #[serde(rename = "Reviewer")]
  pub reviewer: String,
  #[serde(rename = "Vote")]
  pub vote: i32,
  #[serde(rename = "Reviewed Date")]
  pub reviewed_date: Option<String>,
  #[serde(rename = "PR Created Date")]
  pub pr_created_date: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecisionCounts {
  pub approved: u64,
  pub rejected: u64,
}

impl DecisionCounts {
  pub fn bump(&mut self, decision: Decision) {
    match decision {
      Decision::Approved => self.approved += 1,
      Decision::Rejected => self.rejected += 1,
    }
  }
}

/// Per-reviewer decision counts, keyed by case-folded identity.
pub type ReviewerSummary = BTreeMap<String, DecisionCounts>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCounts {
  #[serde(rename = "Month")]
  pub month: String,
  #[serde(rename = "Approved")]
  pub approved: u64,
  #[serde(rename = "Rejected")]
  pub rejected: u64,
}

/// Per-day counts feeding the chart; not part of the tabular report.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyCounts {
  pub day: String,
  pub approved: u64,
  pub rejected: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewerCounts {
  #[serde(rename = "Reviewer")]
  pub reviewer: String,
  #[serde(rename = "Approved")]
  pub approved: u64,
  #[serde(rename = "Rejected")]
  pub rejected: u64,
}
