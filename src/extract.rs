// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Filter fetched reviewer entries into normalized report rows, raw audit rows, and the reviewer summary
// role: core/extraction
// inputs: Fetched PR collections per repository; effective run configuration
// outputs: Normalized rows, unfiltered raw rows, per-reviewer counts, filter funnel counters
// invariants:
// - Pure; no I/O and no network
// - Filters apply in reviewer, vote, date order and each rejection bumps exactly one counter
// - Raw audit rows are recorded for every entry seen, before any filter
// - The reviewer summary holds every configured identity, zero counts included
// errors: None; absent reviewed dates fall back to the creation date and unparseable ones fall out through the date filter
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::cli::{DateMode, EffectiveConfig};
use crate::dates::{date_in_range, month_bucket, parse_timestamp};
use crate::model::{DecisionCounts, RawReviewRow, RepoPullRequests, ReviewRow, ReviewerSummary};
use crate::vote::classify_vote;

/// Counters for the reviewer, vote, and date filter stages; surfaced on
/// stderr when --debug is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterFunnel {
  pub total_prs: u64,
  pub total_reviewer_entries: u64,
  pub filtered_reviewer: u64,
  pub filtered_vote: u64,
  pub filtered_date: u64,
  pub rows_added: u64,
}

impl FilterFunnel {
  pub fn report(&self) {
    eprintln!("[debug] {:<22}: {}", "total_prs", self.total_prs);
    eprintln!("[debug] {:<22}: {}", "total_reviewer_entries", self.total_reviewer_entries);
    eprintln!("[debug] {:<22}: {}", "filtered_reviewer", self.filtered_reviewer);
    eprintln!("[debug] {:<22}: {}", "filtered_vote", self.filtered_vote);
    eprintln!("[debug] {:<22}: {}", "filtered_date", self.filtered_date);
    eprintln!("[debug] {:<22}: {}", "rows_added", self.rows_added);
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
  pub rows: Vec<ReviewRow>,
  pub raw_rows: Vec<RawReviewRow>,
  pub summary: ReviewerSummary,
  pub funnel: FilterFunnel,
}

/// Case-fold an identity for matching and display. The service is not
/// consistent about the casing of uniqueName across entries.
pub fn normalize_identity(raw: &str) -> String {
  raw.to_lowercase()
}

/// Walk every reviewer entry of every fetched PR through the filter chain
/// and collect the report inputs.
pub fn extract_reviews(fetched: &[RepoPullRequests], cfg: &EffectiveConfig) -> Extraction {
  let mut rows: Vec<ReviewRow> = Vec::new();
  let mut raw_rows: Vec<RawReviewRow> = Vec::new();
  let mut funnel = FilterFunnel::default();

  // Configured reviewers always appear in the summary, matched or not.
  let mut summary: ReviewerSummary = cfg
    .reviewers
    .iter()
    .map(|r| (r.clone(), DecisionCounts::default()))
    .collect();

  for repo in fetched {
    funnel.total_prs += repo.prs.len() as u64;

    for pr in &repo.prs {
      let creation = parse_timestamp(pr.creation_date.as_deref());

      for entry in &pr.reviewers {
        funnel.total_reviewer_entries += 1;

        let identity = normalize_identity(&entry.unique_name);

        raw_rows.push(RawReviewRow {
          repository: repo.repo_name.clone(),
          pr_id: pr.pull_request_id,
          reviewer: identity.clone(),
          vote: entry.vote,
          reviewed_date: entry.reviewed_date.clone(),
          pr_created_date: pr.creation_date.clone(),
        });

        if !cfg.reviewers.contains(&identity) {
          funnel.filtered_reviewer += 1;
          continue;
        }

        let Some(decision) = classify_vote(entry.vote) else {
          funnel.filtered_vote += 1;
          continue;
        };

        // Review mode falls back to the PR creation date only when the entry
        // has no reviewed timestamp, so a late review on an old PR can land
        // in an earlier bucket than the actual decision. A malformed reviewed
        // timestamp parses to None and falls out through the date filter.
        let decision_date = match cfg.date_mode {
          DateMode::Creation => creation,
          DateMode::Review => match entry.reviewed_date.as_deref() {
            None => creation,
            reviewed => parse_timestamp(reviewed),
          },
        };

        let in_range = date_in_range(decision_date, &cfg.start, &cfg.end);
        let Some(decision_date) = decision_date.filter(|_| in_range) else {
          funnel.filtered_date += 1;
          continue;
        };

        if let Some(counts) = summary.get_mut(&identity) {
          counts.bump(decision);
        }

        funnel.rows_added += 1;

        rows.push(ReviewRow {
          repository: repo.repo_name.clone(),
          pr_id: pr.pull_request_id,
          title: pr.title.clone(),
          reviewer: identity,
          decision,
          decision_date,
          pr_created_date: pr.creation_date.clone(),
          created_by: pr.created_by.display_name.clone(),
          month: month_bucket(decision_date),
        });
      }
    }
  }

  Extraction {
    rows,
    raw_rows,
    summary,
    funnel,
  }
}
