// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Drive one report run end to end (backend selection, fetch, extraction, rollups, sinks, console output)
// role: orchestration
// inputs: EffectiveConfig from CLI normalization
// outputs: Report files under the resolved output directory; summary on stdout; progress on stderr
// side_effects: Network or env-fixture reads via the API seam; filesystem writes via the sinks
// invariants:
// - Repositories are processed in listing order and PRs in fetch order
// - The no-data notice goes to stdout and nothing is written in that case
// errors: First failure aborts the run; partial fetches never produce a report
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::Result;

use crate::ado;
use crate::aggregate;
use crate::chart::SvgChart;
use crate::cli::EffectiveConfig;
use crate::extract;
use crate::model::{RepoPullRequests, ReviewerCounts};
use crate::report::{self, ReportOutcome};
use crate::sink::{CsvSink, ReportTables};
use crate::util;

pub fn run(cfg: &EffectiveConfig) -> Result<()> {
  // Phase 1: select the API backend and resolve repository names
  let api = ado::build_api(&cfg.organization, &cfg.project)?;
  let repos = ado::resolve_repositories(api.as_ref(), &cfg.repos)?;

  // Phase 2: drain every page of every repository
  let mut fetched: Vec<RepoPullRequests> = Vec::with_capacity(repos.len());

  for repo in &repos {
    let prs = ado::fetch_all_pull_requests(api.as_ref(), repo, cfg.page_size)?;
    eprintln!("[fetch] {}: {} pull requests", repo.name, prs.len());
    fetched.push(RepoPullRequests {
      repo_name: repo.name.clone(),
      prs,
    });
  }

  // Phase 3: filter into rows and roll up
  let extraction = extract::extract_reviews(&fetched, cfg);

  if cfg.debug {
    extraction.funnel.report();
  }

  let monthly = aggregate::monthly_rollup(&extraction.rows);
  let daily = aggregate::daily_rollup(&extraction.rows);
  let reviewers = aggregate::reviewer_rollup(&extraction.summary);

  // Phase 4: write the report artifacts
  let now_opt = util::parse_now_override(cfg.now_override.as_deref());
  let out_dir = util::resolve_out_dir(&cfg.out, now_opt);

  let tables = ReportTables {
    rows: &extraction.rows,
    monthly: &monthly,
    reviewers: &reviewers,
    raw: &extraction.raw_rows,
  };

  match report::write_report(&tables, &daily, &CsvSink::new(&out_dir), &SvgChart::new(&out_dir))? {
    ReportOutcome::NoData => {
      println!("No PR review data matched the given filters; no report files were written.");
    }
    ReportOutcome::Written { tables, chart } => {
      print_summary(&reviewers);
      println!("Report tables written to {out_dir} ({} files)", tables.len());

      if let Some(path) = chart {
        println!("Daily chart saved: {}", path.display());
      }
    }
  }

  Ok(())
}

fn print_summary(reviewers: &[ReviewerCounts]) {
  println!("REVIEW SUMMARY");
  println!("{}", "=".repeat(50));
  println!("{:<40} {:>8} {:>8}", "Reviewer", "Approved", "Rejected");

  for r in reviewers {
    println!("{:<40} {:>8} {:>8}", r.reviewer, r.approved, r.rejected);
  }

  println!();
}
