use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::extract::normalize_identity;

/// Which timestamp the date window applies to.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum DateMode {
  Creation,
  Review,
}

#[derive(Parser, Debug)]
#[command(
    name = "ado-review-report",
    version,
    about = "Export Azure DevOps PR review decisions to CSV reports and a daily chart",
    long_about = None
)]
pub struct Cli {
  /// Azure DevOps organization name
  #[arg(long)]
  pub org: Option<String>,

  /// Azure DevOps project name
  #[arg(long)]
  pub project: Option<String>,

  /// Repository names to scan (space separated)
  #[arg(long, num_args = 1..)]
  pub repos: Vec<String>,

  /// Reviewer identities to track, matched case-insensitively against uniqueName
  #[arg(long, num_args = 1..)]
  pub reviewers: Vec<String>,

  /// Window start, inclusive (YYYY-MM-DD)
  #[arg(long, value_name = "YYYY-MM-DD")]
  pub from: Option<String>,

  /// Window end, inclusive (YYYY-MM-DD)
  #[arg(long, value_name = "YYYY-MM-DD")]
  pub to: Option<String>,

  /// Apply the window to the PR creation date or to the review decision date
  /// (review entries without a reviewed timestamp fall back to the creation date)
  #[arg(long, value_enum, default_value_t = DateMode::Review)]
  pub date_mode: DateMode,

  /// Print filter funnel counters to stderr
  #[arg(long)]
  pub debug: bool,

  /// Output directory for the report files (default: auto-named temp dir)
  #[arg(long, default_value = "-")]
  pub out: String,

  /// Pull request page size (internal; exercised by tests)
  #[arg(long, default_value_t = 100, hide = true)]
  pub page_size: u32,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant used for temp dir naming (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub organization: String,
  pub project: String,
  pub repos: Vec<String>,
  pub reviewers: Vec<String>, // case-folded
  pub start: String,
  pub end: String,
  pub date_mode: DateMode,
  pub debug: bool,
  pub out: String,
  pub page_size: u32,
  pub now_override: Option<String>,
}

fn validate_day(value: &str, flag: &str) -> Result<String> {
  if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
    bail!("invalid {flag}, expected YYYY-MM-DD");
  }

  Ok(value.to_string())
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  // Required selections are validated here, not by clap, so --gen-man can
  // run without a full invocation.
  let organization = match cli.org {
    Some(ref s) if !s.trim().is_empty() => s.clone(),
    _ => bail!("Provide --org (Azure DevOps organization name)"),
  };
  let project = match cli.project {
    Some(ref s) if !s.trim().is_empty() => s.clone(),
    _ => bail!("Provide --project (Azure DevOps project name)"),
  };

  if cli.repos.is_empty() {
    bail!("Provide at least one repository via --repos");
  }

  let (start, end) = match (&cli.from, &cli.to) {
    (Some(s), Some(u)) => (validate_day(s, "--from")?, validate_day(u, "--to")?),
    _ => bail!("Provide both --from and --to (YYYY-MM-DD)"),
  };

  if cli.reviewers.is_empty() {
    bail!("Provide at least one reviewer via --reviewers");
  }

  let mut reviewers = Vec::with_capacity(cli.reviewers.len());

  for raw in &cli.reviewers {
    if raw.trim().is_empty() {
      bail!("empty reviewer identity in --reviewers");
    }
    // Fold with the same function the extractor applies to API identities,
    // so configured reviewers and uniqueName values always compare equal.
    reviewers.push(normalize_identity(raw));
  }

  if cli.page_size == 0 {
    bail!("--page-size must be at least 1");
  }

  Ok(EffectiveConfig {
    organization,
    project,
    repos: cli.repos,
    reviewers,
    start,
    end,
    date_mode: cli.date_mode,
    debug: cli.debug,
    out: cli.out,
    page_size: cli.page_size,
    now_override: cli.now_override.clone(),
  })
}
