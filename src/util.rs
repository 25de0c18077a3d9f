// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for output directory naming, deterministic "now" handling, and man page rendering
// role: utilities/helpers
// inputs: CLI out value; optional now override; clap CommandFactory
// outputs: Resolved output directory path, effective timestamps, man page text
// invariants:
// - resolve_out_dir only names the directory; it never creates it
// - The temp directory name pattern is stable and locale-independent
// errors: Man page rendering IO errors bubble with context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::CommandFactory;

/// Returns the effective "now" given an optional override.
///
/// When `override_now` is `Some`, that instant is returned; otherwise
/// the current local time is used. Centralizes our handling of test
/// determinism without sprinkling `Local::now()` throughout the code.
pub fn effective_now(override_now: Option<DateTime<Local>>) -> DateTime<Local> {
  override_now.unwrap_or_else(Local::now)
}

/// Parse a `--now-override` value: RFC3339 first, then a naive local
/// date-time. Unparseable input is ignored.
pub fn parse_now_override(s: Option<&str>) -> Option<DateTime<Local>> {
  s.and_then(|raw| {
    chrono::DateTime::parse_from_rfc3339(raw)
      .ok()
      .map(|dt| dt.with_timezone(&Local))
      .or_else(|| {
        chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
          .ok()
          .and_then(|ndt| ndt.and_local_timezone(Local).single())
      })
  })
}

/// Resolve the output directory for a run.
///
/// - When `out` is not "-", it is used as given.
/// - When `out` is "-", a timestamped directory name under the system temp
///   dir is produced.
///
/// Nothing is created here; the sinks create the directory when they first
/// write, so a run that produces no report leaves no directory behind.
pub fn resolve_out_dir(out: &str, now_opt: Option<DateTime<Local>>) -> String {
  if out != "-" {
    return out.to_string();
  }

  let eff_now = effective_now(now_opt);
  std::env::temp_dir()
    .join(format!("review-report-{}", eff_now.format("%Y%m%d-%H%M%S")))
    .to_string_lossy()
    .to_string()
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
