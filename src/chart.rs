// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Render the per-day decision counts as a grouped bar chart in a standalone SVG document
// role: report/chart
// inputs: Daily decision counts, already sorted by day
// outputs: daily-decisions.svg under the report output directory
// invariants: Output is self-contained SVG with no external references; every day renders two bars even at zero height
// errors: Filesystem failures surface via Result
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::DailyCounts;

pub trait ChartSink {
  fn render_daily(&self, daily: &[DailyCounts]) -> Result<PathBuf>;
}

pub struct SvgChart {
  out_dir: PathBuf,
}

impl SvgChart {
  pub const FILE_NAME: &'static str = "daily-decisions.svg";

  pub fn new<P: AsRef<Path>>(out_dir: P) -> Self {
    Self {
      out_dir: out_dir.as_ref().to_path_buf(),
    }
  }
}

impl ChartSink for SvgChart {
  fn render_daily(&self, daily: &[DailyCounts]) -> Result<PathBuf> {
    std::fs::create_dir_all(&self.out_dir)
      .with_context(|| format!("creating output directory {}", self.out_dir.display()))?;

    let path = self.out_dir.join(Self::FILE_NAME);
    std::fs::write(&path, render_svg(daily)).with_context(|| format!("writing {}", path.display()))?;

    Ok(path)
  }
}

const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 72.0;
const PLOT_HEIGHT: f64 = 240.0;

const BAR_WIDTH: f64 = 18.0;
const BAR_GAP: f64 = 6.0;
const GROUP_GAP: f64 = 18.0;
const GROUP_PITCH: f64 = 2.0 * BAR_WIDTH + BAR_GAP + GROUP_GAP;

const APPROVED_FILL: &str = "#4caf50";
const REJECTED_FILL: &str = "#e53935";

fn render_svg(daily: &[DailyCounts]) -> String {
  let plot_w = daily.len().max(1) as f64 * GROUP_PITCH;
  let width = MARGIN_LEFT + plot_w + MARGIN_RIGHT;
  let height = MARGIN_TOP + PLOT_HEIGHT + MARGIN_BOTTOM;
  let base = MARGIN_TOP + PLOT_HEIGHT;

  let max_count = daily.iter().map(|d| d.approved.max(d.rejected)).max().unwrap_or(0).max(1);
  let scale = PLOT_HEIGHT / max_count as f64;

  let mut svg = String::new();
  svg.push_str(&format!(
    "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" \
     viewBox=\"0 0 {width:.0} {height:.0}\" font-family=\"sans-serif\">\n"
  ));

  svg.push_str(&format!(
    "  <text x=\"{:.1}\" y=\"24\" text-anchor=\"middle\" font-size=\"16\">PR Review Decisions by Day</text>\n",
    width / 2.0
  ));

  for quarter in 1..=4 {
    let y = base - PLOT_HEIGHT * quarter as f64 / 4.0;
    svg.push_str(&format!(
      "  <line x1=\"{MARGIN_LEFT:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#e0e0e0\"/>\n",
      MARGIN_LEFT + plot_w
    ));
  }

  svg.push_str(&format!(
    "  <line x1=\"{MARGIN_LEFT:.1}\" y1=\"{MARGIN_TOP:.1}\" x2=\"{MARGIN_LEFT:.1}\" y2=\"{base:.1}\" stroke=\"#333\"/>\n"
  ));
  svg.push_str(&format!(
    "  <line x1=\"{MARGIN_LEFT:.1}\" y1=\"{base:.1}\" x2=\"{:.1}\" y2=\"{base:.1}\" stroke=\"#333\"/>\n",
    MARGIN_LEFT + plot_w
  ));

  svg.push_str(&format!(
    "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\">0</text>\n",
    MARGIN_LEFT - 8.0,
    base + 4.0
  ));
  svg.push_str(&format!(
    "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\">{max_count}</text>\n",
    MARGIN_LEFT - 8.0,
    MARGIN_TOP + 4.0
  ));

  for (i, day) in daily.iter().enumerate() {
    let x0 = MARGIN_LEFT + i as f64 * GROUP_PITCH + GROUP_GAP / 2.0;

    let approved_h = day.approved as f64 * scale;
    svg.push_str(&format!(
      "  <rect x=\"{x0:.1}\" y=\"{:.1}\" width=\"{BAR_WIDTH:.1}\" height=\"{approved_h:.1}\" fill=\"{APPROVED_FILL}\"/>\n",
      base - approved_h
    ));

    let rejected_x = x0 + BAR_WIDTH + BAR_GAP;
    let rejected_h = day.rejected as f64 * scale;
    svg.push_str(&format!(
      "  <rect x=\"{rejected_x:.1}\" y=\"{:.1}\" width=\"{BAR_WIDTH:.1}\" height=\"{rejected_h:.1}\" fill=\"{REJECTED_FILL}\"/>\n",
      base - rejected_h
    ));

    let label_x = x0 + BAR_WIDTH + BAR_GAP / 2.0;
    let label_y = base + 16.0;
    svg.push_str(&format!(
      "  <text x=\"{label_x:.1}\" y=\"{label_y:.1}\" text-anchor=\"end\" font-size=\"11\" \
       transform=\"rotate(-45 {label_x:.1} {label_y:.1})\">{}</text>\n",
      day.day
    ));
  }

  svg.push_str(&format!(
    "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"13\">Date</text>\n",
    MARGIN_LEFT + plot_w / 2.0,
    height - 12.0
  ));
  svg.push_str(&format!(
    "  <text x=\"16\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"13\" transform=\"rotate(-90 16 {:.1})\">Count</text>\n",
    MARGIN_TOP + PLOT_HEIGHT / 2.0,
    MARGIN_TOP + PLOT_HEIGHT / 2.0
  ));

  let legend_x = width - MARGIN_RIGHT - 170.0;
  svg.push_str(&format!(
    "  <rect x=\"{legend_x:.1}\" y=\"10\" width=\"12\" height=\"12\" fill=\"{APPROVED_FILL}\"/>\n"
  ));
  svg.push_str(&format!(
    "  <text x=\"{:.1}\" y=\"20\" font-size=\"12\">Approved</text>\n",
    legend_x + 18.0
  ));
  svg.push_str(&format!(
    "  <rect x=\"{:.1}\" y=\"10\" width=\"12\" height=\"12\" fill=\"{REJECTED_FILL}\"/>\n",
    legend_x + 90.0
  ));
  svg.push_str(&format!(
    "  <text x=\"{:.1}\" y=\"20\" font-size=\"12\">Rejected</text>\n",
    legend_x + 108.0
  ));

  svg.push_str("</svg>\n");

  svg
}
