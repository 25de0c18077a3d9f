use anyhow::Result;
use clap::Parser;

mod ado;
mod aggregate;
mod chart;
mod cli;
mod dates;
mod extract;
mod model;
mod pipeline;
mod report;
mod sink;
mod util;
mod vote;

use crate::cli::{Cli, normalize};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: fetch, filter, aggregate, and write the report
  crate::pipeline::run(&cfg)
}
