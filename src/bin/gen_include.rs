//! # gen-include
//!
//! Generates a flat include tree from the headers of a source tree.

use anyhow::Result;
use clap::Parser;
use headerkit::cli::{GenIncludeArgs, exit_on_precondition, run_gen_include};

#[tokio::main]
async fn main() -> Result<()> {
  let args = GenIncludeArgs::parse();
  exit_on_precondition(run_gen_include(args).await)
}
