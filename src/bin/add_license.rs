//! # add-license
//!
//! Prepends a copyright banner to C/C++ sources that have a header guard.

use anyhow::Result;
use clap::Parser;
use headerkit::cli::{LicenseArgs, exit_on_precondition, run_license};

#[tokio::main]
async fn main() -> Result<()> {
  let args = LicenseArgs::parse();
  exit_on_precondition(run_license(args).await)
}
