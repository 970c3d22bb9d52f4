//! # add-private-warning
//!
//! Marks private headers as not part of the library's public API.

use anyhow::Result;
use clap::Parser;
use headerkit::cli::{PrivateWarningArgs, exit_on_precondition, run_private_warning};

#[tokio::main]
async fn main() -> Result<()> {
  let args = PrivateWarningArgs::parse();
  exit_on_precondition(run_private_warning(args).await)
}
