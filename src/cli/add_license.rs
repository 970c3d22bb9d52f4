//! # add-license
//!
//! Stamps the copyright banner onto every C/C++ source under `--src` that
//! opens with a header guard.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use super::{CUSTOM_STYLES, CommonArgs, HELP_TEMPLATE, LONG_VERSION, diff_manager};
use crate::error::{ensure_copyright_file, ensure_source_dir};
use crate::info_log;
use crate::license::{CopyrightBlock, LicenseStamper};
use crate::output::{print_blank_line, print_start_message, print_summary};
use crate::processor::{FileCollector, FileSelector, Processor, ProcessorConfig};
use crate::report::ProcessingSummary;

/// Prepend a copyright banner to C/C++ sources and headers
#[derive(Parser, Debug)]
#[command(
  name = "add-license",
  author,
  version,
  long_version = LONG_VERSION,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Stamp every header and source under src/
  add-license --src src --copyright COPYRIGHT.txt

  # Show what would change without writing
  add-license --src src --copyright COPYRIGHT.txt --dry-run
",
  help_template = HELP_TEMPLATE
)]
pub struct LicenseArgs {
  /// Root of the source tree to stamp
  #[arg(long, value_name = "DIR")]
  pub src: PathBuf,

  /// Text file holding the copyright notice
  #[arg(long, value_name = "FILE")]
  pub copyright: PathBuf,

  /// Don't write anything; print a diff of each change to stderr
  #[arg(long)]
  pub dry_run: bool,

  /// Save the diff of each change to a file (implies no writes)
  #[arg(long, value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  #[command(flatten)]
  pub common: CommonArgs,
}

/// Run `add-license` with the given arguments
pub async fn run_license(args: LicenseArgs) -> Result<()> {
  args.common.init_output();

  ensure_source_dir(&args.src)?;
  ensure_copyright_file(&args.copyright)?;

  let config = args.common.load_config()?;
  let jobs = args.common.resolve_jobs(&config);

  let banner = CopyrightBlock::load(&args.copyright)?;
  debug!("Loaded copyright notice from {}", args.copyright.display());

  let files = FileCollector::new(FileSelector::Extensions(config.license.extensions.clone())).collect(&args.src)?;

  let dry_run = args.dry_run || args.save_diff.is_some();
  let save_diff = args.save_diff.clone();
  let processor = Processor::new(ProcessorConfig {
    jobs,
    dry_run,
    diff_manager: diff_manager(args.dry_run, args.save_diff)?,
    ..ProcessorConfig::new(LicenseStamper::new(banner))
  });

  print_start_message(files.len(), dry_run);

  let start_time = Instant::now();
  let reports = processor.process(&files).await?;
  let summary = ProcessingSummary::from_reports(&reports, start_time.elapsed());

  print_blank_line();
  print_summary(&summary, dry_run);

  if let Some(path) = save_diff {
    info_log!("Saved diff to {}", path.display());
  }

  Ok(())
}
