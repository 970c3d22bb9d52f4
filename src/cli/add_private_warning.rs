//! # add-private-warning
//!
//! Inserts or refreshes the "not part of the public API" warning in every
//! private header under `--src`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Result, bail};
use clap::Parser;

use super::{CUSTOM_STYLES, CommonArgs, HELP_TEMPLATE, LONG_VERSION, diff_manager};
use crate::error::ensure_source_dir;
use crate::info_log;
use crate::output::{print_blank_line, print_start_message, print_summary};
use crate::private_warning::{PrivateWarningInjector, is_valid_library};
use crate::processor::{FileCollector, FileSelector, Processor, ProcessorConfig};
use crate::report::ProcessingSummary;

/// Mark private headers as not part of a library's public API
#[derive(Parser, Debug)]
#[command(
  name = "add-private-warning",
  author,
  version,
  long_version = LONG_VERSION,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Warn that *_p.h headers under src/ are not part of the Widgets API
  add-private-warning --src src --name Widgets
",
  help_template = HELP_TEMPLATE
)]
pub struct PrivateWarningArgs {
  /// Root of the source tree to scan for private headers
  #[arg(long, value_name = "DIR")]
  pub src: PathBuf,

  /// Library name written into the warning
  #[arg(long, value_name = "NAME")]
  pub name: String,

  /// Don't write anything; print a diff of each change to stderr
  #[arg(long)]
  pub dry_run: bool,

  /// Save the diff of each change to a file (implies no writes)
  #[arg(long, value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  #[command(flatten)]
  pub common: CommonArgs,
}

/// Run `add-private-warning` with the given arguments
pub async fn run_private_warning(args: PrivateWarningArgs) -> Result<()> {
  args.common.init_output();

  ensure_source_dir(&args.src)?;

  if !is_valid_library(&args.name) {
    bail!(
      "Library name '{}' must be a single word (word characters only) so the warning can be found again",
      args.name
    );
  }

  let config = args.common.load_config()?;
  let jobs = args.common.resolve_jobs(&config);

  let files = FileCollector::new(FileSelector::Suffixes(config.private_warning.suffixes.clone())).collect(&args.src)?;

  let dry_run = args.dry_run || args.save_diff.is_some();
  let save_diff = args.save_diff.clone();
  let processor = Processor::new(ProcessorConfig {
    jobs,
    dry_run,
    diff_manager: diff_manager(args.dry_run, args.save_diff)?,
    ..ProcessorConfig::new(PrivateWarningInjector::new(args.name))
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

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_requires_src_and_name() {
    assert!(PrivateWarningArgs::try_parse_from(["add-private-warning", "--src", "src"]).is_err());

    let args =
      PrivateWarningArgs::try_parse_from(["add-private-warning", "--src", "src", "--name", "Foo", "--dry-run"]).unwrap();
    assert_eq!(args.name, "Foo");
    assert!(args.dry_run);
    assert_eq!(args.save_diff, None);
  }
}
