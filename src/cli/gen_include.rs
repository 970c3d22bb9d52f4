//! # gen-include
//!
//! Generates an include tree under `--dest` with one file per header found
//! under `--src`: forwarding stubs by default, copies with `--copy`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use super::{CUSTOM_STYLES, CommonArgs, HELP_TEMPLATE, LONG_VERSION};
use crate::error::ensure_source_dir;
use crate::info_log;
use crate::mirror::{MirrorMode, MirrorPlan, clear_destination};
use crate::output::{print_blank_line, print_hint, print_mirror_plan, print_mirror_summary, print_start_message};
use crate::processor::{FileCollector, FileSelector, absolutize_path};
use crate::report::ProcessingSummary;

/// Generate a flat include tree of forwarding headers (or copies)
#[derive(Parser, Debug)]
#[command(
  name = "gen-include",
  author,
  version,
  long_version = LONG_VERSION,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Forwarding stubs for every header under src/, private ones in include/private/
  gen-include --src src --dest include

  # Start from an empty include/ and copy the headers instead
  gen-include --src src --dest include --copy --rm
",
  help_template = HELP_TEMPLATE
)]
pub struct GenIncludeArgs {
  /// Root of the source tree to scan for headers
  #[arg(long, value_name = "DIR")]
  pub src: PathBuf,

  /// Directory that receives the generated tree
  #[arg(long, value_name = "DIR")]
  pub dest: PathBuf,

  /// Copy headers instead of writing forwarding stubs
  #[arg(long)]
  pub copy: bool,

  /// Remove the destination before generating
  #[arg(long)]
  pub rm: bool,

  /// Print the files that would be generated without touching the disk
  #[arg(long)]
  pub dry_run: bool,

  #[command(flatten)]
  pub common: CommonArgs,
}

/// Run `gen-include` with the given arguments
pub async fn run_gen_include(args: GenIncludeArgs) -> Result<()> {
  args.common.init_output();

  ensure_source_dir(&args.src)?;

  let config = args.common.load_config()?;
  let jobs = args.common.resolve_jobs(&config);

  let mut headers =
    FileCollector::new(FileSelector::Extensions(config.gen_include.extensions.clone())).collect(&args.src)?;

  // A destination nested in the source tree would otherwise feed earlier
  // output back in as input.
  let dest_root = absolutize_path(&args.dest)?;
  let before = headers.len();
  headers.retain(|header| absolutize_path(header).map_or(true, |path| !path.starts_with(&dest_root)));
  if headers.len() != before {
    debug!("Ignored {} headers already under {}", before - headers.len(), dest_root.display());
  }

  let mode = if args.copy { MirrorMode::Copy } else { MirrorMode::Stub };
  let plan = MirrorPlan::build(&headers, &args.dest, &config.gen_include.private_dir, mode)?;

  if args.dry_run {
    if args.rm && args.dest.exists() {
      info_log!("Would remove {}", args.dest.display());
    }
    print_mirror_plan(&plan);
    return Ok(());
  }

  if args.rm && clear_destination(&args.dest).await? {
    info_log!("Removed {}", args.dest.display());
  }

  print_start_message(plan.entries.len(), false);

  let start_time = Instant::now();
  let reports = plan.execute(jobs).await?;
  let summary = ProcessingSummary::from_reports(&reports, start_time.elapsed());

  print_blank_line();
  print_mirror_summary(&plan, &summary);

  if plan.entries.len() < headers.len() {
    print_hint("Some headers share a file name; only the last one of each was generated.");
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_flags() {
    assert!(GenIncludeArgs::try_parse_from(["gen-include", "--src", "src"]).is_err());

    let args = GenIncludeArgs::try_parse_from(["gen-include", "--src", "src", "--dest", "out", "--copy", "--rm"]).unwrap();
    assert!(args.copy);
    assert!(args.rm);
    assert!(!args.dry_run);
    assert_eq!(args.dest, PathBuf::from("out"));
  }
}
