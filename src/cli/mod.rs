//! # CLI Module
//!
//! This module contains the command-line interfaces of the three tools. Each
//! binary parses its own argument struct; the flags that control output,
//! concurrency and configuration are shared through [`CommonArgs`].

mod add_license;
mod add_private_warning;
mod gen_include;

use std::path::{Path, PathBuf};
use std::process;

pub use add_license::{LicenseArgs, run_license};
pub use add_private_warning::{PrivateWarningArgs, run_private_warning};
use anyhow::Result;
use clap::Args;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use gen_include::{GenIncludeArgs, run_gen_include};
use tracing::debug;

use crate::config::{Config, load_config};
use crate::diff::DiffManager;
use crate::error::{HeaderkitError, PRECONDITION_EXIT_CODE};
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};

pub(crate) const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

pub(crate) const LONG_VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("GIT_HASH"),
  " ",
  env!("GIT_DATE"),
  ")"
);

pub(crate) const HELP_TEMPLATE: &str = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
";

/// Flags shared by every tool.
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
  /// Increase verbosity (-v progress, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Number of files processed concurrently [default: number of CPUs]
  #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
  pub jobs: Option<u16>,

  /// Path to config file (default: $HEADERKIT_CONFIG, then .headerkit.toml in
  /// the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long, conflicts_with = "config")]
  pub no_config: bool,
}

impl CommonArgs {
  /// Sets up tracing, the output mode and colors.
  pub fn init_output(&self) {
    init_tracing(self.quiet, self.verbose);

    if self.verbose > 0 {
      set_verbose();
    } else if self.quiet {
      set_quiet();
    }
    self.colors.apply();
  }

  /// Loads the configuration, searching the current directory.
  pub fn load_config(&self) -> Result<Config> {
    load_config(self.config.as_deref(), Path::new("."), self.no_config)
  }

  /// `--jobs`, then the config file, then the CPU count.
  pub fn resolve_jobs(&self, config: &Config) -> usize {
    let jobs = self
      .jobs
      .map(usize::from)
      .or(config.jobs)
      .unwrap_or_else(num_cpus::get);
    debug!("Using {} jobs", jobs);
    jobs
  }
}

/// Builds the diff manager for `--dry-run`/`--save-diff`.
///
/// Diffs are shown on stderr in dry-run mode. `--save-diff` implies a dry run.
pub(crate) fn diff_manager(dry_run: bool, save_diff: Option<PathBuf>) -> Result<Option<DiffManager>> {
  if !dry_run && save_diff.is_none() {
    return Ok(None);
  }

  let manager = DiffManager::new(dry_run, save_diff);
  manager.init()?;
  Ok(Some(manager))
}

/// Turns a precondition failure into the tools' exit protocol: the message on
/// stdout and exit status -1. Any other error is handed back to `main`.
pub fn exit_on_precondition(result: Result<()>) -> Result<()> {
  if let Err(ref e) = result {
    if let Some(precondition) = e.downcast_ref::<HeaderkitError>() {
      debug!("Precondition failed for {}", precondition.path().display());
      println!("{precondition}");
      process::exit(PRECONDITION_EXIT_CODE);
    }
  }
  result
}
