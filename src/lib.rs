//! # headerkit
//!
//! Release tooling for C/C++ libraries. Three passes run over a source tree:
//!
//! * `add-license` prepends a boxed copyright banner to every header and source
//!   that opens with a header guard, replacing any comment block in front of it
//! * `add-private-warning` puts a "not part of the public API" warning after
//!   the guard of every private header, or updates the library name in an
//!   existing one
//! * `gen-include` builds a flat include tree of forwarding stubs (or copies),
//!   with private headers in their own subdirectory
//!
//! Each file is read, rewritten and written independently, so the passes run
//! files concurrently. A file is only written when its content changes.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use headerkit::license::{CopyrightBlock, LicenseStamper};
//! use headerkit::processor::{FileCollector, FileSelector, Processor, ProcessorConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let banner = CopyrightBlock::load(Path::new("COPYRIGHT.txt"))?;
//!     let selector = FileSelector::Extensions(vec!["h".to_string(), "cpp".to_string()]);
//!     let files = FileCollector::new(selector).collect(Path::new("src"))?;
//!
//!     let processor = Processor::new(ProcessorConfig::new(LicenseStamper::new(banner)));
//!     let reports = processor.process(&files).await?;
//!
//!     println!("Processed {} files", reports.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`license`] - Copyright banner rendering and header-guard detection
//! * [`private_warning`] - Private API warning insertion and renaming
//! * [`mirror`] - Include tree planning and generation
//! * [`processor`] - File discovery and the concurrent rewrite driver
//! * [`config`] - `.headerkit.toml` loading
//! * [`cli`] - Command-line interfaces of the three binaries

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod license;
pub mod logging;
pub mod mirror;
pub mod output;
pub mod private_warning;
pub mod processor;
pub mod report;
