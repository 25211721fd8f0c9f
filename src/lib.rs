// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! # webhelpers
//!
//! Independent helper routines for web applications:
//!
//! - [`utils::timespan`]: seconds to `"1 minute 5 seconds"`.
//! - [`utils::find_all`]: every (overlapping) position of a substring.
//! - [`utils::convert_chars_to_entities`]: Latin-1 accents to `&#NNN;`.
//! - [`models::constants::get_constant_by_value`]: constant names by value.
//! - [`logic::tree::tree`]: nested directory listing.
//! - [`logic::remove::remove_dir`]: best-effort recursive delete.
//! - [`logic::archive::zip_file`] / [`logic::archive::zip_dir`]: ZIP packaging.
//!
//! Filesystem helpers report problems through a [`report::Reporter`] and
//! also return them as errors.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use webhelpers::logic::archive::{ArchiveTarget, zip_dir};
//! use webhelpers::report::{ConsoleReporter, ReporterConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let reporter = ConsoleReporter::stdout(ReporterConfig::default());
//!     let site = Path::new("/srv/site");
//!     let outcome = zip_dir(site, site, ArchiveTarget::CreateNew(None), &reporter)?;
//!     if let Some(archive) = outcome.into_created() {
//!         println!("wrote {:?}", archive.finish()?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod logic;
pub mod models;
pub mod report;
pub mod utils;

pub use cli::Cli;
pub use error::FsError;
pub use report::{ConsoleReporter, HostContext, Reporter, ReporterConfig, TracingReporter};
