// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Command-line arguments for the `webhelpers` binary.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use crate::logic::tree::DEFAULT_MAX_DEPTH;
use crate::models::tree::PathMode;
use crate::report::{HostContext, ReporterConfig};

#[derive(Parser, Debug)]
#[command(name = "webhelpers")]
#[command(version)]
#[command(about = "Timespans, substring search, HTML entities, directory trees and ZIP packaging", long_about = None)]
#[command(after_help = "Examples:\n  \
  webhelpers timespan 3665                 1 hour 1 minute 5 seconds\n  \
  webhelpers tree ./public --mode relative list a directory as JSON\n  \
  webhelpers zip ./public -o site.zip      pack a directory")]
pub struct Cli {
    /// Emit diagnostics with <br /> line breaks instead of newlines
    #[arg(long, global = true)]
    pub markup: bool,

    /// Line breaks appended to each diagnostic
    #[arg(long, value_name = "N", default_value_t = 1, global = true)]
    pub line_breaks: usize,

    /// Send diagnostics to the tracing log (stderr) instead of stdout
    #[arg(long, global = true)]
    pub tracing: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a number of seconds as a human-readable timespan
    Timespan {
        #[arg(value_name = "SECS")]
        secs: u64,

        /// Include units whose value is zero
        #[arg(long)]
        include_zeroes: bool,
    },

    /// Print every byte offset of NEEDLE in HAYSTACK
    Find {
        haystack: String,
        needle: String,

        /// Case-insensitive search
        #[arg(short = 'i', long)]
        ignore_case: bool,

        /// Byte offset to start searching from
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },

    /// Convert accented Latin-1 characters to numeric HTML entities
    Entities { text: String },

    /// Look up constant names by value
    Constant {
        value: String,

        /// Only search this category (exact match)
        #[arg(long)]
        category: Option<String>,
    },

    /// Print a directory tree as JSON
    Tree {
        dir: PathBuf,

        #[arg(long, value_enum, default_value_t = ModeArg::Absolute)]
        mode: ModeArg,

        /// Basenames to skip (repeatable)
        #[arg(short = 'x', long = "exclude", value_name = "NAME")]
        exclude: Vec<String>,

        /// Deepest directory level to enter
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Delete a directory and everything below it
    Rmdir {
        dir: PathBuf,

        /// Keep the (emptied) directory itself
        #[arg(long)]
        preserve: bool,
    },

    /// Pack a file or directory into a ZIP archive
    Zip {
        source: PathBuf,

        /// Prefix stripped from entry names (default: parent of SOURCE)
        #[arg(long, value_name = "DIR")]
        top: Option<PathBuf>,

        /// Archive to write (default: timestamp-named file)
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Entry name to use for a single file (not allowed for a directory)
        #[arg(long, value_name = "NAME")]
        location: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Absolute,
    Relative,
    Both,
}

impl From<ModeArg> for PathMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Absolute => PathMode::Absolute,
            ModeArg::Relative => PathMode::Relative,
            ModeArg::Both => PathMode::Both,
        }
    }
}

impl Cli {
    pub fn reporter_config(&self) -> ReporterConfig {
        ReporterConfig {
            context: if self.markup {
                HostContext::Markup
            } else {
                HostContext::CommandLine
            },
            line_breaks: self.line_breaks,
        }
    }

    /// Reject argument combinations clap cannot see, because they depend on
    /// what is on disk.
    pub fn validate(&self) -> Result<()> {
        if let Command::Zip {
            source,
            location: Some(_),
            ..
        } = &self.command
            && source.is_dir()
        {
            bail!(
                "--location names a single file entry and cannot be used when {:?} is a directory",
                source
            );
        }
        Ok(())
    }
}
