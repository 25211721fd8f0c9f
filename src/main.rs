// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Command-line front end for the webhelpers routines.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use webhelpers::cli::Command;
use webhelpers::logic::archive::{ArchiveTarget, zip_dir, zip_file};
use webhelpers::logic::remove::remove_dir;
use webhelpers::logic::tree::{WalkOptions, tree};
use webhelpers::models::constants::{ConstantMatch, ConstantValue, get_constant_by_value};
use webhelpers::utils::{convert_chars_to_entities, find_all, timespan};
use webhelpers::{Cli, ConsoleReporter, FsError, Reporter, TracingReporter};

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.tracing {
        run(&cli, &TracingReporter::default())
    } else {
        run(&cli, &ConsoleReporter::stdout(cli.reporter_config()))
    }
}

/// Dispatch one subcommand, printing its result to stdout.
fn run(cli: &Cli, reporter: &dyn Reporter) -> Result<()> {
    match &cli.command {
        Command::Timespan {
            secs,
            include_zeroes,
        } => println!("{}", timespan(*secs, *include_zeroes)),
        Command::Find {
            haystack,
            needle,
            ignore_case,
            offset,
        } => {
            let hits = find_all(haystack, needle, !ignore_case, *offset);
            let line: Vec<String> = hits.iter().map(usize::to_string).collect();
            println!("{}", line.join(" "));
        }
        Command::Entities { text } => println!("{}", convert_chars_to_entities(text)),
        Command::Constant { value, category } => {
            let query = match value.parse::<i64>() {
                Ok(number) => ConstantValue::Int(number),
                Err(_) => ConstantValue::Str(value),
            };
            match get_constant_by_value(query, category.as_deref()) {
                ConstantMatch::NotFound => bail!("No constant has the value {value:?}"),
                found => {
                    for name in found.names() {
                        println!("{name}");
                    }
                }
            }
        }
        Command::Tree {
            dir,
            mode,
            exclude,
            max_depth,
        } => {
            let options = WalkOptions::new((*mode).into())
                .exclude(exclude.iter().cloned())
                .max_depth(*max_depth);
            let listing = tree(dir, &options, reporter)?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Command::Rmdir { dir, preserve } => remove_dir(dir, *preserve, reporter)?,
        Command::Zip {
            source,
            top,
            output,
            location,
        } => {
            let top = top.clone().unwrap_or_else(|| default_top(source));
            let target = ArchiveTarget::CreateNew(output.clone());
            let outcome = if source.is_dir() {
                zip_dir(source, &top, target, reporter)?
            } else {
                zip_file(source, &top, location.as_deref(), target, reporter)?
            };

            if let Some(archive) = outcome.into_created() {
                let failed = archive.failed_entries();
                let path = archive.finish()?;
                println!("{}", path.display());
                if failed > 0 {
                    return Err(FsError::Partial {
                        operation: "zip",
                        failed,
                    }
                    .into());
                }
            }
        }
    }
    Ok(())
}

/// Parent of the resolved source, so entries keep the source's own name.
fn default_top(source: &Path) -> PathBuf {
    let resolved = fs::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());
    resolved
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
