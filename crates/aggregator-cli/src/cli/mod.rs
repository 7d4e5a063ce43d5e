//! CLI for the topic aggregator.

use anyhow::Result;
use aggregator_core::config::{self, AggregatorConfig};
use aggregator_core::driver;
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: aggregator filename topic";
pub const INVALID_ARGS: &str = "Error: invalid number of arguments";
pub const EMPTY_TOPIC: &str = "Error: topic must not be empty";

/// Collect references to a topic from a list of web pages.
#[derive(Debug, Parser)]
#[command(name = "aggregator", version)]
#[command(about = "Collect references to a topic from a list of web pages", long_about = None)]
pub struct Cli {
    /// Text file listing one URL per line.
    pub filename: PathBuf,

    /// Word or phrase to report on; results go to `<topic>summary.txt`.
    pub topic: String,
}

/// Outcome of argument parsing.
#[derive(Debug)]
pub enum Invocation {
    Run(Cli),
    /// Bad invocation: print the message and the usage hint, do nothing else.
    Usage(&'static str),
    /// `--help` / `--version`, rendered by clap.
    Clap(clap::Error),
}

const CLAP_FLAGS: [&str; 4] = ["-h", "--help", "-V", "--version"];

/// Decides on the argument count first: exactly two arguments always run,
/// whatever they look like (`-x`, `--`, `-h`). A lone help/version flag is
/// handed to clap; every other count is a usage error.
pub fn parse_invocation<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = if args.is_empty() {
        OsString::from("aggregator")
    } else {
        args.remove(0)
    };

    match args.len() {
        2 => {
            // After `--` clap takes every remaining argument as a positional value.
            let argv = [program, OsString::from("--")].into_iter().chain(args);
            match Cli::try_parse_from(argv) {
                Ok(cli) if cli.topic.is_empty() => Invocation::Usage(EMPTY_TOPIC),
                Ok(cli) => Invocation::Run(cli),
                Err(_) => Invocation::Usage(INVALID_ARGS),
            }
        }
        1 if args[0].to_str().is_some_and(|a| CLAP_FLAGS.contains(&a)) => {
            match Cli::try_parse_from([program, args.remove(0)]) {
                Err(err)
                    if matches!(
                        err.kind(),
                        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
                    ) =>
                {
                    Invocation::Clap(err)
                }
                _ => Invocation::Usage(INVALID_ARGS),
            }
        }
        _ => Invocation::Usage(INVALID_ARGS),
    }
}

pub fn run(cli: Cli) -> Result<()> {
    // A broken or unwritable config never blocks a run.
    let cfg = match config::load_or_init() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("config unavailable, using defaults: {:#}", e);
            AggregatorConfig::default()
        }
    };
    tracing::debug!("loaded config: {:?}", cfg);

    let summary = driver::run(&cli.filename, &cli.topic, &cfg)?;
    tracing::info!(
        "wrote {} block(s) from {} url(s) to {} ({} failed)",
        summary.blocks_written,
        summary.urls,
        summary.output_path.display(),
        summary.failures.len()
    );
    Ok(())
}
