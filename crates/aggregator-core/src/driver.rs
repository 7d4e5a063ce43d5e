//! Aggregation driver: URL list in, `<topic>summary.txt` out.
//!
//! Processes the URL list strictly in order, one URL at a time. Per-URL
//! failures and an unreadable input file are reported on the console and
//! never abort the run; output-file errors do.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::AggregatorConfig;
use crate::fetch::{CurlFetcher, Fetch, FetchError};
use crate::matcher::TopicMatcher;
use crate::report::format_report;

/// Suffix appended to the topic to name the output file.
pub const OUTPUT_SUFFIX: &str = "summary.txt";

/// Output file name for `topic`: the topic immediately followed by `summary.txt`.
pub fn output_filename(topic: &str) -> String {
    format!("{}{}", topic, OUTPUT_SUFFIX)
}

/// A URL that contributed no block because it could not be fetched or decoded.
#[derive(Debug)]
pub struct UrlFailure {
    pub url: String,
    pub error: FetchError,
}

/// What a finished run did.
#[derive(Debug)]
pub struct RunSummary {
    pub output_path: PathBuf,
    /// URLs read from the input file (blank lines included).
    pub urls: usize,
    pub blocks_written: usize,
    pub failures: Vec<UrlFailure>,
    /// Set when the input file could not be opened or read.
    pub input_error: Option<String>,
}

impl RunSummary {
    fn new(output_path: PathBuf) -> Self {
        Self {
            output_path,
            urls: 0,
            blocks_written: 0,
            failures: Vec::new(),
            input_error: None,
        }
    }
}

/// Runs the fetch, match, write pipeline for one topic.
pub struct Aggregator<F> {
    fetcher: F,
    matcher: TopicMatcher,
}

impl<F: Fetch> Aggregator<F> {
    pub fn new(fetcher: F, topic: &str) -> Result<Self> {
        let matcher = TopicMatcher::new(topic)
            .with_context(|| format!("invalid topic pattern for {:?}", topic))?;
        Ok(Self { fetcher, matcher })
    }

    pub fn topic(&self) -> &str {
        self.matcher.topic()
    }

    /// Reads URLs from `input` and writes `<topic>summary.txt` into `output_dir`.
    /// Diagnostics go to stderr.
    ///
    /// The output file is created (truncated) before the input is opened, so an
    /// unreadable input leaves an empty summary behind.
    pub fn run(&self, input: &Path, output_dir: &Path) -> Result<RunSummary> {
        let stderr = io::stderr();
        let mut console = stderr.lock();
        self.run_with_console(input, output_dir, &mut console)
    }

    /// Same as [`Aggregator::run`], with diagnostics written to `console`:
    /// one line per failed URL.
    pub fn run_with_console<C: Write>(
        &self,
        input: &Path,
        output_dir: &Path,
        console: &mut C,
    ) -> Result<RunSummary> {
        let output_path = output_dir.join(output_filename(self.topic()));
        let file = File::create(&output_path)
            .with_context(|| format!("failed to create output file: {}", output_path.display()))?;
        let mut out = BufWriter::new(file);
        let mut summary = RunSummary::new(output_path);

        tracing::info!(
            input = %input.display(),
            output = %summary.output_path.display(),
            topic = self.topic(),
            "aggregation started"
        );

        match File::open(input) {
            Ok(f) => self.process(BufReader::new(f), input, &mut out, console, &mut summary)?,
            Err(e) => report_input_error(input, &e, console, &mut summary),
        }

        out.flush()
            .with_context(|| format!("failed to write {}", summary.output_path.display()))?;

        tracing::info!(
            urls = summary.urls,
            blocks = summary.blocks_written,
            failures = summary.failures.len(),
            "aggregation finished"
        );
        Ok(summary)
    }

    fn process<R: BufRead, W: Write, C: Write>(
        &self,
        reader: R,
        input: &Path,
        out: &mut W,
        console: &mut C,
        summary: &mut RunSummary,
    ) -> Result<()> {
        // `lines()` drops the trailing "\n" / "\r\n"; nothing else is trimmed.
        for line in reader.lines() {
            let url = match line {
                Ok(url) => url,
                Err(e) => {
                    report_input_error(input, &e, console, summary);
                    break;
                }
            };
            summary.urls += 1;

            match self.fetcher.fetch(&url) {
                Ok(page) => {
                    let block = format_report(&url, &page, &self.matcher);
                    if block.is_empty() {
                        tracing::debug!(url = %url, "no references");
                        continue;
                    }
                    out.write_all(block.as_bytes()).with_context(|| {
                        format!("failed to write {}", summary.output_path.display())
                    })?;
                    summary.blocks_written += 1;
                }
                Err(error) => {
                    let _ = writeln!(console, "{}: {} {}", error.action(), url, error);
                    // Below the stderr fallback level: the console line above is the diagnostic.
                    tracing::info!(url = %url, "{}: {}", error.action(), error);
                    summary.failures.push(UrlFailure { url, error });
                }
            }
        }
        Ok(())
    }
}

fn report_input_error<C: Write>(
    input: &Path,
    e: &io::Error,
    console: &mut C,
    summary: &mut RunSummary,
) {
    let _ = writeln!(console, "Error opening file: {}\n{}", input.display(), e);
    tracing::info!(input = %input.display(), "cannot read input file: {}", e);
    summary.input_error = Some(e.to_string());
}

/// Runs the aggregator with libcurl in the current directory.
pub fn run(input: &Path, topic: &str, cfg: &AggregatorConfig) -> Result<RunSummary> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    Aggregator::new(CurlFetcher::new(cfg.fetch.clone()), topic)?.run(input, &cwd)
}
