// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
//   crawl [-r] [-p <path>] [-l <depth>] <url>
//
// Short flags can be bundled and option values attached or separate, so
// `-rl3`, `-r -l 3` and `-rp out` all work. clap rejects unknown flags,
// missing values, a second URL or no URL at all, printing usage to stderr
// and exiting non-zero.
//
// r, l and p are the only short options. Everything else (including help
// and version) is long-only, so `crawl -v <url>` is a usage error.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use spider::config::{CrawlConfig, DEFAULT_DEPTH, DEFAULT_JOBS, DEFAULT_OUTPUT_ROOT};
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "crawl",
    version,
    about = "Crawl a website breadth-first and download the images it links to",
    override_usage = "crawl [-r] [-p <path>] [-l <depth>] <url>",
    // The automatic -h/-V would widen the short-option space
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Follow links recursively (without it only the seed and what it links to directly)
    #[arg(short = 'r')]
    pub recursive: bool,

    /// Maximum crawl depth when recursive
    #[arg(short = 'l', value_name = "depth", default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,

    /// Directory to save images into; must not exist yet
    #[arg(short = 'p', value_name = "path", default_value = DEFAULT_OUTPUT_ROOT)]
    pub path: PathBuf,

    /// Number of concurrent fetches per level
    #[arg(long, value_name = "N", default_value_t = DEFAULT_JOBS)]
    pub jobs: usize,

    /// Give up on a request (body included) after this many seconds. No limit by default
    #[arg(long, value_name = "secs")]
    pub timeout: Option<u64>,

    /// Print the crawl report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// More log output (once for debug, twice for trace). RUST_LOG overrides this.
    #[arg(long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Print version
    #[arg(long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// URL to start crawling from
    #[arg(value_parser = Url::parse)]
    pub url: Url,
}

impl Cli {
    // Builds the crawl config. Consumes the CLI since nothing else needs it.
    pub fn into_config(self) -> CrawlConfig {
        let config = CrawlConfig::new(self.url, self.path)
            .recursive(self.recursive)
            .max_depth(self.depth)
            .jobs(self.jobs);

        match self.timeout {
            Some(secs) => config.timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why turn off clap's built-in help and version flags?
//    - By default clap adds -h and -V as well as --help and --version
//    - We want r, l and p to be the only single-letter options
//    - ArgAction::Help and ArgAction::Version give back the long forms
//
// 2. What is ArgAction::Count?
//    - Counts how many times a flag appears
//    - --verbose --verbose gives 2, which main.rs maps to trace logging
//
// 3. Why Option<u64> for --timeout?
//    - None means "not given", which is different from any number
//    - The fetcher only sets a total deadline when it's Some
//
// 4. What is try_parse_from?
//    - Parses a list of strings instead of the real command line
//    - Returns an error instead of exiting, which is what tests want
// -----------------------------------------------------------------------------
