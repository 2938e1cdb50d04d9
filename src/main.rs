// src/main.rs
// =============================================================================
// This is the entry point of the `crawl` binary.
//
// What happens here:
// 1. Parse command-line arguments using clap (usage errors exit here)
// 2. Install logging on stderr
// 3. Run the crawl, racing it against Ctrl-C
// 4. Print a summary (or JSON) and exit: 0 = done or interrupted, 1 = error
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use spider::{CrawlConfig, CrawlReport, Crawler};
use tracing_subscriber::EnvFilter;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("crawl: error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins; otherwise --verbose picks the level
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let json = cli.json;
    let crawler = Crawler::new(cli.into_config())?;

    // An interrupt ends the crawl early but is not an error
    let report = crawler.run_until(interrupted()).await?;

    print_report(crawler.config(), &report, json)
}

// Resolves on Ctrl-C. If the handler can't be installed, never resolves.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn print_report(config: &CrawlConfig, report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let output = json!({ "config": config, "report": report });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if report.interrupted {
        println!("⚠️  Interrupted, partial results:");
    }

    println!("📊 Summary:");
    println!("   🔁 Levels: {}", report.levels);
    println!("   🌐 Visited: {}", report.visited());
    println!("   📄 Pages: {}", report.pages);
    println!("   🖼️  Images saved: {}", report.images.len());
    println!("   ⏭️  Ignored: {}", report.skipped);
    println!("   ❌ Failed fetches: {}", report.fetch_failures);
    println!("   💾 Failed writes: {}", report.persist_failures);

    Ok(())
}
