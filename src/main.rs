//! Dinemap main entry point
//!
//! This is the command-line interface for the dinemap directory scraper.

use clap::Parser;
use dinemap::config::load_config_with_hash;
use dinemap::pipeline::read_seed_urls;
use dinemap::{DinemapError, Pipeline, RunSummary};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Dinemap: a hierarchical restaurant-directory scraper
///
/// Dinemap walks seed region listing pages for city groups, city groups for
/// entity URLs, and exports one CSV row per entity detail page, with audit
/// trails of every URL visited along the way.
#[derive(Parser, Debug)]
#[command(name = "dinemap")]
#[command(version)]
#[command(about = "A hierarchical restaurant-directory scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => (cfg, hash),
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return ExitCode::from(2);
        }
    };
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return ExitCode::SUCCESS;
    }

    let deadline_secs = config.crawl.run_deadline_secs;
    let pipeline = match Pipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("Failed to initialize pipeline: {}", e);
            return exit_code_for(&e);
        }
    };

    // The run races against Ctrl-C and, when configured, an overall
    // deadline. Outputs are flushed per row, so either abort path leaves
    // valid partial files behind.
    let run = async {
        tokio::select! {
            result = pipeline.run() => result,
            _ = tokio::signal::ctrl_c() => Err(DinemapError::Interrupted),
        }
    };

    let result = if deadline_secs > 0 {
        match tokio::time::timeout(Duration::from_secs(deadline_secs), run).await {
            Ok(result) => result,
            Err(_) => Err(DinemapError::DeadlineExceeded),
        }
    } else {
        run.await
    };

    match result {
        Ok(summary) => {
            print_summary(&summary);
            if summary.fetch_failures > 0 {
                tracing::warn!(
                    "Run completed with {} failed detail fetches",
                    summary.fetch_failures
                );
                ExitCode::from(4)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            exit_code_for(&e)
        }
    }
}

/// Maps a run error to the process exit status
///
/// 2 = configuration error, 3 = I/O error, 4 = partial completion (deadline
/// or interrupt), 1 = anything else.
fn exit_code_for(error: &DinemapError) -> ExitCode {
    match error {
        DinemapError::Config(_) => ExitCode::from(2),
        DinemapError::Io(_) => ExitCode::from(3),
        DinemapError::DeadlineExceeded | DinemapError::Interrupted => ExitCode::from(4),
        _ => ExitCode::from(1),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("dinemap=info,warn"),
            1 => EnvFilter::new("dinemap=debug,info"),
            2 => EnvFilter::new("dinemap=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &dinemap::Config) {
    println!("=== Dinemap Dry Run ===\n");

    // max-regions treats 0 as unlimited; the page caps only treat
    // negatives that way.
    println!("Depth caps:");
    println!(
        "  Max regions: {}",
        describe_cap(config.crawl.max_regions, 0)
    );
    println!(
        "  Max group pages per region: {}",
        describe_cap(config.crawl.max_group_pages, -1)
    );
    println!(
        "  Max entity pages per group: {}",
        describe_cap(config.crawl.max_entity_pages, -1)
    );

    println!("\nFetch policy:");
    println!("  User agent: {}", config.fetch.user_agent);
    println!("  Parallelism: {}", config.fetch.parallelism);
    println!(
        "  Detail delay: {}ms + up to {}ms jitter",
        config.fetch.detail_delay_ms, config.fetch.detail_jitter_ms
    );
    if config.fetch.allowed_hosts.is_empty() {
        println!("  Allowed hosts: (any)");
    } else {
        println!("  Allowed hosts: {}", config.fetch.allowed_hosts.join(", "));
    }

    println!("\nSite:");
    println!("  Base URL: {}", config.site.base_url);

    println!("\nOutput:");
    println!("  Region audit: {}", config.output.region_audit_path);
    println!("  Group audit: {}", config.output.group_audit_path);
    println!("  Export: {}", config.output.export_path);

    match read_seed_urls(
        std::path::Path::new(&config.input.seed_file),
        config.crawl.max_regions,
    ) {
        Ok(seeds) => {
            println!(
                "\n✓ Would start from {} seed URLs in {}",
                seeds.len(),
                config.input.seed_file
            );
        }
        Err(e) => {
            println!(
                "\n✗ Seed file {} is not readable: {}",
                config.input.seed_file, e
            );
        }
    }
}

fn describe_cap(raw: i64, unlimited_at_or_below: i64) -> String {
    if raw <= unlimited_at_or_below {
        "unlimited".to_string()
    } else {
        raw.to_string()
    }
}

/// Prints the end-of-run counters
fn print_summary(summary: &RunSummary) {
    println!("------------------------");
    println!(
        "Finished at: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("Elapsed time: {:?}", summary.elapsed);
    println!("Regions read: {}", summary.regions_read);
    println!("Groups read: {}", summary.groups_discovered);
    println!("Entities read: {}", summary.entities_discovered);
    println!("Records exported: {}", summary.records_exported);
    println!("Fetch failures: {}", summary.fetch_failures);
    println!("------------------------");
}
