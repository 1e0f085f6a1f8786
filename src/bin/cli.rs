//! doccrawl CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use doccrawl::{
    error::{AppError, Result},
    models::{Config, Identifier, SiteKind},
    pipeline,
    utils::http::HttpFetcher,
};

/// doccrawl - Documentation Site Crawler
#[derive(Parser, Debug)]
#[command(
    name = "doccrawl",
    version,
    about = "Crawls a documentation site and saves every page as Markdown"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "doccrawl.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl every same-site page reachable from ROOT_URL
    Crawl {
        /// Root URL of the documentation site
        root_url: String,

        /// Output directory (overrides `output.dir`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Site generator (overrides `site.generator`)
        #[arg(short, long, value_enum)]
        generator: Option<SiteKind>,

        /// Pages fetched concurrently (overrides `crawler.max_concurrent`)
        #[arg(long)]
        concurrency: Option<usize>,

        /// Do not write crawl-report.json
        #[arg(long)]
        no_report: bool,
    },

    /// Fetch a single page and print its detected generator
    Detect {
        /// Page URL
        url: String,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Crawl {
            root_url,
            output,
            generator,
            concurrency,
            no_report,
        } => {
            if let Some(dir) = output {
                config.output.dir = dir;
            }
            if let Some(kind) = generator {
                config.site.generator = kind;
            }
            if let Some(n) = concurrency {
                config.crawler.max_concurrent = n;
            }
            if no_report {
                config.output.write_report = false;
            }

            let report = pipeline::run_crawler(&config, &root_url).await?;

            if !report.success {
                for failure in &report.page_failures {
                    log::error!("{} ({:?}): {}", failure.url, failure.stage, failure.message);
                }
                return Err(AppError::Incomplete {
                    failed: report.page_failures.len(),
                });
            }

            log::info!("Crawl complete!");
        }

        Command::Detect { url } => {
            let identifier = Identifier::parse(&url)?;
            let fetcher = HttpFetcher::new(&config.crawler)?;

            match pipeline::detect_generator(&fetcher, &identifier).await? {
                Some(kind) => println!("{kind:?}"),
                None => {
                    log::warn!("No known generator markers found on {identifier}");
                    println!("unknown");
                }
            }
        }

        Command::Validate => {
            log::info!("Validating {}...", cli.config.display());

            let config = Config::load(&cli.config)?;
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }

            log::info!("✓ Config OK");
        }
    }

    Ok(())
}
