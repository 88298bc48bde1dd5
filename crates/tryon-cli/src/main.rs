//! Developer CLI: run the detector against a live URL or a saved page.

mod fetch;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tryon_core::SiteCatalog;
use tryon_detector::{Detector, PageSnapshot};

#[derive(Debug, Parser)]
#[command(name = "tryon")]
#[command(about = "Detect clothing products on storefront pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run detection and print the result as JSON.
    Detect {
        /// Page URL to fetch and scan.
        #[arg(long, conflicts_with = "file")]
        url: Option<String>,
        /// Saved HTML file to scan instead of fetching.
        #[arg(long, requires = "page_url")]
        file: Option<PathBuf>,
        /// Page URL the saved file was captured from.
        #[arg(long)]
        page_url: Option<String>,
        /// Also report which cascade strategy produced the result.
        #[arg(long)]
        strategy: bool,
    },
    /// List the domains in the effective site-profile catalog.
    Sites,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = tryon_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .init();

    let catalog = match &config.sites_path {
        Some(path) => SiteCatalog::with_overlay(path)?,
        None => SiteCatalog::builtin(),
    };

    let cli = Cli::parse();
    match cli.command {
        Commands::Detect {
            url,
            file,
            page_url,
            strategy,
        } => {
            let (html, page_url) = match (url, file) {
                (Some(url), None) => {
                    let client = reqwest::Client::builder()
                        .timeout(std::time::Duration::from_secs(config.fetch_timeout_secs))
                        .build()?;
                    let html =
                        fetch::fetch_page(&client, &url, &config.fetch_user_agent).await?;
                    (html, url)
                }
                (None, Some(path)) => {
                    let page_url = page_url
                        .ok_or_else(|| anyhow::anyhow!("--page-url is required with --file"))?;
                    (std::fs::read_to_string(&path)?, page_url)
                }
                _ => anyhow::bail!("exactly one of --url or --file is required"),
            };

            let output = run_detect(&catalog, &html, &page_url, strategy)?;
            println!("{output}");
        }
        Commands::Sites => {
            for profile in catalog.profiles() {
                println!("{}", profile.domain);
            }
        }
    }

    Ok(())
}

/// Run one detection pass and render it as pretty JSON. An empty result is
/// the normal no-product outcome, not an error.
fn run_detect(
    catalog: &SiteCatalog,
    html: &str,
    page_url: &str,
    with_strategy: bool,
) -> anyhow::Result<String> {
    let page = PageSnapshot::parse(html, page_url)?;
    let detector = Detector::new(catalog.clone());

    let output = if with_strategy {
        match detector.detect_with_strategy(&page) {
            Some((product, strategy)) => serde_json::to_string_pretty(&serde_json::json!({
                "strategy": strategy.to_string(),
                "products": [product],
            }))?,
            None => serde_json::to_string_pretty(&serde_json::json!({
                "strategy": null,
                "products": [],
            }))?,
        }
    } else {
        serde_json::to_string_pretty(&detector.detect(&page))?
    };

    Ok(output)
}
