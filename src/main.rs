mod config;
mod crawler;
mod error;
mod storage;

use std::path::Path;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use crawler::models::{PaymentType, SearchQuery};
use crawler::service::ScrapingService;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Scrapes Immowelt search results into a CSV dataset"
)]
struct Args {
    /// City to search, e.g. "koeln" or "München"
    #[arg(short, long)]
    city: String,

    /// Search listings for sale (kaufen) or for rent (mieten)
    #[arg(short, long, value_enum)]
    payment_type: PaymentType,

    /// Cap on the number of result pages to scrape
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    num_pages: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Bad input aborts here, before any network activity.
    let query = SearchQuery::new(&args.city, args.payment_type, args.num_pages)?;
    let cfg = Config::from_env()?;

    let output = query.output_filename();

    let mut service = ScrapingService::new(cfg, query).await;
    service.run().await;

    storage::csv::export_table(service.table(), Path::new(&output))?;
    info!(rows = service.table().rows(), file = %output, "Export complete");

    Ok(())
}
