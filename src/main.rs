mod error;
mod explore;
mod fetch;
mod output;
mod parser;
mod pipeline;
mod settings;

use std::time::Instant;

use clap::{Parser, Subcommand};

use fetch::Fetcher;
use settings::Settings;

#[derive(Parser)]
#[command(name = "blog_scraper", about = "WordPress blog post and comment scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape posts and their comments into a CSV file
    Run {
        /// Listing page URL (default: BLOG_SCRAPER_LISTING_URL or the built-in blog)
        #[arg(short, long)]
        url: Option<String>,
        /// Output CSV path, overwritten on each run
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the structure of the listing page
    Explore {
        #[arg(short, long)]
        url: Option<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { url, output } => {
            let settings = Settings::load()?.with_overrides(url, output);
            let fetcher = Fetcher::new(&settings)?;
            match pipeline::run(&fetcher, &settings).await? {
                Some(summary) => {
                    println!("\nData saved to {}", summary.path.display());
                    println!("Total posts processed: {}", summary.posts);
                    println!("Total comments captured: {}", summary.comments);
                    println!("Rows written: {}", summary.rows);
                }
                None => println!("No data found to save"),
            }
            Ok(())
        }
        Commands::Explore { url, json } => {
            let settings = Settings::load()?.with_overrides(url, None);
            let fetcher = Fetcher::new(&settings)?;
            let html = fetcher.listing(&settings.listing_url).await?;
            let report = explore::explore(&html);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report.print();
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
