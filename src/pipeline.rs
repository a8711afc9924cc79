use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use scraper::Html;
use tracing::{info, warn};
use url::Url;

use crate::error::ScrapeError;
use crate::fetch::Fetcher;
use crate::output;
use crate::parser::detail::parse_detail;
use crate::parser::listing::{count_articles, extract_posts};
use crate::parser::{PostRecord, PostSummary};
use crate::settings::Settings;

/// Totals of a run that wrote a CSV.
#[derive(Debug)]
pub struct RunSummary {
    pub posts: usize,
    pub comments: usize,
    pub rows: usize,
    pub path: PathBuf,
}

/// Scrape the blog and write the CSV. Returns `None` when no post
/// survived, in which case nothing is written.
pub async fn run(fetcher: &Fetcher, settings: &Settings) -> Result<Option<RunSummary>> {
    let records = scrape_blog(fetcher, &settings.listing_url).await?;
    if records.is_empty() {
        return Ok(None);
    }

    let rows = output::flatten(&records);
    let path = PathBuf::from(&settings.output);
    output::write_csv(&path, &rows)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(rows = rows.len(), path = %path.display(), "Wrote CSV");

    Ok(Some(RunSummary {
        posts: records.len(),
        comments: records.iter().map(|r| r.comments.len()).sum(),
        rows: rows.len(),
        path,
    }))
}

/// Fetch the listing, then each post in turn. A failing post is logged and
/// left out; a failing listing aborts the run.
pub async fn scrape_blog(fetcher: &Fetcher, listing_url: &str) -> Result<Vec<PostRecord>> {
    let base = Url::parse(listing_url).map_err(ScrapeError::from)?;
    let html = fetcher
        .listing(listing_url)
        .await
        .context("Failed to fetch listing page")?;

    // Html is !Send; keep it out of the fetch loop below.
    let (articles, posts) = {
        let doc = Html::parse_document(&html);
        (count_articles(&doc), extract_posts(&doc, &base))
    };
    println!("Found {} articles", articles);
    info!(articles, posts = posts.len(), url = %listing_url, "Parsed listing");

    let pb = ProgressBar::new(posts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let mut records = Vec::with_capacity(posts.len());
    for summary in posts {
        pb.set_message(summary.title.clone());
        let title = summary.title.clone();
        let url = summary.url.clone();
        match scrape_post(fetcher, summary).await {
            Ok(record) => {
                info!(
                    title = %record.post.title,
                    comments = record.comments.len(),
                    "Processed post"
                );
                records.push(record);
            }
            Err(e) => warn!(%title, %url, error = %e, "Error processing post"),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(records)
}

async fn scrape_post(fetcher: &Fetcher, summary: PostSummary) -> Result<PostRecord, ScrapeError> {
    let html = fetcher.post(&summary.url).await?;
    let detail = parse_detail(&html);
    Ok(PostRecord {
        post: summary.into_post(detail.body_text),
        comments: detail.comments,
    })
}
