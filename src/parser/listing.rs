use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use super::{trimmed_text, PostSummary, DATE_NOT_FOUND};

static ARTICLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article").unwrap());
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1.entry-title").unwrap());
static TITLE_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static DATE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("time.entry-date").unwrap());

/// Pull every real post out of a listing page. Article fragments without a
/// title link are not posts and are skipped.
pub fn extract_posts(doc: &Html, base: &Url) -> Vec<PostSummary> {
    doc.select(&ARTICLE)
        .filter_map(|article| {
            let link = article.select(&TITLE).next()?.select(&TITLE_LINK).next()?;
            let href = link.value().attr("href")?;
            let url = base.join(href).ok()?;
            let date = article
                .select(&DATE)
                .next()
                .map(trimmed_text)
                .unwrap_or_else(|| DATE_NOT_FOUND.to_string());
            Some(PostSummary {
                title: trimmed_text(link),
                url: url.to_string(),
                date,
            })
        })
        .collect()
}

/// Number of `article` fragments on the page, valid or not.
pub fn count_articles(doc: &Html) -> usize {
    doc.select(&ARTICLE).count()
}
