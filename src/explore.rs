use std::collections::BTreeSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Serialize;

use crate::parser::listing::count_articles;

static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static ARTICLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article").unwrap());
static CLASSED: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[class]").unwrap());
static ANY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("*").unwrap());

/// Structure overview of a listing page, used to pick selectors by hand.
#[derive(Debug, Serialize)]
pub struct ExploreReport {
    pub title: Option<String>,
    pub article_count: usize,
    pub first_article_classes: Vec<ClassedElement>,
    pub unique_tags: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ClassedElement {
    pub tag: String,
    pub classes: Vec<String>,
}

pub fn explore(html: &str) -> ExploreReport {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&TITLE)
        .next()
        .map(|t| t.text().collect::<String>());

    let first_article_classes = doc
        .select(&ARTICLE)
        .next()
        .map(|article| {
            article
                .select(&CLASSED)
                .map(|el| ClassedElement {
                    tag: el.value().name().to_string(),
                    classes: el.value().classes().map(str::to_string).collect(),
                })
                .collect()
        })
        .unwrap_or_default();

    let unique_tags: BTreeSet<String> = doc
        .select(&ANY)
        .map(|el| el.value().name().to_string())
        .collect();

    ExploreReport {
        title,
        article_count: count_articles(&doc),
        first_article_classes,
        unique_tags: unique_tags.into_iter().collect(),
    }
}

impl ExploreReport {
    pub fn print(&self) {
        println!("Page title: {}", self.title.as_deref().unwrap_or("No title found"));
        println!("Articles found: {}", self.article_count);
        if !self.first_article_classes.is_empty() {
            println!("\nClasses in the first article:");
            for el in &self.first_article_classes {
                println!("  {:<10} {}", el.tag, el.classes.join(" "));
            }
        }
        println!("\nUnique tags ({}):", self.unique_tags.len());
        println!("  {}", self.unique_tags.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fixture;

    #[test]
    fn listing_report() {
        let r = explore(&fixture("listing"));
        assert_eq!(r.title.as_deref(), Some("Dean's Blog | Notes from the dean's office"));
        assert_eq!(r.article_count, 4);
        assert!(r.unique_tags.contains(&"article".to_string()));
        assert!(r.unique_tags.contains(&"time".to_string()));
        assert!(r.unique_tags.windows(2).all(|w| w[0] < w[1]));
        assert!(r.first_article_classes.contains(&ClassedElement {
            tag: "h1".into(),
            classes: vec!["entry-title".into()],
        }));
    }

    #[test]
    fn empty_page() {
        let r = explore("");
        assert_eq!(r.title, None);
        assert_eq!(r.article_count, 0);
        assert!(r.first_article_classes.is_empty());
    }
}
