use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{comments, stripped_text, Comment, CONTENT_NOT_FOUND};

static ENTRY_CONTENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.entry-content").unwrap());

/// Everything taken from a single post page.
#[derive(Debug, Clone)]
pub struct Detail {
    pub body_text: String,
    pub comments: Vec<Comment>,
}

pub fn parse_detail(html: &str) -> Detail {
    let doc = Html::parse_document(html);
    Detail {
        body_text: extract_body(&doc),
        comments: comments::extract_comments(&doc),
    }
}

pub fn extract_body(doc: &Html) -> String {
    doc.select(&ENTRY_CONTENT)
        .next()
        .map(stripped_text)
        .unwrap_or_else(|| CONTENT_NOT_FOUND.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fixture;

    #[test]
    fn body_text_is_stripped_and_joined() {
        let d = parse_detail(&fixture("post_a"));
        assert_eq!(d.body_text, "First paragraph.Second paragraph.");
    }

    #[test]
    fn missing_body_uses_sentinel() {
        let d = parse_detail("");
        assert_eq!(d.body_text, CONTENT_NOT_FOUND);
        assert!(d.comments.is_empty());
    }
}
