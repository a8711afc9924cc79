use std::sync::LazyLock;

use indexmap::IndexSet;
use scraper::{Html, Selector};
use tracing::debug;

use super::{stripped_text, trimmed_text, Comment, Markers};

static CONTAINER: LazyLock<Markers> =
    LazyLock::new(|| Markers::new(&["ol#commentlist", "ol.commentlist"]));
static NODE: LazyLock<Markers> = LazyLock::new(|| Markers::new(&["article.comment", "li.comment"]));
static AUTHOR: LazyLock<Markers> = LazyLock::new(|| Markers::new(&["cite.fn", "span.fn", "b.fn"]));
static TEXT: LazyLock<Markers> =
    LazyLock::new(|| Markers::new(&["div.comment-content", "div.comment-text"]));
static REPLIES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ol.children, ul.children").unwrap());

/// Top-level comments of a post page, deduplicated on (author, text) with
/// the first occurrence kept. Threaded replies nested under a comment are
/// not enumerated, and their markers never stand in for the parent's.
/// A node whose author or text is empty on every marker is dropped.
pub fn extract_comments(doc: &Html) -> Vec<Comment> {
    let Some(container) = CONTAINER.first_in_doc(doc) else {
        return Vec::new();
    };

    let nodes = NODE.children_of(container);
    debug!(nodes = nodes.len(), "Found comments section");

    let candidates = nodes.into_iter().filter_map(|node| {
        let author = AUTHOR.first_text_in(node, &REPLIES, trimmed_text)?;
        let text = TEXT.first_text_in(node, &REPLIES, stripped_text)?;
        Some(Comment { author, text })
    });

    dedup(candidates)
}

/// Insertion-ordered dedup; later duplicates are dropped.
pub fn dedup(comments: impl IntoIterator<Item = Comment>) -> Vec<Comment> {
    let mut seen = IndexSet::new();
    for c in comments {
        if !seen.contains(&c) {
            debug!(author = %c.author, "Found comment");
            seen.insert(c);
        }
    }
    seen.into_iter().collect()
}
