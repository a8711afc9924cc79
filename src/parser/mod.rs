pub mod comments;
pub mod detail;
pub mod listing;

use scraper::{ElementRef, Html, Selector};

pub const DATE_NOT_FOUND: &str = "Date not found";
pub const CONTENT_NOT_FOUND: &str = "Content not found";

/// A post as it appears on the listing page, before its own page is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub title: String,
    pub url: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub title: String,
    pub url: String,
    pub date: String,
    pub body_text: String,
}

/// Identity is the (author, text) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comment {
    pub author: String,
    pub text: String,
}

/// A post together with its deduplicated comments, in page order.
#[derive(Debug, Clone)]
pub struct PostRecord {
    pub post: Post,
    pub comments: Vec<Comment>,
}

impl PostSummary {
    pub fn into_post(self, body_text: String) -> Post {
        Post {
            title: self.title,
            url: self.url,
            date: self.date,
            body_text,
        }
    }
}

/// Ordered list of alternative selectors. The first selector that matches
/// anything wins, regardless of where the other selectors would match.
pub struct Markers(Vec<Selector>);

impl Markers {
    pub fn new(selectors: &[&str]) -> Self {
        Markers(
            selectors
                .iter()
                .map(|s| Selector::parse(s).expect("static selector"))
                .collect(),
        )
    }

    /// Text of the first descendant of `scope` matching the highest-priority
    /// marker. Matches inside an `excluded` subtree, and matches whose text
    /// is empty, do not count.
    pub fn first_text_in(
        &self,
        scope: ElementRef<'_>,
        excluded: &Selector,
        text: fn(ElementRef<'_>) -> String,
    ) -> Option<String> {
        self.0.iter().find_map(|sel| {
            scope
                .select(sel)
                .filter(|el| !within(*el, scope, excluded))
                .map(text)
                .find(|t| !t.is_empty())
        })
    }

    pub fn first_in_doc<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>> {
        self.0.iter().find_map(|sel| doc.select(sel).next())
    }

    /// Direct element children of `parent` matching the highest-priority
    /// marker that matches at least one child.
    pub fn children_of<'a>(&self, parent: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        for sel in &self.0 {
            let found: Vec<_> = parent
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|child| sel.matches(child))
                .collect();
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }
}

/// Whether `el` sits below an element matching `excluded`, stopping at `scope`.
fn within(el: ElementRef<'_>, scope: ElementRef<'_>, excluded: &Selector) -> bool {
    el.ancestors()
        .take_while(|node| node.id() != scope.id())
        .filter_map(ElementRef::wrap)
        .any(|ancestor| excluded.matches(&ancestor))
}

/// Full text of an element, trimmed at both ends.
pub fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Every text fragment trimmed, empty fragments dropped, joined without a separator.
pub fn stripped_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
pub(crate) fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
}
