use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::ScrapeError;
use crate::parser::PostRecord;

/// One CSV row: a post joined with at most one of its comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    #[serde(rename = "Post Title")]
    pub title: String,
    #[serde(rename = "Post Date")]
    pub date: String,
    #[serde(rename = "Post URL")]
    pub url: String,
    #[serde(rename = "Post Text")]
    pub post_text: String,
    #[serde(rename = "Comment Author")]
    pub comment_author: String,
    #[serde(rename = "Comment Text")]
    pub comment_text: String,
}

/// N comments give N rows; no comments gives a single row with empty
/// comment fields.
pub fn flatten(records: &[PostRecord]) -> Vec<OutputRow> {
    let mut rows = Vec::new();
    for record in records {
        let p = &record.post;
        let row = |author: &str, text: &str| OutputRow {
            title: p.title.clone(),
            date: p.date.clone(),
            url: p.url.clone(),
            post_text: p.body_text.clone(),
            comment_author: author.to_string(),
            comment_text: text.to_string(),
        };
        if record.comments.is_empty() {
            rows.push(row("", ""));
        } else {
            rows.extend(record.comments.iter().map(|c| row(&c.author, &c.text)));
        }
    }
    rows
}

/// Write rows to `path`, replacing any existing file.
pub fn write_csv(path: &Path, rows: &[OutputRow]) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Comment, Post};

    fn record(title: &str, comments: &[(&str, &str)]) -> PostRecord {
        PostRecord {
            post: Post {
                title: title.into(),
                url: format!("https://blog.example.com/{}/", title.to_lowercase()),
                date: "January 5, 2024".into(),
                body_text: "Body".into(),
            },
            comments: comments
                .iter()
                .map(|(a, t)| Comment {
                    author: a.to_string(),
                    text: t.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn post_without_comments_yields_one_row() {
        let rows = flatten(&[record("A", &[])]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].comment_author, "");
        assert_eq!(rows[0].comment_text, "");
    }

    #[test]
    fn post_with_comments_yields_one_row_each() {
        let rows = flatten(&[record("A", &[("X", "hi"), ("Y", "yo")]), record("B", &[])]);
        assert_eq!(rows.len(), 3);
        assert!(rows[..2].iter().all(|r| r.title == "A" && r.post_text == "Body"));
        assert_eq!(rows[1].comment_author, "Y");
        assert_eq!(rows[2].title, "B");
    }

    #[test]
    fn csv_has_fixed_headers_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("posts.csv");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale content that must disappear\n".repeat(10)).unwrap();

        let rows = flatten(&[record("A", &[("X", "hi, there")])]);
        write_csv(&path, &rows).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("Post Title,Post Date,Post URL,Post Text,Comment Author,Comment Text")
        );
        assert_eq!(
            lines.next(),
            Some(r#"A,"January 5, 2024",https://blog.example.com/a/,Body,X,"hi, there""#)
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn csv_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/posts.csv");
        write_csv(&path, &flatten(&[record("A", &[])])).unwrap();
        assert!(path.exists());
    }
}
