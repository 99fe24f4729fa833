use chrono::{DateTime, Utc};
use scraper::Html;

use super::Article;

const MISSING: &str = "N/A";
const UNKNOWN_AUTHOR: &str = "Unknown";

/// Plain-text rendering of everything known about one article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDetail {
    pub title: String,
    pub source: String,
    pub published: String,
    pub author: String,
    pub description: String,
    pub content: String,
    pub url: String,
    pub image: String,
}

impl ArticleDetail {
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: article.title().to_string(),
            source: article.source().to_string(),
            published: article
                .published_at()
                .map(format_published)
                .unwrap_or_else(|| MISSING.to_string()),
            author: article.author().unwrap_or(UNKNOWN_AUTHOR).to_string(),
            description: article
                .description()
                .map(html_to_text)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| MISSING.to_string()),
            content: article
                .content()
                .map(html_to_text)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| MISSING.to_string()),
            url: or_missing(article.url()),
            image: or_missing(article.image_url()),
        }
    }

    pub fn format(&self) -> String {
        format!(
            "{}\n\
             Source: {}\n\
             Published At: {}\n\
             Author: {}\n\
             Description: {}\n\
             Content: {}\n\
             Read more: {}\n\
             Image: {}",
            self.title,
            self.source,
            self.published,
            self.author,
            self.description,
            self.content,
            self.url,
            self.image
        )
    }
}

fn or_missing(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}

/// RFC 3339 timestamps are shown as `YYYY-MM-DD HH:MM UTC`; anything else verbatim
fn format_published(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Extract plain text from HTML content, preserving word boundaries
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_fragment(html);
    let mut text = String::new();

    for node in document.root_element().descendants() {
        if let Some(text_node) = node.value().as_text() {
            text.push_str(text_node);
        }
        if let Some(element) = node.value().as_element() {
            match element.name() {
                "p" | "br" | "div" | "li" | "h2" | "h3" => text.push(' '),
                _ => {}
            }
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
