use rand::Rng;
use serde::Serialize;

use super::SourceKind;

/// Title NewsAPI substitutes for retracted articles
pub const REMOVED_TITLE: &str = "[Removed]";

/// Number of bundled placeholder images (`img1.jpg` .. `img6.jpg`)
pub const PLACEHOLDER_IMAGE_COUNT: u32 = 6;

/// A single news article, normalised from one upstream record.
///
/// Articles are only built by the source mappers and are read-only afterwards:
/// fields are private and the builder methods consume `self`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    title: String,
    source: SourceKind,
    image_url: Option<String>,
    url: Option<String>,
    author: Option<String>,
    content: Option<String>,
    description: Option<String>,
    published_at: Option<String>,
}

impl Article {
    /// Returns `None` when the title is blank, so an article without a title
    /// can never be constructed.
    pub fn new(source: SourceKind, title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return None;
        }

        Some(Self {
            title,
            source,
            image_url: None,
            url: None,
            author: None,
            content: None,
            description: None,
            published_at: None,
        })
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = non_empty(image_url);
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = non_empty(url);
        self
    }

    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = non_empty(author);
        self
    }

    pub fn with_content(mut self, content: Option<String>) -> Self {
        self.content = non_empty(content);
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = non_empty(description);
        self
    }

    pub fn with_published_at(mut self, published_at: Option<String>) -> Self {
        self.published_at = non_empty(published_at);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn published_at(&self) -> Option<&str> {
        self.published_at.as_deref()
    }

    /// NewsAPI reports retracted articles with a literal `[Removed]` title
    pub fn is_removed(&self) -> bool {
        self.source == SourceKind::NewsApi && self.title == REMOVED_TITLE
    }
}

/// Pick one of the local placeholder images
pub fn placeholder_image<R: Rng>(rng: &mut R) -> String {
    let n = rng.random_range(1..=PLACEHOLDER_IMAGE_COUNT);
    format!("/assets/img/img{}.jpg", n)
}

/// Upstream APIs send empty strings where they mean "no value"
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
