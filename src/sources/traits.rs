use async_trait::async_trait;
use rand::Rng;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::{Article, SourceKind};
use crate::errors::NewsResult;

/// One upstream news search API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Identifies this source
    fn kind(&self) -> SourceKind;

    /// Search the upstream API for one page of articles
    async fn fetch_articles(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> NewsResult<Vec<Article>>;
}

/// Source-specific request and payload knowledge.
///
/// Each upstream API gets one mapper; the HTTP plumbing around it is shared.
pub trait ResponseMapper: Send + Sync + 'static {
    /// Raw response body shape
    type Response: DeserializeOwned;

    const KIND: SourceKind;

    /// Query string for one search request
    fn query_params(query: &str, page: u32, page_size: u32, api_key: &str) -> Vec<(&'static str, String)>;

    /// Normalise every usable record; records without a title are dropped
    fn map_response<R: Rng>(response: Self::Response, rng: &mut R) -> Vec<Article>;
}

/// Fetch from a source, degrading any failure to an empty result.
///
/// One source failing must never block or fail the others, so errors are
/// logged here and never returned.
pub async fn fetch_or_empty(
    source: &dyn NewsSource,
    query: &str,
    page: u32,
    page_size: u32,
) -> Vec<Article> {
    match source.fetch_articles(query, page, page_size).await {
        Ok(articles) => articles,
        Err(e) => {
            warn!(source = %source.kind(), error = %e, "fetch failed, returning no articles");
            Vec::new()
        }
    }
}
