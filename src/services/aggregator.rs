use async_trait::async_trait;
use futures::future::join_all;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::domain::{Article, FetchRequest};
use crate::errors::{NewsError, NewsResult};
use crate::sources::{fetch_or_empty, NewsSource, SourceRegistry};

/// Articles per page, for every source and for the feed
pub const PAGE_SIZE: u32 = 10;

/// Anything that can produce one batch of articles for a request
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleProvider: Send + Sync {
    async fn fetch_page(&self, request: &FetchRequest) -> NewsResult<Vec<Article>>;
}

/// Fans a request out to the selected sources and merges what comes back.
pub struct Aggregator {
    registry: SourceRegistry,
    page_size: u32,
}

impl Aggregator {
    pub fn new(registry: SourceRegistry) -> Self {
        Self {
            registry,
            page_size: PAGE_SIZE,
        }
    }

    /// Merged, filtered and shuffled articles for one request.
    ///
    /// Fails only when none of the requested sources is registered; a source
    /// that errors contributes nothing instead.
    pub async fn aggregate(&self, request: &FetchRequest) -> NewsResult<Vec<Article>> {
        let mut articles = self.collect(request).await?;
        articles.shuffle(&mut rand::rng());
        Ok(articles)
    }

    /// Everything [`Aggregator::aggregate`] returns, in call order
    pub async fn collect(&self, request: &FetchRequest) -> NewsResult<Vec<Article>> {
        let selected: Vec<&dyn NewsSource> = request
            .effective_sources()
            .into_iter()
            .filter_map(|kind| self.registry.find(kind))
            .collect();

        if selected.is_empty() {
            let wanted: Vec<String> = request
                .effective_sources()
                .iter()
                .map(|k| k.to_string())
                .collect();
            return Err(NewsError::NoSourcesAvailable(wanted.join(", ")));
        }

        let futures = selected
            .iter()
            .map(|source| fetch_or_empty(*source, &request.query, request.page, self.page_size));

        let batches = join_all(futures).await;

        for (source, batch) in selected.iter().zip(&batches) {
            debug!(source = %source.kind(), count = batch.len(), "source settled");
        }

        let articles = merge_batches(batches);

        info!(
            query = %request.query,
            page = request.page,
            sources = selected.len(),
            count = articles.len(),
            "aggregated articles"
        );

        Ok(articles)
    }
}

#[async_trait]
impl ArticleProvider for Aggregator {
    async fn fetch_page(&self, request: &FetchRequest) -> NewsResult<Vec<Article>> {
        self.aggregate(request).await
    }
}

/// Concatenate batches in order and drop retracted NewsAPI articles
pub fn merge_batches(batches: Vec<Vec<Article>>) -> Vec<Article> {
    batches
        .into_iter()
        .flatten()
        .filter(|article| !article.is_removed())
        .collect()
}
