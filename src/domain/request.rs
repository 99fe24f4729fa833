use std::collections::BTreeSet;

use crate::errors::{NewsError, NewsResult};

use super::SourceKind;

/// Parameters for one aggregation round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub query: String,
    pub page: u32,
    pub sources: BTreeSet<SourceKind>,
}

impl FetchRequest {
    /// Pages are 1-based; page 0 is rejected.
    pub fn new(
        query: impl Into<String>,
        page: u32,
        sources: impl IntoIterator<Item = SourceKind>,
    ) -> NewsResult<Self> {
        if page == 0 {
            return Err(NewsError::InvalidInput("page must be at least 1".to_string()));
        }

        Ok(Self {
            query: query.into(),
            page,
            sources: sources.into_iter().collect(),
        })
    }

    /// Sources to fan out to. An empty selection means every source.
    pub fn effective_sources(&self) -> Vec<SourceKind> {
        if self.sources.is_empty() {
            return SourceKind::ALL.to_vec();
        }

        SourceKind::ALL
            .into_iter()
            .filter(|kind| self.sources.contains(kind))
            .collect()
    }
}
