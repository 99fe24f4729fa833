use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::domain::{Article, SourceKind};
use crate::errors::{NewsError, NewsResult};
use crate::sources::traits::{NewsSource, ResponseMapper};

const USER_AGENT: &str = concat!("newshub/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by all sources
pub fn build_client(timeout: Duration) -> NewsResult<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// A news source reached with a single HTTP GET per search.
pub struct HttpSource<M> {
    client: Client,
    endpoint: Url,
    api_key: String,
    _mapper: PhantomData<fn() -> M>,
}

impl<M: ResponseMapper> HttpSource<M> {
    pub fn new(client: Client, endpoint: Url, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint,
            api_key: api_key.into(),
            _mapper: PhantomData,
        }
    }

    fn decode(body: &[u8]) -> NewsResult<Vec<Article>> {
        let response: M::Response = serde_json::from_slice(body)?;
        Ok(M::map_response(response, &mut rand::rng()))
    }
}

#[async_trait]
impl<M: ResponseMapper> NewsSource for HttpSource<M> {
    fn kind(&self) -> SourceKind {
        M::KIND
    }

    async fn fetch_articles(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> NewsResult<Vec<Article>> {
        let params = M::query_params(query, page, page_size, &self.api_key);

        debug!(source = %M::KIND, query, page, "requesting articles");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::UpstreamStatus {
                source_name: M::KIND.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let articles = Self::decode(&body)?;

        debug!(source = %M::KIND, count = articles.len(), "mapped articles");

        Ok(articles)
    }
}
