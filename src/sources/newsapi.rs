use rand::Rng;
use serde::Deserialize;

use crate::domain::{placeholder_image, Article, SourceKind};
use crate::sources::http::HttpSource;
use crate::sources::traits::ResponseMapper;

/// NewsAPI refuses a search with an empty `q` unless another selector is
/// present, so the request is always restricted to these outlets.
pub const SOURCE_ALLOW_LIST: &str = "cnn,bbc-news";

pub type NewsApiSource = HttpSource<NewsApiMapper>;

#[derive(Debug, Deserialize)]
pub struct NewsApiResponse {
    pub articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiArticle {
    pub title: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
}

pub struct NewsApiMapper;

impl ResponseMapper for NewsApiMapper {
    type Response = NewsApiResponse;

    const KIND: SourceKind = SourceKind::NewsApi;

    fn query_params(query: &str, page: u32, page_size: u32, api_key: &str) -> Vec<(&'static str, String)> {
        vec![
            ("q", query.to_string()),
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
            ("apiKey", api_key.to_string()),
            ("sources", SOURCE_ALLOW_LIST.to_string()),
        ]
    }

    fn map_response<R: Rng>(response: NewsApiResponse, rng: &mut R) -> Vec<Article> {
        response
            .articles
            .into_iter()
            .filter_map(|raw| {
                let article = Article::new(SourceKind::NewsApi, raw.title?)?;
                let image = raw
                    .url_to_image
                    .filter(|u| !u.is_empty())
                    .unwrap_or_else(|| placeholder_image(&mut *rng));

                Some(
                    article
                        .with_image_url(Some(image))
                        .with_url(raw.url)
                        .with_author(raw.author)
                        .with_content(raw.content)
                        .with_description(raw.description)
                        .with_published_at(raw.published_at),
                )
            })
            .collect()
    }
}
