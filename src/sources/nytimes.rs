use rand::Rng;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{placeholder_image, Article, SourceKind};
use crate::sources::http::HttpSource;
use crate::sources::traits::ResponseMapper;

/// Multimedia URLs in search results are relative to this host
pub const IMAGE_HOST: &str = "https://www.nytimes.com/";

pub type NyTimesSource = HttpSource<NyTimesMapper>;

#[derive(Debug, Deserialize)]
pub struct NyTimesEnvelope {
    pub response: NyTimesResponse,
}

#[derive(Debug, Deserialize)]
pub struct NyTimesResponse {
    pub docs: Vec<NyTimesDoc>,
}

#[derive(Debug, Deserialize)]
pub struct NyTimesDoc {
    pub headline: Option<NyTimesHeadline>,
    /// An array in the classic API, an object in newer responses
    #[serde(default)]
    pub multimedia: Value,
    pub web_url: Option<String>,
    pub byline: Option<NyTimesByline>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    pub snippet: Option<String>,
    pub pub_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NyTimesHeadline {
    pub main: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NyTimesByline {
    pub original: Option<String>,
}

impl NyTimesDoc {
    /// First multimedia entry's URL, when multimedia is a non-empty array
    fn first_image(&self) -> Option<String> {
        let path = self.multimedia.as_array()?.first()?.get("url")?.as_str()?;
        Some(format!("{}{}", IMAGE_HOST, path))
    }
}

pub struct NyTimesMapper;

impl ResponseMapper for NyTimesMapper {
    type Response = NyTimesEnvelope;

    const KIND: SourceKind = SourceKind::NyTimes;

    // Article search pages are fixed at ten results
    fn query_params(query: &str, page: u32, _page_size: u32, api_key: &str) -> Vec<(&'static str, String)> {
        vec![
            ("q", query.to_string()),
            ("page", page.to_string()),
            ("api-key", api_key.to_string()),
        ]
    }

    fn map_response<R: Rng>(envelope: NyTimesEnvelope, rng: &mut R) -> Vec<Article> {
        envelope
            .response
            .docs
            .into_iter()
            .filter_map(|doc| {
                let image = doc.first_image().unwrap_or_else(|| placeholder_image(&mut *rng));
                let title = doc.headline.and_then(|h| h.main)?;
                let article = Article::new(SourceKind::NyTimes, title)?;

                Some(
                    article
                        .with_image_url(Some(image))
                        .with_url(doc.web_url)
                        .with_author(doc.byline.and_then(|b| b.original))
                        .with_content(doc.summary)
                        .with_description(doc.snippet)
                        .with_published_at(doc.pub_date),
                )
            })
            .collect()
    }
}
