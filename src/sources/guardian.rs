use rand::Rng;
use serde::Deserialize;

use crate::domain::{placeholder_image, Article, SourceKind};
use crate::sources::http::HttpSource;
use crate::sources::traits::ResponseMapper;

pub const SHOW_FIELDS: &str = "headline,thumbnail,body,short-url,description";

pub type GuardianSource = HttpSource<GuardianMapper>;

#[derive(Debug, Deserialize)]
pub struct GuardianEnvelope {
    pub response: GuardianResponse,
}

#[derive(Debug, Deserialize)]
pub struct GuardianResponse {
    pub results: Vec<GuardianResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianResult {
    pub web_title: Option<String>,
    pub web_url: Option<String>,
    pub web_publication_date: Option<String>,
    pub byline: Option<String>,
    pub fields: Option<GuardianFields>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GuardianFields {
    pub thumbnail: Option<String>,
    pub body: Option<String>,
    pub description: Option<String>,
    pub byline: Option<String>,
}

pub struct GuardianMapper;

impl ResponseMapper for GuardianMapper {
    type Response = GuardianEnvelope;

    const KIND: SourceKind = SourceKind::Guardian;

    // The Guardian has a fixed page size, so `page_size` is not forwarded
    fn query_params(query: &str, page: u32, _page_size: u32, api_key: &str) -> Vec<(&'static str, String)> {
        vec![
            ("q", query.to_string()),
            ("page", page.to_string()),
            ("api-key", api_key.to_string()),
            ("show-fields", SHOW_FIELDS.to_string()),
        ]
    }

    fn map_response<R: Rng>(envelope: GuardianEnvelope, rng: &mut R) -> Vec<Article> {
        envelope
            .response
            .results
            .into_iter()
            .filter_map(|raw| {
                let article = Article::new(SourceKind::Guardian, raw.web_title?)?;
                let fields = raw.fields.unwrap_or_default();
                let image = fields
                    .thumbnail
                    .filter(|u| !u.is_empty())
                    .unwrap_or_else(|| placeholder_image(&mut *rng));

                Some(
                    article
                        .with_image_url(Some(image))
                        .with_url(raw.web_url)
                        .with_author(raw.byline.or(fields.byline))
                        .with_content(fields.body)
                        .with_description(fields.description)
                        .with_published_at(raw.web_publication_date),
                )
            })
            .collect()
    }
}
