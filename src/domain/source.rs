use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceKind {
    #[serde(rename = "NewsAPI")]
    NewsApi,
    #[serde(rename = "Guardian")]
    Guardian,
    #[serde(rename = "NYTimes")]
    NyTimes,
}

impl SourceKind {
    /// All sources, in fan-out order
    pub const ALL: [SourceKind; 3] = [SourceKind::NewsApi, SourceKind::Guardian, SourceKind::NyTimes];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::NewsApi => "NewsAPI",
            SourceKind::Guardian => "Guardian",
            SourceKind::NyTimes => "NYTimes",
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newsapi" | "news-api" => Ok(SourceKind::NewsApi),
            "guardian" | "the-guardian" => Ok(SourceKind::Guardian),
            "nytimes" | "nyt" => Ok(SourceKind::NyTimes),
            _ => Err(format!("Unknown source: {}", s)),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
