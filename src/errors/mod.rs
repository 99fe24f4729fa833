use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid environment variable {name}: {reason}")]
    InvalidEnvVar { name: String, reason: String },

    // Source errors
    #[error("No news sources available for: {0}")]
    NoSourcesAvailable(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{source_name} responded with status {status}")]
    UpstreamStatus { source_name: String, status: u16 },

    // Parsing errors
    #[error("Response parsing failed: {0}")]
    Parse(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type NewsResult<T> = Result<T, NewsError>;
