pub mod guardian;
pub mod http;
pub mod newsapi;
pub mod nytimes;
pub mod registry;
pub mod traits;

pub use http::HttpSource;
pub use registry::SourceRegistry;
pub use traits::{fetch_or_empty, NewsSource, ResponseMapper};
