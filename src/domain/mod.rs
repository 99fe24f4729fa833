pub mod article;
pub mod detail;
pub mod request;
pub mod source;

pub use article::{placeholder_image, Article, REMOVED_TITLE};
pub use detail::ArticleDetail;
pub use request::FetchRequest;
pub use source::SourceKind;
