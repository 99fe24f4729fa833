pub mod aggregator;
pub mod feed_controller;

pub use aggregator::{Aggregator, ArticleProvider, PAGE_SIZE};
pub use feed_controller::{FeedController, FeedState, FetchTicket, ViewStatus};
