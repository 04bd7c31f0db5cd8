pub mod demo_feed;
pub mod indexer;

pub use demo_feed::{DemoCaptureFeed, DemoFeedConfig};
pub use indexer::{CaptureIndexer, SharedCaptureLedger};
