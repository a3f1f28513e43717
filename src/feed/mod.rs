pub mod format;
pub mod loader;
pub mod source;
pub mod types;
pub mod youtube;

pub use loader::load_feed;
pub use source::{FeedError, FeedRequest, VideoSource};
pub use types::{SearchHit, ShortVideo, VideoDetails};
pub use youtube::YouTubeSource;
