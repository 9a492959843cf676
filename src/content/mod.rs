//! Content sources outside the tenant: the news feed, the canned assistant
//! replies, and the public image repository.

pub mod digest;
pub mod images;
pub mod news;

pub use digest::{compose_body, pick_assistant_message};
pub use images::{ImageCandidate, ImageRepository};
pub use news::NewsFeed;
