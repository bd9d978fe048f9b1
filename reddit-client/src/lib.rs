pub mod api;
pub mod auth;

pub use api::{RedditClient, RedditListing, RedditListingChild, RedditListingData, RedditPostData};
pub use auth::AppToken;
