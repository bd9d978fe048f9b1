use crate::error::CoreError;
use crate::types::{Notification, Post};

/// Read-only feed of a source's newest posts, newest first. The order is
/// whatever the source provides; callers do not re-sort.
#[allow(async_fn_in_trait)]
pub trait PostSource {
    async fn recent_posts(&self, subreddit: &str, limit: u32) -> Result<Vec<Post>, CoreError>;
}

/// Fire-and-forget sink for formatted notifications.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn notify(&self, notification: &Notification) -> Result<(), CoreError>;
}
