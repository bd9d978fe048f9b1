use chrono::{DateTime, Utc};

/// A post fetched from a source. Transient: fetched fresh each cycle,
/// never stored or compared across cycles.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: String,
    pub subreddit: String,
    pub title: String,
    pub body: String,
    pub url: String,
    pub score: i64,
    pub num_comments: u64,
    pub created_at: DateTime<Utc>,
}

/// Formatted outbound message for one matching post. One send attempt,
/// no identity beyond it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subreddit: String,
    pub title: String,
    pub url: String,
    pub score: i64,
    pub num_comments: u64,
}

impl Notification {
    pub fn from_post(post: &Post) -> Self {
        Self {
            subreddit: post.subreddit.clone(),
            title: post.title.clone(),
            url: post.url.clone(),
            score: post.score,
            num_comments: post.num_comments,
        }
    }

    /// Render the message body sent to the channel.
    pub fn render(&self) -> String {
        format!(
            "*New Reddit Post*\n\
             *Subreddit:* r/{}\n\
             *Title:* {}\n\
             *Link:* {}\n\
             *Score:* {} | *Comments:* {}",
            self.subreddit, self.title, self.url, self.score, self.num_comments
        )
    }
}
