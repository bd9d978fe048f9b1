use crate::auth::{self, AppToken};
use chrono::{DateTime, TimeZone, Utc};
use oauth2::basic::BasicClient;
use postwatch_core::{CoreError, Post, PostSource, RedditConfig, SourceFetchError};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info};
use url::Url;

const REDDIT_API_BASE: &str = "https://oauth.reddit.com/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

/// The subset of a listing entry this system consumes. Link posts carry no
/// `selftext`, hence the default.
#[derive(Debug, Clone, Deserialize)]
pub struct RedditPostData {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    pub subreddit: String,
    pub url: String,
    pub created_utc: f64,
    pub score: i64,
    pub num_comments: u64,
}

impl From<RedditPostData> for Post {
    fn from(data: RedditPostData) -> Self {
        let created_at: DateTime<Utc> = Utc
            .timestamp_opt(data.created_utc as i64, 0)
            .single()
            .unwrap_or_else(Utc::now);

        Self {
            id: data.id,
            subreddit: data.subreddit,
            title: data.title,
            body: data.selftext,
            url: data.url,
            score: data.score,
            num_comments: data.num_comments,
            created_at,
        }
    }
}

/// Read-only Reddit client over the app-only grant. Holds a cached bearer
/// token behind a mutex; the loop calls sequentially, so the lock is never
/// contended in practice.
#[derive(Debug)]
pub struct RedditClient {
    http_client: Client,
    oauth: BasicClient,
    api_base: Url,
    token: Mutex<Option<AppToken>>,
}

impl RedditClient {
    pub fn new(config: &RedditConfig) -> Result<Self, CoreError> {
        let http_client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(CoreError::Network)?;

        let oauth = auth::build_oauth_client(&config.client_id, &config.client_secret)?;

        let api_base = Url::parse(REDDIT_API_BASE).map_err(|e| CoreError::Internal {
            message: format!("invalid Reddit API base: {e}"),
        })?;

        Ok(Self {
            http_client,
            oauth,
            api_base,
            token: Mutex::new(None),
        })
    }

    /// Return the cached token, exchanging a fresh one when absent or stale.
    async fn access_token(&self) -> Result<String, CoreError> {
        let mut guard = self.token.lock().await;
        match guard.as_ref() {
            Some(token) if !token.needs_refresh() => Ok(token.access_token.clone()),
            _ => {
                let token = auth::exchange_app_token(&self.oauth).await?;
                let access_token = token.access_token.clone();
                *guard = Some(token);
                Ok(access_token)
            }
        }
    }

    /// Fetch up to `limit` of the newest posts in a subreddit, newest first
    /// as Reddit returns them.
    pub async fn fetch_new_posts(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<Post>, CoreError> {
        let access_token = self.access_token().await?;
        let endpoint = self
            .api_base
            .join(&format!("r/{subreddit}/new"))
            .map_err(|e| CoreError::Internal {
                message: format!("invalid subreddit path r/{subreddit}: {e}"),
            })?;
        let limit_str = limit.to_string();

        debug!("Fetching newest posts from r/{subreddit}");
        let response = self
            .http_client
            .get(endpoint)
            .bearer_auth(&access_token)
            .query(&[("limit", limit_str.as_str())])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            error!("Reddit request failed with status {status} for r/{subreddit}");
            return Err(map_status_error(&response, subreddit));
        }

        let listing: RedditListing<RedditPostData> = response.json().await.map_err(|e| {
            error!("Failed to parse listing for r/{subreddit}: {e}");
            CoreError::SourceFetch(SourceFetchError::InvalidResponse {
                details: format!("failed to parse posts for r/{subreddit}"),
            })
        })?;

        let posts: Vec<Post> = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data.into())
            .collect();

        info!("Retrieved {} posts from r/{subreddit}", posts.len());
        Ok(posts)
    }
}

impl PostSource for RedditClient {
    async fn recent_posts(&self, subreddit: &str, limit: u32) -> Result<Vec<Post>, CoreError> {
        self.fetch_new_posts(subreddit, limit).await
    }
}

fn map_transport_error(e: reqwest::Error) -> CoreError {
    let err = if e.is_timeout() {
        SourceFetchError::RequestTimeout
    } else {
        SourceFetchError::Network {
            details: e.to_string(),
        }
    };
    CoreError::SourceFetch(err)
}

fn map_status_error(response: &Response, subreddit: &str) -> CoreError {
    let status = response.status();
    let err = match status.as_u16() {
        401 => SourceFetchError::InvalidToken,
        403 => SourceFetchError::Forbidden {
            resource: format!("r/{subreddit}"),
        },
        404 => SourceFetchError::SubredditNotFound {
            subreddit: subreddit.to_string(),
        },
        429 => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok())
                .unwrap_or(60);
            SourceFetchError::RateLimitExceeded { retry_after }
        }
        code if status.is_server_error() => SourceFetchError::ServerError { status_code: code },
        code => SourceFetchError::InvalidResponse {
            details: format!("unexpected status {code} for r/{subreddit}"),
        },
    };
    CoreError::SourceFetch(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LISTING: &str = r#"{
        "kind": "Listing",
        "data": {
            "children": [
                {
                    "kind": "t3",
                    "data": {
                        "id": "abc123",
                        "title": "New Pipeline feature",
                        "selftext": "We shipped a new pipeline builder",
                        "subreddit": "salesforce",
                        "url": "https://reddit.com/r/salesforce/comments/abc123",
                        "created_utc": 1700000000.0,
                        "score": 42,
                        "num_comments": 5
                    }
                },
                {
                    "kind": "t3",
                    "data": {
                        "id": "def456",
                        "title": "Link post",
                        "subreddit": "salesforce",
                        "url": "https://example.com/article",
                        "created_utc": 1700000100.0,
                        "score": 1,
                        "num_comments": 0
                    }
                }
            ],
            "after": "t3_def456",
            "before": null
        }
    }"#;

    fn test_config() -> RedditConfig {
        RedditConfig {
            client_id: "test_client_id".to_string(),
            client_secret: "test_client_secret".to_string(),
            user_agent: "postwatch/0.1 test".to_string(),
        }
    }

    #[test]
    fn client_builds_from_config() {
        let client = RedditClient::new(&test_config());
        assert!(client.is_ok());
    }

    #[test]
    fn listing_deserializes_from_captured_payload() {
        let listing: RedditListing<RedditPostData> =
            serde_json::from_str(SAMPLE_LISTING).unwrap();

        assert_eq!(listing.kind, "Listing");
        assert_eq!(listing.data.children.len(), 2);
        assert_eq!(listing.data.after.as_deref(), Some("t3_def456"));

        let first = &listing.data.children[0].data;
        assert_eq!(first.id, "abc123");
        assert_eq!(first.score, 42);

        // selftext is absent on link posts and defaults to empty
        let second = &listing.data.children[1].data;
        assert_eq!(second.selftext, "");
    }

    #[test]
    fn post_conversion_keeps_consumed_fields() {
        let listing: RedditListing<RedditPostData> =
            serde_json::from_str(SAMPLE_LISTING).unwrap();
        let post: Post = listing.data.children[0].data.clone().into();

        assert_eq!(post.id, "abc123");
        assert_eq!(post.subreddit, "salesforce");
        assert_eq!(post.title, "New Pipeline feature");
        assert_eq!(post.body, "We shipped a new pipeline builder");
        assert_eq!(post.score, 42);
        assert_eq!(post.num_comments, 5);
        assert_eq!(post.created_at.timestamp(), 1_700_000_000);
    }
}
