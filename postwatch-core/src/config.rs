use std::env;
use std::time::Duration;

use crate::error::ConfigError;
use crate::matching::KeywordSet;

pub const DEFAULT_SUBREDDITS: &[&str] =
    &["salesforce", "crm", "salesforcedeveloper", "sales", "techsales"];
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "pipeline",
    "report",
    "analysis",
    "flow",
    "templates",
    "agentforce",
    "automate",
];
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(300);
pub const DEFAULT_FETCH_LIMIT: u32 = 10;

/// Immutable loop configuration: sources, keywords and cadence are fixed
/// for the process lifetime.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub sources: Vec<String>,
    pub keywords: KeywordSet,
    pub poll_interval: Duration,
    pub fetch_limit: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SUBREDDITS.iter().map(|s| s.to_string()).collect(),
            keywords: KeywordSet::new(DEFAULT_KEYWORDS),
            poll_interval: DEFAULT_POLL_INTERVAL,
            fetch_limit: DEFAULT_FETCH_LIMIT,
        }
    }
}

impl MonitorConfig {
    /// Built-in defaults, overridable through `POSTWATCH_SUBREDDITS`,
    /// `POSTWATCH_KEYWORDS` (comma-separated) and `POSTWATCH_INTERVAL_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("POSTWATCH_SUBREDDITS") {
            config.sources = parse_list(&raw);
            if config.sources.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "POSTWATCH_SUBREDDITS".to_string(),
                    value: raw,
                });
            }
        }

        if let Ok(raw) = env::var("POSTWATCH_KEYWORDS") {
            let keywords = KeywordSet::new(parse_list(&raw));
            if keywords.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "POSTWATCH_KEYWORDS".to_string(),
                    value: raw,
                });
            }
            config.keywords = keywords;
        }

        if let Ok(raw) = env::var("POSTWATCH_INTERVAL_SECS") {
            config.poll_interval = parse_interval("POSTWATCH_INTERVAL_SECS", &raw)?;
        }

        Ok(config)
    }
}

/// Reddit app credentials for the app-only grant.
#[derive(Debug, Clone)]
pub struct RedditConfig {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl RedditConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: require_env("REDDIT_CLIENT_ID")?,
            client_secret: require_env("REDDIT_CLIENT_SECRET")?,
            user_agent: format!("postwatch/{}", env!("CARGO_PKG_VERSION")),
        })
    }
}

/// Slack bot token and target channel.
#[derive(Debug, Clone)]
pub struct SlackConfig {
    pub bot_token: String,
    pub channel: String,
}

impl SlackConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bot_token: require_env("SLACK_BOT_TOKEN")?,
            channel: require_env("SLACK_CHANNEL")?,
        })
    }
}

fn require_env(var_name: &str) -> Result<String, ConfigError> {
    match env::var(var_name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvironmentVariable {
            var_name: var_name.to_string(),
        }),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn parse_interval(field: &str, raw: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        field: field.to_string(),
        value: raw.to_string(),
    };
    let secs: u64 = raw.trim().parse().map_err(|_| invalid())?;
    if secs == 0 {
        return Err(invalid());
    }
    Ok(Duration::from_secs(secs))
}
