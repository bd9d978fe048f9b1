use postwatch_core::{
    CoreError, ErrorScope, FailureScope, MonitorConfig, Notification, Notifier, PostSource,
};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Counters for one poll over all sources.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    pub sources_polled: usize,
    pub sources_failed: usize,
    pub posts_seen: usize,
    pub matches: usize,
    pub notifications_sent: usize,
    pub notifications_failed: usize,
}

/// The poll → filter → notify loop. Owns the immutable configuration and
/// both collaborators; everything runs sequentially on one task.
pub struct Monitor<S, N> {
    config: MonitorConfig,
    source: S,
    notifier: N,
}

impl<S: PostSource, N: Notifier> Monitor<S, N> {
    pub fn new(config: MonitorConfig, source: S, notifier: N) -> Self {
        Self {
            config,
            source,
            notifier,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Poll every source once. Source- and notification-scoped failures are
    /// logged and skipped; only cycle-scoped failures abandon the pass.
    ///
    /// There is no memory of previous cycles: a post still inside the
    /// "newest N" window on the next pass is matched and notified again.
    pub async fn run_cycle(&self) -> Result<CycleSummary, CoreError> {
        let mut summary = CycleSummary::default();

        for subreddit in &self.config.sources {
            summary.sources_polled += 1;

            let posts = match self
                .source
                .recent_posts(subreddit, self.config.fetch_limit)
                .await
            {
                Ok(posts) => posts,
                Err(err) => {
                    if err.scope() == FailureScope::Cycle {
                        return Err(err);
                    }
                    warn!("Skipping r/{subreddit} this cycle: {err}");
                    summary.sources_failed += 1;
                    continue;
                }
            };

            summary.posts_seen += posts.len();
            for post in &posts {
                if !self.config.keywords.matches_post(post) {
                    continue;
                }
                summary.matches += 1;
                info!("Found matching post in r/{}: {}", post.subreddit, post.title);

                let notification = Notification::from_post(post);
                match self.notifier.notify(&notification).await {
                    Ok(()) => summary.notifications_sent += 1,
                    Err(err) => {
                        if err.scope() == FailureScope::Cycle {
                            return Err(err);
                        }
                        warn!("Failed to deliver notification for {}: {err}", post.url);
                        summary.notifications_failed += 1;
                    }
                }
            }
        }

        Ok(summary)
    }

    /// Drive cycles until the shutdown signal fires, waiting the configured
    /// interval after each cycle regardless of outcome. The signal cancels
    /// an in-flight cycle and cuts the wait short; a dropped sender counts
    /// as shutdown.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!("Monitoring subreddits: {}", self.config.sources.join(", "));
        info!(
            "Looking for keywords: {}",
            self.config.keywords.as_slice().join(", ")
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                result = self.run_cycle() => {
                    match result {
                        Ok(summary) => info!(
                            "Cycle complete: {}/{} sources ok, {} posts seen, {} matches, {} sent, {} failed",
                            summary.sources_polled - summary.sources_failed,
                            summary.sources_polled,
                            summary.posts_seen,
                            summary.matches,
                            summary.notifications_sent,
                            summary.notifications_failed,
                        ),
                        Err(err) => error!("Cycle abandoned: {err}"),
                    }
                }
                _ = shutdown.changed() => break,
            }

            debug!("Waiting {:?} until next cycle", self.config.poll_interval);
            tokio::select! {
                _ = tokio::time::sleep(self.config.poll_interval) => {}
                _ = shutdown.changed() => break,
            }
        }

        info!("Monitor loop stopped");
    }
}
