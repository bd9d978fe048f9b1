use crate::error::CoreError;
use tracing::{error, warn};

/// How far a failure reaches. The loop consults this to decide whether to
/// skip the failed unit and continue, or abandon the cycle and wait out the
/// interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureScope {
    /// One source's fetch failed; remaining sources still run this cycle.
    Source,
    /// One notification's dispatch failed; remaining matches still dispatch.
    Notification,
    /// Anything else; the cycle is abandoned and retried after the wait.
    Cycle,
}

pub trait ErrorScope {
    fn scope(&self) -> FailureScope;
    fn log_scoped(&self);
}

impl ErrorScope for CoreError {
    fn scope(&self) -> FailureScope {
        match self {
            CoreError::SourceFetch(_) => FailureScope::Source,
            CoreError::NotifyDispatch(_) => FailureScope::Notification,
            _ => FailureScope::Cycle,
        }
    }

    fn log_scoped(&self) {
        match self.scope() {
            FailureScope::Source | FailureScope::Notification => warn!("{self}"),
            FailureScope::Cycle => error!("{self}"),
        }
    }
}
