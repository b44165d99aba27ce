use std::time::Duration;

/// When a criteria change turns into a fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshPolicy {
    /// Quiet period after a change before the fetch is sent. A newer change
    /// during this period supersedes the pending fetch.
    pub debounce: Duration,
}

impl RefreshPolicy {
    /// Fetch on every change.
    pub fn immediate() -> Self {
        Self {
            debounce: Duration::ZERO,
        }
    }

    pub fn debounced(debounce: Duration) -> Self {
        Self { debounce }
    }
}

/// What the list view should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    /// No fetch has completed yet.
    NotLoaded,
    Loading,
    /// The last fetch failed; the previous list is kept.
    Failed { error: String },
    /// The server returned no recipes.
    Empty,
    /// Recipes exist but none pass the current criteria.
    NoMatches,
    Ready { count: usize },
}

impl ViewStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewStatus::Loading)
    }

    /// Whether a retry affordance should be offered.
    pub fn can_retry(&self) -> bool {
        matches!(self, ViewStatus::Failed { .. })
    }
}

/// Result of one fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list was replaced with `count` recipes.
    Applied { count: usize },
    /// The fetch failed; the previous list is kept.
    Failed { error: String },
    /// A newer criteria change was issued before this fetch completed.
    Superseded,
    /// The list was disposed before the fetch completed.
    Disposed,
}
