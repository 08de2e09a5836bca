//! Run coordinator
//!
//! Drives one run through its stages:
//!
//! ```text
//! Start -> WatermarkLoaded -> Fetched -> Filtered -> Idle ----------------> WatermarkSaved -> Done
//!                                                 \-> Composed -> Dispatched -/
//! ```
//!
//! Any error moves the run to `Failed` and the watermark stays where it was.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::Watermark;
use crate::error::NotifyError;
use crate::filter;
use crate::github::GistSource;
use crate::mail::NotificationDispatcher;
use crate::report::ReportComposer;
use crate::store::WatermarkStore;

/// Stage of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Start,
    WatermarkLoaded,
    Fetched,
    Filtered,
    /// Nothing qualified; no mail is sent
    Idle,
    Composed,
    Dispatched,
    WatermarkSaved,
    Done,
    Failed,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::WatermarkLoaded => "watermark-loaded",
            Self::Fetched => "fetched",
            Self::Filtered => "filtered",
            Self::Idle => "idle",
            Self::Composed => "composed",
            Self::Dispatched => "dispatched",
            Self::WatermarkSaved => "watermark-saved",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Watermark the comments were compared against
    pub since: Watermark,
    /// Watermark persisted at the end of the run
    pub next: Watermark,
    /// Number of gists with new or updated comments
    pub updated: usize,
    /// The digest, when one was sent
    pub report: Option<String>,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} updated since {}", self.updated, self.since)
    }
}

/// Wires the pipeline stages together for one user
pub struct RunCoordinator {
    user: String,
    store: WatermarkStore,
    source: GistSource,
    composer: ReportComposer,
    dispatcher: NotificationDispatcher,
}

impl RunCoordinator {
    pub fn new(
        user: impl Into<String>,
        store: WatermarkStore,
        source: GistSource,
        composer: ReportComposer,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        let user = user.into();
        debug!(%user, store = ?store.path(), "RunCoordinator::new: called");
        Self {
            user,
            store,
            source,
            composer,
            dispatcher,
        }
    }

    /// Run the pipeline once, starting now
    pub async fn run(&self) -> Result<RunSummary, NotifyError> {
        self.run_at(Watermark::new(Utc::now())).await
    }

    /// Run the pipeline once with `now` as the run start time
    ///
    /// `now` becomes the new watermark if the run succeeds.
    pub async fn run_at(&self, now: Watermark) -> Result<RunSummary, NotifyError> {
        debug!(user = %self.user, %now, "RunCoordinator::run_at: called");
        let mut state = RunState::Start;
        let result = self.execute(now, &mut state).await;
        if let Err(e) = &result {
            warn!(from = %state, error = %e, "Run failed, watermark not advanced");
            transition(&mut state, RunState::Failed);
        }
        result
    }

    async fn execute(&self, now: Watermark, state: &mut RunState) -> Result<RunSummary, NotifyError> {
        let since = self.store.load(now)?;
        transition(state, RunState::WatermarkLoaded);
        info!(%since, "Checking gists of {} for comments", self.user);

        let gists = self.source.fetch_all(&self.user).await?;
        transition(state, RunState::Fetched);

        let updated = filter::select(gists, &since);
        transition(state, RunState::Filtered);
        info!("{} gists updated since {}", updated.len(), since);

        let report = if updated.is_empty() {
            transition(state, RunState::Idle);
            None
        } else {
            let report = self.composer.render(&updated, &since)?;
            transition(state, RunState::Composed);

            self.dispatcher.send(&report).await?;
            transition(state, RunState::Dispatched);
            Some(report)
        };

        self.store.save(now)?;
        transition(state, RunState::WatermarkSaved);

        transition(state, RunState::Done);
        Ok(RunSummary {
            since,
            next: now,
            updated: updated.len(),
            report,
        })
    }
}

fn transition(state: &mut RunState, next: RunState) {
    debug!(from = %state, to = %next, "transition");
    *state = next;
}
