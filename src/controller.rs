//! View Controller.
//!
//! One controller backs one exercise tab. It validates input through the
//! prompt builder, runs the gateway, formats the result and publishes the
//! resulting [`ViewState`] on a watch channel the rendering layer
//! subscribes to.
//!
//! Every submission takes a generation number. An outcome is applied only
//! if its generation is still the latest when it arrives, so overlapping
//! submissions resolve to the most recent one regardless of completion
//! order. `clear` and `teardown` also advance the generation, which makes
//! any in-flight outcome stale.

use crate::gateway::AnalysisGateway;
use crate::presenter::{self, DisplayModel};
use crate::prompt::{self, AnalysisRequest, ExerciseKind};
use crate::types::*;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::watch;

/// What the presentation layer shows for a tab
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ViewState {
    Idle,
    Loading,
    Displaying(DisplayModel),
    /// Localized, user-facing failure text
    Failed(String),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn result(&self) -> Option<&DisplayModel> {
        match self {
            ViewState::Displaying(model) => Some(model),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What happened to a submission's outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The outcome is now the controller's state
    Applied,
    /// A newer submission or a clear arrived first; the outcome was dropped
    Superseded,
    /// The controller was torn down; the outcome was dropped
    Discarded,
}

pub struct ViewController {
    kind: ExerciseKind,
    gateway: AnalysisGateway,
    state: watch::Sender<ViewState>,
    generation: AtomicU64,
    mounted: AtomicBool,
}

impl ViewController {
    pub fn new(kind: ExerciseKind, gateway: AnalysisGateway) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            kind,
            gateway,
            state,
            generation: AtomicU64::new(0),
            mounted: AtomicBool::new(true),
        }
    }

    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Run one analysis.
    ///
    /// Invalid input returns the validation error and leaves the state
    /// untouched; the provider is not called. Provider failures are not
    /// returned: they end up as [`ViewState::Failed`] with the exercise's
    /// generic message.
    #[tracing::instrument(name = "controller.submit", skip_all, fields(kind = %self.kind))]
    pub async fn submit(&self, request: AnalysisRequest) -> ShowcaseResult<Submission> {
        if request.kind() != self.kind {
            return Err(ShowcaseError::InvalidParameter(format!(
                "{} controller cannot run a {} request",
                self.kind,
                request.kind()
            )));
        }

        let prepared = prompt::build(&request)?;

        let mut started = None;
        self.state.send_if_modified(|state| {
            if !self.mounted.load(Ordering::SeqCst) {
                return false;
            }
            started = Some(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
            *state = ViewState::Loading;
            true
        });
        let Some(generation) = started else {
            tracing::debug!("submit on unmounted controller ignored");
            return Ok(Submission::Discarded);
        };
        tracing::debug!(generation, "request started");

        let next = match self.gateway.execute(&prepared).await {
            Ok(result) => ViewState::Displaying(presenter::format(&result)),
            Err(err) => {
                tracing::warn!(
                    generation,
                    provider_kind = ?err.provider_kind(),
                    status = ?err.status(),
                    error = %err,
                    "analysis failed"
                );
                ViewState::Failed(err.user_message(self.kind.failure_message()))
            }
        };

        Ok(self.apply(generation, next))
    }

    /// Return to `Idle`; an in-flight request's outcome will be dropped
    pub fn clear(&self) {
        self.state.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = ViewState::Idle;
        });
    }

    /// Mark the tab as gone. Later outcomes and submissions are dropped
    /// without touching the state.
    pub fn teardown(&self) {
        // Taken under the channel's write lock, same as `submit` and `apply`
        self.state.send_if_modified(|_| {
            self.mounted.store(false, Ordering::SeqCst);
            self.generation.fetch_add(1, Ordering::SeqCst);
            false
        });
    }

    fn apply(&self, generation: u64, next: ViewState) -> Submission {
        let mut next = Some(next);
        let mut outcome = Submission::Superseded;
        self.state.send_if_modified(|state| {
            if !self.mounted.load(Ordering::SeqCst) {
                outcome = Submission::Discarded;
                return false;
            }
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            if let Some(next) = next.take() {
                *state = next;
            }
            outcome = Submission::Applied;
            true
        });

        match outcome {
            Submission::Discarded => tracing::debug!(generation, "outcome discarded after teardown"),
            Submission::Superseded => tracing::debug!(generation, "stale outcome dropped"),
            Submission::Applied => {}
        }
        outcome
    }
}
