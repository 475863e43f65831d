// Exercise tabs

use crate::client::Gemini;
use crate::config::ShowcaseConfig;
use crate::controller::ViewController;
use crate::gateway::{AnalysisGateway, GenerationProvider};
use crate::prompt::ExerciseKind;
use crate::types::*;
use std::sync::{Arc, Mutex, MutexGuard};

/// The set of exercise tabs, with at most one mounted at a time.
///
/// Switching tabs tears the previous controller down, so a request still
/// running there can never update the tab that replaced it. Controllers
/// share nothing but the provider handle.
pub struct Showcase {
    gateway: AnalysisGateway,
    active: Mutex<Option<Arc<ViewController>>>,
}

impl Showcase {
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            gateway: AnalysisGateway::new(provider),
            active: Mutex::new(None),
        }
    }

    /// Showcase backed by the Gemini client
    pub fn from_config(config: &ShowcaseConfig) -> ShowcaseResult<Self> {
        Ok(Self::new(Arc::new(Gemini::from_config(config)?)))
    }

    /// Exercises in tab order
    pub fn exercises(&self) -> &'static [ExerciseKind] {
        &ExerciseKind::ALL
    }

    /// Mount the tab for `kind`.
    ///
    /// Selecting the tab that is already mounted returns it unchanged.
    /// Any other selection tears down the current tab and starts the new
    /// one in `Idle`.
    pub fn select(&self, kind: ExerciseKind) -> Arc<ViewController> {
        let mut active = self.lock();

        if let Some(current) = active.as_ref() {
            if current.kind() == kind && current.is_mounted() {
                return Arc::clone(current);
            }
        }

        if let Some(previous) = active.take() {
            tracing::debug!(from = %previous.kind(), to = %kind, "switching tab");
            previous.teardown();
        }

        let controller = Arc::new(ViewController::new(kind, self.gateway.clone()));
        *active = Some(Arc::clone(&controller));
        controller
    }

    /// The mounted tab, if any
    pub fn current(&self) -> Option<Arc<ViewController>> {
        self.lock().as_ref().map(Arc::clone)
    }

    /// Tear down the mounted tab and leave none mounted
    pub fn close(&self) {
        if let Some(previous) = self.lock().take() {
            previous.teardown();
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<ViewController>>> {
        // The guarded value is a single Option swap, never left half-updated
        match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Drop for Showcase {
    fn drop(&mut self) {
        self.close();
    }
}
