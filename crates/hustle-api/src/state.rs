//! Shared application state.

use std::sync::Arc;

use hustle_core::clock::Clock;
use hustle_core::messaging::MessagingGateway;
use hustle_core::repository::ProgressRepository;
use hustle_narrative::domain::script::Script;

/// Application state shared across all request handlers. Every collaborator
/// of a turn is injected here so tests can swap in deterministic doubles.
#[derive(Clone)]
pub struct AppState {
    /// Source of save timestamps.
    pub clock: Arc<dyn Clock>,
    /// Player progress store.
    pub progress_repository: Arc<dyn ProgressRepository>,
    /// Outbound SMS delivery.
    pub gateway: Arc<dyn MessagingGateway>,
    /// The narrative being played.
    pub script: &'static Script,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        progress_repository: Arc<dyn ProgressRepository>,
        gateway: Arc<dyn MessagingGateway>,
        script: &'static Script,
    ) -> Self {
        Self {
            clock,
            progress_repository,
            gateway,
            script,
        }
    }
}
