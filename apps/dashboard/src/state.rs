use std::sync::Arc;

use coachdesk_application::{BackendConnector, SessionGate};
use coachdesk_infrastructure::InMemoryBackend;

use crate::views::Templates;
use crate::workbenches::WorkbenchRegistry;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub session_gate: SessionGate,
    pub connector: Arc<dyn BackendConnector>,
    pub workbenches: WorkbenchRegistry,
    pub templates: Templates,
    pub default_section: String,
    /// Set when objects live in process memory and must be served by the dashboard.
    pub dev_objects: Option<InMemoryBackend>,
}
