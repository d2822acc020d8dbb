use std::sync::Arc;
use vending_core::workflow::CommitWorkflow;

/// Shared application state passed to all route handlers.
///
/// The workflow itself is immutable, so cloning the state per request is a
/// pointer copy; concurrent requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<CommitWorkflow>,
}

impl AppState {
    pub fn new(workflow: CommitWorkflow) -> Self {
        Self {
            workflow: Arc::new(workflow),
        }
    }
}
