//! HTTP API for the study assistant

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::assistant::StudyAssistant;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<dyn StudyAssistant>,
}

impl AppState {
    pub fn new(assistant: Arc<dyn StudyAssistant>) -> Self {
        Self { assistant }
    }
}
