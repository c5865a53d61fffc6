//! Shared application state handed to every HTTP handler.

use std::sync::Arc;

use crate::config::TimingConfig;
use crate::room::RoomRegistry;

#[derive(Clone)]
pub struct AppState {
    registry: Arc<RoomRegistry>,
}

impl AppState {
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            registry: RoomRegistry::new(timing),
        }
    }

    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }
}
